//! Shared plumbing for the storefront crates: logging setup, startup
//! environment checks and small wire types.

pub mod types;
pub mod utils;
pub mod env;
