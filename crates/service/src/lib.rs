//! Service layer for the storefront: product catalog, visitor accounts and
//! admin sessions.
//! - Record containers are JSON files managed by `storage`.
//! - `file` holds the concrete product and user stores.
//! - `auth` holds credential checks, registration and the session registry.

pub mod errors;
pub mod auth;
pub mod runtime;
pub mod storage;
pub mod catalog;
pub mod ids;
pub mod input;
pub mod file;
pub mod admin;
