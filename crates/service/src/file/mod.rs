//! File-backed stores for the two record containers.

pub mod products;
pub mod users;

pub use products::ProductStore;
pub use users::UserStore;
