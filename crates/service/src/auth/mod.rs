//! Auth module: domain, repository, session registry and service.
//!
//! Covers the single configured administrator (credential check plus opaque
//! session tokens) and visitor accounts (registration and login).

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod session;

pub use service::AuthService;
pub use session::{InMemorySessionStore, SessionStore};
