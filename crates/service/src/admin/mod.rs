//! Storage-facing traits consumed by the admin routes.

pub mod catalog_store;
