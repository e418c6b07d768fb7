//! Admin session registry.
//!
//! A token is active from creation until it is revoked. There is no expiry;
//! the in-memory store forgets every token when the process exits.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::ids;

/// Trait abstraction for the set of active admin session tokens.
/// Implementations can be in-memory, file-backed, or a shared remote KV.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Issue a fresh token and mark it active.
    async fn create(&self) -> String;
    /// Whether `token` is currently active. Empty tokens never are.
    async fn is_valid(&self, token: &str) -> bool;
    /// Deactivate `token`. Unknown or empty tokens are ignored.
    async fn revoke(&self, token: &str);
    async fn active_count(&self) -> usize;
}

/// Process-local session set.
#[derive(Default)]
pub struct InMemorySessionStore {
    tokens: RwLock<HashSet<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> String {
        let mut tokens = self.tokens.write().await;
        let mut token = ids::session_token();
        while !tokens.insert(token.clone()) {
            token = ids::session_token();
        }
        debug!(active = tokens.len(), "session_created");
        token
    }

    async fn is_valid(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        self.tokens.read().await.contains(token)
    }

    async fn revoke(&self, token: &str) {
        if token.is_empty() {
            return;
        }
        let mut tokens = self.tokens.write().await;
        if tokens.remove(token) {
            debug!(active = tokens.len(), "session_revoked");
        }
    }

    async fn active_count(&self) -> usize {
        self.tokens.read().await.len()
    }
}
