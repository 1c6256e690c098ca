use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use verigate_core::{RevokedTokenStore, RevokedTokenStoreError};

/// Set-backed revocation store for tests and local runs. Entries live for
/// the process lifetime; only the Redis store applies a TTL.
#[derive(Default, Clone)]
pub struct InMemoryRevokedTokenStore {
    tokens: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryRevokedTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RevokedTokenStore for InMemoryRevokedTokenStore {
    async fn revoke_token(&self, token: String) -> Result<(), RevokedTokenStoreError> {
        self.tokens.write().await.insert(token);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevokedTokenStoreError> {
        Ok(self.tokens.read().await.contains(token))
    }
}
