use std::sync::Arc;

use redis::{Commands, Connection};
use tokio::sync::RwLock;

use verigate_core::{RevokedTokenStore, RevokedTokenStoreError};

#[derive(Clone)]
pub struct RedisRevokedTokenStore {
    conn: Arc<RwLock<Connection>>,
    token_ttl: u64,
}

impl RedisRevokedTokenStore {
    /// `token_ttl` should cover the longest-lived token this store may be
    /// asked to revoke; expired entries are useless anyway.
    pub fn new(conn: Arc<RwLock<Connection>>, token_ttl: u64) -> Self {
        Self { conn, token_ttl }
    }
}

#[async_trait::async_trait]
impl RevokedTokenStore for RedisRevokedTokenStore {
    async fn revoke_token(&self, token: String) -> Result<(), RevokedTokenStoreError> {
        let key = get_key(&token);

        let mut conn = self.conn.write().await;
        conn.set_ex(key, true, self.token_ttl)
            .map_err(|e| RevokedTokenStoreError::DatabaseError(e.to_string()))
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevokedTokenStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.write().await;
        conn.exists(&key)
            .map_err(|e| RevokedTokenStoreError::DatabaseError(e.to_string()))
    }
}

// Key prefix to prevent collisions with other data in the same instance.
const REVOKED_TOKEN_KEY_PREFIX: &str = "revoked_token:";

fn get_key(token: &str) -> String {
    format!("{}{}", REVOKED_TOKEN_KEY_PREFIX, token)
}
