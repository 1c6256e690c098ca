use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use verigate_core::{Email, OtpRecord, OtpStore, OtpStoreError};

/// Map-backed OTP store. Inserting under an existing key is the replace
/// semantics the port requires.
#[derive(Default, Clone)]
pub struct InMemoryOtpStore {
    records: Arc<RwLock<HashMap<Email, OtpRecord>>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put_code(&self, email: Email, record: OtpRecord) -> Result<(), OtpStoreError> {
        self.records.write().await.insert(email, record);
        Ok(())
    }

    async fn get_code(&self, email: &Email) -> Result<OtpRecord, OtpStoreError> {
        self.records
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(OtpStoreError::NotFound)
    }

    async fn delete_code(&self, email: &Email) -> Result<(), OtpStoreError> {
        self.records
            .write()
            .await
            .remove(email)
            .ok_or(OtpStoreError::NotFound)?;
        Ok(())
    }
}
