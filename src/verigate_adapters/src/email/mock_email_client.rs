use std::sync::Arc;

use tokio::sync::RwLock;

use verigate_core::{Email, EmailClient};

/// A delivery as the mock saw it.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: Email,
    pub subject: String,
    pub content: String,
}

/// Email client that records deliveries instead of sending them, so tests
/// can assert on what was dispatched.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    outbox: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.outbox.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        self.outbox.write().await.push(SentEmail {
            recipient: recipient.clone(),
            subject: subject.to_owned(),
            content: content.to_owned(),
        });
        Ok(())
    }
}
