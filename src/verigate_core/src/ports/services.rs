use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{email::Email, user::User};

/// Port trait for the mail-delivery channel. Delivery is best-effort;
/// callers dispatch without waiting on the outcome.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum TokenIssuerError {
    #[error("Failed to sign token: {0}")]
    SigningError(String),
}

/// Port trait for the credential-issuance primitive: produces signed tokens
/// bound to a user identity, each carrying its own expiry.
pub trait TokenIssuer: Send + Sync {
    fn issue_access_token(&self, user: &User) -> Result<Secret<String>, TokenIssuerError>;
    fn issue_refresh_token(&self, user: &User) -> Result<Secret<String>, TokenIssuerError>;
}

/// The credentials returned by a successful login.
pub struct TokenPair {
    pub auth_token: Secret<String>,
    pub refresh_token: Secret<String>,
}
