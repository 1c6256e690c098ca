use verigate_core::{RevokedTokenStore, RevokedTokenStoreError};

/// Error types for the logout use case
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error(transparent)]
    RevokedTokenStore(#[from] RevokedTokenStoreError),
}

/// Logout use case - invalidates the session credential presented with the
/// request. Proving the credential was presented and valid is the caller's
/// job; this only records the revocation.
pub struct LogoutUseCase<R>
where
    R: RevokedTokenStore,
{
    revoked_token_store: R,
}

impl<R> LogoutUseCase<R>
where
    R: RevokedTokenStore,
{
    pub fn new(revoked_token_store: R) -> Self {
        Self {
            revoked_token_store,
        }
    }

    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(&self, token: String) -> Result<(), LogoutError> {
        self.revoked_token_store.revoke_token(token).await?;
        Ok(())
    }
}
