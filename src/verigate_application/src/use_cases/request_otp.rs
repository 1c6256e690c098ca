use verigate_core::{Email, EmailClient, OtpStore, UserStore, UserStoreError};

use crate::otp::{OtpIssueError, OtpIssuer};

/// Error types for the request-OTP use case
#[derive(Debug, thiserror::Error)]
pub enum RequestOtpError {
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    #[error(transparent)]
    Otp(#[from] OtpIssueError),
}

/// Request-OTP use case - re-issues a code for an existing account.
///
/// Verified accounts may still request codes: login consumes one per
/// attempt, so a resend path has to stay open.
pub struct RequestOtpUseCase<U, O, E>
where
    U: UserStore,
    O: OtpStore,
    E: EmailClient,
{
    user_store: U,
    otp_store: O,
    email_client: E,
}

impl<U, O, E> RequestOtpUseCase<U, O, E>
where
    U: UserStore,
    O: OtpStore,
    E: EmailClient + Clone + Send + Sync + 'static,
{
    pub fn new(user_store: U, otp_store: O, email_client: E) -> Self {
        Self {
            user_store,
            otp_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "RequestOtpUseCase::execute", skip_all)]
    pub async fn execute(&self, email: &Email) -> Result<(), RequestOtpError> {
        let user = self.user_store.get_user(email).await?;

        OtpIssuer::new(&self.user_store, &self.otp_store, &self.email_client)
            .issue(user.email())
            .await?;

        Ok(())
    }
}
