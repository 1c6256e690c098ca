use verigate_core::{Email, OtpStore, OtpStoreError, UserStore, UserStoreError};

use crate::otp::{OtpValidationError, OtpValidator};

/// Error types for the verify-account use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyAccountError {
    #[error("Email already verified")]
    AlreadyVerified,
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    #[error(transparent)]
    Otp(#[from] OtpValidationError),
    #[error(transparent)]
    OtpStore(#[from] OtpStoreError),
}

/// Verify-account use case - the one transition from unverified to verified.
pub struct VerifyAccountUseCase<U, O>
where
    U: UserStore,
    O: OtpStore,
{
    user_store: U,
    otp_store: O,
}

impl<U, O> VerifyAccountUseCase<U, O>
where
    U: UserStore,
    O: OtpStore,
{
    pub fn new(user_store: U, otp_store: O) -> Self {
        Self {
            user_store,
            otp_store,
        }
    }

    /// Consumes the submitted code and marks the account verified.
    ///
    /// The already-verified guard runs after code validation, so a verified
    /// account submitting a bad code still burns a retry. Success deletes
    /// the record; a repeat call therefore fails rather than succeeding
    /// twice.
    #[tracing::instrument(name = "VerifyAccountUseCase::execute", skip_all)]
    pub async fn execute(&self, email: &Email, submitted: &str) -> Result<(), VerifyAccountError> {
        let user = self.user_store.get_user(email).await?;

        OtpValidator::new(&self.user_store, &self.otp_store)
            .validate(&user, submitted)
            .await?;

        if user.is_verified() {
            return Err(VerifyAccountError::AlreadyVerified);
        }

        self.user_store.mark_verified(email).await?;
        self.otp_store.delete_code(email).await?;

        Ok(())
    }
}
