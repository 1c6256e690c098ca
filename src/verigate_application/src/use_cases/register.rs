use verigate_core::{EmailClient, NewUser, OtpStore, User, UserStore, UserStoreError};

use crate::otp::{OtpIssueError, OtpIssuer};

/// Error types for the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    #[error(transparent)]
    Otp(#[from] OtpIssueError),
}

/// Register use case - creates an account and dispatches its first OTP
pub struct RegisterUseCase<U, O, E>
where
    U: UserStore,
    O: OtpStore,
    E: EmailClient,
{
    user_store: U,
    otp_store: O,
    email_client: E,
}

impl<U, O, E> RegisterUseCase<U, O, E>
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

    /// Creates the account unverified and sends it a code.
    ///
    /// Submitting the exact email/username pair of an existing account
    /// re-issues a code for it instead of failing, so an interrupted signup
    /// can be retried. An email or username collision with any other account
    /// is a duplicate error.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, new_user: NewUser) -> Result<User, RegisterError> {
        let issuer = OtpIssuer::new(&self.user_store, &self.otp_store, &self.email_client);

        match self.user_store.get_user(&new_user.email).await {
            Ok(existing) if existing.username() == &new_user.username => {
                issuer.issue(existing.email()).await?;
                return Ok(existing);
            }
            Ok(_) => return Err(UserStoreError::UserAlreadyExists.into()),
            Err(UserStoreError::UserNotFound) => {}
            Err(error) => return Err(error.into()),
        }

        let user = self.user_store.add_user(new_user).await?;
        issuer.issue(user.email()).await?;

        Ok(user)
    }
}
