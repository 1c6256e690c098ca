use verigate_core::{
    Email, OtpStore, OtpStoreError, Password, TokenIssuer, TokenIssuerError, TokenPair, UserStore,
    UserStoreError,
};

use crate::otp::{OtpValidationError, OtpValidator};

/// Error types for the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Your email is not verified yet")]
    EmailNotVerified,
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    #[error(transparent)]
    Otp(#[from] OtpValidationError),
    #[error(transparent)]
    OtpStore(#[from] OtpStoreError),
    #[error(transparent)]
    TokenIssuer(#[from] TokenIssuerError),
}

/// Login use case - one more verification event reusing the OTP machinery,
/// gated on the account being verified, before credentials are issued.
pub struct LoginUseCase<U, O, T>
where
    U: UserStore,
    O: OtpStore,
    T: TokenIssuer,
{
    user_store: U,
    otp_store: O,
    token_issuer: T,
}

impl<U, O, T> LoginUseCase<U, O, T>
where
    U: UserStore,
    O: OtpStore,
    T: TokenIssuer,
{
    pub fn new(user_store: U, otp_store: O, token_issuer: T) -> Self {
        Self {
            user_store,
            otp_store,
            token_issuer,
        }
    }

    /// Checks verification state, password and OTP in that order, then
    /// consumes the code and issues an access/refresh pair. The code spent
    /// on account verification cannot be reused here; a fresh one must be
    /// requested in between.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: &Email,
        password: &Password,
        submitted: &str,
    ) -> Result<TokenPair, LoginError> {
        let user = self.user_store.get_user(email).await?;

        if !user.is_verified() {
            return Err(LoginError::EmailNotVerified);
        }

        self.user_store.verify_password(email, password).await?;

        OtpValidator::new(&self.user_store, &self.otp_store)
            .validate(&user, submitted)
            .await?;

        self.user_store.reset_otp_tries(email).await?;
        self.otp_store.delete_code(email).await?;

        let auth_token = self.token_issuer.issue_access_token(&user)?;
        let refresh_token = self.token_issuer.issue_refresh_token(&user)?;

        Ok(TokenPair {
            auth_token,
            refresh_token,
        })
    }
}
