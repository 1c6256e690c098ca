//! OTP generation and validation policy shared by account verification and
//! login.

use chrono::{Duration, Utc};

use verigate_core::{
    Email, EmailClient, OtpCode, OtpRecord, OtpStore, OtpStoreError, User, UserStore,
    UserStoreError,
};

/// Validity window of a freshly generated code.
pub const OTP_TTL_MINUTES: i64 = 15;

/// Failed attempts beyond this count lock further validation until a
/// successful generate, verify or login resets the counter.
pub const MAX_OTP_TRIES: u32 = 5;

const OTP_EMAIL_SUBJECT: &str = "Your verification code";

/// Error types for OTP issuance
#[derive(Debug, thiserror::Error)]
pub enum OtpIssueError {
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    #[error(transparent)]
    OtpStore(#[from] OtpStoreError),
}

/// Generates codes and hands them to the mail channel. Issuing replaces any
/// prior record for the user and resets the retry counter.
pub struct OtpIssuer<'a, U, O, E>
where
    U: UserStore,
    O: OtpStore,
    E: EmailClient,
{
    user_store: &'a U,
    otp_store: &'a O,
    email_client: &'a E,
}

impl<'a, U, O, E> OtpIssuer<'a, U, O, E>
where
    U: UserStore,
    O: OtpStore,
    E: EmailClient + Clone + Send + Sync + 'static,
{
    pub fn new(user_store: &'a U, otp_store: &'a O, email_client: &'a E) -> Self {
        Self {
            user_store,
            otp_store,
            email_client,
        }
    }

    /// Issues a fresh code for the recipient and dispatches it by email
    /// without waiting on delivery. Returns the plaintext code.
    #[tracing::instrument(name = "OtpIssuer::issue", skip_all)]
    pub async fn issue(&self, recipient: &Email) -> Result<OtpCode, OtpIssueError> {
        let code = OtpCode::new();
        let expires_at = Utc::now() + Duration::minutes(OTP_TTL_MINUTES);

        self.otp_store
            .put_code(recipient.clone(), OtpRecord::new(code.clone(), expires_at))
            .await?;
        self.user_store.reset_otp_tries(recipient).await?;

        // Delivery is fire-and-forget: failures are logged, never surfaced.
        let email_client = self.email_client.clone();
        let recipient = recipient.clone();
        let body = format!("Your one-time password is: {}", code.as_str());
        tokio::spawn(async move {
            if let Err(error) = email_client
                .send_email(&recipient, OTP_EMAIL_SUBJECT, &body)
                .await
            {
                tracing::warn!(%error, "failed to deliver OTP email");
            }
        });

        Ok(code)
    }
}

/// Error types for OTP validation
#[derive(Debug, thiserror::Error)]
pub enum OtpValidationError {
    #[error("Invalid OTP code")]
    InvalidCode,
    #[error("OTP code has expired")]
    Expired,
    #[error("Exceeded maximum attempts to enter OTP")]
    TooManyAttempts,
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    #[error(transparent)]
    OtpStore(#[from] OtpStoreError),
}

/// Checks submitted codes against the user's single live record.
pub struct OtpValidator<'a, U, O>
where
    U: UserStore,
    O: OtpStore,
{
    user_store: &'a U,
    otp_store: &'a O,
}

impl<'a, U, O> OtpValidator<'a, U, O>
where
    U: UserStore,
    O: OtpStore,
{
    pub fn new(user_store: &'a U, otp_store: &'a O) -> Self {
        Self {
            user_store,
            otp_store,
        }
    }

    /// Validates a submitted code.
    ///
    /// Outcome order: an exhausted retry counter fails first, regardless of
    /// what was submitted; a missing record and a mismatching code are one
    /// outcome and both count against the limit (the increment persists even
    /// though the attempt fails); expiry is checked lazily, last.
    #[tracing::instrument(name = "OtpValidator::validate", skip_all)]
    pub async fn validate(&self, user: &User, submitted: &str) -> Result<(), OtpValidationError> {
        if user.otp_tries() > MAX_OTP_TRIES {
            return Err(OtpValidationError::TooManyAttempts);
        }

        let record = match self.otp_store.get_code(user.email()).await {
            Ok(record) => record,
            Err(OtpStoreError::NotFound) => {
                self.user_store
                    .record_failed_otp_attempt(user.email())
                    .await?;
                return Err(OtpValidationError::InvalidCode);
            }
            Err(error) => return Err(error.into()),
        };

        if record.code().as_str() != submitted {
            self.user_store
                .record_failed_otp_attempt(user.email())
                .await?;
            return Err(OtpValidationError::InvalidCode);
        }

        if !record.is_usable_at(Utc::now()) {
            return Err(OtpValidationError::Expired);
        }

        Ok(())
    }
}
