use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use verigate_application::{
    LoginError, LogoutError, OtpIssueError, OtpValidationError, RegisterError, RequestOtpError,
    VerifyAccountError,
};
use verigate_core::{
    EmailError, OtpStoreError, PasswordError, PersonNameError, RevokedTokenStoreError,
    TokenIssuerError, UserStoreError, UsernameError,
};

use crate::tokens::TokenAuthError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("User with this email does not exist")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid OTP code or email")]
    InvalidOtp,

    #[error("OTP code has expired")]
    OtpExpired,

    #[error("Exceeded maximum attempts to enter OTP")]
    TooManyAttempts,

    #[error("Email already verified")]
    AlreadyVerified,

    #[error("Your email is not verified yet")]
    EmailNotVerified,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Authentication credentials were not provided")]
    Unauthenticated,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            ApiError::MissingFields
            | ApiError::InvalidInput(_)
            | ApiError::InvalidOtp
            | ApiError::OtpExpired => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::IncorrectPassword | ApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            ApiError::EmailNotVerified => (StatusCode::FORBIDDEN, self.to_string()),

            ApiError::UserNotFound => (StatusCode::NOT_FOUND, self.to_string()),

            ApiError::UserAlreadyExists | ApiError::AlreadyVerified => {
                (StatusCode::CONFLICT, self.to_string())
            }

            ApiError::TooManyAttempts => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),

            ApiError::UnexpectedError(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<UsernameError> for ApiError {
    fn from(error: UsernameError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PersonNameError> for ApiError {
    fn from(error: PersonNameError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => ApiError::UserAlreadyExists,
            UserStoreError::UserNotFound => ApiError::UserNotFound,
            UserStoreError::IncorrectPassword => ApiError::IncorrectPassword,
            UserStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<OtpStoreError> for ApiError {
    fn from(error: OtpStoreError) -> Self {
        match error {
            OtpStoreError::NotFound => ApiError::InvalidOtp,
            OtpStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<OtpValidationError> for ApiError {
    fn from(error: OtpValidationError) -> Self {
        match error {
            OtpValidationError::InvalidCode => ApiError::InvalidOtp,
            OtpValidationError::Expired => ApiError::OtpExpired,
            OtpValidationError::TooManyAttempts => ApiError::TooManyAttempts,
            OtpValidationError::UserStore(e) => e.into(),
            OtpValidationError::OtpStore(e) => e.into(),
        }
    }
}

impl From<OtpIssueError> for ApiError {
    fn from(error: OtpIssueError) -> Self {
        match error {
            OtpIssueError::UserStore(e) => e.into(),
            OtpIssueError::OtpStore(e) => e.into(),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UserStore(e) => e.into(),
            RegisterError::Otp(e) => e.into(),
        }
    }
}

impl From<RequestOtpError> for ApiError {
    fn from(error: RequestOtpError) -> Self {
        match error {
            RequestOtpError::UserStore(e) => e.into(),
            RequestOtpError::Otp(e) => e.into(),
        }
    }
}

impl From<VerifyAccountError> for ApiError {
    fn from(error: VerifyAccountError) -> Self {
        match error {
            VerifyAccountError::AlreadyVerified => ApiError::AlreadyVerified,
            VerifyAccountError::UserStore(e) => e.into(),
            VerifyAccountError::Otp(e) => e.into(),
            VerifyAccountError::OtpStore(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::EmailNotVerified => ApiError::EmailNotVerified,
            LoginError::UserStore(e) => e.into(),
            LoginError::Otp(e) => e.into(),
            LoginError::OtpStore(e) => e.into(),
            LoginError::TokenIssuer(e) => e.into(),
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::RevokedTokenStore(e) => e.into(),
        }
    }
}

impl From<TokenIssuerError> for ApiError {
    fn from(error: TokenIssuerError) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

impl From<RevokedTokenStoreError> for ApiError {
    fn from(error: RevokedTokenStoreError) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

impl From<TokenAuthError> for ApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken
            | TokenAuthError::TokenError(_)
            | TokenAuthError::TokenRevoked
            | TokenAuthError::WrongTokenKind => ApiError::Unauthenticated,
            TokenAuthError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}
