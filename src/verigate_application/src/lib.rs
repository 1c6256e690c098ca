pub mod otp;
pub mod use_cases;

pub use otp::{
    MAX_OTP_TRIES, OTP_TTL_MINUTES, OtpIssueError, OtpIssuer, OtpValidationError, OtpValidator,
};

pub use use_cases::{
    login::{LoginError, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    register::{RegisterError, RegisterUseCase},
    request_otp::{RequestOtpError, RequestOtpUseCase},
    verify_account::{VerifyAccountError, VerifyAccountUseCase},
};
