pub mod error;
pub mod login;
pub mod logout;
pub mod register;
pub mod request_otp;
pub mod verify_account;

pub use error::{ApiError, ErrorResponse};
pub use login::{LoginRequest, LoginResponse, login};
pub use logout::logout;
pub use register::{RegisterRequest, RegisterResponse, register};
pub use request_otp::{RequestOtpRequest, request_otp};
pub use verify_account::{VerifyAccountRequest, verify_account};
