pub mod login;
pub mod logout;
pub mod register;
pub mod request_otp;
pub mod verify_account;
