mod helpers;
mod login;
mod logout;
mod register;
mod request_otp;
mod verify_account;
