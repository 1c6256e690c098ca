pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    otp_code::{OtpCode, OtpCodeError, OtpRecord},
    password::{Password, PasswordError},
    person_name::{PersonName, PersonNameError},
    user::{NewUser, User},
    username::{Username, UsernameError},
};

pub use ports::{
    repositories::{
        OtpStore, OtpStoreError, RevokedTokenStore, RevokedTokenStoreError, UserStore,
        UserStoreError,
    },
    services::{EmailClient, TokenIssuer, TokenIssuerError, TokenPair},
};
