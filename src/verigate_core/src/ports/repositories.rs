use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    otp_code::OtpRecord,
    password::Password,
    user::{NewUser, User},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Persistent account store with unique email and username constraints.
///
/// The counter and flag mutators are single-record read-modify-write
/// operations; implementations must make each one atomic so concurrent
/// verification attempts for the same user cannot lose updates.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new account, hashing and storing its credential. Fails with
    /// `UserAlreadyExists` when the email or username is taken.
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError>;
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError>;
    /// Checks a password candidate against the stored credential.
    async fn verify_password(
        &self,
        email: &Email,
        candidate: &Password,
    ) -> Result<(), UserStoreError>;
    /// Atomically increments the user's OTP retry counter and returns the
    /// new value. The increment persists even when the surrounding
    /// operation fails.
    async fn record_failed_otp_attempt(&self, email: &Email) -> Result<u32, UserStoreError>;
    async fn reset_otp_tries(&self, email: &Email) -> Result<(), UserStoreError>;
    /// Marks the user verified and clears the retry counter in one update.
    async fn mark_verified(&self, email: &Email) -> Result<(), UserStoreError>;
}

// OtpStore port trait and errors
#[derive(Debug, Error)]
pub enum OtpStoreError {
    #[error("No active OTP code")]
    NotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for OtpStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound, Self::NotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Store for the single live OTP record per user.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Stores a record for the user, replacing any existing one. The upsert
    /// must be atomic so a user can never hold two live codes.
    async fn put_code(&self, email: Email, record: OtpRecord) -> Result<(), OtpStoreError>;
    async fn get_code(&self, email: &Email) -> Result<OtpRecord, OtpStoreError>;
    async fn delete_code(&self, email: &Email) -> Result<(), OtpStoreError>;
}

// RevokedTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum RevokedTokenStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Store of session credentials invalidated by logout. Entries only need to
/// outlive the token they revoke.
#[async_trait]
pub trait RevokedTokenStore: Send + Sync {
    async fn revoke_token(&self, token: String) -> Result<(), RevokedTokenStoreError>;
    async fn is_revoked(&self, token: &str) -> Result<bool, RevokedTokenStoreError>;
}
