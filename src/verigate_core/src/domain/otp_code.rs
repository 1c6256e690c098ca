use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;

pub const OTP_CODE_LENGTH: usize = 6;

#[derive(Debug, Error, PartialEq)]
pub enum OtpCodeError {
    #[error("OTP code must be exactly {OTP_CODE_LENGTH} digits")]
    InvalidFormat,
}

/// Six-digit one-time password. Codes are not globally unique; collisions
/// across users are acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Generates a code with each digit drawn independently and uniformly.
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let code = (0..OTP_CODE_LENGTH)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect();
        Self(code)
    }

    pub fn parse(value: String) -> Result<Self, OtpCodeError> {
        if value.len() != OTP_CODE_LENGTH || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OtpCodeError::InvalidFormat);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OtpCode {
    fn default() -> Self {
        Self::new()
    }
}

/// A user's active OTP together with its expiration instant. At most one
/// record exists per user; storing a new one supersedes the old.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    code: OtpCode,
    expires_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn new(code: OtpCode, expires_at: DateTime<Utc>) -> Self {
        Self { code, expires_at }
    }

    pub fn code(&self) -> &OtpCode {
        &self.code
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// A code is usable strictly before its expiration instant.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
