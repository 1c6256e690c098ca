use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern must compile")
});

pub const MAX_EMAIL_LENGTH: usize = 254;

#[derive(Debug, Error, PartialEq)]
pub enum EmailError {
    #[error("Invalid email format")]
    InvalidFormat,
    #[error("Email must be at most {MAX_EMAIL_LENGTH} characters")]
    TooLong,
}

/// Validated email address, used as the login identifier. The inner value is
/// wrapped in [`Secret`] so it never leaks through `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let raw = value.expose_secret();
        if raw.len() > MAX_EMAIL_LENGTH {
            return Err(EmailError::TooLong);
        }
        if !EMAIL_PATTERN.is_match(raw) {
            return Err(EmailError::InvalidFormat);
        }
        Ok(Self(value))
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

// Emails key the in-memory stores.
impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
