use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern must compile"));

// Names kept out of user hands so they cannot impersonate operators.
const RESERVED_USERNAMES: [&str; 5] = ["admin", "staff", "me", "support", "moderator"];

pub const MAX_USERNAME_LENGTH: usize = 30;

#[derive(Debug, Error, PartialEq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,
    #[error("Username must be at most {MAX_USERNAME_LENGTH} characters")]
    TooLong,
    #[error("Only letters, numbers and @/./+/-/_ are allowed in a username")]
    InvalidCharacters,
    #[error("This username is reserved")]
    Reserved,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn parse(value: String) -> Result<Self, UsernameError> {
        if value.is_empty() {
            return Err(UsernameError::Empty);
        }
        if value.chars().count() > MAX_USERNAME_LENGTH {
            return Err(UsernameError::TooLong);
        }
        if !USERNAME_PATTERN.is_match(&value) {
            return Err(UsernameError::InvalidCharacters);
        }
        if RESERVED_USERNAMES.contains(&value.as_str()) {
            return Err(UsernameError::Reserved);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
