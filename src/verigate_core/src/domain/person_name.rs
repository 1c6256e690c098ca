use thiserror::Error;

pub const MAX_NAME_LENGTH: usize = 150;

#[derive(Debug, Error, PartialEq)]
pub enum PersonNameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be at most {MAX_NAME_LENGTH} characters")]
    TooLong,
}

/// A first or last name as supplied at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(value: String) -> Result<Self, PersonNameError> {
        if value.trim().is_empty() {
            return Err(PersonNameError::Empty);
        }
        if value.chars().count() > MAX_NAME_LENGTH {
            return Err(PersonNameError::TooLong);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
