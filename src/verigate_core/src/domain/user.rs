use uuid::Uuid;

use crate::domain::{
    email::Email, password::Password, person_name::PersonName, username::Username,
};

/// An account as seen by the verification state machine and the credential
/// gate. The password never travels with the user; it stays inside the store.
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    email: Email,
    username: Username,
    first_name: PersonName,
    last_name: PersonName,
    verified: bool,
    otp_tries: u32,
}

impl User {
    /// Creates a fresh, unverified account with a zeroed retry counter.
    pub fn new(
        email: Email,
        username: Username,
        first_name: PersonName,
        last_name: PersonName,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            first_name,
            last_name,
            verified: false,
            otp_tries: 0,
        }
    }

    /// Rehydrates an account from persisted state.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        email: Email,
        username: Username,
        first_name: PersonName,
        last_name: PersonName,
        verified: bool,
        otp_tries: u32,
    ) -> Self {
        Self {
            id,
            email,
            username,
            first_name,
            last_name,
            verified,
            otp_tries,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn otp_tries(&self) -> u32 {
        self.otp_tries
    }

    /// Counts one failed OTP attempt and returns the new total.
    pub fn record_failed_otp_attempt(&mut self) -> u32 {
        self.otp_tries += 1;
        self.otp_tries
    }

    pub fn reset_otp_tries(&mut self) {
        self.otp_tries = 0;
    }

    /// Marks the account verified and clears the retry counter. There is no
    /// transition back to unverified.
    pub fn mark_verified(&mut self) {
        self.verified = true;
        self.otp_tries = 0;
    }
}

/// Registration payload handed to the user store, which owns hashing and
/// storing the credential.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub username: Username,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password: Password,
}
