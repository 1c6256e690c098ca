use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use verigate_core::{Email, NewUser, Password, User, UserStore, UserStoreError};

// Account row plus its credential, which never leaves the store. The
// in-memory store compares plaintext; only the Postgres store hashes.
struct StoredUser {
    user: User,
    password: Password,
}

/// Map-backed user store for tests and local runs. Cloning shares the
/// underlying map, and every mutator holds the write lock across its whole
/// read-modify-write.
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Email, StoredUser>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let email_taken = users.contains_key(&new_user.email);
        let username_taken = users
            .values()
            .any(|stored| stored.user.username() == &new_user.username);
        if email_taken || username_taken {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let user = User::new(
            new_user.email.clone(),
            new_user.username,
            new_user.first_name,
            new_user.last_name,
        );
        users.insert(
            new_user.email,
            StoredUser {
                user: user.clone(),
                password: new_user.password,
            },
        );
        Ok(user)
    }

    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .get(email)
            .map(|stored| stored.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn verify_password(
        &self,
        email: &Email,
        candidate: &Password,
    ) -> Result<(), UserStoreError> {
        let users = self.users.read().await;
        let stored = users.get(email).ok_or(UserStoreError::UserNotFound)?;
        if &stored.password != candidate {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(())
    }

    async fn record_failed_otp_attempt(&self, email: &Email) -> Result<u32, UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(email).ok_or(UserStoreError::UserNotFound)?;
        Ok(stored.user.record_failed_otp_attempt())
    }

    async fn reset_otp_tries(&self, email: &Email) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(email).ok_or(UserStoreError::UserNotFound)?;
        stored.user.reset_otp_tries();
        Ok(())
    }

    async fn mark_verified(&self, email: &Email) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(email).ok_or(UserStoreError::UserNotFound)?;
        stored.user.mark_verified();
        Ok(())
    }
}
