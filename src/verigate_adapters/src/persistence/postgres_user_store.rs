use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use verigate_core::{
    Email, NewUser, Password, PersonName, User, UserStore, UserStoreError, Username,
};

use super::password::{compute_password_hash, verify_password_hash};

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_user.password.clone())
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let user = User::new(
            new_user.email,
            new_user.username,
            new_user.first_name,
            new_user.last_name,
        );

        sqlx::query(
            r#"
                INSERT INTO users (id, email, username, first_name, last_name, password_hash)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id())
        .bind(user.email().as_ref().expose_secret())
        .bind(user.username().as_str())
        .bind(user.first_name().as_str())
        .bind(user.last_name().as_str())
        .bind(password_hash.expose_secret())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(user)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, email, username, first_name, last_name, verified, otp_tries
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        user_from_row(&row)
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn verify_password(
        &self,
        email: &Email,
        candidate: &Password,
    ) -> Result<(), UserStoreError> {
        let row = sqlx::query("SELECT password_hash FROM users WHERE email = $1")
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        verify_password_hash(Secret::from(password_hash), candidate.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)
    }

    #[tracing::instrument(name = "Incrementing OTP retry counter", skip_all)]
    async fn record_failed_otp_attempt(&self, email: &Email) -> Result<u32, UserStoreError> {
        // Single-statement increment keeps concurrent attempts from losing
        // updates.
        let tries: Option<i32> = sqlx::query_scalar(
            r#"
                UPDATE users
                SET otp_tries = otp_tries + 1
                WHERE email = $1
                RETURNING otp_tries
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let tries = tries.ok_or(UserStoreError::UserNotFound)?;
        u32::try_from(tries).map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Resetting OTP retry counter", skip_all)]
    async fn reset_otp_tries(&self, email: &Email) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET otp_tries = 0 WHERE email = $1")
            .bind(email.as_ref().expose_secret())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Marking user verified", skip_all)]
    async fn mark_verified(&self, email: &Email) -> Result<(), UserStoreError> {
        let result =
            sqlx::query("UPDATE users SET verified = TRUE, otp_tries = 0 WHERE email = $1")
                .bind(email.as_ref().expose_secret())
                .execute(&self.pool)
                .await
                .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }
}

fn user_from_row(row: &PgRow) -> Result<User, UserStoreError> {
    let unexpected = |e: String| UserStoreError::UnexpectedError(e);

    let id: Uuid = row.try_get("id").map_err(|e| unexpected(e.to_string()))?;
    let email: String = row.try_get("email").map_err(|e| unexpected(e.to_string()))?;
    let username: String = row
        .try_get("username")
        .map_err(|e| unexpected(e.to_string()))?;
    let first_name: String = row
        .try_get("first_name")
        .map_err(|e| unexpected(e.to_string()))?;
    let last_name: String = row
        .try_get("last_name")
        .map_err(|e| unexpected(e.to_string()))?;
    let verified: bool = row
        .try_get("verified")
        .map_err(|e| unexpected(e.to_string()))?;
    let otp_tries: i32 = row
        .try_get("otp_tries")
        .map_err(|e| unexpected(e.to_string()))?;

    Ok(User::from_parts(
        id,
        Email::try_from(Secret::from(email)).map_err(|e| unexpected(e.to_string()))?,
        Username::parse(username).map_err(|e| unexpected(e.to_string()))?,
        PersonName::parse(first_name).map_err(|e| unexpected(e.to_string()))?,
        PersonName::parse(last_name).map_err(|e| unexpected(e.to_string()))?,
        verified,
        u32::try_from(otp_tries).map_err(|e| unexpected(e.to_string()))?,
    ))
}
