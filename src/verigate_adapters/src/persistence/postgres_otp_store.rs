use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::{PgPool, Row};

use verigate_core::{Email, OtpCode, OtpRecord, OtpStore, OtpStoreError};

/// OTP records keyed by user id, one row per user. The table cascades on
/// user deletion, so a record never outlives its owner.
#[derive(Clone)]
pub struct PostgresOtpStore {
    pool: PgPool,
}

impl PostgresOtpStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl OtpStore for PostgresOtpStore {
    #[tracing::instrument(name = "Storing OTP record in PostgreSQL", skip_all)]
    async fn put_code(&self, email: Email, record: OtpRecord) -> Result<(), OtpStoreError> {
        // One-statement upsert: the primary key on user_id enforces the
        // single-live-record invariant.
        let result = sqlx::query(
            r#"
                INSERT INTO one_time_passwords (user_id, code, expires_at)
                SELECT id, $2, $3 FROM users WHERE email = $1
                ON CONFLICT (user_id)
                DO UPDATE SET code = EXCLUDED.code, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .bind(record.code().as_str())
        .bind(record.expires_at())
        .execute(&self.pool)
        .await
        .map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(OtpStoreError::NotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Retrieving OTP record from PostgreSQL", skip_all)]
    async fn get_code(&self, email: &Email) -> Result<OtpRecord, OtpStoreError> {
        let row = sqlx::query(
            r#"
                SELECT otp.code, otp.expires_at
                FROM one_time_passwords otp
                JOIN users u ON u.id = otp.user_id
                WHERE u.email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(OtpStoreError::NotFound);
        };

        let code: String = row
            .try_get("code")
            .map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))?;
        let expires_at: DateTime<Utc> = row
            .try_get("expires_at")
            .map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))?;

        let code =
            OtpCode::parse(code).map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))?;
        Ok(OtpRecord::new(code, expires_at))
    }

    #[tracing::instrument(name = "Deleting OTP record from PostgreSQL", skip_all)]
    async fn delete_code(&self, email: &Email) -> Result<(), OtpStoreError> {
        let result = sqlx::query(
            r#"
                DELETE FROM one_time_passwords otp
                USING users u
                WHERE u.id = otp.user_id AND u.email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(OtpStoreError::NotFound);
        }
        Ok(())
    }
}
