use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use verigate_application::VerifyAccountUseCase;
use verigate_core::{Email, OtpStore, UserStore};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct VerifyAccountRequest {
    pub email: Secret<String>,
    pub otp: String,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

// The code is passed through as submitted: a malformed code must count as a
// failed attempt, exactly like a well-formed wrong one.
#[tracing::instrument(name = "Verify account", skip_all)]
pub async fn verify_account<U, O>(
    State((user_store, otp_store)): State<(U, O)>,
    Json(request): Json<VerifyAccountRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    O: OtpStore + 'static,
{
    if request.email.expose_secret().is_empty() || request.otp.is_empty() {
        return Err(ApiError::MissingFields);
    }
    let email = Email::try_from(request.email)?;

    let use_case = VerifyAccountUseCase::new(user_store, otp_store);
    use_case.execute(&email, &request.otp).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: String::from("Account verified successfully. Now you can log in."),
        }),
    ))
}
