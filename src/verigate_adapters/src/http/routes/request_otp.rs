use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use verigate_application::RequestOtpUseCase;
use verigate_core::{Email, EmailClient, OtpStore, UserStore};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct RequestOtpRequest {
    pub email: Secret<String>,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

#[tracing::instrument(name = "Request OTP", skip_all)]
pub async fn request_otp<U, O, E>(
    State((user_store, otp_store, email_client)): State<(U, O, E)>,
    Json(request): Json<RequestOtpRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    O: OtpStore + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
{
    if request.email.expose_secret().is_empty() {
        return Err(ApiError::MissingFields);
    }
    let email = Email::try_from(request.email)?;

    let use_case = RequestOtpUseCase::new(user_store, otp_store, email_client);
    use_case.execute(&email).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: String::from("OTP sent to your email."),
        }),
    ))
}
