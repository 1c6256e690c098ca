use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use verigate_application::LoginUseCase;
use verigate_core::{Email, OtpStore, Password, TokenIssuer, UserStore};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    pub otp: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub auth_token: String,
    pub refresh_token: String,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, O, T>(
    State((user_store, otp_store, token_issuer)): State<(U, O, T)>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    O: OtpStore + 'static,
    T: TokenIssuer + 'static,
{
    if request.email.expose_secret().is_empty()
        || request.password.expose_secret().is_empty()
        || request.otp.is_empty()
    {
        return Err(ApiError::MissingFields);
    }

    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = LoginUseCase::new(user_store, otp_store, token_issuer);
    let pair = use_case.execute(&email, &password, &request.otp).await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            auth_token: pair.auth_token.expose_secret().clone(),
            refresh_token: pair.refresh_token.expose_secret().clone(),
        }),
    ))
}
