use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verigate_application::RegisterUseCase;
use verigate_core::{
    Email, EmailClient, NewUser, OtpStore, Password, PersonName, UserStore, Username,
};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: Secret<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, O, E>(
    State((user_store, otp_store, email_client)): State<(U, O, E)>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    O: OtpStore + 'static,
    E: EmailClient + Clone + Send + Sync + 'static,
{
    let new_user = NewUser {
        email: Email::try_from(request.email)?,
        username: Username::parse(request.username)?,
        first_name: PersonName::parse(request.first_name)?,
        last_name: PersonName::parse(request.last_name)?,
        password: Password::try_from(request.password)?,
    };

    let use_case = RegisterUseCase::new(user_store, otp_store, email_client);
    let user = use_case.execute(new_user).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id(),
            email: user.email().as_ref().expose_secret().clone(),
            username: user.username().to_string(),
        }),
    ))
}
