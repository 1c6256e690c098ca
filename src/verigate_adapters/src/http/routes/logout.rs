use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse};

use verigate_application::LogoutUseCase;
use verigate_core::RevokedTokenStore;

use crate::tokens::{JwtConfig, extract_bearer_token, validate_access_token};

use super::error::ApiError;

/// Revokes the presented access token. The token must validate before it is
/// revoked, so replaying a logout with the same token is refused.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<R>(
    State((revoked_token_store, jwt_config)): State<(R, JwtConfig)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    R: RevokedTokenStore + 'static,
{
    let token = extract_bearer_token(&headers)?.to_owned();

    validate_access_token(&token, &revoked_token_store, &jwt_config).await?;

    let use_case = LogoutUseCase::new(revoked_token_store);
    use_case.execute(token).await?;

    Ok(StatusCode::NO_CONTENT)
}
