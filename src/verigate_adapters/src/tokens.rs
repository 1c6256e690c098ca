//! JWT issuance and validation for the credential gate.

use axum::http::{HeaderMap, header};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use verigate_core::{RevokedTokenStore, TokenIssuer, TokenIssuerError, User};

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub access_token_ttl_seconds: i64,
    pub refresh_token_ttl_seconds: i64,
}

/// Discriminates the two credentials so a refresh token can never pass for
/// an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id the credential is bound to.
    pub sub: String,
    pub exp: usize,
    pub kind: TokenKind,
}

/// Issues HS256-signed access and refresh tokens, each carrying its own
/// expiry taken from configuration.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    config: JwtConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_access_token(&self, user: &User) -> Result<Secret<String>, TokenIssuerError> {
        sign_token(
            user,
            TokenKind::Access,
            self.config.access_token_ttl_seconds,
            &self.config,
        )
    }

    fn issue_refresh_token(&self, user: &User) -> Result<Secret<String>, TokenIssuerError> {
        sign_token(
            user,
            TokenKind::Refresh,
            self.config.refresh_token_ttl_seconds,
            &self.config,
        )
    }
}

fn sign_token(
    user: &User,
    kind: TokenKind,
    ttl_seconds: i64,
    config: &JwtConfig,
) -> Result<Secret<String>, TokenIssuerError> {
    let delta = chrono::Duration::try_seconds(ttl_seconds).ok_or_else(|| {
        TokenIssuerError::SigningError("token TTL out of range".to_owned())
    })?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or_else(|| TokenIssuerError::SigningError("expiry out of range".to_owned()))?
        .timestamp();

    let exp = usize::try_from(exp)
        .map_err(|_| TokenIssuerError::SigningError("expiry before epoch".to_owned()))?;

    let claims = Claims {
        sub: user.id().to_string(),
        exp,
        kind,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.expose_secret().as_bytes()),
    )
    .map(Secret::from)
    .map_err(|e| TokenIssuerError::SigningError(e.to_string()))
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
    #[error("Token has been revoked")]
    TokenRevoked,
    #[error("Wrong token kind")]
    WrongTokenKind,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Pulls the bearer token out of the Authorization header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, TokenAuthError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(TokenAuthError::MissingToken)
}

/// Checks an access token end to end: signature, expiry, kind, revocation.
pub async fn validate_access_token(
    token: &str,
    revoked_token_store: &dyn RevokedTokenStore,
    config: &JwtConfig,
) -> Result<Claims, TokenAuthError> {
    let secret = config.secret.expose_secret().as_bytes();

    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret), &Validation::default())
        .map(|data| data.claims)
        .map_err(TokenAuthError::TokenError)?;

    if claims.kind != TokenKind::Access {
        return Err(TokenAuthError::WrongTokenKind);
    }

    let is_revoked = revoked_token_store
        .is_revoked(token)
        .await
        .map_err(|e| TokenAuthError::UnexpectedError(e.to_string()))?;

    if is_revoked {
        return Err(TokenAuthError::TokenRevoked);
    }

    Ok(claims)
}
