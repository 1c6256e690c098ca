use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, Environment, File, FileFormat};
use secrecy::Secret;
use serde::Deserialize;

use crate::tokens::JwtConfig;

/// Service configuration, read from `configuration.json` (optional) with
/// environment overrides (`VERIGATE__` prefix, `__` separator, e.g.
/// `VERIGATE__DATABASE__URL`).
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub redis: RedisSettings,
    pub email_client: EmailClientSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub access_token_ttl_seconds: i64,
    pub refresh_token_ttl_seconds: i64,
    pub allowed_origins: Option<AllowedOrigins>,
}

impl AuthSettings {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            access_token_ttl_seconds: self.access_token_ttl_seconds,
            refresh_token_ttl_seconds: self.refresh_token_ttl_seconds,
        }
    }
}

/// Origins the CORS layer will let through.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        // A .env file is a convenience for local runs; absence is fine.
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(File::new("configuration.json", FileFormat::Json).required(false))
            .add_source(Environment::with_prefix("VERIGATE").separator("__"))
            .build()?
            .try_deserialize()
    }
}
