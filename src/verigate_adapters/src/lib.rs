pub mod config;
pub mod email;
pub mod http;
pub mod persistence;
pub mod tokens;

pub use email::{MockEmailClient, PostmarkEmailClient};
pub use persistence::{
    InMemoryOtpStore, InMemoryRevokedTokenStore, InMemoryUserStore, PostgresOtpStore,
    PostgresUserStore, RedisRevokedTokenStore,
};
pub use tokens::{JwtConfig, JwtTokenIssuer, TokenAuthError};
