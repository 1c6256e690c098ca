pub mod in_memory_otp_store;
pub mod in_memory_revoked_token_store;
pub mod in_memory_user_store;
mod password;
pub mod postgres_otp_store;
pub mod postgres_user_store;
pub mod redis_revoked_token_store;

pub use in_memory_otp_store::InMemoryOtpStore;
pub use in_memory_revoked_token_store::InMemoryRevokedTokenStore;
pub use in_memory_user_store::InMemoryUserStore;
pub use postgres_otp_store::PostgresOtpStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_revoked_token_store::RedisRevokedTokenStore;
