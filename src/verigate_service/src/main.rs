use std::sync::Arc;

use color_eyre::eyre::Result;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::RwLock;

use verigate_adapters::{
    PostgresOtpStore, PostgresUserStore, PostmarkEmailClient, RedisRevokedTokenStore,
    config::Settings,
};
use verigate_core::Email;
use verigate_service::{AccountService, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;

    // Database connection pool and schema
    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(settings.database.url.expose_secret())
        .await?;
    sqlx::migrate!().run(&pg_pool).await?;

    // Redis connection for the revocation store
    let redis_client = redis::Client::open(format!("redis://{}/", settings.redis.host_name))?;
    let redis_conn = Arc::new(RwLock::new(redis_client.get_connection()?));

    // Stores
    let user_store = PostgresUserStore::new(pg_pool.clone());
    let otp_store = PostgresOtpStore::new(pg_pool);
    let revoked_token_store = RedisRevokedTokenStore::new(
        redis_conn,
        u64::try_from(settings.auth.access_token_ttl_seconds)?,
    );

    // Mail channel
    let http_client = reqwest::Client::builder()
        .timeout(settings.email_client.timeout())
        .build()?;
    let sender = Email::try_from(Secret::from(settings.email_client.sender.clone()))?;
    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        sender,
        settings.email_client.auth_token.clone(),
        http_client,
    );

    let service = AccountService::new(
        user_store,
        otp_store,
        revoked_token_store,
        email_client,
        settings.auth.jwt_config(),
    );

    let address = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await?;

    service
        .run_standalone(listener, settings.auth.allowed_origins.clone())
        .await?;

    Ok(())
}
