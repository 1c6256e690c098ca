use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::post,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use verigate_adapters::{
    config::AllowedOrigins,
    http::routes::{login, logout, register, request_otp, verify_account},
    tokens::{JwtConfig, JwtTokenIssuer},
};
use verigate_core::{EmailClient, OtpStore, RevokedTokenStore, UserStore};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// Main account service that wires the stores into the HTTP routes
pub struct AccountService {
    router: Router,
}

impl AccountService {
    /// Create a new AccountService from the provided collaborators
    ///
    /// # Arguments
    /// * `user_store` - Store for user records (must be Clone)
    /// * `otp_store` - Store for the per-user OTP record (must be Clone)
    /// * `revoked_token_store` - Store for revoked session tokens (must be Clone)
    /// * `email_client` - Mail-delivery channel (must be Clone)
    /// * `jwt_config` - Signing key and token lifetimes
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal shared state. Each route is given
    /// exactly the collaborators it needs, nothing more.
    pub fn new<U, O, R, E>(
        user_store: U,
        otp_store: O,
        revoked_token_store: R,
        email_client: E,
        jwt_config: JwtConfig,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        O: OtpStore + Clone + 'static,
        R: RevokedTokenStore + Clone + 'static,
        E: EmailClient + Clone + Send + Sync + 'static,
    {
        let token_issuer = JwtTokenIssuer::new(jwt_config.clone());

        let router = Router::new()
            // Registration needs user store, OTP store and mail channel
            .route("/register", post(register::<U, O, E>))
            .with_state((
                user_store.clone(),
                otp_store.clone(),
                email_client.clone(),
            ))
            // OTP resend uses the same trio
            .route("/request-otp", post(request_otp::<U, O, E>))
            .with_state((user_store.clone(), otp_store.clone(), email_client))
            // Verification consumes codes; no mail is sent
            .route("/verify-account", post(verify_account::<U, O>))
            .with_state((user_store.clone(), otp_store.clone()))
            // Login issues tokens on top of the OTP machinery
            .route("/login", post(login::<U, O, JwtTokenIssuer>))
            .with_state((user_store, otp_store, token_issuer))
            // Logout only touches the revocation store
            .route("/logout", post(logout::<R>))
            .with_state((revoked_token_store, jwt_config));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AccountService into a router that can be nested into
    /// another application
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the account service as a standalone server
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("account service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
