use chrono::{DateTime, Utc};
use secrecy::Secret;

use verigate_adapters::{
    InMemoryOtpStore, InMemoryRevokedTokenStore, InMemoryUserStore, MockEmailClient,
    email::SentEmail,
    tokens::JwtConfig,
};
use verigate_core::{Email, OtpCode, OtpRecord, OtpStore};
use verigate_service::AccountService;

pub const PASSWORD: &str = "correct-horse-battery";

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub user_store: InMemoryUserStore,
    pub otp_store: InMemoryOtpStore,
    pub email_client: MockEmailClient,
}

/// Boot the service on an ephemeral port over in-memory adapters. The store
/// handles let tests read the live OTP code directly instead of scraping
/// email, and inject expired records instead of mocking the clock.
pub async fn spawn_app() -> TestApp {
    let user_store = InMemoryUserStore::new();
    let otp_store = InMemoryOtpStore::new();
    let revoked_token_store = InMemoryRevokedTokenStore::new();
    let email_client = MockEmailClient::new();
    let jwt_config = JwtConfig {
        secret: Secret::from("test-jwt-secret".to_owned()),
        access_token_ttl_seconds: 600,
        refresh_token_ttl_seconds: 86_400,
    };

    let service = AccountService::new(
        user_store.clone(),
        otp_store.clone(),
        revoked_token_store,
        email_client.clone(),
        jwt_config,
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind an ephemeral port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(service.run_standalone(listener, None));

    TestApp {
        address,
        client: reqwest::Client::new(),
        user_store,
        otp_store,
        email_client,
    }
}

impl TestApp {
    pub async fn post(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn register(&self, email: &str, username: &str) -> reqwest::Response {
        self.post(
            "/register",
            &serde_json::json!({
                "email": email,
                "username": username,
                "first_name": "Test",
                "last_name": "User",
                "password": PASSWORD,
            }),
        )
        .await
    }

    pub async fn request_otp(&self, email: &str) -> reqwest::Response {
        self.post("/request-otp", &serde_json::json!({ "email": email }))
            .await
    }

    pub async fn verify(&self, email: &str, otp: &str) -> reqwest::Response {
        self.post(
            "/verify-account",
            &serde_json::json!({ "email": email, "otp": otp }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str, otp: &str) -> reqwest::Response {
        self.post(
            "/login",
            &serde_json::json!({ "email": email, "password": password, "otp": otp }),
        )
        .await
    }

    /// The code currently stored for the user; panics when there is none.
    pub async fn stored_code(&self, email: &str) -> String {
        self.otp_store
            .get_code(&test_email(email))
            .await
            .expect("no OTP record stored")
            .code()
            .as_str()
            .to_owned()
    }

    pub async fn has_stored_code(&self, email: &str) -> bool {
        self.otp_store.get_code(&test_email(email)).await.is_ok()
    }

    /// Overwrites the user's record, e.g. with an already-expired one.
    pub async fn inject_code(&self, email: &str, code: &str, expires_at: DateTime<Utc>) {
        self.otp_store
            .put_code(
                test_email(email),
                OtpRecord::new(OtpCode::parse(code.to_owned()).unwrap(), expires_at),
            )
            .await
            .unwrap();
    }

    /// Registers, verifies and logs in, returning the issued token pair.
    pub async fn login_from_scratch(&self, email: &str, username: &str) -> (String, String) {
        assert_eq!(self.register(email, username).await.status(), 201);
        let code = self.stored_code(email).await;
        assert_eq!(self.verify(email, &code).await.status(), 200);

        assert_eq!(self.request_otp(email).await.status(), 200);
        let code = self.stored_code(email).await;
        let response = self.login(email, PASSWORD, &code).await;
        assert_eq!(response.status(), 200);

        let body: serde_json::Value = response.json().await.unwrap();
        (
            body["auth_token"].as_str().unwrap().to_owned(),
            body["refresh_token"].as_str().unwrap().to_owned(),
        )
    }

    /// Waits for the fire-and-forget dispatch tasks to deliver `count`
    /// emails to the mock outbox.
    pub async fn wait_for_emails(&self, count: usize) -> Vec<SentEmail> {
        for _ in 0..100 {
            let sent = self.email_client.sent().await;
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("expected at least {count} delivered emails");
    }
}

pub fn test_email(raw: &str) -> Email {
    Email::try_from(Secret::from(raw.to_owned())).unwrap()
}

pub async fn error_message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("error body was not JSON");
    body["error"].as_str().expect("no error field").to_owned()
}
