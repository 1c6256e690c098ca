use verigate_core::UserStore;

use crate::helpers::{PASSWORD, error_message, spawn_app, test_email};

#[tokio::test]
async fn login_issues_a_token_pair_and_consumes_the_code() {
    let app = spawn_app().await;

    let (auth_token, refresh_token) = app.login_from_scratch("a@x.com", "alice").await;

    // both look like JWTs
    assert_eq!(auth_token.split('.').count(), 3);
    assert_eq!(refresh_token.split('.').count(), 3);
    // the code was consumed on success
    assert!(!app.has_stored_code("a@x.com").await);
}

#[tokio::test]
async fn login_requires_a_verified_email() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    let code = app.stored_code("a@x.com").await;

    let response = app.login("a@x.com", PASSWORD, &code).await;

    assert_eq!(response.status(), 403);
    assert_eq!(error_message(response).await, "Your email is not verified yet");
}

#[tokio::test]
async fn login_rejects_a_wrong_password() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    let code = app.stored_code("a@x.com").await;
    app.verify("a@x.com", &code).await;
    app.request_otp("a@x.com").await;
    let code = app.stored_code("a@x.com").await;

    let response = app.login("a@x.com", "wrong-password", &code).await;

    assert_eq!(response.status(), 401);
    assert_eq!(error_message(response).await, "Incorrect password");
}

#[tokio::test]
async fn login_rejects_missing_fields() {
    let app = spawn_app().await;

    for body in [
        serde_json::json!({ "email": "", "password": PASSWORD, "otp": "123456" }),
        serde_json::json!({ "email": "a@x.com", "password": "", "otp": "123456" }),
        serde_json::json!({ "email": "a@x.com", "password": PASSWORD, "otp": "" }),
    ] {
        let response = app.post("/login", &body).await;
        assert_eq!(response.status(), 400);
        assert_eq!(error_message(response).await, "Missing required fields");
    }
}

#[tokio::test]
async fn login_rejects_an_unknown_user() {
    let app = spawn_app().await;

    let response = app.login("ghost@x.com", PASSWORD, "123456").await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn the_verification_code_cannot_be_reused_for_login() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    let code = app.stored_code("a@x.com").await;
    app.verify("a@x.com", &code).await;

    // verification consumed the code; login must request its own
    let response = app.login("a@x.com", PASSWORD, &code).await;

    assert_eq!(response.status(), 400);
    assert_eq!(error_message(response).await, "Invalid OTP code or email");
}

#[tokio::test]
async fn failed_login_attempts_count_toward_the_limit() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    let code = app.stored_code("a@x.com").await;
    app.verify("a@x.com", &code).await;
    app.request_otp("a@x.com").await;
    let code = app.stored_code("a@x.com").await;
    let wrong = if code == "000000" { "000001" } else { "000000" };

    for _ in 0..6 {
        let response = app.login("a@x.com", PASSWORD, wrong).await;
        assert_eq!(response.status(), 400);
    }
    let user = app.user_store.get_user(&test_email("a@x.com")).await.unwrap();
    assert_eq!(user.otp_tries(), 6);

    let response = app.login("a@x.com", PASSWORD, &code).await;
    assert_eq!(response.status(), 429);
}
