use chrono::{Duration, Utc};
use verigate_core::UserStore;

use crate::helpers::{spawn_app, test_email};

#[tokio::test]
async fn request_otp_dispatches_a_fresh_code() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;

    let response = app.request_otp("a@x.com").await;

    assert_eq!(response.status(), 200);
    assert!(app.has_stored_code("a@x.com").await);
    // one email from registration, one from the resend
    app.wait_for_emails(2).await;
}

#[tokio::test]
async fn request_otp_rejects_an_unknown_user() {
    let app = spawn_app().await;

    let response = app.request_otp("ghost@x.com").await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn request_otp_rejects_a_missing_email() {
    let app = spawn_app().await;

    let response = app.request_otp("").await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn request_otp_resets_the_retry_counter() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    app.inject_code("a@x.com", "123456", Utc::now() + Duration::minutes(15))
        .await;

    app.verify("a@x.com", "999999").await;
    app.verify("a@x.com", "999998").await;
    let user = app.user_store.get_user(&test_email("a@x.com")).await.unwrap();
    assert_eq!(user.otp_tries(), 2);

    app.request_otp("a@x.com").await;

    let user = app.user_store.get_user(&test_email("a@x.com")).await.unwrap();
    assert_eq!(user.otp_tries(), 0);
}

#[tokio::test]
async fn request_otp_is_allowed_for_verified_accounts() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    let code = app.stored_code("a@x.com").await;
    app.verify("a@x.com", &code).await;

    let response = app.request_otp("a@x.com").await;

    assert_eq!(response.status(), 200);
    assert!(app.has_stored_code("a@x.com").await);
}
