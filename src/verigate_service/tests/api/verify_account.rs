use chrono::{Duration, Utc};
use verigate_core::UserStore;

use crate::helpers::{error_message, spawn_app, test_email};

#[tokio::test]
async fn verify_marks_the_user_verified_and_deletes_the_code() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    let code = app.stored_code("a@x.com").await;

    let response = app.verify("a@x.com", &code).await;

    assert_eq!(response.status(), 200);
    let user = app.user_store.get_user(&test_email("a@x.com")).await.unwrap();
    assert!(user.is_verified());
    assert_eq!(user.otp_tries(), 0);
    assert!(!app.has_stored_code("a@x.com").await);
}

#[tokio::test]
async fn verify_is_not_idempotent() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    let code = app.stored_code("a@x.com").await;

    assert_eq!(app.verify("a@x.com", &code).await.status(), 200);

    // the record is gone, so the same code is now just an invalid one
    let response = app.verify("a@x.com", &code).await;
    assert_eq!(response.status(), 400);
    assert_eq!(error_message(response).await, "Invalid OTP code or email");
}

#[tokio::test]
async fn verify_with_a_fresh_code_on_a_verified_account_is_a_conflict() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    let code = app.stored_code("a@x.com").await;
    app.verify("a@x.com", &code).await;

    app.request_otp("a@x.com").await;
    let fresh = app.stored_code("a@x.com").await;

    let response = app.verify("a@x.com", &fresh).await;
    assert_eq!(response.status(), 409);
    assert_eq!(error_message(response).await, "Email already verified");
}

#[tokio::test]
async fn verify_rejects_an_unknown_user() {
    let app = spawn_app().await;

    let response = app.verify("ghost@x.com", "123456").await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn verify_rejects_missing_fields() {
    let app = spawn_app().await;

    let response = app.verify("", "123456").await;
    assert_eq!(response.status(), 400);

    let response = app.verify("a@x.com", "").await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn verify_rejects_an_expired_code() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    app.inject_code("a@x.com", "123456", Utc::now() - Duration::seconds(1))
        .await;

    let response = app.verify("a@x.com", "123456").await;

    assert_eq!(response.status(), 400);
    assert_eq!(error_message(response).await, "OTP code has expired");
    // expiry does not burn a retry
    let user = app.user_store.get_user(&test_email("a@x.com")).await.unwrap();
    assert_eq!(user.otp_tries(), 0);
}

#[tokio::test]
async fn a_new_code_supersedes_the_previous_one() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    let first = app.stored_code("a@x.com").await;

    app.request_otp("a@x.com").await;
    let second = app.stored_code("a@x.com").await;

    if first != second {
        let response = app.verify("a@x.com", &first).await;
        assert_eq!(response.status(), 400);
    }
    assert_eq!(app.verify("a@x.com", &second).await.status(), 200);
}

#[tokio::test]
async fn six_wrong_attempts_then_the_limit_kicks_in() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    let code = app.stored_code("a@x.com").await;
    // a wrong code that cannot collide with the real one
    let wrong = if code == "000000" { "000001" } else { "000000" };

    for expected_tries in 1..=6u32 {
        let response = app.verify("a@x.com", wrong).await;
        assert_eq!(response.status(), 400);
        assert_eq!(error_message(response).await, "Invalid OTP code or email");

        let user = app.user_store.get_user(&test_email("a@x.com")).await.unwrap();
        assert_eq!(user.otp_tries(), expected_tries);
    }

    // attempt seven is refused outright, correct code or not
    let response = app.verify("a@x.com", &code).await;
    assert_eq!(response.status(), 429);

    let response = app.verify("a@x.com", wrong).await;
    assert_eq!(response.status(), 429);
}

#[tokio::test]
async fn requesting_a_new_code_resets_the_limit() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;
    app.inject_code("a@x.com", "123456", Utc::now() + Duration::minutes(15))
        .await;

    for _ in 0..7 {
        app.verify("a@x.com", "999999").await;
    }
    assert_eq!(app.verify("a@x.com", "999999").await.status(), 429);

    app.request_otp("a@x.com").await;
    let code = app.stored_code("a@x.com").await;

    assert_eq!(app.verify("a@x.com", &code).await.status(), 200);
}
