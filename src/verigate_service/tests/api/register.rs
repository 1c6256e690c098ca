use verigate_core::UserStore;

use crate::helpers::{spawn_app, test_email};

#[tokio::test]
async fn register_creates_an_unverified_user_and_dispatches_an_otp() {
    let app = spawn_app().await;

    let response = app.register("a@x.com", "alice").await;

    assert_eq!(response.status(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["username"], "alice");
    assert!(body["id"].as_str().is_some());

    let user = app.user_store.get_user(&test_email("a@x.com")).await.unwrap();
    assert!(!user.is_verified());
    assert_eq!(user.otp_tries(), 0);

    let code = app.stored_code("a@x.com").await;
    assert_eq!(code.len(), 6);
    assert!(code.bytes().all(|b| b.is_ascii_digit()));

    let sent = app.wait_for_emails(1).await;
    assert_eq!(sent[0].recipient, test_email("a@x.com"));
    assert!(sent[0].content.contains(&code));
}

#[tokio::test]
async fn register_rejects_an_email_collision_with_another_username() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;

    let response = app.register("a@x.com", "bob").await;
    assert_eq!(response.status(), 409);

    let response = app.register("b@x.com", "alice").await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn register_with_the_same_identity_resends_a_code() {
    let app = spawn_app().await;
    app.register("a@x.com", "alice").await;

    let response = app.register("a@x.com", "alice").await;

    assert_eq!(response.status(), 201);
    assert!(app.has_stored_code("a@x.com").await);
    app.wait_for_emails(2).await;
}

#[tokio::test]
async fn register_rejects_invalid_input() {
    let app = spawn_app().await;

    let test_cases = [
        (
            serde_json::json!({
                "email": "not-an-email", "username": "alice",
                "first_name": "A", "last_name": "B", "password": "long-enough-pw",
            }),
            "malformed email",
        ),
        (
            serde_json::json!({
                "email": "a@x.com", "username": "admin",
                "first_name": "A", "last_name": "B", "password": "long-enough-pw",
            }),
            "reserved username",
        ),
        (
            serde_json::json!({
                "email": "a@x.com", "username": "with space",
                "first_name": "A", "last_name": "B", "password": "long-enough-pw",
            }),
            "username with invalid characters",
        ),
        (
            serde_json::json!({
                "email": "a@x.com", "username": "alice",
                "first_name": "", "last_name": "B", "password": "long-enough-pw",
            }),
            "empty first name",
        ),
        (
            serde_json::json!({
                "email": "a@x.com", "username": "alice",
                "first_name": "A", "last_name": "B", "password": "short",
            }),
            "too-short password",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.post("/register", &body).await;
        assert_eq!(response.status(), 400, "expected 400 for {description}");
    }
}
