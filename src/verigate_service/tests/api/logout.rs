use crate::helpers::spawn_app;

#[tokio::test]
async fn logout_revokes_the_presented_token() {
    let app = spawn_app().await;
    let (auth_token, _) = app.login_from_scratch("a@x.com", "alice").await;

    let response = app
        .client
        .post(format!("{}/logout", app.address))
        .bearer_auth(&auth_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    // the same token is refused from now on
    let response = app
        .client
        .post(format!("{}/logout", app.address))
        .bearer_auth(&auth_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn logout_without_credentials_is_unauthenticated() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(format!("{}/logout", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn logout_rejects_a_garbage_token() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(format!("{}/logout", app.address))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn a_refresh_token_cannot_be_used_as_a_session() {
    let app = spawn_app().await;
    let (_, refresh_token) = app.login_from_scratch("a@x.com", "alice").await;

    let response = app
        .client
        .post(format!("{}/logout", app.address))
        .bearer_auth(&refresh_token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}
