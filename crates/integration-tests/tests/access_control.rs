//! Authorization boundaries over HTTP.
//!
//! These tests require a `PostgreSQL` database at `GYMHUB_TEST_DATABASE_URL`.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::json;

use gymhub_core::RoleName;
use gymhub_integration_tests::{TestApp, body_json, unique_email};

#[tokio::test]
#[ignore = "Requires PostgreSQL at GYMHUB_TEST_DATABASE_URL"]
async fn test_client_cannot_manage_gym() {
    let app = TestApp::spawn().await;
    let super_admin = app.super_admin().await;

    let resp = super_admin
        .post(app.url("/api/superadmin/gyms"))
        .json(&json!({ "name": "Closed Doors Gym" }))
        .send()
        .await
        .unwrap();
    let gym_id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    let client = TestApp::client();
    let email = unique_email("client");
    app.signup(&client, &email).await;
    app.login(&client, &email).await;

    // Authorization runs before the body is read.
    let resp = client
        .post(app.url(&format!("/api/gym-admin/{gym_id}/memberships")))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(resp).await["error"],
        "You do not have permission to manage this gym."
    );

    let resp = client
        .get(app.url("/api/superadmin/users"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["error"], "Super admin access required.");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at GYMHUB_TEST_DATABASE_URL"]
async fn test_super_admin_sees_missing_gym() {
    let app = TestApp::spawn().await;
    let super_admin = app.super_admin().await;

    let resp = super_admin
        .get(app.url("/api/gym-admin/2147483647/orders"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at GYMHUB_TEST_DATABASE_URL"]
async fn test_login_failures_are_uniform() {
    let app = TestApp::spawn().await;
    let (_, email) = app.create_user(RoleName::Client).await;
    let client = TestApp::client();

    for (email, password) in [
        (email.as_str(), "wrong-password"),
        ("nobody@gymhub.test", "correct-horse"),
    ] {
        let resp = client
            .post(app.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["error"], "Invalid credentials");
    }
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at GYMHUB_TEST_DATABASE_URL"]
async fn test_logout_ends_session() {
    let app = TestApp::spawn().await;
    let (_, email) = app.create_user(RoleName::Client).await;
    let client = TestApp::client();
    app.login(&client, &email).await;

    let resp = client.get(app.url("/api/account")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(app.url("/api/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client.get(app.url("/api/account")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at GYMHUB_TEST_DATABASE_URL"]
async fn test_duplicate_signup() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();
    let email = unique_email("twice");

    assert_eq!(app.signup(&client, &email).await.status(), StatusCode::CREATED);

    let resp = app.signup(&client, &email).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(resp).await["error"],
        "User with this email already exists."
    );

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(users, 1);

    let roles: i64 = sqlx::query_scalar(
        r"
        SELECT COUNT(*)
        FROM user_roles ur
        JOIN users u ON u.id = ur.user_id
        WHERE u.email = $1
        ",
    )
    .bind(&email)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(roles, 1);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at GYMHUB_TEST_DATABASE_URL"]
async fn test_gym_admin_role_needs_assignment() {
    let app = TestApp::spawn().await;
    let super_admin = app.super_admin().await;
    let gym_id = app
        .create_gym(&super_admin, json!({ "name": "Assignment Gym" }))
        .await;
    let orders = app.url(&format!("/api/gym-admin/{gym_id}/orders"));

    // Holds the global role but manages no gym.
    let (user_id, email) = app.create_user(RoleName::GymAdmin).await;
    let client = TestApp::client();
    let login = app.login(&client, &email).await;
    assert_eq!(login["roles"], json!(["gym_admin"]));

    let resp = client.get(&orders).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let user_id = i64::from(user_id.as_i32());
    app.assign_admin(&super_admin, user_id, gym_id).await;
    let resp = client.get(&orders).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let removal = app.url(&format!("/api/superadmin/admins/{user_id}/{gym_id}"));
    let resp = super_admin.delete(&removal).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], "Gym admin assignment removed.");
    assert_eq!(body["data"]["removed"], true);

    // The session still carries the role; the missing assignment denies access.
    let resp = client.get(&orders).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = super_admin.delete(&removal).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["success"], "Assignment not found.");
}
