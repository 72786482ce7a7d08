//! Gym profile, plan and event management by an assigned gym admin.
//!
//! These tests require a `PostgreSQL` database at `GYMHUB_TEST_DATABASE_URL`.

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use gymhub_integration_tests::{TestApp, body_json};

async fn send_patch(
    app: &TestApp,
    client: &Client,
    path: &str,
    body: Value,
) -> reqwest::Response {
    client
        .patch(app.url(path))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn send_delete(app: &TestApp, client: &Client, path: &str) -> reqwest::Response {
    client.delete(app.url(path)).send().await.unwrap()
}

async fn get_json(app: &TestApp, client: &Client, path: &str) -> Value {
    let resp = client.get(app.url(path)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at GYMHUB_TEST_DATABASE_URL"]
async fn test_gym_profile_patch_leaves_absent_fields() {
    let app = TestApp::spawn().await;
    let super_admin = app.super_admin().await;
    let gym_id = app
        .create_gym(
            &super_admin,
            json!({
                "name": "Harbor Strength",
                "address": "1 Pier Rd",
                "contactPhone": "555-0100",
                "contactEmail": "desk@harbor.test",
            }),
        )
        .await;
    let admin = app.gym_admin(&super_admin, gym_id).await;
    let profile = format!("/api/gym-admin/{gym_id}/profile");

    let resp = send_patch(
        &app,
        &admin,
        &profile,
        json!({ "facilitiesDescription": "Four squat racks" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], "Gym profile updated successfully.");
    assert_eq!(body["data"]["facilitiesDescription"], "Four squat racks");
    assert_eq!(body["data"]["name"], "Harbor Strength");
    assert_eq!(body["data"]["address"], "1 Pier Rd");
    assert_eq!(body["data"]["contactPhone"], "555-0100");
    assert_eq!(body["data"]["contactEmail"], "desk@harbor.test");

    // The public page is revalidated.
    let page = get_json(&app, &admin, &format!("/api/gyms/{gym_id}")).await;
    assert_eq!(page["facilitiesDescription"], "Four squat racks");
    assert_eq!(page["address"], "1 Pier Rd");

    // A blank contact email clears it like any other text field.
    let resp = send_patch(&app, &admin, &profile, json!({ "contactEmail": "" })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["contactEmail"], "");
    assert_eq!(body["data"]["address"], "1 Pier Rd");

    let resp = send_patch(&app, &admin, &profile, json!({})).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "No fields to update.");

    let resp = send_patch(&app, &admin, &profile, json!({ "createdBy": 1 })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at GYMHUB_TEST_DATABASE_URL"]
async fn test_membership_patch_and_delete() {
    let app = TestApp::spawn().await;
    let super_admin = app.super_admin().await;
    let gym_id = app
        .create_gym(&super_admin, json!({ "name": "Plan Test Gym" }))
        .await;
    let admin = app.gym_admin(&super_admin, gym_id).await;
    let plans = format!("/api/gym-admin/{gym_id}/memberships");

    let resp = admin
        .post(app.url(&plans))
        .json(&json!({
            "name": "Monthly",
            "description": "All access",
            "price": "30",
            "durationDays": 30,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let plan_id = body_json(resp).await["data"]["id"].as_i64().unwrap();
    let plan = format!("{plans}/{plan_id}");

    let resp = send_patch(&app, &admin, &plan, json!({ "price": "35.50" })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], "Membership updated successfully.");
    assert_eq!(body["data"]["price"], "35.50");
    assert_eq!(body["data"]["name"], "Monthly");
    assert_eq!(body["data"]["description"], "All access");
    assert_eq!(body["data"]["durationDays"], 30);

    // Prices are checked before they reach the store.
    for price in ["0.004", "1000000000"] {
        let resp = send_patch(&app, &admin, &plan, json!({ "price": price })).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "price {price}");
    }
    let resp = admin
        .post(app.url(&plans))
        .json(&json!({ "name": "Too cheap", "price": "0.004" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send_delete(&app, &admin, &plan).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await["success"],
        "Membership deleted successfully."
    );

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM memberships WHERE id = $1")
        .bind(i32::try_from(plan_id).unwrap())
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    let listed = get_json(&app, &admin, &plans).await;
    assert!(listed.as_array().unwrap().is_empty());

    let resp = send_delete(&app, &admin, &plan).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"], "Membership not found.");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL at GYMHUB_TEST_DATABASE_URL"]
async fn test_event_crud() {
    let app = TestApp::spawn().await;
    let super_admin = app.super_admin().await;
    let gym_id = app
        .create_gym(&super_admin, json!({ "name": "Event Test Gym" }))
        .await;
    let other_gym = app
        .create_gym(&super_admin, json!({ "name": "Other Event Gym" }))
        .await;
    let admin = app.gym_admin(&super_admin, gym_id).await;
    let events = format!("/api/gym-admin/{gym_id}/events");

    let resp = admin
        .post(app.url(&events))
        .json(&json!({ "title": "Open Mat" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["error"],
        "Event title and date/time are required."
    );

    let resp = admin
        .post(app.url(&events))
        .json(&json!({
            "title": "Open Mat",
            "eventDateTime": "2030-01-15T18:00:00Z",
            "locationDetails": "Studio B",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["success"], "Event created successfully.");
    let event_id = body["data"]["id"].as_i64().unwrap();
    let event = format!("{events}/{event_id}");

    let listed = get_json(&app, &admin, &events).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let resp = send_patch(
        &app,
        &admin,
        &event,
        json!({ "description": "Bring a towel" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], "Event updated successfully.");
    assert_eq!(body["data"]["description"], "Bring a towel");
    assert_eq!(body["data"]["title"], "Open Mat");
    assert_eq!(body["data"]["locationDetails"], "Studio B");
    assert_eq!(body["data"]["eventDateTime"], "2030-01-15T18:00:00Z");

    // Managers see the members-only page without buying a plan.
    let social = get_json(&app, &admin, &format!("/api/gyms/{gym_id}/social")).await;
    assert_eq!(social[0]["description"], "Bring a towel");

    // Events are scoped to their gym.
    let resp = send_patch(
        &app,
        &super_admin,
        &format!("/api/gym-admin/{other_gym}/events/{event_id}"),
        json!({ "title": "Hijacked" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send_delete(&app, &admin, &event).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["success"], "Event deleted successfully.");

    let listed = get_json(&app, &admin, &events).await;
    assert!(listed.as_array().unwrap().is_empty());

    let resp = send_delete(&app, &admin, &event).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"], "Event not found.");
}
