//! Project API integration tests

mod common;

use axum::http::StatusCode;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_create_and_get_project() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let created = app
        .post_json(
            &format!("/users/{}/projects", alice.id),
            Some(&alice.token),
            &json!({"title": "Trips", "description": "Holiday photos"}),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let project = created.json();
    assert_eq!(project["owner_id"], alice.id);

    let fetched = app.get(&format!("/projects/{}", project["id"]), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), project);
}

#[tokio::test]
async fn test_create_for_someone_else_forbidden() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;

    let response = app
        .post_json(
            &format!("/users/{}/projects", alice.id),
            Some(&bob.token),
            &json!({"title": "Spam"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_blank_title_rejected() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app
        .post_json(
            &format!("/users/{}/projects", alice.id),
            Some(&alice.token),
            &json!({"title": "  "}),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.detail(), "Title cannot be empty");
}

#[tokio::test]
async fn test_partial_update() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let project_id = create_test_project(&app, &alice, "Trips").await;

    let response = app
        .put_json(
            &format!("/projects/{project_id}"),
            Some(&alice.token),
            &json!({"title": "Travel"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["title"], "Travel");
    assert_eq!(body["description"], "test project");
}

#[tokio::test]
async fn test_update_missing_project() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;

    let response = app
        .put_json("/projects/77", Some(&alice.token), &json!({"title": "Nope"}))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.detail(), "Project not found");
}

#[tokio::test]
async fn test_delete_returns_project_and_removes_images() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let project_id = create_test_project(&app, &alice, "Trips").await;

    let upload = app
        .upload(
            &format!("/projects/{project_id}/images"),
            Some(&alice.token),
            "image",
            "beach.png",
            "image/png",
            b"png-bytes",
        )
        .await;
    let image_id = upload.json()["id"].as_i64().unwrap();
    assert!(app.state.images.path_for(image_id).exists());

    let response = app.delete(&format!("/projects/{project_id}"), Some(&alice.token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["id"], project_id);
    assert_eq!(response.json()["title"], "Trips");

    assert_eq!(app.get(&format!("/projects/{project_id}"), None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get(&format!("/images/{image_id}"), None).await.status, StatusCode::NOT_FOUND);
    assert!(!app.state.images.path_for(image_id).exists());
}

#[tokio::test]
async fn test_delete_by_non_owner_forbidden() {
    let app = TestApp::new().await;
    let alice = create_test_user(&app, "alice").await;
    let bob = create_test_user(&app, "bob").await;
    let project_id = create_test_project(&app, &alice, "Trips").await;

    let response = app.delete(&format!("/projects/{project_id}"), Some(&bob.token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.get(&format!("/projects/{project_id}"), None).await.status, StatusCode::OK);
}
