//! Authentication test helpers
//!
//! Utilities for creating users through the API and logging them in.

use axum::http::StatusCode;
use serde_json::json;

use super::TestApp;

pub const TEST_PASSWORD: &str = "password123";

/// A user created through `POST /users`
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub token: String,
}

/// Register `username` with [`TEST_PASSWORD`]
pub async fn create_test_user(app: &TestApp, username: &str) -> TestUser {
    let response = app
        .post_json(
            "/users",
            None,
            &json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": TEST_PASSWORD,
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "signup failed: {:?}", response.json());

    let body = response.json();
    TestUser {
        id: body["id"].as_i64().unwrap(),
        username: username.to_string(),
        token: body["token"].as_str().unwrap().to_string(),
    }
}

/// Form-encoded login body
pub fn login_form(username: &str, password: &str) -> String {
    format!("username={username}&password={password}")
}

/// Log in and return the access token
pub async fn login(app: &TestApp, username: &str, password: &str) -> String {
    let response = app.post_form("/login", &login_form(username, password)).await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()["access_token"].as_str().unwrap().to_string()
}

/// Create a project for `user` and return its id
pub async fn create_test_project(app: &TestApp, user: &TestUser, title: &str) -> i64 {
    let response = app
        .post_json(
            &format!("/users/{}/projects", user.id),
            Some(&user.token),
            &json!({"title": title, "description": "test project"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()["id"].as_i64().unwrap()
}
