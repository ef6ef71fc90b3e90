//! Common test utilities and helpers
//!
//! This module provides shared utilities for the API tests:
//! - A `TestApp` wrapping the real router over an in-memory database
//! - Request helpers returning status, headers and body
//! - Authentication helpers (signup, login, bearer headers)

#![allow(dead_code)]

pub mod auth_helpers;

pub use auth_helpers::*;

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use gallery::backend::routes::create_router;
use gallery::backend::server::{build_state, AppState, AuthConfig, ServerConfig};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024;

/// A running application plus the resources it owns
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    /// Image directory; removed when the app is dropped
    pub image_dir: TempDir,
}

/// Response pieces the tests look at
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response body is not JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn detail(&self) -> String {
        self.json()["detail"].as_str().unwrap_or_default().to_string()
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let image_dir = tempfile::tempdir().unwrap();

        let mut auth = AuthConfig::with_secret(TEST_SECRET);
        auth.bcrypt_cost = 4;
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            database_url: "sqlite::memory:".to_string(),
            image_dir: image_dir.path().to_path_buf(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            auth,
        };

        let state = build_state(&config).await.unwrap();
        let router = create_router(state.clone());

        Self {
            router,
            state,
            image_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(build(Method::GET, uri, token, None, Body::empty())).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(build(Method::DELETE, uri, token, None, Body::empty())).await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.send(json_request(Method::POST, uri, token, body)).await
    }

    pub async fn put_json(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.send(json_request(Method::PUT, uri, token, body)).await
    }

    pub async fn post_empty(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(build(Method::POST, uri, token, None, Body::empty())).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        self.send(build(
            Method::POST,
            uri,
            None,
            Some("application/x-www-form-urlencoded"),
            Body::from(form.to_string()),
        ))
        .await
    }

    /// Upload `bytes` as the multipart field `field`
    pub async fn upload(
        &self,
        uri: &str,
        token: Option<&str>,
        field: &str,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> TestResponse {
        let boundary = "gallery-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        self.send(build(
            Method::POST,
            uri,
            token,
            Some(&format!("multipart/form-data; boundary={boundary}")),
            Body::from(body),
        ))
        .await
    }
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    build(
        method,
        uri,
        token,
        Some("application/json"),
        Body::from(body.to_string()),
    )
}

fn build(
    method: Method,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: Body,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(body).unwrap()
}
