/**
 * User Request and Response Types
 *
 * Bodies for the user and login endpoints. Password-bearing types have a
 * hand-written `Debug` so plaintext never reaches the logs.
 */
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::error::SharedError;

/// Minimum accepted password length (characters)
pub const MIN_PASSWORD_LEN: usize = 8;

/// Signup request
///
/// Contains the username, email and password for user registration.
#[derive(Deserialize, Serialize, Clone)]
pub struct CreateUserRequest {
    /// Chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// Email address
    pub email: String,
    /// Plaintext password (hashed before storage)
    pub password: String,
}

impl CreateUserRequest {
    /// Validate all fields of a signup request
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SharedError::validation(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Partial user update; absent fields keep their stored value
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(username) = &self.username {
            validate_username(username)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Deserialize, Serialize, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Access token returned by a successful login
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// User response (without sensitive data)
///
/// Contains user information that is safe to return to clients.
/// Does not include the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
}

/// Signup response: the created user plus an access token
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserWithToken {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Per-user resource counts
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub user_id: i64,
    pub project_count: i64,
    pub image_count: i64,
}

/// `{"detail": "..."}` acknowledgement body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn validate_username(username: &str) -> Result<(), SharedError> {
    let invalid = || {
        SharedError::validation(
            "username",
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        )
    };

    if username.len() < 3 || username.len() > 30 {
        return Err(invalid());
    }

    let mut chars = username.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return Err(invalid()),
    }

    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Basic email check: a non-empty local part and domain around a single `@`
pub fn validate_email(email: &str) -> Result<(), SharedError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(SharedError::validation("email", "Invalid email format")),
    }
}
