/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /users.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Hash password using bcrypt (on the blocking pool)
 * 3. Create user in database
 * 4. Issue an access token
 * 5. Return the user with its token
 *
 * # Validation
 *
 * - Username: 3-30 chars, starts with a letter, letters/digits/underscore
 * - Email must look like `local@domain`
 * - Password must be at least 8 characters long
 * - Username and email must be unique (409 otherwise)
 */
use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::{is_unique_violation, users::create_user};
use crate::shared::{CreateUserRequest, UserWithToken};

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - If any field fails validation
/// * `409 Conflict` - If the username or email is already registered
/// * `500 Internal Server Error` - If hashing, the insert or token signing fails
///
/// # Example Request
///
/// ```http
/// POST /users HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "securepassword123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "id": 1,
///   "username": "alice",
///   "email": "alice@example.com",
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserWithToken>), BackendError> {
    tracing::info!("Signup request for username: {}, email: {}", request.username, request.email);

    request.validate()?;

    let password_hash = state.passwords.hash_blocking(request.password).await?;

    let user = create_user(&state.db_pool, &request.username, &request.email, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::warn!("Username or email already registered: {}", request.username);
                BackendError::Conflict("Username or email already registered".to_string())
            } else {
                BackendError::Database(e)
            }
        })?;

    let token = state.tokens.issue_access_token(user.id, &user.username)?;

    tracing::info!("Created user {} ({})", user.id, user.username);

    Ok((
        StatusCode::CREATED,
        Json(UserWithToken {
            id: user.id,
            username: user.username,
            email: user.email,
            token,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::test_support::test_state;
    use crate::backend::store::users::get_user_by_username;
    use assert_matches::assert_matches;

    fn request(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_hashes_password_and_issues_token() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;

        let (status, Json(created)) =
            signup(State(state.clone()), Json(request("alice", "alice@example.com")))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(state.tokens.decode(&created.token).unwrap().subject(), Some("alice"));

        let stored = get_user_by_username(&state.db_pool, "alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "password123");
        assert!(state.passwords.verify("password123", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;
        signup(State(state.clone()), Json(request("alice", "shared@example.com")))
            .await
            .unwrap();

        let result = signup(State(state), Json(request("bob", "shared@example.com"))).await;
        assert_matches!(result, Err(BackendError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_invalid_username_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;

        let result = signup(State(state), Json(request("9lives", "cat@example.com"))).await;
        assert_matches!(result, Err(BackendError::SharedError(_)));
    }
}
