/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /login.
 *
 * # Authentication Process
 *
 * 1. Read the form-encoded username and password
 * 2. Verify them with the credential verifier
 * 3. Refuse disabled accounts
 * 4. Issue an access token
 *
 * # Security
 *
 * - Unknown users and wrong passwords get the identical 401 response
 * - Passwords are never logged or returned in responses
 */
use axum::{extract::State, response::Json, Form};

use crate::backend::auth::credentials::authenticate;
use crate::backend::auth::guard::AuthError;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::{LoginForm, TokenResponse};

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If credentials do not match or the account is disabled
/// * `500 Internal Server Error` - If the database query or token signing fails
///
/// # Example Request
///
/// ```http
/// POST /login HTTP/1.1
/// Content-Type: application/x-www-form-urlencoded
///
/// username=alice&password=securepassword123
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "token_type": "bearer"
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, BackendError> {
    tracing::info!("Login request for: {}", form.username);

    let identity = authenticate(&state.db_pool, &state.passwords, &form.username, &form.password)
        .await
        .map_err(|e| {
            tracing::error!("Database error during login: {:?}", e);
            AuthError::Store(e)
        })?
        .ok_or(AuthError::InvalidCredentials)?;

    if !identity.is_active {
        tracing::warn!("Login refused for inactive user: {}", identity.username);
        return Err(AuthError::Inactive.into());
    }

    let access_token = state.tokens.issue_access_token(identity.user_id, &identity.username)?;

    tracing::info!("User logged in successfully: {}", identity.username);

    Ok(Json(TokenResponse::bearer(access_token)))
}
