/**
 * Auth Guard
 *
 * Resolves the caller of a protected request from its bearer token.
 *
 * # Resolution
 *
 * 1. No token: `AuthError::Missing`
 * 2. Token fails to decode: `AuthError::Invalid`
 * 3. No string `sub` claim: `AuthError::MissingSubject`
 * 4. Subject not in the store: `AuthError::UserNotFound`
 * 5. Account disabled: `AuthError::Inactive`
 *
 * The store is consulted on every request, so deleting or disabling a user
 * takes effect immediately even for tokens that have not yet expired.
 */
use axum::http::{header, HeaderMap, StatusCode};
use thiserror::Error;

use crate::backend::auth::sessions::{TokenCodec, TokenError};
use crate::backend::store::UserStore;

/// Identity of an authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub user_id: i64,
    pub username: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl AuthenticatedIdentity {
    /// Owner of the resource, or a superuser
    pub fn can_act_for(&self, owner_id: i64) -> bool {
        self.is_superuser || self.user_id == owner_id
    }
}

/// Authentication failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no bearer token supplied")]
    Missing,

    #[error("username or password did not match")]
    InvalidCredentials,

    #[error("token rejected: {0}")]
    Invalid(#[from] TokenError),

    #[error("token has no subject")]
    MissingSubject,

    #[error("token subject is not a known user")]
    UserNotFound,

    #[error("account is disabled")]
    Inactive,

    #[error("user store failure: {0}")]
    Store(#[from] sqlx::Error),
}

impl AuthError {
    /// 401 for every auth outcome, 500 when the store failed
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Client-facing detail string
    pub fn detail(&self) -> &'static str {
        match self {
            Self::Missing => "Not authenticated",
            Self::InvalidCredentials => "Incorrect username or password",
            Self::Invalid(TokenError::Expired) => "Token has expired",
            Self::Invalid(_) | Self::MissingSubject => "Token is invalid",
            Self::UserNotFound => "Could not validate credentials",
            Self::Inactive => "Inactive user",
            Self::Store(_) => "Internal server error",
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively. Any other header shape is
/// treated as no token at all.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Resolve the caller identity for `bearer`
pub async fn resolve<S: UserStore>(
    store: &S,
    codec: &TokenCodec,
    bearer: Option<&str>,
) -> Result<AuthenticatedIdentity, AuthError> {
    let token = bearer.ok_or(AuthError::Missing)?;
    let claims = codec.decode(token)?;
    let username = claims.subject().ok_or(AuthError::MissingSubject)?;

    let user = store
        .find_user_by_username(username)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    // the username may have been released and taken by another account
    if claims.user_id() != Some(user.id) {
        return Err(AuthError::UserNotFound);
    }

    if !user.is_active {
        return Err(AuthError::Inactive);
    }

    Ok(AuthenticatedIdentity {
        user_id: user.id,
        username: user.username,
        is_active: user.is_active,
        is_superuser: user.is_superuser,
    })
}
