/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It runs the auth guard on the bearer token and
 * attaches the resolved identity to the request extensions.
 *
 * Handlers take the identity through the [`AuthUser`] extractor. When the
 * middleware has already run, the extractor reuses its result; otherwise
 * it runs the guard itself, so a handler can be protected simply by asking
 * for `AuthUser`.
 */
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::backend::auth::guard::{self, AuthenticatedIdentity};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authentication middleware
///
/// Returns a 401 `BackendError` if the token is missing or invalid, or if
/// its user no longer exists or is disabled.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let identity = authenticate_parts(request.headers(), &app_state).await?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

async fn authenticate_parts(
    headers: &axum::http::HeaderMap,
    app_state: &AppState,
) -> Result<AuthenticatedIdentity, BackendError> {
    let token = guard::bearer_token(headers);
    guard::resolve(&app_state.db_pool, &app_state.tokens, token)
        .await
        .map_err(|e| {
            tracing::warn!("Authentication failed: {}", e);
            BackendError::Auth(e)
        })
}

/// Axum extractor for the authenticated caller
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedIdentity);

impl AuthUser {
    /// Fail with 403 unless the caller owns `owner_id` or is a superuser
    pub fn require_owner(&self, owner_id: i64) -> Result<(), BackendError> {
        if self.0.can_act_for(owner_id) {
            Ok(())
        } else {
            tracing::warn!(
                "User {} denied access to resources of user {}",
                self.0.user_id,
                owner_id
            );
            Err(BackendError::Forbidden)
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<AuthenticatedIdentity>() {
            return Ok(AuthUser(identity.clone()));
        }

        let identity = authenticate_parts(&parts.headers, state).await?;
        parts.extensions.insert(identity.clone());
        Ok(AuthUser(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::test_support::test_state;
    use crate::backend::store::test_support::insert_user;
    use assert_matches::assert_matches;
    use axum::http::{header, Request as HttpRequest, StatusCode};

    fn parts_with(token: Option<&str>) -> Parts {
        let mut builder = HttpRequest::builder().uri("/users/me");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_extractor_resolves_without_middleware() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;
        let user = insert_user(&state.db_pool, "alice", "hash").await;
        let token = state.tokens.issue_access_token(user.id, "alice").unwrap();

        let mut parts = parts_with(Some(&token));
        let AuthUser(identity) = AuthUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(identity.user_id, user.id);
        assert!(parts.extensions.get::<AuthenticatedIdentity>().is_some());
    }

    #[tokio::test]
    async fn test_extractor_prefers_existing_identity() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;
        let identity = AuthenticatedIdentity {
            user_id: 7,
            username: "preset".to_string(),
            is_active: true,
            is_superuser: false,
        };

        let mut parts = parts_with(None);
        parts.extensions.insert(identity.clone());
        let AuthUser(extracted) = AuthUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(extracted, identity);
    }

    #[tokio::test]
    async fn test_extractor_rejects_missing_token() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path()).await;

        let mut parts = parts_with(None);
        let err = AuthUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_matches!(err, BackendError::Auth(guard::AuthError::Missing));
    }

    #[test]
    fn test_require_owner() {
        let user = AuthUser(AuthenticatedIdentity {
            user_id: 1,
            username: "alice".to_string(),
            is_active: true,
            is_superuser: false,
        });
        assert!(user.require_owner(1).is_ok());
        assert_matches!(user.require_owner(2), Err(BackendError::Forbidden));
    }
}
