/**
 * Credential Verification
 *
 * Checks a username/password pair against the entity store.
 *
 * Every failure mode (unknown user, wrong password, unreadable digest)
 * yields the same `None`, and an unknown user still costs one bcrypt
 * verification, so the caller cannot distinguish them by result or timing.
 * Disabled accounts are not filtered here; the login handler decides what
 * to do with them.
 */
use crate::backend::auth::password::PasswordHasher;
use crate::backend::store::UserStore;

/// Who a successful credential check identified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: i64,
    pub username: String,
    pub is_active: bool,
}

/// Verify `password` for `username`.
///
/// # Returns
/// `Ok(Some(identity))` on a match, `Ok(None)` for any credential mismatch,
/// `Err` only when the store itself fails.
pub async fn authenticate<S: UserStore>(
    store: &S,
    hasher: &PasswordHasher,
    username: &str,
    password: &str,
) -> Result<Option<UserIdentity>, sqlx::Error> {
    let user = store.find_user_by_username(username).await?;

    let digest = user.as_ref().map(|u| u.password_hash.clone());
    let valid = hasher.verify_blocking(password.to_string(), digest).await;

    match user {
        Some(user) if valid => Ok(Some(UserIdentity {
            user_id: user.id,
            username: user.username,
            is_active: user.is_active,
        })),
        Some(_) => {
            tracing::warn!("Invalid password for user: {}", username);
            Ok(None)
        }
        None => {
            tracing::warn!("Login attempt for unknown user: {}", username);
            Ok(None)
        }
    }
}
