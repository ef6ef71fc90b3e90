/**
 * Password Hashing
 *
 * Thin wrapper around bcrypt. Digests are self-describing
 * (`$2b$<cost>$<salt><hash>`), so the cost used at hash time travels with
 * the digest and verification needs nothing else.
 */
use thiserror::Error;

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Accepted bcrypt cost range
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Errors produced while hashing a password
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Input bcrypt cannot hash faithfully (NUL byte or over 72 bytes)
    #[error("password cannot be encoded: {0}")]
    Encoding(&'static str),

    /// Cost factor outside bcrypt's accepted range
    #[error("invalid bcrypt cost: {0}")]
    Cost(u32),

    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    /// The blocking hashing task panicked or was cancelled
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Password hasher configured with a fixed bcrypt cost.
///
/// Cloning is cheap; the clone is what gets moved onto the blocking pool.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Digest of a throwaway string, verified against when the user is unknown
    dummy_digest: String,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").field("cost", &self.cost).finish()
    }
}

impl PasswordHasher {
    /// Create a hasher for `cost` (4..=31)
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordError::Cost(cost));
        }
        let dummy_digest = bcrypt::hash("gallery-unknown-user", cost)?;
        Ok(Self { cost, dummy_digest })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash `plaintext` with a fresh salt
    ///
    /// # Errors
    /// `PasswordError::Encoding` for input containing NUL or longer than
    /// 72 bytes; bcrypt would otherwise silently hash a different string.
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        if plaintext.contains('\0') {
            return Err(PasswordError::Encoding("contains a NUL byte"));
        }
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::Encoding("longer than 72 bytes"));
        }
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// Check `plaintext` against `digest`.
    ///
    /// Malformed digests yield `false` rather than an error, so callers
    /// cannot tell a corrupt record from a wrong password.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        bcrypt::verify(plaintext, digest).unwrap_or(false)
    }

    /// Spend one verification's worth of work and return `false`
    pub fn verify_dummy(&self, plaintext: &str) -> bool {
        let _ = self.verify(plaintext, &self.dummy_digest);
        false
    }

    /// [`hash`](Self::hash) on the blocking thread pool
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, PasswordError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext)).await?
    }

    /// [`verify`](Self::verify) on the blocking thread pool. A failed task
    /// counts as a mismatch.
    pub async fn verify_blocking(&self, plaintext: String, digest: Option<String>) -> bool {
        let hasher = self.clone();
        let task = tokio::task::spawn_blocking(move || match digest {
            Some(digest) => hasher.verify(&plaintext, &digest),
            None => hasher.verify_dummy(&plaintext),
        });
        match task.await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("Password verification task failed: {:?}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_COST).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let digest = hasher.hash("password123").unwrap();

        assert!(digest.starts_with("$2"));
        assert_ne!(digest, "password123");
        assert!(hasher.verify("password123", &digest));
        assert!(!hasher.verify("password124", &digest));
    }

    #[test]
    fn test_salted() {
        let hasher = hasher();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn test_digest_embeds_cost() {
        let digest = PasswordHasher::new(5).unwrap().hash("pw").unwrap();
        assert!(digest.contains("$05$"));
        // verification reads the cost from the digest, not from the hasher
        assert!(hasher().verify("pw", &digest));
    }

    #[test]
    fn test_malformed_digest_is_false() {
        let hasher = hasher();
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "not-a-bcrypt-hash"));
        assert!(!hasher.verify("password", "$2b$04$tooshort"));
    }

    #[test]
    fn test_invalid_input() {
        let hasher = hasher();
        assert_matches!(hasher.hash("nul\0byte"), Err(PasswordError::Encoding(_)));
        assert_matches!(hasher.hash(&"x".repeat(73)), Err(PasswordError::Encoding(_)));
        assert!(hasher.hash(&"x".repeat(72)).is_ok());
    }

    #[test]
    fn test_cost_range() {
        assert_matches!(PasswordHasher::new(3), Err(PasswordError::Cost(3)));
        assert_matches!(PasswordHasher::new(32), Err(PasswordError::Cost(32)));
    }

    #[test]
    fn test_debug_hides_digest() {
        let rendered = format!("{:?}", hasher());
        assert!(!rendered.contains("$2"));
    }

    #[tokio::test]
    async fn test_blocking_variants() {
        let hasher = hasher();
        let digest = hasher.hash_blocking("password123".to_string()).await.unwrap();

        assert!(hasher.verify_blocking("password123".to_string(), Some(digest.clone())).await);
        assert!(!hasher.verify_blocking("nope".to_string(), Some(digest)).await);
        assert!(!hasher.verify_blocking("password123".to_string(), None).await);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn only_the_hashed_password_verifies(
            password in "[a-zA-Z0-9]{1,40}",
            other in "[a-zA-Z0-9]{1,40}",
        ) {
            let hasher = hasher();
            let digest = hasher.hash(&password).unwrap();
            prop_assert!(hasher.verify(&password, &digest));
            prop_assert_eq!(hasher.verify(&other, &digest), password == other);
        }
    }
}
