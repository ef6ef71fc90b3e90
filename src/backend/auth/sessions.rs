/**
 * Session Tokens
 *
 * This module handles JWT encoding and decoding for bearer authentication.
 *
 * Tokens are HMAC-signed with the configured secret. The algorithm is
 * pinned: a token whose header names any other algorithm (including
 * `none`) is rejected as malformed.
 *
 * # Claims
 *
 * Callers supply an arbitrary JSON claim map. `iat` is always stamped at
 * encode time and `exp` is added when a lifetime is given. On decode the
 * two timing claims are split out into [`TokenClaims`] so the caller gets
 * back exactly the claims it put in.
 */
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::Value;
use thiserror::Error;

use crate::backend::server::config::{is_hmac, AuthConfig, ConfigError};

/// JSON object of claims
pub type ClaimMap = serde_json::Map<String, Value>;

const ISSUED_AT: &str = "iat";
const EXPIRES_AT: &str = "exp";

/// Token decode/encode failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Validly signed, but `exp` has been reached
    #[error("token has expired")]
    Expired,

    /// Bad signature, unparseable structure or unexpected algorithm
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Decoded token payload
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    /// Every claim except `iat` and `exp`
    pub custom: ClaimMap,
    pub issued_at: Option<i64>,
    pub expires_at: Option<i64>,
}

impl TokenClaims {
    /// The `sub` claim, when present and a string
    pub fn subject(&self) -> Option<&str> {
        self.custom.get("sub").and_then(Value::as_str)
    }

    /// The `uid` claim, when present and an integer
    pub fn user_id(&self) -> Option<i64> {
        self.custom.get("uid").and_then(Value::as_i64)
    }
}

/// Encoder/decoder bound to one secret and one algorithm
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_token_ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Build a codec from validated auth settings
    ///
    /// # Errors
    /// Fails when the secret is too short or the algorithm is not HMAC.
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let secret = config.secret_key.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: config.algorithm,
            access_token_ttl: config.access_token_ttl(),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Sign `claims`, stamping `iat` with the current time
    pub fn encode(&self, claims: &ClaimMap, expires_in: Option<Duration>) -> Result<String, TokenError> {
        self.encode_at(claims, expires_in, Utc::now())
    }

    /// Sign `claims` as if issued at `issued_at`.
    ///
    /// A caller-supplied `exp` survives when `expires_in` is `None`;
    /// otherwise it is replaced by `issued_at + expires_in`.
    pub fn encode_at(
        &self,
        claims: &ClaimMap,
        expires_in: Option<Duration>,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let mut payload = claims.clone();
        let iat = issued_at.timestamp();
        payload.insert(ISSUED_AT.to_string(), Value::from(iat));
        if let Some(ttl) = expires_in {
            payload.insert(EXPIRES_AT.to_string(), Value::from(iat + ttl.num_seconds()));
        }

        jsonwebtoken::encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify and decode `token` with this codec's key and algorithm
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode_token(token, &self.decoding_key, self.algorithm)
    }

    /// Mint an access token for account `user_id`/`username` with the
    /// configured lifetime
    pub fn issue_access_token(&self, user_id: i64, username: &str) -> Result<String, TokenError> {
        let mut claims = ClaimMap::new();
        claims.insert("sub".to_string(), Value::from(username));
        claims.insert("uid".to_string(), Value::from(user_id));
        self.encode(&claims, Some(self.access_token_ttl))
    }
}

/// Verify and decode `token` against `key`, accepting only `algorithm`.
///
/// Signature is checked before expiry, so a forged expired token is
/// `Malformed`, not `Expired`.
pub fn decode_token(
    token: &str,
    key: &DecodingKey,
    algorithm: Algorithm,
) -> Result<TokenClaims, TokenError> {
    if !is_hmac(algorithm) {
        return Err(TokenError::Malformed(format!("{algorithm:?} is not accepted")));
    }

    let mut validation = Validation::new(algorithm);
    validation.leeway = 0;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<ClaimMap>(token, key, &validation).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed(e.to_string()),
    })?;

    let mut custom = data.claims;
    let issued_at = take_timestamp(&mut custom, ISSUED_AT)?;
    let expires_at = take_timestamp(&mut custom, EXPIRES_AT)?;

    // jsonwebtoken only rejects `exp < now`; the expiry instant itself is out too
    if let Some(exp) = expires_at {
        if Utc::now().timestamp() >= exp {
            return Err(TokenError::Expired);
        }
    }

    Ok(TokenClaims {
        custom,
        issued_at,
        expires_at,
    })
}

fn take_timestamp(claims: &mut ClaimMap, name: &str) -> Result<Option<i64>, TokenError> {
    match claims.remove(name) {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .or_else(|| value.as_f64().map(|secs| secs as i64))
            .map(Some)
            .ok_or_else(|| TokenError::Malformed(format!("`{name}` is not a number"))),
    }
}
