/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration.
 *
 * # Configuration Sources
 *
 * Later sources override earlier ones:
 * 1. Built-in defaults
 * 2. TOML file: the path in `GALLERY_CONFIG`, else `gallery.toml` if present
 * 3. Environment variables (a `.env` file is loaded by the binary first)
 *
 * # Environment Variables
 *
 * - `BIND_ADDR` / `SERVER_PORT` - listen address, or just its port
 * - `DATABASE_URL` - sqlx SQLite URL
 * - `IMAGE_DIR` - directory for uploaded image bytes
 * - `MAX_UPLOAD_BYTES` - request body cap for uploads
 * - `JWT_SECRET` - HMAC signing key (required, at least 32 bytes)
 * - `JWT_ALGORITHM` - HS256, HS384 or HS512
 * - `ACCESS_TOKEN_EXPIRE_MINUTES` - access token lifetime
 * - `BCRYPT_COST` - bcrypt work factor
 *
 * # Error Handling
 *
 * Unlike optional services, a bad auth configuration is fatal: the server
 * refuses to start without a usable signing secret.
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use serde::Deserialize;
use thiserror::Error;

use crate::backend::auth::password;

/// Config file read when `GALLERY_CONFIG` is not set
pub const DEFAULT_CONFIG_FILE: &str = "gallery.toml";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://gallery.db";
pub const DEFAULT_IMAGE_DIR: &str = "data/images";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

/// Longest accepted access-token lifetime: 366 days
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 366 * 24 * 60;

/// Shortest accepted signing secret, in bytes
pub const MIN_SECRET_BYTES: usize = 32;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            message: message.into(),
        }
    }
}

/// Process-wide server configuration, built once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub image_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub auth: AuthConfig,
}

/// Immutable authentication settings shared by the token codec and the
/// password hasher
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC signing secret
    pub secret_key: String,
    /// Pinned signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    pub access_token_ttl_minutes: i64,
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AuthConfig {
    /// Defaults around the given secret: HS256, 30 minute tokens, bcrypt
    /// default cost
    pub fn with_secret(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            algorithm: Algorithm::HS256,
            access_token_ttl_minutes: DEFAULT_ACCESS_TOKEN_TTL_MINUTES,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_token_ttl_minutes)
    }

    /// Validate the auth settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_key.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.secret_key.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::invalid(
                "JWT_SECRET",
                format!("must be at least {MIN_SECRET_BYTES} bytes"),
            ));
        }
        if !is_hmac(self.algorithm) {
            return Err(ConfigError::invalid(
                "JWT_ALGORITHM",
                format!("{:?} is not an HMAC algorithm", self.algorithm),
            ));
        }
        if !(1..=MAX_ACCESS_TOKEN_TTL_MINUTES).contains(&self.access_token_ttl_minutes) {
            return Err(ConfigError::invalid(
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                format!("must be between 1 and {MAX_ACCESS_TOKEN_TTL_MINUTES}"),
            ));
        }
        if !(password::MIN_COST..=password::MAX_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid(
                "BCRYPT_COST",
                format!("must be between {} and {}", password::MIN_COST, password::MAX_COST),
            ));
        }
        Ok(())
    }
}

/// `true` for the symmetric algorithms a shared secret can drive
pub fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}

/// On-disk configuration; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bind_addr: Option<String>,
    pub database_url: Option<String>,
    pub image_dir: Option<PathBuf>,
    pub max_upload_bytes: Option<usize>,
    #[serde(default)]
    pub auth: FileAuthConfig,
}

/// `[auth]` table of the config file
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileAuthConfig {
    pub secret_key: Option<String>,
    pub algorithm: Option<String>,
    pub access_token_ttl_minutes: Option<i64>,
    pub bcrypt_cost: Option<u32>,
}

impl fmt::Debug for FileAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileAuthConfig")
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl FileConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

impl ServerConfig {
    /// Load configuration from the config file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let file = match std::env::var("GALLERY_CONFIG") {
            Ok(path) => {
                tracing::info!("Reading configuration from {}", path);
                FileConfig::read(Path::new(&path))?
            }
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                tracing::info!("Reading configuration from {}", DEFAULT_CONFIG_FILE);
                FileConfig::read(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => FileConfig::default(),
        };

        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge defaults, `file` and `env` (highest precedence) and validate
    pub fn from_sources(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut bind_addr = match file.bind_addr {
            Some(addr) => parse_value::<SocketAddr>("bind_addr", &addr)?,
            None => parse_value::<SocketAddr>("bind_addr", DEFAULT_BIND_ADDR)?,
        };
        if let Some(port) = parse_env::<u16>(&env, "SERVER_PORT")? {
            bind_addr.set_port(port);
        }
        if let Some(addr) = parse_env::<SocketAddr>(&env, "BIND_ADDR")? {
            bind_addr = addr;
        }

        let database_url = env("DATABASE_URL")
            .or(file.database_url)
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let image_dir = env("IMAGE_DIR")
            .map(PathBuf::from)
            .or(file.image_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_DIR));

        let max_upload_bytes = parse_env::<usize>(&env, "MAX_UPLOAD_BYTES")?
            .or(file.max_upload_bytes)
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let file_auth = file.auth;
        let secret_key = env("JWT_SECRET")
            .or(file_auth.secret_key)
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;

        let algorithm = match env("JWT_ALGORITHM").or(file_auth.algorithm) {
            Some(name) => parse_value::<Algorithm>("JWT_ALGORITHM", &name)?,
            None => Algorithm::HS256,
        };

        let access_token_ttl_minutes = parse_env::<i64>(&env, "ACCESS_TOKEN_EXPIRE_MINUTES")?
            .or(file_auth.access_token_ttl_minutes)
            .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_MINUTES);

        let bcrypt_cost = parse_env::<u32>(&env, "BCRYPT_COST")?
            .or(file_auth.bcrypt_cost)
            .unwrap_or(bcrypt::DEFAULT_COST);

        let config = Self {
            bind_addr,
            database_url,
            image_dir,
            max_upload_bytes,
            auth: AuthConfig {
                secret_key,
                algorithm,
                access_token_ttl_minutes,
                bcrypt_cost,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::invalid("MAX_UPLOAD_BYTES", "must be positive"));
        }
        self.auth.validate()
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::invalid(key, format!("{raw:?}: {e}")))
}

fn parse_env<T>(
    env: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    env(key).map(|raw| parse_value(key, &raw)).transpose()
}
