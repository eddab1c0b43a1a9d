//! Configuration loading and validation.
//!
//! Values are read from environment variables. The host application turns
//! them into the interceptor's collaborators via [`Settings::crypter`] and
//! [`Settings::environment`].

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

use crate::crypto::{AesGcmSivCrypter, KeyBytes, KEY_LEN};
use crate::environment::SharedEnvironment;

/// Prefix accepted in front of a base64-encoded `APP_KEY`.
const KEY_PREFIX: &str = "base64:";

/// Validated settings.
#[derive(Clone, Deserialize)]
pub struct Settings {
    /// Deployment environment name stamped on every envelope. **Required.**
    pub app_env: String,

    /// Base64 encoding of the 32-byte encryption key, optionally prefixed
    /// with `base64:`. **Required.**
    pub app_key: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("app_env", &self.app_env)
            .field("app_key", &"[REDACTED]")
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Settings {
    /// Load and validate settings from environment variables
    /// (`APP_ENV`, `APP_KEY`, `LOG_LEVEL`).
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_builder(
            config::Config::builder().add_source(config::Environment::default()),
        )
    }

    /// Load and validate settings from an arbitrary `config` builder.
    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let cfg = builder
            .build()
            .context("failed to build configuration")?;

        let s: Settings = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        s.validate()?;
        Ok(s)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.app_env.trim().is_empty() {
            anyhow::bail!("APP_ENV is required and must not be empty");
        }
        if self.app_env.contains(common::envelope::SEPARATOR) {
            anyhow::bail!("APP_ENV must not contain '.'");
        }
        self.key_bytes()?;
        Ok(())
    }

    /// Decode `app_key` into key bytes.
    pub fn key_bytes(&self) -> Result<KeyBytes> {
        let encoded = self.app_key.trim();
        let encoded = encoded.strip_prefix(KEY_PREFIX).unwrap_or(encoded);
        let decoded = STANDARD
            .decode(encoded)
            .context("APP_KEY is not valid base64")?;
        KeyBytes::from_slice(&decoded)
            .with_context(|| format!("APP_KEY must decode to {KEY_LEN} bytes"))
    }

    /// Build the default crypto service from `app_key`.
    pub fn crypter(&self) -> Result<AesGcmSivCrypter> {
        self.key_bytes().map(AesGcmSivCrypter::new)
    }

    /// Build a process-wide environment provider seeded with `app_env`.
    pub fn environment(&self) -> SharedEnvironment {
        SharedEnvironment::new(self.app_env.clone())
    }
}
