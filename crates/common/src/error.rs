//! Error types raised while reading or writing encrypted attributes.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed source error from the crypto service.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure to split a stored value into an [`Envelope`](crate::Envelope).
///
/// Carries no attribute name; callers rewrap it into an [`AttributeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The value has no `.` separating the environment from the ciphertext.
    #[error("attribute does not have an environment defined")]
    MissingEnvironment,
}

/// Attribute-scoped error returned by the interceptor.
///
/// Every variant names the logical field (`access_token`, not
/// `access_token_decrypted`).
#[derive(Debug, Error)]
pub enum AttributeError {
    /// The stored envelope has no environment prefix.
    #[error("attribute {attribute} does not have an environment defined")]
    MissingEnvironment { attribute: String },

    /// The crypto service rejected the ciphertext (malformed or wrong key).
    #[error("can't decrypt attribute {attribute}")]
    DecryptionFailure {
        attribute: String,
        #[source]
        source: BoxError,
    },

    /// The crypto service could not produce a ciphertext.
    #[error("can't encrypt attribute {attribute}")]
    EncryptionFailure {
        attribute: String,
        #[source]
        source: BoxError,
    },

    /// The current environment label contains the envelope separator.
    #[error("environment {environment:?} for attribute {attribute} must not contain '.'")]
    InvalidEnvironment {
        attribute: String,
        environment: String,
    },
}

impl AttributeError {
    /// Attach an attribute name to a generic envelope parse failure.
    pub fn from_envelope(err: EnvelopeError, attribute: impl Into<String>) -> Self {
        match err {
            EnvelopeError::MissingEnvironment => AttributeError::MissingEnvironment {
                attribute: attribute.into(),
            },
        }
    }

    /// Wrap a crypto-service decryption error.
    pub fn decryption(attribute: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AttributeError::DecryptionFailure {
            attribute: attribute.into(),
            source: source.into(),
        }
    }

    /// Wrap a crypto-service encryption error.
    pub fn encryption(attribute: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AttributeError::EncryptionFailure {
            attribute: attribute.into(),
            source: source.into(),
        }
    }

    /// The logical field this error is about.
    pub fn attribute(&self) -> &str {
        match self {
            AttributeError::MissingEnvironment { attribute }
            | AttributeError::DecryptionFailure { attribute, .. }
            | AttributeError::EncryptionFailure { attribute, .. }
            | AttributeError::InvalidEnvironment { attribute, .. } => attribute,
        }
    }
}
