//! Transparent field-level encryption for record attributes.
//!
//! A record declares some attribute names as encrypted. Writing such an
//! attribute stores `<environment>.<ciphertext>`; reading it back offers
//! several views of the same field:
//!
//! ```text
//! access_token              -> "production.v1.<nonce>.<ciphertext>"
//! access_token_decrypted    -> "secret"
//! access_token_environment  -> "production"
//! access_token_raw = "..."  -> stores "..." under access_token, unencrypted
//! ```
//!
//! # Module layout
//!
//! - [`accessor`]: name → (base field, mode) classification.
//! - [`interceptor`]: the read/write dispatcher.
//! - [`store`]: the host record seam and an in-memory [`Record`].
//! - [`crypto`]: the crypto service trait and its AES-256-GCM-SIV implementation.
//! - [`environment`]: environment label providers.
//! - [`mod@config`], [`telemetry`]: ambient setup for host applications.

pub mod accessor;
pub mod config;
pub mod crypto;
pub mod environment;
pub mod fields;
pub mod interceptor;
pub mod model;
pub mod store;
pub mod telemetry;

pub use common::{AttributeError, Envelope, EnvelopeError};

pub use accessor::{classify_field_name, Access, AccessMode, FieldAccess};
pub use crate::config::Settings;
pub use crypto::{AesGcmSivCrypter, StringCrypter};
pub use environment::{EnvironmentProvider, SharedEnvironment, StaticEnvironment};
pub use fields::EncryptedFieldSet;
pub use interceptor::Interceptor;
pub use model::EncryptedModel;
pub use store::{AttributeStore, Record};
