//! The encrypted attribute interceptor.
//!
//! Every read and write of a named attribute goes through [`Interceptor`],
//! which classifies the name (see [`crate::accessor`]), applies the matching
//! transform and delegates storage to the host's [`AttributeStore`].
//!
//! # Logging invariant
//!
//! Events name the attribute and the access mode only. Plaintext, envelopes
//! and key material never appear in log fields.

use std::borrow::Cow;

use common::envelope::{Envelope, SEPARATOR};
use common::AttributeError;
use serde_json::Value;
use tracing::{trace, warn};

use crate::accessor::{classify_field_name, Access, AccessMode};
use crate::crypto::StringCrypter;
use crate::environment::EnvironmentProvider;
use crate::store::{is_blank, AttributeStore};

/// Wraps a host record's raw accessors with envelope encryption.
///
/// Holds no per-record state: the crypto service and environment provider
/// are the only collaborators, so one interceptor can serve many records.
#[derive(Debug, Clone)]
pub struct Interceptor<C, E> {
    crypter: C,
    environment: E,
}

impl<C, E> Interceptor<C, E>
where
    C: StringCrypter,
    E: EnvironmentProvider,
{
    pub fn new(crypter: C, environment: E) -> Self {
        Self {
            crypter,
            environment,
        }
    }

    pub fn crypter(&self) -> &C {
        &self.crypter
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    /// Read `name` from `store`.
    ///
    /// - `f` returns the stored envelope verbatim.
    /// - `f_decrypted` returns the decrypted plaintext as a string.
    /// - `f_environment` returns the envelope's environment label.
    ///
    /// Unset and empty values come back unchanged in every mode.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::MissingEnvironment`] if the stored value has
    /// no environment prefix, and [`AttributeError::DecryptionFailure`] if the
    /// crypto service rejects the ciphertext. Plain reads never fail.
    pub fn get_attribute<S>(&self, store: &S, name: &str) -> Result<Value, AttributeError>
    where
        S: AttributeStore + ?Sized,
    {
        let access = classify_field_name(name, store.encrypted_fields(), Access::Read);
        trace!(attribute = %access.base, mode = ?access.mode, "reading attribute");

        let raw = store.get_raw(access.base);
        if is_blank(&raw) {
            return Ok(raw);
        }

        match access.mode {
            AccessMode::Plain | AccessMode::RawWrite => Ok(raw),
            AccessMode::Environment => self.environment_of(access.base, &raw).map(Value::String),
            AccessMode::Decrypted => self.decrypt_value(access.base, &raw).map(Value::String),
        }
    }

    /// Write `value` to `name` in `store`, returning what the store kept.
    ///
    /// - `f` (declared encrypted, non-empty value) stores
    ///   `<environment>.<ciphertext>`.
    /// - `f_raw` stores `value` verbatim under `f`, unvalidated.
    /// - Anything else, including `null` or `""` written to `f`, is stored as-is.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::InvalidEnvironment`] if the current
    /// environment label contains `.`, and [`AttributeError::EncryptionFailure`]
    /// if the crypto service fails.
    pub fn set_attribute<S>(
        &self,
        store: &mut S,
        name: &str,
        value: Value,
    ) -> Result<Value, AttributeError>
    where
        S: AttributeStore + ?Sized,
    {
        let access = classify_field_name(name, store.encrypted_fields(), Access::Write);
        trace!(attribute = %access.base, mode = ?access.mode, "writing attribute");

        let stored = match access.mode {
            AccessMode::Plain if access.encrypted && !is_blank(&value) => {
                Value::String(self.encrypt_value(access.base, &value)?)
            }
            _ => value,
        };

        Ok(store.set_raw(access.base, stored))
    }

    /// Encrypt `value` into an envelope labelled with the current environment.
    ///
    /// Non-string values are encrypted as their JSON text.
    pub fn encrypt_value(&self, attribute: &str, value: &Value) -> Result<String, AttributeError> {
        let environment = self.environment.current_environment();
        if environment.contains(SEPARATOR) {
            return Err(AttributeError::InvalidEnvironment {
                attribute: attribute.to_owned(),
                environment,
            });
        }

        let ciphertext = self
            .crypter
            .encrypt_string(&value_text(value))
            .map_err(|e| {
                warn!(attribute = %attribute, error = %e, "encryption failed");
                AttributeError::encryption(attribute, e)
            })?;

        Ok(Envelope::seal(&environment, &ciphertext))
    }

    /// Decrypt a stored envelope, ignoring which environment it was written in.
    pub fn decrypt_value(&self, attribute: &str, raw: &Value) -> Result<String, AttributeError> {
        let text = value_text(raw);
        let envelope =
            Envelope::parse(&text).map_err(|e| AttributeError::from_envelope(e, attribute))?;

        self.crypter
            .decrypt_string(envelope.ciphertext)
            .map_err(|e| {
                warn!(attribute = %attribute, error = %e, "decryption failed");
                AttributeError::decryption(attribute, e)
            })
    }

    /// The environment label of a stored envelope, without decrypting.
    pub fn environment_of(&self, attribute: &str, raw: &Value) -> Result<String, AttributeError> {
        let text = value_text(raw);
        let envelope =
            Envelope::parse(&text).map_err(|e| AttributeError::from_envelope(e, attribute))?;
        Ok(envelope.environment.to_owned())
    }
}

/// Text form of a value: strings as-is, anything else as JSON.
fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}
