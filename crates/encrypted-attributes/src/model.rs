//! [`EncryptedModel`]: a host record bound to an interceptor.

use common::AttributeError;
use serde_json::Value;

use crate::crypto::StringCrypter;
use crate::environment::EnvironmentProvider;
use crate::interceptor::Interceptor;
use crate::store::AttributeStore;

/// A record whose attribute reads and writes always pass through an
/// [`Interceptor`].
#[derive(Debug, Clone)]
pub struct EncryptedModel<S, C, E> {
    store: S,
    interceptor: Interceptor<C, E>,
}

impl<S, C, E> EncryptedModel<S, C, E>
where
    S: AttributeStore,
    C: StringCrypter,
    E: EnvironmentProvider,
{
    pub fn new(store: S, interceptor: Interceptor<C, E>) -> Self {
        Self { store, interceptor }
    }

    /// See [`Interceptor::get_attribute`].
    pub fn get(&self, name: &str) -> Result<Value, AttributeError> {
        self.interceptor.get_attribute(&self.store, name)
    }

    /// See [`Interceptor::set_attribute`].
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<Value, AttributeError> {
        self.interceptor
            .set_attribute(&mut self.store, name, value.into())
    }

    /// The underlying store, for serialization or persistence.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn interceptor(&self) -> &Interceptor<C, E> {
        &self.interceptor
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{AesGcmSivCrypter, KEY_LEN};
    use crate::environment::StaticEnvironment;
    use crate::store::Record;
    use serde_json::json;

    fn model() -> EncryptedModel<Record, AesGcmSivCrypter, StaticEnvironment> {
        let crypter = AesGcmSivCrypter::from_slice(&[0x07u8; KEY_LEN]).unwrap();
        EncryptedModel::new(
            Record::new(["access_token"].into_iter().collect()),
            Interceptor::new(crypter, StaticEnvironment::new("testing")),
        )
    }

    #[test]
    fn access_token_scenario() {
        let mut m = model();
        m.set("access_token", "secret").unwrap();

        let stored = m.get("access_token").unwrap();
        assert!(stored.as_str().unwrap().starts_with("testing."));
        assert_eq!(m.get("access_token_environment").unwrap(), json!("testing"));
        assert_eq!(m.get("access_token_decrypted").unwrap(), json!("secret"));
        assert_eq!(m.get("access_token_raw").unwrap(), Value::Null);
    }

    #[test]
    fn raw_escape_hatch_bypasses_encryption() {
        let mut m = model();
        m.set("access_token_raw", "anything at all").unwrap();
        assert_eq!(m.get("access_token").unwrap(), json!("anything at all"));
    }

    #[test]
    fn store_serialises_envelope() {
        let mut m = model();
        let stored = m.set("access_token", "plain-text-string").unwrap();
        let record = m.into_inner();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "access_token": stored })
        );
    }

    #[test]
    fn raw_reads_are_idempotent() {
        let mut m = model();
        m.set("access_token", "secret").unwrap();
        let before = m.store().clone();
        let first = m.get("access_token").unwrap();
        let _ = m.get("access_token_decrypted").unwrap();
        let _ = m.get("access_token_environment").unwrap();
        assert_eq!(m.get("access_token").unwrap(), first);
        assert_eq!(m.store(), &before);
    }
}
