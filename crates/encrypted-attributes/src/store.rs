//! The host record seam: raw attribute storage the interceptor wraps.
//!
//! [`AttributeStore`] is what a host record type exposes; [`Record`] is an
//! in-memory implementation whose serialized form is exactly what is stored.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::fields::EncryptedFieldSet;

/// Raw get/set supplied by the host record.
///
/// Implementations must not transform values: `get_raw` returns what
/// `set_raw` stored, and [`Value::Null`] for unset names.
pub trait AttributeStore {
    /// Names this record declares as encrypted.
    fn encrypted_fields(&self) -> &EncryptedFieldSet;

    /// Current stored value for `name`, or [`Value::Null`] if unset.
    fn get_raw(&self, name: &str) -> Value;

    /// Store `value` under `name`, returning the stored value.
    fn set_raw(&mut self, name: &str, value: Value) -> Value;
}

/// Returns `true` for values the interceptor never transforms: `null` and `""`.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// In-memory attribute storage backed by a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    encrypted: EncryptedFieldSet,
    attributes: Map<String, Value>,
}

impl Record {
    /// Create an empty record declaring `encrypted` as its encrypted fields.
    pub fn new(encrypted: EncryptedFieldSet) -> Self {
        Self {
            encrypted,
            attributes: Map::new(),
        }
    }

    /// Create a record from already-stored attributes (e.g. loaded from a database).
    pub fn with_attributes(encrypted: EncryptedFieldSet, attributes: Map<String, Value>) -> Self {
        Self {
            encrypted,
            attributes,
        }
    }

    /// Remove `name` from storage, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    /// Stored attributes, envelopes verbatim.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Copy of every stored attribute, envelopes verbatim.
    pub fn to_array(&self) -> Map<String, Value> {
        self.attributes.clone()
    }

    /// JSON text of every stored attribute, envelopes verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error only if `serde_json` fails to write the map.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl AttributeStore for Record {
    fn encrypted_fields(&self) -> &EncryptedFieldSet {
        &self.encrypted
    }

    fn get_raw(&self, name: &str) -> Value {
        self.attributes.get(name).cloned().unwrap_or(Value::Null)
    }

    fn set_raw(&mut self, name: &str, value: Value) -> Value {
        self.attributes.insert(name.to_owned(), value.clone());
        value
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.attributes.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Record {
        Record::new(["access_token"].into_iter().collect())
    }

    #[test]
    fn unset_reads_null() {
        assert_eq!(record().get_raw("missing"), Value::Null);
    }

    #[test]
    fn set_raw_stores_verbatim() {
        let mut r = record();
        let stored = r.set_raw("access_token", json!("no-dot-here"));
        assert_eq!(stored, json!("no-dot-here"));
        assert_eq!(r.get_raw("access_token"), json!("no-dot-here"));
    }

    #[test]
    fn remove_clears_value() {
        let mut r = record();
        r.set_raw("name", json!("Alice"));
        assert_eq!(r.remove("name"), Some(json!("Alice")));
        assert_eq!(r.get_raw("name"), Value::Null);
    }

    #[test]
    fn serialises_stored_values_only() {
        let mut r = record();
        r.set_raw("access_token", json!("testing.v1.abc.def"));
        assert_eq!(r.to_json().unwrap(), r#"{"access_token":"testing.v1.abc.def"}"#);
        assert_eq!(Value::Object(r.to_array()), json!({"access_token": "testing.v1.abc.def"}));
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!("")));
        assert!(!is_blank(&json!("x")));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!(false)));
    }
}
