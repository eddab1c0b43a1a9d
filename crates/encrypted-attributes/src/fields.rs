//! The set of attribute names a record declares as encrypted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Attribute names whose values are stored as envelopes.
///
/// Owned by the host record; the interceptor only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedFieldSet(HashSet<String>);

impl EncryptedFieldSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `true` if `name` is declared encrypted.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Declare `name` as encrypted.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for EncryptedFieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
