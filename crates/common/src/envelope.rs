//! The stored form of an encrypted attribute.
//!
//! ```text
//! <environment>.<ciphertext>
//! ```
//!
//! The environment is everything before the first `.`; the ciphertext is
//! everything after it and may itself contain dots.

use std::fmt;

use crate::error::EnvelopeError;

/// Separator between the environment label and the ciphertext.
pub const SEPARATOR: char = '.';

/// Borrowed view over a stored envelope string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    /// Label of the environment the value was encrypted under.
    pub environment: &'a str,
    /// Opaque ciphertext handed to the crypto service.
    pub ciphertext: &'a str,
}

impl<'a> Envelope<'a> {
    /// Split a stored value into environment and ciphertext.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::MissingEnvironment`] if `raw` contains no `.`.
    pub fn parse(raw: &'a str) -> Result<Self, EnvelopeError> {
        let (environment, ciphertext) = raw
            .split_once(SEPARATOR)
            .ok_or(EnvelopeError::MissingEnvironment)?;
        Ok(Self {
            environment,
            ciphertext,
        })
    }

    /// Build the stored string for `ciphertext` labelled with `environment`.
    pub fn seal(environment: &str, ciphertext: &str) -> String {
        let mut out = String::with_capacity(environment.len() + 1 + ciphertext.len());
        out.push_str(environment);
        out.push(SEPARATOR);
        out.push_str(ciphertext);
        out
    }
}

impl fmt::Display for Envelope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.environment, self.ciphertext)
    }
}
