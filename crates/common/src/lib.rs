//! Envelope format and error types shared across `encrypted-attributes` crates.
//!
//! This crate has no crypto dependencies: it only knows how a stored value is
//! laid out (`<environment>.<ciphertext>`) and how failures are reported.

pub mod envelope;
pub mod error;

pub use envelope::Envelope;
pub use error::{AttributeError, EnvelopeError};
