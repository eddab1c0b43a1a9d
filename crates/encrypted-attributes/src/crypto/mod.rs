//! The crypto service consumed by the interceptor.
//!
//! The interceptor only sees [`StringCrypter`]; it never inspects ciphertext
//! beyond handing it back for decryption. [`AesGcmSivCrypter`] is the default
//! implementation.
//!
//! # Ciphertext format
//!
//! ```text
//! v1.<base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>
//! ```

pub mod cipher;
pub mod key;

pub use cipher::{AesGcmSivCrypter, CipherError};
pub use key::{KeyBytes, KEY_LEN};

/// Encrypts and decrypts string values.
#[cfg_attr(test, mockall::automock)]
pub trait StringCrypter {
    /// Encrypt `plaintext` into an opaque ciphertext string.
    fn encrypt_string(&self, plaintext: &str) -> Result<String, CipherError>;

    /// Decrypt a ciphertext string previously produced by
    /// [`encrypt_string`](StringCrypter::encrypt_string).
    fn decrypt_string(&self, ciphertext: &str) -> Result<String, CipherError>;
}

impl<T: StringCrypter + ?Sized> StringCrypter for &T {
    fn encrypt_string(&self, plaintext: &str) -> Result<String, CipherError> {
        (**self).encrypt_string(plaintext)
    }

    fn decrypt_string(&self, ciphertext: &str) -> Result<String, CipherError> {
        (**self).decrypt_string(ciphertext)
    }
}
