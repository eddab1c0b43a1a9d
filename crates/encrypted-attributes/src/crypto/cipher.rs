//! AES-256-GCM-SIV encryption and decryption of attribute strings.
//!
//! **Algorithm choice:** AES-256-GCM-SIV (RFC 8452) is nonce-misuse-resistant.
//! Each call draws a fresh 96-bit nonce from the OS CSPRNG, so encrypting the
//! same plaintext twice yields different ciphertexts.

use aes_gcm_siv::{
    aead::{Aead, KeyInit, OsRng},
    Aes256GcmSiv, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

use super::key::{KeyBytes, KEY_LEN};
use super::StringCrypter;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Prefix that appears at the start of every ciphertext string.
pub const VERSION_PREFIX: &str = "v1";

/// A parsed ciphertext string.
///
/// The string representation is `v1.<base64url(nonce)>.<base64url(ciphertext+tag)>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedField {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl EncryptedField {
    /// Encode this value to its canonical string representation.
    pub fn to_string_repr(&self) -> String {
        format!(
            "{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }

    /// Parse a ciphertext string back into an [`EncryptedField`].
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidFormat`] if the string does not match the
    /// expected `v1.<nonce>.<ciphertext>` structure.
    pub fn parse(s: &str) -> Result<Self, CipherError> {
        let parts: Vec<&str> = s.splitn(3, '.').collect();
        if parts.len() != 3 || parts[0] != VERSION_PREFIX {
            return Err(CipherError::InvalidFormat);
        }
        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| CipherError::InvalidFormat)?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(CipherError::InvalidFormat);
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&nonce_bytes);

        let ciphertext = URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|_| CipherError::InvalidFormat)?;

        Ok(Self { nonce, ciphertext })
    }
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// AES-GCM-SIV encryption or decryption failed.
    #[error("aead operation failed")]
    AeadFailure,

    /// The ciphertext string does not match the expected format.
    #[error("invalid ciphertext format")]
    InvalidFormat,

    /// The decrypted bytes are not valid UTF-8.
    #[error("decrypted value is not valid UTF-8")]
    InvalidUtf8,
}

/// Encrypt plaintext bytes under `key` with a random nonce.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error.
pub fn encrypt_field(plaintext: &[u8], key: &KeyBytes) -> Result<EncryptedField, CipherError> {
    let cipher = build_cipher(key)?;

    use aes_gcm_siv::aead::rand_core::RngCore;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CipherError::AeadFailure)?;

    Ok(EncryptedField {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Decrypt an [`EncryptedField`] back to plaintext bytes.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] if authentication fails (wrong key or tampered data).
pub fn decrypt_field(field: &EncryptedField, key: &KeyBytes) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;
    let nonce = Nonce::from_slice(&field.nonce);
    cipher
        .decrypt(nonce, field.ciphertext.as_ref())
        .map_err(|_| CipherError::AeadFailure)
}

fn build_cipher(key: &KeyBytes) -> Result<Aes256GcmSiv, CipherError> {
    Aes256GcmSiv::new_from_slice(key.as_bytes()).map_err(|_| CipherError::InvalidKeyLength)
}

/// [`StringCrypter`] backed by AES-256-GCM-SIV.
#[derive(Debug, Clone)]
pub struct AesGcmSivCrypter {
    key: KeyBytes,
}

impl AesGcmSivCrypter {
    /// Create a crypter using `key`.
    pub fn new(key: KeyBytes) -> Self {
        Self { key }
    }

    /// Create a crypter from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyLength`] if `key_bytes` is not [`KEY_LEN`] bytes.
    pub fn from_slice(key_bytes: &[u8]) -> Result<Self, CipherError> {
        KeyBytes::from_slice(key_bytes).map(Self::new)
    }
}

impl StringCrypter for AesGcmSivCrypter {
    fn encrypt_string(&self, plaintext: &str) -> Result<String, CipherError> {
        encrypt_field(plaintext.as_bytes(), &self.key).map(|f| f.to_string_repr())
    }

    fn decrypt_string(&self, ciphertext: &str) -> Result<String, CipherError> {
        let field = EncryptedField::parse(ciphertext)?;
        let plaintext = decrypt_field(&field, &self.key)?;
        String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_key() -> KeyBytes {
        use aes_gcm_siv::aead::rand_core::RngCore;
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        KeyBytes::from_slice(&key).unwrap()
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = random_key();
        let plaintext = b"123-45-6789";
        let encrypted = encrypt_field(plaintext, &key).unwrap();
        let decrypted = decrypt_field(&encrypted, &key).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let encrypted = encrypt_field(b"secret", &random_key()).unwrap();
        assert!(decrypt_field(&encrypted, &random_key()).is_err());
    }

    #[test]
    fn string_repr_parses_back() {
        let key = random_key();
        let field = encrypt_field(b"hello", &key).unwrap();
        let s = field.to_string_repr();
        assert!(s.starts_with("v1."));
        assert_eq!(EncryptedField::parse(&s).unwrap(), field);
    }

    #[test]
    fn parse_rejects_bad_prefix() {
        assert!(EncryptedField::parse("v2.abc.def").is_err());
    }

    #[test]
    fn parse_rejects_too_few_parts() {
        assert!(EncryptedField::parse("v1.abc").is_err());
    }

    #[test]
    fn parse_rejects_bad_base64() {
        assert!(EncryptedField::parse("v1.!!!.abc").is_err());
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let key = random_key();
        let mut field = encrypt_field(b"tamper me", &key).unwrap();
        // Flip a byte in the ciphertext to simulate tampering.
        field.ciphertext[0] ^= 0xFF;
        assert!(decrypt_field(&field, &key).is_err());
    }

    #[test]
    fn crypter_round_trips_strings() {
        let crypter = AesGcmSivCrypter::new(random_key());
        let ciphertext = crypter.encrypt_string("plain-text-string").unwrap();
        assert_ne!(ciphertext, "plain-text-string");
        assert_eq!(
            crypter.decrypt_string(&ciphertext).unwrap(),
            "plain-text-string"
        );
    }

    #[test]
    fn crypter_uses_fresh_nonce_per_call() {
        let crypter = AesGcmSivCrypter::new(random_key());
        let a = crypter.encrypt_string("same").unwrap();
        let b = crypter.encrypt_string("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn crypter_rejects_garbage() {
        let crypter = AesGcmSivCrypter::new(random_key());
        assert!(matches!(
            crypter.decrypt_string("invalid-encrypted-string"),
            Err(CipherError::InvalidFormat)
        ));
    }

    #[test]
    fn crypter_rejects_short_key() {
        assert!(AesGcmSivCrypter::from_slice(&[0u8; 16]).is_err());
    }
}
