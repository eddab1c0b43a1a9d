//! [`KeyBytes`]: the 256-bit key held by [`AesGcmSivCrypter`](super::AesGcmSivCrypter).

use super::cipher::CipherError;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// The memory is overwritten with zeroes on drop.
#[derive(Clone)]
pub struct KeyBytes(Box<[u8; KEY_LEN]>);

impl KeyBytes {
    /// Copy `key_bytes` into a new key buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyLength`] if the slice is not [`KEY_LEN`] bytes.
    pub fn from_slice(key_bytes: &[u8]) -> Result<Self, CipherError> {
        if key_bytes.len() != KEY_LEN {
            return Err(CipherError::InvalidKeyLength);
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(key_bytes);
        Ok(Self(buf))
    }

    /// Borrow the raw key material.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Drop for KeyBytes {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("KeyBytes([REDACTED])")
    }
}
