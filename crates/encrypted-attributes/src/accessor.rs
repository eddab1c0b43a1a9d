//! Classification of requested attribute names into a base field and an
//! access mode.
//!
//! One logical field `f` answers to several names:
//!
//! | name            | read                  | write                  |
//! |-----------------|-----------------------|------------------------|
//! | `f`             | stored envelope       | encrypt, then store    |
//! | `f_decrypted`   | decrypted plaintext   | literal field          |
//! | `f_environment` | envelope environment  | literal field          |
//! | `f_raw`         | literal field         | store verbatim as `f`  |
//!
//! A suffix is honored only when the stripped base is in the
//! [`EncryptedFieldSet`]; otherwise the name is used as-is.

use crate::fields::EncryptedFieldSet;

/// Read suffix yielding the decrypted plaintext.
pub const DECRYPTED_SUFFIX: &str = "_decrypted";
/// Read suffix yielding the envelope's environment label.
pub const ENVIRONMENT_SUFFIX: &str = "_environment";
/// Write suffix storing a value verbatim, bypassing encryption.
pub const RAW_SUFFIX: &str = "_raw";

/// Whether a name is being read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// How the interceptor treats the base field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Stored value as-is on read; encrypt-on-write if the base is encrypted.
    Plain,
    /// Decrypt the stored envelope.
    Decrypted,
    /// Return the stored envelope's environment label.
    Environment,
    /// Store the written value verbatim under the base name.
    RawWrite,
}

/// Result of [`classify_field_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAccess<'a> {
    /// Name under which the value is stored.
    pub base: &'a str,
    pub mode: AccessMode,
    /// `true` if `base` is declared encrypted.
    pub encrypted: bool,
}

impl<'a> FieldAccess<'a> {
    fn plain(name: &'a str, fields: &EncryptedFieldSet) -> Self {
        Self {
            base: name,
            mode: AccessMode::Plain,
            encrypted: fields.contains(name),
        }
    }

    fn suffixed(base: &'a str, mode: AccessMode) -> Self {
        Self {
            base,
            mode,
            encrypted: true,
        }
    }
}

/// Resolve `name` to its base field and access mode.
///
/// Reads check `_decrypted` before `_environment`. Writes only recognise `_raw`.
pub fn classify_field_name<'a>(
    name: &'a str,
    fields: &EncryptedFieldSet,
    access: Access,
) -> FieldAccess<'a> {
    let declared = |suffix: &str| name.strip_suffix(suffix).filter(|base| fields.contains(base));

    match access {
        Access::Read => {
            if let Some(base) = declared(DECRYPTED_SUFFIX) {
                FieldAccess::suffixed(base, AccessMode::Decrypted)
            } else if let Some(base) = declared(ENVIRONMENT_SUFFIX) {
                FieldAccess::suffixed(base, AccessMode::Environment)
            } else {
                FieldAccess::plain(name, fields)
            }
        }
        Access::Write => match declared(RAW_SUFFIX) {
            Some(base) => FieldAccess::suffixed(base, AccessMode::RawWrite),
            None => FieldAccess::plain(name, fields),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> EncryptedFieldSet {
        ["access_token"].into_iter().collect()
    }

    #[test]
    fn plain_read_of_encrypted_field() {
        let a = classify_field_name("access_token", &fields(), Access::Read);
        assert_eq!(a.base, "access_token");
        assert_eq!(a.mode, AccessMode::Plain);
        assert!(a.encrypted);
    }

    #[test]
    fn decrypted_suffix_strips_to_base() {
        let a = classify_field_name("access_token_decrypted", &fields(), Access::Read);
        assert_eq!(a.base, "access_token");
        assert_eq!(a.mode, AccessMode::Decrypted);
    }

    #[test]
    fn environment_suffix_strips_to_base() {
        let a = classify_field_name("access_token_environment", &fields(), Access::Read);
        assert_eq!(a.base, "access_token");
        assert_eq!(a.mode, AccessMode::Environment);
    }

    #[test]
    fn raw_suffix_is_not_a_read_mode() {
        let a = classify_field_name("access_token_raw", &fields(), Access::Read);
        assert_eq!(a.base, "access_token_raw");
        assert_eq!(a.mode, AccessMode::Plain);
        assert!(!a.encrypted);
    }

    #[test]
    fn raw_suffix_write_targets_base() {
        let a = classify_field_name("access_token_raw", &fields(), Access::Write);
        assert_eq!(a.base, "access_token");
        assert_eq!(a.mode, AccessMode::RawWrite);
    }

    #[test]
    fn read_suffixes_are_literal_on_write() {
        for name in ["access_token_decrypted", "access_token_environment"] {
            let a = classify_field_name(name, &fields(), Access::Write);
            assert_eq!(a.base, name);
            assert_eq!(a.mode, AccessMode::Plain);
            assert!(!a.encrypted);
        }
    }

    #[test]
    fn suffix_on_undeclared_base_is_literal() {
        for access in [Access::Read, Access::Write] {
            for name in [
                "other_attribute_decrypted",
                "other_attribute_environment",
                "other_attribute_raw",
            ] {
                let a = classify_field_name(name, &fields(), access);
                assert_eq!(a.base, name);
                assert_eq!(a.mode, AccessMode::Plain);
                assert!(!a.encrypted);
            }
        }
    }

    #[test]
    fn decrypted_checked_before_environment() {
        // Both `x_environment` and `x` are declared; the outer suffix wins.
        let fields: EncryptedFieldSet = ["x", "x_environment"].into_iter().collect();
        let a = classify_field_name("x_environment_decrypted", &fields, Access::Read);
        assert_eq!(a.base, "x_environment");
        assert_eq!(a.mode, AccessMode::Decrypted);
    }

    #[test]
    fn bare_suffix_does_not_match_empty_base() {
        let a = classify_field_name("_decrypted", &fields(), Access::Read);
        assert_eq!(a.base, "_decrypted");
        assert_eq!(a.mode, AccessMode::Plain);
    }
}
