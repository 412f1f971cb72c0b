//! Secret kinds and their one-byte type codes.
//!
//! The codes are interpreted by the secure element to select a decoder, so
//! they are part of the persisted format: a code is never reassigned once
//! deployed.

use serde::{Deserialize, Serialize};

use crate::error::SecretError;

/// Subtype byte carried by every payload in the current format.
pub const DEFAULT_SUBTYPE: u8 = 0x00;

/// Codes allocated by the applet to secret kinds not modelled here.
///
/// None of these may ever be assigned to a [`SecretType`] variant.
pub const RESERVED_TYPE_CODES: [u8; 9] = [0x20, 0x50, 0x60, 0x71, 0x80, 0x91, 0xA0, 0xC0, 0xC1];

/// Kind of secret stored on the element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecretType {
    /// Generic bytes with no further structure.
    DefaultType,
    /// Raw BIP32 master seed.
    Masterseed,
    /// BIP39 mnemonic with optional passphrase.
    Bip39Mnemonic,
    /// Electrum mnemonic with optional passphrase.
    ElectrumMnemonic,
    /// Public key bytes.
    Pubkey,
    /// Password with optional login and URL.
    Password,
    /// Two-factor (TOTP/HOTP) shared secret.
    #[serde(rename = "secret2FA")]
    Secret2Fa,
}

impl SecretType {
    /// Returns the one-byte code used on the wire.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::DefaultType => 0x00,
            Self::Masterseed => 0x10,
            Self::Bip39Mnemonic => 0x30,
            Self::ElectrumMnemonic => 0x40,
            Self::Pubkey => 0x70,
            Self::Password => 0x90,
            Self::Secret2Fa => 0xB0,
        }
    }

    /// Looks up the secret kind for a wire code.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::UnknownSecretType`] for unallocated or
    /// reserved codes.
    pub fn from_code(code: u8) -> Result<Self, SecretError> {
        match code {
            0x00 => Ok(Self::DefaultType),
            0x10 => Ok(Self::Masterseed),
            0x30 => Ok(Self::Bip39Mnemonic),
            0x40 => Ok(Self::ElectrumMnemonic),
            0x70 => Ok(Self::Pubkey),
            0x90 => Ok(Self::Password),
            0xB0 => Ok(Self::Secret2Fa),
            other => Err(SecretError::UnknownSecretType(other)),
        }
    }

    /// Returns all secret kinds.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::DefaultType,
            Self::Masterseed,
            Self::Bip39Mnemonic,
            Self::ElectrumMnemonic,
            Self::Pubkey,
            Self::Password,
            Self::Secret2Fa,
        ]
    }

    /// Short human-readable name, for display only.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DefaultType => "Secret",
            Self::Masterseed => "Masterseed",
            Self::Bip39Mnemonic => "Bip39 seed",
            Self::ElectrumMnemonic => "Electrum seed",
            Self::Pubkey => "Pubkey",
            Self::Password => "Password",
            Self::Secret2Fa => "2FA secret",
        }
    }
}

impl From<SecretType> for u8 {
    fn from(secret_type: SecretType) -> Self {
        secret_type.code()
    }
}

impl TryFrom<u8> for SecretType {
    type Error = SecretError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_stable() {
        assert_eq!(SecretType::DefaultType.code(), 0x00);
        assert_eq!(SecretType::Masterseed.code(), 0x10);
        assert_eq!(SecretType::Bip39Mnemonic.code(), 0x30);
        assert_eq!(SecretType::ElectrumMnemonic.code(), 0x40);
        assert_eq!(SecretType::Pubkey.code(), 0x70);
        assert_eq!(SecretType::Password.code(), 0x90);
        assert_eq!(SecretType::Secret2Fa.code(), 0xB0);
    }

    #[test]
    fn codes_are_unique_and_not_reserved() {
        let codes: HashSet<u8> = SecretType::all().iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), SecretType::all().len());
        for reserved in RESERVED_TYPE_CODES {
            assert!(!codes.contains(&reserved), "{reserved:#04x} is reserved");
        }
    }

    #[test]
    fn code_lookup_matches_every_variant() {
        for secret_type in SecretType::all() {
            assert_eq!(SecretType::from_code(secret_type.code()), Ok(secret_type));
            assert_eq!(SecretType::try_from(u8::from(secret_type)), Ok(secret_type));
        }
    }

    #[test]
    fn reserved_codes_are_rejected() {
        for reserved in RESERVED_TYPE_CODES {
            assert_eq!(
                SecretType::from_code(reserved),
                Err(SecretError::UnknownSecretType(reserved))
            );
        }
        assert!(SecretType::from_code(0xFF).is_err());
    }

    #[test]
    fn serde_names_are_camel_case() {
        let json = serde_json::to_string(&SecretType::Secret2Fa).unwrap();
        assert_eq!(json, "\"secret2FA\"");
        let json = serde_json::to_string(&SecretType::Bip39Mnemonic).unwrap();
        assert_eq!(json, "\"bip39Mnemonic\"");
        let back: SecretType = serde_json::from_str("\"electrumMnemonic\"").unwrap();
        assert_eq!(back, SecretType::ElectrumMnemonic);
    }
}
