//! Secret payloads and their canonical byte encoding.
//!
//! A [`Payload`] is the content of a secret, without its label. It is
//! encoded once into a sequence of length-prefixed fields and handed to the
//! transport together with its type code, subtype and label.
//!
//! # Field layout
//!
//! ```text
//! Masterseed        [len] seed
//! Electrum / Bip39  [len] mnemonic  ([len] passphrase)
//! Pubkey            [len] pubkey
//! Secret2FA         [len] secret
//! Password          [len] password  ([len] login)  ([len] url)
//! Default           [len] data
//! ```
//!
//! Parenthesised fields are written only when present. Every field is at
//! most [`MAX_FIELD_LEN`] bytes; longer fields are rejected, never truncated.

pub mod tlv;

pub use tlv::{split_fields, MAX_FIELD_LEN};

use std::fmt;

use data_encoding::HEXLOWER;
use zeroize::{Zeroize, Zeroizing};

use crate::error::SecretError;
use crate::fingerprint::{self, DigestPrimitive, Fingerprint};
use crate::mnemonic::{classify_mnemonic_size, MnemonicSize};
use crate::secret_type::{SecretType, DEFAULT_SUBTYPE};
use tlv::{FieldReader, FieldWriter};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Structured secret content prior to binary encoding.
///
/// Wiped on drop. `Debug` shows the kind and label only.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub enum Payload {
    /// Raw master seed.
    Masterseed { label: String, seed: Vec<u8> },
    /// Electrum mnemonic phrase (words joined by single spaces).
    ElectrumMnemonic {
        label: String,
        mnemonic: String,
        passphrase: Option<String>,
    },
    /// BIP39 mnemonic phrase (words joined by single spaces).
    Bip39Mnemonic {
        label: String,
        mnemonic: String,
        passphrase: Option<String>,
    },
    /// Public key bytes.
    Pubkey { label: String, pubkey: Vec<u8> },
    /// Two-factor shared secret.
    Secret2Fa { label: String, secret: Vec<u8> },
    /// Password with optional login and URL.
    Password {
        label: String,
        password: String,
        login: Option<String>,
        url: Option<String>,
    },
    /// Generic bytes.
    Default { label: String, data: Vec<u8> },
}

impl Drop for Payload {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("type", &self.secret_type())
            .field("label", &self.label())
            .field("content", &"***")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Payload {
    /// Master seed payload.
    pub fn masterseed(label: impl Into<String>, seed: impl Into<Vec<u8>>) -> Self {
        Self::Masterseed {
            label: label.into(),
            seed: seed.into(),
        }
    }

    /// Electrum mnemonic payload.
    pub fn electrum_mnemonic(
        label: impl Into<String>,
        mnemonic: impl Into<String>,
        passphrase: Option<String>,
    ) -> Self {
        Self::ElectrumMnemonic {
            label: label.into(),
            mnemonic: mnemonic.into(),
            passphrase,
        }
    }

    /// BIP39 mnemonic payload.
    pub fn bip39_mnemonic(
        label: impl Into<String>,
        mnemonic: impl Into<String>,
        passphrase: Option<String>,
    ) -> Self {
        Self::Bip39Mnemonic {
            label: label.into(),
            mnemonic: mnemonic.into(),
            passphrase,
        }
    }

    /// Public key payload.
    pub fn pubkey(label: impl Into<String>, pubkey: impl Into<Vec<u8>>) -> Self {
        Self::Pubkey {
            label: label.into(),
            pubkey: pubkey.into(),
        }
    }

    /// Two-factor secret payload.
    pub fn secret_2fa(label: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        Self::Secret2Fa {
            label: label.into(),
            secret: secret.into(),
        }
    }

    /// Password payload.
    pub fn password(
        label: impl Into<String>,
        password: impl Into<String>,
        login: Option<String>,
        url: Option<String>,
    ) -> Self {
        Self::Password {
            label: label.into(),
            password: password.into(),
            login,
            url,
        }
    }

    /// Generic payload.
    pub fn generic(label: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Default {
            label: label.into(),
            data: data.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl Payload {
    /// Kind of this secret.
    #[must_use]
    pub const fn secret_type(&self) -> SecretType {
        match self {
            Self::Masterseed { .. } => SecretType::Masterseed,
            Self::ElectrumMnemonic { .. } => SecretType::ElectrumMnemonic,
            Self::Bip39Mnemonic { .. } => SecretType::Bip39Mnemonic,
            Self::Pubkey { .. } => SecretType::Pubkey,
            Self::Secret2Fa { .. } => SecretType::Secret2Fa,
            Self::Password { .. } => SecretType::Password,
            Self::Default { .. } => SecretType::DefaultType,
        }
    }

    /// Subtype byte. Always [`DEFAULT_SUBTYPE`] in the current format.
    #[must_use]
    pub const fn subtype(&self) -> u8 {
        DEFAULT_SUBTYPE
    }

    /// Label carried alongside the payload. Not part of the encoding.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Masterseed { label, .. }
            | Self::ElectrumMnemonic { label, .. }
            | Self::Bip39Mnemonic { label, .. }
            | Self::Pubkey { label, .. }
            | Self::Secret2Fa { label, .. }
            | Self::Password { label, .. }
            | Self::Default { label, .. } => label,
        }
    }

    /// Short human-readable name of the secret kind.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.secret_type().name()
    }

    /// Human-oriented rendering of the content.
    ///
    /// Lowercase hex for raw-byte kinds, the phrase or password itself
    /// otherwise. Presentation only: never feed this to [`Payload::encode`]
    /// or a fingerprint.
    #[must_use]
    pub fn display_string(&self) -> String {
        match self {
            Self::Masterseed { seed: bytes, .. }
            | Self::Pubkey { pubkey: bytes, .. }
            | Self::Secret2Fa { secret: bytes, .. }
            | Self::Default { data: bytes, .. } => HEXLOWER.encode(bytes),
            Self::ElectrumMnemonic { mnemonic, .. } | Self::Bip39Mnemonic { mnemonic, .. } => {
                mnemonic.clone()
            }
            Self::Password { password, .. } => password.clone(),
        }
    }

    /// Word-count class of the mnemonic, for mnemonic kinds.
    ///
    /// `None` for other kinds and for phrases of unsupported length.
    #[must_use]
    pub fn mnemonic_size(&self) -> Option<MnemonicSize> {
        match self {
            Self::ElectrumMnemonic { mnemonic, .. } | Self::Bip39Mnemonic { mnemonic, .. } => {
                classify_mnemonic_size(mnemonic)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

impl Payload {
    /// Encode the content as length-prefixed fields.
    ///
    /// Deterministic: equal payloads always produce identical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::FieldTooLarge`] if any field exceeds
    /// [`MAX_FIELD_LEN`] bytes. No output is produced in that case.
    pub fn encode(&self) -> Result<Zeroizing<Vec<u8>>, SecretError> {
        let mut writer = FieldWriter::new();
        match self {
            Self::Masterseed { seed, .. } => writer.push("seed", seed)?,
            Self::ElectrumMnemonic {
                mnemonic,
                passphrase,
                ..
            }
            | Self::Bip39Mnemonic {
                mnemonic,
                passphrase,
                ..
            } => {
                writer.push("mnemonic", mnemonic.as_bytes())?;
                writer.push_optional("passphrase", passphrase.as_deref().map(str::as_bytes))?;
            }
            Self::Pubkey { pubkey, .. } => writer.push("pubkey", pubkey)?,
            Self::Secret2Fa { secret, .. } => writer.push("secret", secret)?,
            Self::Password {
                password,
                login,
                url,
                ..
            } => {
                writer.push("password", password.as_bytes())?;
                writer.push_optional("login", login.as_deref().map(str::as_bytes))?;
                writer.push_optional("url", url.as_deref().map(str::as_bytes))?;
            }
            Self::Default { data, .. } => writer.push("data", data)?,
        }

        let encoded = writer.finish();
        tracing::debug!(
            secret_type = ?self.secret_type(),
            len = encoded.len(),
            "encoded secret payload"
        );
        Ok(encoded)
    }

    /// Fingerprint of the encoded content, see [`fingerprint::fingerprint_bytes`].
    ///
    /// # Errors
    ///
    /// Propagates [`Payload::encode`] errors and
    /// [`SecretError::DigestTooShort`].
    pub fn fingerprint<D>(&self, digest: &D) -> Result<Fingerprint, SecretError>
    where
        D: DigestPrimitive + ?Sized,
    {
        let encoded = self.encode()?;
        fingerprint::fingerprint_bytes(&encoded, digest)
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

impl Payload {
    /// Rebuild a payload from its type, label and encoded content.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::MalformedPayload`] if a field is truncated,
    /// a mandatory field is missing, bytes remain after the last field, or a
    /// text field is not valid UTF-8.
    pub fn decode(
        secret_type: SecretType,
        label: impl Into<String>,
        bytes: &[u8],
    ) -> Result<Self, SecretError> {
        let label = label.into();
        let mut reader = FieldReader::new(bytes);

        let payload = match secret_type {
            SecretType::Masterseed => Self::masterseed(label, reader.read("seed")?),
            SecretType::ElectrumMnemonic | SecretType::Bip39Mnemonic => {
                let mnemonic = utf8_field("mnemonic", reader.read("mnemonic")?)?;
                let passphrase = reader
                    .read_optional("passphrase")?
                    .map(|bytes| utf8_field("passphrase", bytes))
                    .transpose()?;
                if secret_type == SecretType::Bip39Mnemonic {
                    Self::bip39_mnemonic(label, mnemonic, passphrase)
                } else {
                    Self::electrum_mnemonic(label, mnemonic, passphrase)
                }
            }
            SecretType::Pubkey => Self::pubkey(label, reader.read("pubkey")?),
            SecretType::Secret2Fa => Self::secret_2fa(label, reader.read("secret")?),
            SecretType::Password => {
                let password = utf8_field("password", reader.read("password")?)?;
                let login = reader
                    .read_optional("login")?
                    .map(|bytes| utf8_field("login", bytes))
                    .transpose()?;
                let url = reader
                    .read_optional("url")?
                    .map(|bytes| utf8_field("url", bytes))
                    .transpose()?;
                Self::password(label, password, login, url)
            }
            SecretType::DefaultType => Self::generic(label, reader.read("data")?),
        };

        reader.finish()?;
        Ok(payload)
    }
}

fn utf8_field(field: &'static str, bytes: &[u8]) -> Result<String, SecretError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| SecretError::MalformedPayload(format!("field `{field}` is not valid UTF-8")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
