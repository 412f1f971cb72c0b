//! Secret import and retrieval commands.
//!
//! Import turns a front-end request into a [`SecretRecord`], refuses it if
//! the catalog already holds a secret with the same type and fingerprint,
//! then hands it to the transport. Retrieval reads the bytes back and checks
//! them against the catalogued fingerprint before decoding.

use data_encoding::HEXLOWER_PERMISSIVE;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use seedkeeper_core::{mnemonic, DigestPrimitive, Fingerprint, Payload, SecretRecord, SecretType};

use crate::catalog::{CatalogEntry, SecretCatalog};
use crate::error::CommandError;
use crate::transport::{SecretId, SecretTransport};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Front-end request to import one secret.
///
/// Byte-valued fields (`seed`, `pubkey`, `secret`, `data`) are hex strings.
/// `Debug` shows the type and label only.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ImportSecretRequest {
    /// Raw master seed.
    Masterseed { label: String, seed: String },
    /// BIP39 mnemonic.
    Bip39Mnemonic {
        label: String,
        mnemonic: String,
        passphrase: Option<String>,
    },
    /// Electrum mnemonic.
    ElectrumMnemonic {
        label: String,
        mnemonic: String,
        passphrase: Option<String>,
    },
    /// Public key.
    Pubkey { label: String, pubkey: String },
    /// Two-factor shared secret.
    #[serde(rename = "secret2FA")]
    Secret2Fa { label: String, secret: String },
    /// Password with optional login and URL.
    Password {
        label: String,
        password: String,
        login: Option<String>,
        url: Option<String>,
    },
    /// Unstructured bytes.
    #[serde(rename = "defaultType")]
    Default { label: String, data: String },
}

impl ImportSecretRequest {
    /// Kind of secret requested.
    #[must_use]
    pub const fn secret_type(&self) -> SecretType {
        match self {
            Self::Masterseed { .. } => SecretType::Masterseed,
            Self::Bip39Mnemonic { .. } => SecretType::Bip39Mnemonic,
            Self::ElectrumMnemonic { .. } => SecretType::ElectrumMnemonic,
            Self::Pubkey { .. } => SecretType::Pubkey,
            Self::Secret2Fa { .. } => SecretType::Secret2Fa,
            Self::Password { .. } => SecretType::Password,
            Self::Default { .. } => SecretType::DefaultType,
        }
    }

    /// Label requested for the secret.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Masterseed { label, .. }
            | Self::Bip39Mnemonic { label, .. }
            | Self::ElectrumMnemonic { label, .. }
            | Self::Pubkey { label, .. }
            | Self::Secret2Fa { label, .. }
            | Self::Password { label, .. }
            | Self::Default { label, .. } => label,
        }
    }

    /// Validate the request and build its payload.
    ///
    /// # Errors
    ///
    /// - [`CommandError::EmptyLabel`] for a blank label
    /// - [`CommandError::InvalidHex`] for a byte field that is not hex
    /// - [`CommandError::EmptySecret`] for empty secret content
    /// - [`CommandError::UnclassifiedMnemonicSize`] for a mnemonic that is
    ///   not 12, 18 or 24 words
    pub fn to_payload(&self) -> Result<Payload, CommandError> {
        let label = self.label();
        if label.trim().is_empty() {
            return Err(CommandError::EmptyLabel);
        }

        let payload = match self {
            Self::Masterseed { seed, .. } => Payload::masterseed(label, hex_field("seed", seed)?),
            Self::Bip39Mnemonic {
                mnemonic,
                passphrase,
                ..
            } => {
                check_mnemonic(mnemonic)?;
                Payload::bip39_mnemonic(label, mnemonic.as_str(), passphrase.clone())
            }
            Self::ElectrumMnemonic {
                mnemonic,
                passphrase,
                ..
            } => {
                check_mnemonic(mnemonic)?;
                Payload::electrum_mnemonic(label, mnemonic.as_str(), passphrase.clone())
            }
            Self::Pubkey { pubkey, .. } => Payload::pubkey(label, hex_field("pubkey", pubkey)?),
            Self::Secret2Fa { secret, .. } => {
                Payload::secret_2fa(label, hex_field("secret", secret)?)
            }
            Self::Password {
                password,
                login,
                url,
                ..
            } => {
                if password.is_empty() {
                    return Err(CommandError::EmptySecret { field: "password" });
                }
                Payload::password(label, password.as_str(), login.clone(), url.clone())
            }
            Self::Default { data, .. } => Payload::generic(label, hex_field("data", data)?),
        };
        Ok(payload)
    }
}

impl std::fmt::Debug for ImportSecretRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportSecretRequest")
            .field("type", &self.secret_type())
            .field("label", &self.label())
            .finish_non_exhaustive()
    }
}

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSecretResult {
    /// Element-side id of the new secret.
    pub id: SecretId,
    /// Kind of the secret.
    pub secret_type: SecretType,
    /// Display label.
    pub label: String,
    /// Fingerprint of the encoded payload.
    pub fingerprint: Fingerprint,
}

impl From<&CatalogEntry> for ImportSecretResult {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id,
            secret_type: entry.secret_type,
            label: entry.label.clone(),
            fingerprint: entry.fingerprint,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn hex_field(field: &'static str, hex: &str) -> Result<Vec<u8>, CommandError> {
    let bytes = HEXLOWER_PERMISSIVE
        .decode(hex.trim().as_bytes())
        .map_err(|_| CommandError::InvalidHex { field })?;
    if bytes.is_empty() {
        return Err(CommandError::EmptySecret { field });
    }
    Ok(bytes)
}

fn check_mnemonic(phrase: &str) -> Result<(), CommandError> {
    if mnemonic::classify_mnemonic_size(phrase).is_none() {
        let word_count = mnemonic::word_count(phrase);
        if word_count == 0 {
            return Err(CommandError::EmptySecret { field: "mnemonic" });
        }
        return Err(CommandError::UnclassifiedMnemonicSize { word_count });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Import a secret onto the element and catalog it.
///
/// Nothing reaches the transport unless every check passes. The catalog is
/// only updated after the transport accepts the record.
///
/// # Errors
///
/// Any error from [`ImportSecretRequest::to_payload`], plus
/// [`CommandError::Secret`] for oversized fields,
/// [`CommandError::LikelyDuplicate`] when the catalog already holds the
/// secret, and [`CommandError::Transport`] when the element refuses it.
pub fn import_secret<T, D>(
    request: &ImportSecretRequest,
    catalog: &mut SecretCatalog,
    transport: &mut T,
    digest: &D,
) -> Result<ImportSecretResult, CommandError>
where
    T: SecretTransport + ?Sized,
    D: DigestPrimitive + ?Sized,
{
    let payload = request.to_payload()?;
    let record = SecretRecord::from_payload(&payload, digest)?;

    if let Some(existing) = catalog.find_likely_duplicate(&record) {
        tracing::warn!(
            secret_type = ?record.secret_type(),
            fingerprint = %record.fingerprint(),
            existing = %existing.id,
            "refusing likely duplicate secret"
        );
        return Err(CommandError::LikelyDuplicate {
            fingerprint: record.fingerprint(),
            existing: existing.id,
        });
    }

    let id = transport
        .store(&record)
        .map_err(|e| CommandError::Transport(e.to_string()))?;

    let entry = CatalogEntry::from_record(id, &record);
    let result = ImportSecretResult::from(&entry);
    catalog.insert(entry);

    tracing::info!(
        %id,
        secret_type = ?record.secret_type(),
        fingerprint = %record.fingerprint(),
        "secret imported"
    );
    Ok(result)
}

/// Read a catalogued secret back from the element.
///
/// # Errors
///
/// - [`CommandError::SecretNotFound`] if `id` is not catalogued
/// - [`CommandError::Transport`] if the element cannot return it
/// - [`CommandError::FingerprintMismatch`] if the bytes were altered
/// - [`CommandError::Secret`] if the bytes do not decode as the catalogued type
pub fn retrieve_secret<T, D>(
    id: SecretId,
    catalog: &SecretCatalog,
    transport: &mut T,
    digest: &D,
) -> Result<Payload, CommandError>
where
    T: SecretTransport + ?Sized,
    D: DigestPrimitive + ?Sized,
{
    if catalog.get(id).is_none() {
        return Err(CommandError::SecretNotFound(id));
    }

    let bytes = transport
        .retrieve(id)
        .map_err(|e| CommandError::Transport(e.to_string()))?;
    let entry = catalog.verify_retrieved(id, &bytes, digest)?;

    let payload = Payload::decode(entry.secret_type, entry.label.as_str(), &bytes)?;
    tracing::debug!(%id, len = bytes.len(), "secret retrieved");
    Ok(payload)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;
    use seedkeeper_core::{SecretError, Sha256};

    const TWELVE: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn password_request(label: &str, password: &str) -> ImportSecretRequest {
        ImportSecretRequest::Password {
            label: label.into(),
            password: password.into(),
            login: Some("user".into()),
            url: None,
        }
    }

    #[test]
    fn import_stores_and_catalogs() {
        let mut catalog = SecretCatalog::new();
        let mut transport = MemoryTransport::new();

        let result = import_secret(
            &password_request("site", "Ab1!"),
            &mut catalog,
            &mut transport,
            &Sha256,
        )
        .unwrap();

        assert_eq!(result.id, SecretId(0));
        assert_eq!(result.secret_type, SecretType::Password);
        assert_eq!(result.fingerprint.to_hex(), "75a96765");
        assert_eq!(catalog.len(), 1);
        assert_eq!(transport.len(), 1);
    }

    #[test]
    fn duplicate_is_refused_before_transport() {
        let mut catalog = SecretCatalog::new();
        let mut transport = MemoryTransport::new();
        import_secret(&password_request("a", "pw"), &mut catalog, &mut transport, &Sha256)
            .unwrap();

        let err = import_secret(&password_request("b", "pw"), &mut catalog, &mut transport, &Sha256)
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::LikelyDuplicate {
                existing: SecretId(0),
                ..
            }
        ));
        assert_eq!(transport.len(), 1);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn blank_label_is_refused() {
        let err = password_request("  ", "pw").to_payload().unwrap_err();
        assert!(matches!(err, CommandError::EmptyLabel));
    }

    #[test]
    fn empty_password_is_refused() {
        let err = password_request("site", "").to_payload().unwrap_err();
        assert!(matches!(err, CommandError::EmptySecret { field: "password" }));
    }

    #[test]
    fn hex_fields_are_decoded() {
        let request = ImportSecretRequest::Masterseed {
            label: "seed".into(),
            seed: "00FF10ab".into(),
        };
        assert_eq!(
            request.to_payload().unwrap(),
            Payload::masterseed("seed", vec![0x00u8, 0xFF, 0x10, 0xAB])
        );
    }

    #[test]
    fn bad_hex_is_refused() {
        let request = ImportSecretRequest::Pubkey {
            label: "key".into(),
            pubkey: "02zz".into(),
        };
        assert!(matches!(
            request.to_payload(),
            Err(CommandError::InvalidHex { field: "pubkey" })
        ));
    }

    #[test]
    fn empty_hex_is_refused() {
        let request = ImportSecretRequest::Secret2Fa {
            label: "2fa".into(),
            secret: String::new(),
        };
        assert!(matches!(
            request.to_payload(),
            Err(CommandError::EmptySecret { field: "secret" })
        ));
    }

    #[test]
    fn mnemonic_of_unsupported_length_is_refused() {
        let request = ImportSecretRequest::Bip39Mnemonic {
            label: "m".into(),
            mnemonic: "abandon zoo".into(),
            passphrase: None,
        };
        assert!(matches!(
            request.to_payload(),
            Err(CommandError::UnclassifiedMnemonicSize { word_count: 2 })
        ));
    }

    #[test]
    fn blank_mnemonic_is_empty_secret() {
        let request = ImportSecretRequest::ElectrumMnemonic {
            label: "m".into(),
            mnemonic: "   ".into(),
            passphrase: None,
        };
        assert!(matches!(
            request.to_payload(),
            Err(CommandError::EmptySecret { field: "mnemonic" })
        ));
    }

    #[test]
    fn twelve_word_mnemonic_is_accepted() {
        let request = ImportSecretRequest::Bip39Mnemonic {
            label: "wallet".into(),
            mnemonic: TWELVE.into(),
            passphrase: Some("extra".into()),
        };
        let payload = request.to_payload().unwrap();
        assert_eq!(payload.secret_type(), SecretType::Bip39Mnemonic);
    }

    #[test]
    fn oversized_field_surfaces_core_error() {
        let request = ImportSecretRequest::Password {
            label: "site".into(),
            password: "p".repeat(300),
            login: None,
            url: None,
        };
        let err = import_secret(
            &request,
            &mut SecretCatalog::new(),
            &mut MemoryTransport::new(),
            &Sha256,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CommandError::Secret(SecretError::FieldTooLarge {
                field: "password",
                len: 300
            })
        ));
    }

    #[test]
    fn retrieve_returns_imported_payload() {
        let mut catalog = SecretCatalog::new();
        let mut transport = MemoryTransport::new();
        let request = password_request("site", "Ab1!");
        let result = import_secret(&request, &mut catalog, &mut transport, &Sha256).unwrap();

        let payload = retrieve_secret(result.id, &catalog, &mut transport, &Sha256).unwrap();
        assert_eq!(payload, request.to_payload().unwrap());
    }

    #[test]
    fn retrieve_detects_tampering() {
        let mut catalog = SecretCatalog::new();
        let mut transport = MemoryTransport::new();
        let result = import_secret(
            &password_request("site", "Ab1!"),
            &mut catalog,
            &mut transport,
            &Sha256,
        )
        .unwrap();

        transport.tamper(result.id, b"\x04Ab1?\x04user".to_vec());
        assert!(matches!(
            retrieve_secret(result.id, &catalog, &mut transport, &Sha256),
            Err(CommandError::FingerprintMismatch { .. })
        ));
    }

    #[test]
    fn retrieve_unknown_id() {
        assert!(matches!(
            retrieve_secret(
                SecretId(4),
                &SecretCatalog::new(),
                &mut MemoryTransport::new(),
                &Sha256
            ),
            Err(CommandError::SecretNotFound(SecretId(4)))
        ));
    }

    #[test]
    fn request_deserializes_from_tagged_json() {
        let request: ImportSecretRequest = serde_json::from_str(
            r#"{"type":"secret2FA","label":"github","secret":"48656c6c6f"}"#,
        )
        .unwrap();
        assert_eq!(request.secret_type(), SecretType::Secret2Fa);
        assert_eq!(
            request.to_payload().unwrap(),
            Payload::secret_2fa("github", b"Hello".to_vec())
        );

        let request: ImportSecretRequest =
            serde_json::from_str(r#"{"type":"defaultType","label":"blob","data":"01"}"#).unwrap();
        assert_eq!(request.secret_type(), SecretType::DefaultType);
    }

    #[test]
    fn request_debug_hides_secret() {
        let debug = format!("{:?}", password_request("site", "hunter2"));
        assert!(debug.contains("site"));
        assert!(!debug.contains("hunter2"), "leaked: {debug}");
    }
}
