//! Catalog of secrets known to be on the element.
//!
//! The catalog holds headers only (id, type, label, fingerprint), never
//! payload bytes. It is used to warn about duplicate imports and to check
//! retrieved payloads against the fingerprint recorded at import time.

use seedkeeper_core::{fingerprint_bytes, DigestPrimitive, Fingerprint, SecretRecord, SecretType};
use serde::{Deserialize, Serialize};

use crate::error::CommandError;
use crate::transport::SecretId;

/// Header of one stored secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Element-side id.
    pub id: SecretId,
    /// Kind of the secret.
    pub secret_type: SecretType,
    /// Subtype byte.
    pub subtype: u8,
    /// Display label.
    pub label: String,
    /// Fingerprint of the encoded payload.
    pub fingerprint: Fingerprint,
}

impl CatalogEntry {
    /// Header for `record` stored under `id`.
    #[must_use]
    pub fn from_record(id: SecretId, record: &SecretRecord) -> Self {
        Self {
            id,
            secret_type: record.secret_type(),
            subtype: record.subtype(),
            label: record.label().to_owned(),
            fingerprint: record.fingerprint(),
        }
    }
}

/// Secrets on the element, ordered by insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretCatalog {
    entries: Vec<CatalogEntry>,
}

impl SecretCatalog {
    /// Empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry with the given id.
    #[must_use]
    pub fn get(&self, id: SecretId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Add `entry`, replacing any entry with the same id.
    pub fn insert(&mut self, entry: CatalogEntry) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Remove and return the entry with the given id.
    pub fn remove(&mut self, id: SecretId) -> Option<CatalogEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// First stored secret of the same type with the same fingerprint.
    ///
    /// A 4-byte fingerprint can collide, so a match means "likely", not
    /// "certainly", the same secret.
    #[must_use]
    pub fn find_likely_duplicate(&self, record: &SecretRecord) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| {
            e.secret_type == record.secret_type() && e.fingerprint == record.fingerprint()
        })
    }

    /// Check payload bytes read back from the element against the
    /// fingerprint recorded for `id`.
    ///
    /// # Errors
    ///
    /// - [`CommandError::SecretNotFound`] if `id` is not catalogued
    /// - [`CommandError::FingerprintMismatch`] if the bytes hash differently
    /// - [`CommandError::Secret`] if `digest` is unusable
    pub fn verify_retrieved<D>(
        &self,
        id: SecretId,
        payload: &[u8],
        digest: &D,
    ) -> Result<&CatalogEntry, CommandError>
    where
        D: DigestPrimitive + ?Sized,
    {
        let entry = self.get(id).ok_or(CommandError::SecretNotFound(id))?;
        let actual = fingerprint_bytes(payload, digest)?;
        if actual != entry.fingerprint {
            tracing::warn!(
                %id,
                expected = %entry.fingerprint,
                %actual,
                "retrieved secret does not match its fingerprint"
            );
            return Err(CommandError::FingerprintMismatch {
                expected: entry.fingerprint,
                actual,
            });
        }
        Ok(entry)
    }
}

// ── Tests ──────────────────────────────────────────────────────────
