//! Transport seam to the secure element.
//!
//! The command layer never talks to hardware directly. It hands finished
//! [`SecretRecord`]s to a [`SecretTransport`] and receives an element-side
//! id back. [`MemoryTransport`] keeps records in process memory.

use std::collections::BTreeMap;
use std::fmt;

use seedkeeper_core::SecretRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

/// Element-side identifier of a stored secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretId(pub u16);

impl fmt::Display for SecretId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Moves encoded secrets to and from the secure element.
pub trait SecretTransport {
    /// Transport failure, reported to the caller as text.
    type Error: fmt::Display;

    /// Store `record` on the element and return its id.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the element refuses the record.
    fn store(&mut self, record: &SecretRecord) -> Result<SecretId, Self::Error>;

    /// Read back the encoded payload stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if `id` is unknown or unreadable.
    fn retrieve(&mut self, id: SecretId) -> Result<Zeroizing<Vec<u8>>, Self::Error>;
}

// ── In-memory element ──────────────────────────────────────────────

/// Errors from [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryTransportError {
    /// Every id has been handed out.
    #[error("element is full")]
    Full,

    /// Nothing stored under this id.
    #[error("no secret stored under {0}")]
    UnknownId(SecretId),
}

/// Element stand-in holding payloads in memory, ids assigned sequentially
/// from 0.
#[derive(Default)]
pub struct MemoryTransport {
    secrets: BTreeMap<SecretId, Zeroizing<Vec<u8>>>,
    next_id: u16,
    exhausted: bool,
}

impl MemoryTransport {
    /// Empty element.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored secrets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Overwrite the payload under `id`, simulating on-element corruption.
    #[cfg(test)]
    pub(crate) fn tamper(&mut self, id: SecretId, bytes: Vec<u8>) {
        self.secrets.insert(id, Zeroizing::new(bytes));
    }
}

impl SecretTransport for MemoryTransport {
    type Error = MemoryTransportError;

    fn store(&mut self, record: &SecretRecord) -> Result<SecretId, Self::Error> {
        if self.exhausted {
            return Err(MemoryTransportError::Full);
        }
        let id = SecretId(self.next_id);
        match self.next_id.checked_add(1) {
            Some(next) => self.next_id = next,
            None => self.exhausted = true,
        }
        self.secrets
            .insert(id, Zeroizing::new(record.payload().to_vec()));
        Ok(id)
    }

    fn retrieve(&mut self, id: SecretId) -> Result<Zeroizing<Vec<u8>>, Self::Error> {
        self.secrets
            .get(&id)
            .cloned()
            .ok_or(MemoryTransportError::UnknownId(id))
    }
}

impl fmt::Debug for MemoryTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTransport")
            .field("secrets", &self.secrets.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

// ── Tests ──────────────────────────────────────────────────────────
