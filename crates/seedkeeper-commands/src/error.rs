//! Command error types for `seedkeeper-commands`.

use seedkeeper_core::{Fingerprint, SecretError};
use thiserror::Error;

use crate::transport::SecretId;

/// Errors produced by import, retrieval and setup commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Payload, fingerprint or generation failure (delegated from core).
    #[error(transparent)]
    Secret(#[from] SecretError),

    /// Secrets must carry a label.
    #[error("label must not be empty")]
    EmptyLabel,

    /// Secret content is empty.
    #[error("secret `{field}` must not be empty")]
    EmptySecret {
        /// Name of the empty field.
        field: &'static str,
    },

    /// A byte field is not valid hexadecimal.
    #[error("field `{field}` is not valid hex")]
    InvalidHex {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Mnemonic word count is not 12, 18 or 24.
    #[error("mnemonic has {word_count} words, expected 12, 18 or 24")]
    UnclassifiedMnemonicSize {
        /// Number of words found.
        word_count: usize,
    },

    /// A secret of the same type and fingerprint is already stored.
    #[error("secret {fingerprint} looks like a duplicate of secret {existing}")]
    LikelyDuplicate {
        /// Fingerprint of the rejected secret.
        fingerprint: Fingerprint,
        /// Id of the catalogued secret it matches.
        existing: SecretId,
    },

    /// Retrieved bytes do not match the catalogued fingerprint.
    #[error("fingerprint mismatch: expected {expected}, got {actual}")]
    FingerprintMismatch {
        /// Fingerprint recorded at import time.
        expected: Fingerprint,
        /// Fingerprint of the retrieved bytes.
        actual: Fingerprint,
    },

    /// No catalogued secret with this id.
    #[error("secret not found: {0}")]
    SecretNotFound(SecretId),

    /// The transport to the secure element failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The global log subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}
