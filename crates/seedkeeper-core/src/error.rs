//! Error types for `seedkeeper-core`.

use thiserror::Error;

/// Errors produced by payload encoding, fingerprinting and generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    /// A content field does not fit its one-byte length prefix.
    #[error("field `{field}` is {len} bytes, the maximum is 255")]
    FieldTooLarge {
        /// Name of the offending field.
        field: &'static str,
        /// Actual byte length of the field.
        len: usize,
    },

    /// Type code not allocated to any known secret kind.
    #[error("unknown secret type code: {0:#04x}")]
    UnknownSecretType(u8),

    /// Encoded payload bytes do not match the layout of their secret type.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The injected hash primitive returned fewer bytes than a fingerprint needs.
    #[error("digest is {len} bytes, at least {required} are required")]
    DigestTooShort {
        /// Digest length returned by the primitive.
        len: usize,
        /// Minimum length needed.
        required: usize,
    },

    /// Requested password length (or word count) is out of range.
    #[error("password length must be between {min} and {max}, got {got}")]
    InvalidPasswordLength {
        /// Smallest accepted length.
        min: usize,
        /// Largest accepted length.
        max: usize,
        /// Requested length.
        got: usize,
    },

    /// Character-set mode with every character class disabled.
    #[error("at least one character class must be selected")]
    NoCharacterClassSelected,

    /// Memorable-word mode with no words to draw from.
    #[error("memorable word dictionary is empty or could not be loaded")]
    EmptyDictionary,
}
