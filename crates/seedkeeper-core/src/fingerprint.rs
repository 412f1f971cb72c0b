//! Short identifiers derived from encoded payloads.
//!
//! A fingerprint is the first [`FINGERPRINT_LEN`] bytes of a digest of the
//! encoded payload. The element computes the same value with SHA-256, so
//! the app can spot duplicates before an import and check integrity after
//! an export.
//!
//! Four bytes collide: a matching fingerprint means "likely the same
//! secret", never "certainly".

use std::fmt;
use std::str::FromStr;

use data_encoding::HEXLOWER_PERMISSIVE;
use ring::digest;
use serde::{Deserialize, Serialize};

use crate::error::SecretError;

/// Number of digest bytes kept as the fingerprint.
pub const FINGERPRINT_LEN: usize = 4;

// ---------------------------------------------------------------------------
// Hash primitive
// ---------------------------------------------------------------------------

/// Opaque hashing primitive: arbitrary bytes in, fixed-size digest out.
pub trait DigestPrimitive {
    /// Digest `data`.
    fn digest(&self, data: &[u8]) -> Vec<u8>;
}

/// SHA-256 via `ring`. The primitive the element itself uses.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256;

impl DigestPrimitive for Sha256 {
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        digest::digest(&digest::SHA256, data).as_ref().to_vec()
    }
}

impl<F> DigestPrimitive for F
where
    F: Fn(&[u8]) -> Vec<u8>,
{
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        self(data)
    }
}

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// Fingerprint of an encoded payload.
///
/// Displays and serializes as 8 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Wrap raw fingerprint bytes, e.g. as reported by the element.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw fingerprint bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        data_encoding::HEXLOWER.encode(&self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

impl FromStr for Fingerprint {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = HEXLOWER_PERMISSIVE
            .decode(s.as_bytes())
            .map_err(|e| SecretError::MalformedPayload(format!("invalid fingerprint hex: {e}")))?;
        let bytes: [u8; FINGERPRINT_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            SecretError::MalformedPayload(format!(
                "fingerprint must be {FINGERPRINT_LEN} bytes, got {}",
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.to_hex()
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = SecretError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derive the fingerprint of already-encoded payload bytes.
///
/// A pure function of `encoded`: equal inputs give equal fingerprints.
///
/// # Errors
///
/// Returns [`SecretError::DigestTooShort`] if `digest` yields fewer than
/// [`FINGERPRINT_LEN`] bytes.
pub fn fingerprint_bytes<D>(encoded: &[u8], digest: &D) -> Result<Fingerprint, SecretError>
where
    D: DigestPrimitive + ?Sized,
{
    let full = digest.digest(encoded);
    let head = full
        .get(..FINGERPRINT_LEN)
        .ok_or_else(|| SecretError::DigestTooShort {
            len: full.len(),
            required: FINGERPRINT_LEN,
        })?;

    let mut bytes = [0u8; FINGERPRINT_LEN];
    bytes.copy_from_slice(head);
    Ok(Fingerprint(bytes))
}
