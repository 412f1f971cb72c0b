//! Secret records: everything the transport needs to import one secret.
//!
//! The record bundles the header values (type, subtype, label) with the
//! encoded payload and its fingerprint. How the header is laid out on the
//! wire is up to the transport.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::SecretError;
use crate::fingerprint::{self, DigestPrimitive, Fingerprint};
use crate::payload::{Payload, MAX_FIELD_LEN};
use crate::secret_type::SecretType;

/// A fully encoded secret, ready for transfer.
#[must_use = "a secret record must be handed to the transport"]
#[derive(Clone, PartialEq, Eq)]
pub struct SecretRecord {
    secret_type: SecretType,
    subtype: u8,
    label: String,
    payload: Zeroizing<Vec<u8>>,
    fingerprint: Fingerprint,
}

impl SecretRecord {
    /// Encode `payload` and fingerprint it with `digest`.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::FieldTooLarge`] if the label or any payload
    /// field exceeds [`MAX_FIELD_LEN`] bytes, and
    /// [`SecretError::DigestTooShort`] if `digest` is unusable.
    pub fn from_payload<D>(payload: &Payload, digest: &D) -> Result<Self, SecretError>
    where
        D: DigestPrimitive + ?Sized,
    {
        let label = payload.label();
        if label.len() > MAX_FIELD_LEN {
            return Err(SecretError::FieldTooLarge {
                field: "label",
                len: label.len(),
            });
        }

        let encoded = payload.encode()?;
        let fingerprint = fingerprint::fingerprint_bytes(&encoded, digest)?;

        Ok(Self {
            secret_type: payload.secret_type(),
            subtype: payload.subtype(),
            label: label.to_owned(),
            payload: encoded,
            fingerprint,
        })
    }

    /// Kind of the secret.
    #[must_use]
    pub const fn secret_type(&self) -> SecretType {
        self.secret_type
    }

    /// Subtype byte.
    #[must_use]
    pub const fn subtype(&self) -> u8 {
        self.subtype
    }

    /// Label shown for the secret.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Encoded payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Fingerprint of [`SecretRecord::payload`].
    #[must_use]
    pub const fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Decode the payload back into structured form.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::MalformedPayload`] if the bytes do not match
    /// the record's type.
    pub fn to_payload(&self) -> Result<Payload, SecretError> {
        Payload::decode(self.secret_type, self.label.clone(), &self.payload)
    }
}

impl fmt::Debug for SecretRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretRecord")
            .field("secret_type", &self.secret_type)
            .field("subtype", &self.subtype)
            .field("label", &self.label)
            .field("payload_len", &self.payload.len())
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}
