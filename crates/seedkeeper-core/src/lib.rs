//! `seedkeeper-core` — secret payloads for the Seedkeeper secure element.
//!
//! Pure, synchronous building blocks: zero I/O besides reading an optional
//! wordlist file, zero shared state. The hash primitive, word dictionary and
//! random source are injected by the caller.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod secret_type;

pub mod payload;

pub mod fingerprint;

pub mod record;

pub mod password;

pub mod mnemonic;

pub use error::SecretError;
pub use fingerprint::{fingerprint_bytes, DigestPrimitive, Fingerprint, Sha256, FINGERPRINT_LEN};
pub use mnemonic::{classify_mnemonic_size, MnemonicSize};
pub use password::{
    generate_password, generate_password_with_rng, MemorableWordlist, PasswordOptions,
    WordDictionary, DEFAULT_PASSWORD_LENGTH, MAX_MEMORABLE_WORDS, MAX_PASSWORD_LENGTH,
};
pub use payload::{split_fields, Payload, MAX_FIELD_LEN};
pub use record::SecretRecord;
pub use secret_type::{SecretType, DEFAULT_SUBTYPE};
