//! `seedkeeper-commands` — command layer over `seedkeeper-core`.
//!
//! Request handlers for password generation and secret import/retrieval,
//! the catalog of stored secrets, the transport seam to the secure element,
//! generator preferences and log setup.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod transport;

pub mod catalog;

pub mod commands;

pub mod preferences;

pub mod logging;

pub use catalog::{CatalogEntry, SecretCatalog};
pub use commands::password_generator::{
    generate_password, GeneratePasswordRequest, GeneratePasswordResult,
};
pub use commands::secrets::{
    import_secret, retrieve_secret, ImportSecretRequest, ImportSecretResult,
};
pub use error::CommandError;
pub use preferences::GeneratorPreferences;
pub use transport::{MemoryTransport, MemoryTransportError, SecretId, SecretTransport};
