//! Password generation command.
//!
//! Stateless: wraps `seedkeeper_core::password` for the front end. Unset
//! request fields fall back to the caller's saved options.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use seedkeeper_core::{password, PasswordOptions, WordDictionary};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Front-end request for a generated password.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePasswordRequest {
    /// Characters, or words in memorable mode.
    pub length: Option<usize>,
    /// Include lowercase letters.
    pub lowercase: Option<bool>,
    /// Include uppercase letters / capitalize words.
    pub uppercase: Option<bool>,
    /// Include digits / append a digit to each word.
    pub numbers: Option<bool>,
    /// Include symbols / separate words with symbols.
    pub symbols: Option<bool>,
    /// Build the password from dictionary words.
    pub memorable: Option<bool>,
}

impl GeneratePasswordRequest {
    /// Resolve the request against `defaults`.
    #[must_use]
    pub fn options(&self, defaults: &PasswordOptions) -> PasswordOptions {
        PasswordOptions {
            password_length: self.length.unwrap_or(defaults.password_length),
            include_lowercase: self.lowercase.unwrap_or(defaults.include_lowercase),
            include_uppercase: self.uppercase.unwrap_or(defaults.include_uppercase),
            include_numbers: self.numbers.unwrap_or(defaults.include_numbers),
            include_symbols: self.symbols.unwrap_or(defaults.include_symbols),
            is_memorable_password: self.memorable.unwrap_or(defaults.is_memorable_password),
        }
    }
}

/// Result returned to the front end.
///
/// `Debug` masks the value, and the value is wiped on drop.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePasswordResult {
    /// The generated password.
    pub value: String,
    /// Options it was generated with, for saving as the new defaults.
    pub options: PasswordOptions,
}

impl std::fmt::Debug for GeneratePasswordResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratePasswordResult")
            .field("value", &"***")
            .field("options", &self.options)
            .finish()
    }
}

impl Drop for GeneratePasswordResult {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Generate a password.
///
/// `defaults` supplies every option the request leaves unset; `dictionary`
/// is only consulted in memorable mode. The value is never logged.
///
/// # Errors
///
/// Returns a string error if the resolved options are invalid (length out
/// of range, no character class, empty dictionary in memorable mode).
pub fn generate_password<D>(
    request: &GeneratePasswordRequest,
    defaults: &PasswordOptions,
    dictionary: &D,
) -> Result<GeneratePasswordResult, String>
where
    D: WordDictionary + ?Sized,
{
    let options = request.options(defaults);
    let value = password::generate_password(&options, dictionary).map_err(|e| {
        tracing::debug!(error = %e, "password generation rejected");
        e.to_string()
    })?;
    Ok(GeneratePasswordResult { value, options })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
