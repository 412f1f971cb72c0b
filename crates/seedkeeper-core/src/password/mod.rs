//! Password generation.
//!
//! Two mutually exclusive modes, selected by
//! [`PasswordOptions::is_memorable_password`]:
//! - character-set mode: `password_length` characters drawn uniformly from
//!   the enabled character classes
//! - memorable mode: `password_length` dictionary words, optionally
//!   capitalized and digit-suffixed, joined by `-` or random symbols
//!
//! All randomness comes from a CSPRNG. [`generate_password`] uses `OsRng`;
//! [`generate_password_with_rng`] accepts any `RngCore + CryptoRng`.

pub mod wordlist;

pub use wordlist::{MemorableWordlist, WordDictionary};

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::SecretError;
use crate::payload::MAX_FIELD_LEN;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum password length (characters, or words in memorable mode).
pub const MIN_PASSWORD_LENGTH: usize = 1;

/// Maximum character-set password length: the largest password a payload
/// field holds.
pub const MAX_PASSWORD_LENGTH: usize = MAX_FIELD_LEN;

/// Maximum word count in memorable mode.
///
/// Twenty words of up to 10 bytes, each with a digit and a separator, still
/// fit one payload field. Longer dictionary words are caught by the output
/// size check.
pub const MAX_MEMORABLE_WORDS: usize = 20;

/// Default password length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// Separator between memorable words when symbols are disabled.
pub const WORD_SEPARATOR: char = '-';

// Character sets, concatenated in this order.
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()-_=+{}[]|;:'\",.<>?/`~";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Password generator configuration.
///
/// Missing fields deserialize to their [`Default`] values.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordOptions {
    /// Characters in character-set mode, words in memorable mode.
    pub password_length: usize,
    /// Include lowercase letters (a-z).
    pub include_lowercase: bool,
    /// Include uppercase letters; capitalizes words in memorable mode.
    pub include_uppercase: bool,
    /// Include digits; appends a digit to each word in memorable mode.
    pub include_numbers: bool,
    /// Include symbols; uses symbol separators in memorable mode.
    pub include_symbols: bool,
    /// Build the password from dictionary words.
    pub is_memorable_password: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            password_length: DEFAULT_PASSWORD_LENGTH,
            include_lowercase: true,
            include_uppercase: true,
            include_numbers: true,
            include_symbols: true,
            is_memorable_password: false,
        }
    }
}

impl PasswordOptions {
    /// Returns `true` if at least one character class is enabled.
    #[must_use]
    pub const fn has_character_class(&self) -> bool {
        self.include_lowercase
            || self.include_uppercase
            || self.include_numbers
            || self.include_symbols
    }

    /// Candidate alphabet for character-set mode, in fixed class order.
    #[must_use]
    pub fn alphabet(&self) -> Vec<u8> {
        let classes = [
            (self.include_lowercase, LOWERCASE),
            (self.include_uppercase, UPPERCASE),
            (self.include_numbers, DIGITS),
            (self.include_symbols, SYMBOLS),
        ];
        classes
            .iter()
            .filter(|(enabled, _)| *enabled)
            .flat_map(|(_, set)| set.iter().copied())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate a password with the OS CSPRNG.
///
/// `dictionary` is only consulted in memorable mode.
///
/// # Errors
///
/// See [`generate_password_with_rng`].
pub fn generate_password<D>(options: &PasswordOptions, dictionary: &D) -> Result<String, SecretError>
where
    D: WordDictionary + ?Sized,
{
    generate_password_with_rng(options, dictionary, &mut OsRng)
}

/// Generate a password with a caller-supplied CSPRNG.
///
/// Character-set mode makes no promise that every enabled class appears in
/// the output: each character is an independent draw from the whole
/// alphabet.
///
/// # Errors
///
/// Mode preconditions are checked before the length:
/// - [`SecretError::NoCharacterClassSelected`] in character-set mode with
///   every class disabled
/// - [`SecretError::EmptyDictionary`] in memorable mode with an empty
///   dictionary
/// - [`SecretError::InvalidPasswordLength`] if `password_length` is outside
///   [`MIN_PASSWORD_LENGTH`]..=[`MAX_PASSWORD_LENGTH`], or
///   ..=[`MAX_MEMORABLE_WORDS`] in memorable mode
/// - [`SecretError::FieldTooLarge`] if memorable words are long enough that
///   the result would not fit a payload field
pub fn generate_password_with_rng<D, R>(
    options: &PasswordOptions,
    dictionary: &D,
    rng: &mut R,
) -> Result<String, SecretError>
where
    D: WordDictionary + ?Sized,
    R: RngCore + CryptoRng,
{
    let max = if options.is_memorable_password {
        if dictionary.is_empty() {
            return Err(SecretError::EmptyDictionary);
        }
        MAX_MEMORABLE_WORDS
    } else {
        if !options.has_character_class() {
            return Err(SecretError::NoCharacterClassSelected);
        }
        MAX_PASSWORD_LENGTH
    };

    let length = options.password_length;
    if !(MIN_PASSWORD_LENGTH..=max).contains(&length) {
        return Err(SecretError::InvalidPasswordLength {
            min: MIN_PASSWORD_LENGTH,
            max,
            got: length,
        });
    }

    let password = if options.is_memorable_password {
        memorable_password(options, dictionary, rng)?
    } else {
        character_password(options, rng)?
    };

    tracing::debug!(
        memorable = options.is_memorable_password,
        length,
        "generated password"
    );
    Ok(password)
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

fn character_password<R>(options: &PasswordOptions, rng: &mut R) -> Result<String, SecretError>
where
    R: RngCore + CryptoRng,
{
    let alphabet = options.alphabet();
    if alphabet.is_empty() {
        return Err(SecretError::NoCharacterClassSelected);
    }

    Ok((0..options.password_length)
        .map(|_| char::from(alphabet[rng.gen_range(0..alphabet.len())]))
        .collect())
}

fn memorable_password<D, R>(
    options: &PasswordOptions,
    dictionary: &D,
    rng: &mut R,
) -> Result<String, SecretError>
where
    D: WordDictionary + ?Sized,
    R: RngCore + CryptoRng,
{
    let word_count = dictionary.word_count();
    if word_count == 0 {
        return Err(SecretError::EmptyDictionary);
    }

    let mut password = String::new();
    for _ in 0..options.password_length {
        let word = dictionary
            .word(rng.gen_range(0..word_count))
            .ok_or(SecretError::EmptyDictionary)?;

        let separator = if options.include_symbols {
            random_char(SYMBOLS, rng)
        } else {
            WORD_SEPARATOR
        };

        if options.include_uppercase {
            password.push_str(&capitalize(word));
        } else {
            password.push_str(word);
        }
        if options.include_numbers {
            password.push(random_char(DIGITS, rng));
        }
        password.push(separator);
    }

    // Length >= 1 was checked, so the last char is always a separator.
    password.pop();

    if password.len() > MAX_FIELD_LEN {
        return Err(SecretError::FieldTooLarge {
            field: "password",
            len: password.len(),
        });
    }
    Ok(password)
}

/// Uppercase the first letter, leave the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |c| {
        c.to_uppercase().collect::<String>() + chars.as_str()
    })
}

fn random_char<R: RngCore + CryptoRng>(set: &[u8], rng: &mut R) -> char {
    char::from(set[rng.gen_range(0..set.len())])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
