//! Password generator preferences, stored as plain JSON.
//!
//! Nothing in here is secret: only the last-used generator options and
//! where to find the memorable-word dictionary.

use std::fs;
use std::path::{Path, PathBuf};

use seedkeeper_core::{MemorableWordlist, PasswordOptions};
use serde::{Deserialize, Serialize};

const PREFERENCES_FILE: &str = "generator.json";
const PREFERENCES_TMP: &str = ".generator.json.tmp";

/// Generator preferences persisted to `{data_dir}/generator.json`.
///
/// Missing fields take their [`Default`] values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorPreferences {
    /// Options used for the last generated password.
    #[serde(default)]
    pub password_options: PasswordOptions,

    /// Newline-separated word list for memorable passwords.
    #[serde(default)]
    pub wordlist_path: Option<PathBuf>,
}

impl GeneratorPreferences {
    /// Load preferences from `{data_dir}/generator.json`.
    ///
    /// Returns [`Default::default()`] when the file is missing or
    /// contains invalid JSON.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(PREFERENCES_FILE);
        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };
        serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "corrupt generator preferences, using defaults");
            Self::default()
        })
    }

    /// Persist preferences to `{data_dir}/generator.json`.
    ///
    /// Writes to a temporary file, then renames it over the target.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the directory does not exist or the
    /// file system rejects the write or rename.
    pub fn save(&self, data_dir: &Path) -> std::io::Result<()> {
        let path = data_dir.join(PREFERENCES_FILE);
        let tmp = data_dir.join(PREFERENCES_TMP);

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&tmp, &json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &path)
    }

    /// Memorable-word dictionary named by [`Self::wordlist_path`].
    ///
    /// Empty when no path is set or the file cannot be read.
    #[must_use]
    pub fn wordlist(&self) -> MemorableWordlist {
        self.wordlist_path
            .as_deref()
            .map(MemorableWordlist::load)
            .unwrap_or_default()
    }
}

// ── Tests ──────────────────────────────────────────────────────────
