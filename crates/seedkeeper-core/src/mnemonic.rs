//! Mnemonic length classification.
//!
//! Only counts words. Wordlist membership and checksums are validated
//! elsewhere.

use serde::{Deserialize, Serialize};

/// Supported mnemonic lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MnemonicSize {
    /// 12 words.
    TwelveWords,
    /// 18 words.
    EighteenWords,
    /// 24 words.
    TwentyFourWords,
}

impl MnemonicSize {
    /// Number of words for this size.
    #[must_use]
    pub const fn word_count(self) -> usize {
        match self {
            Self::TwelveWords => 12,
            Self::EighteenWords => 18,
            Self::TwentyFourWords => 24,
        }
    }

    /// Size for an exact word count, `None` when unsupported.
    #[must_use]
    pub const fn from_word_count(count: usize) -> Option<Self> {
        match count {
            12 => Some(Self::TwelveWords),
            18 => Some(Self::EighteenWords),
            24 => Some(Self::TwentyFourWords),
            _ => None,
        }
    }
}

/// Number of words in `phrase`, split on single spaces.
///
/// Runs of spaces do not produce empty words.
#[must_use]
pub fn word_count(phrase: &str) -> usize {
    phrase.split(' ').filter(|word| !word.is_empty()).count()
}

/// Classify a phrase by its word count.
///
/// Returns `None` (unclassified) for anything other than 12, 18 or 24 words.
#[must_use]
pub fn classify_mnemonic_size(phrase: &str) -> Option<MnemonicSize> {
    MnemonicSize::from_word_count(word_count(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase(words: usize) -> String {
        vec!["word"; words].join(" ")
    }

    #[test]
    fn supported_sizes() {
        assert_eq!(classify_mnemonic_size(&phrase(12)), Some(MnemonicSize::TwelveWords));
        assert_eq!(classify_mnemonic_size(&phrase(18)), Some(MnemonicSize::EighteenWords));
        assert_eq!(
            classify_mnemonic_size(&phrase(24)),
            Some(MnemonicSize::TwentyFourWords)
        );
    }

    #[test]
    fn unsupported_sizes_are_unclassified() {
        for count in [0, 1, 11, 13, 15, 21, 23, 25] {
            assert_eq!(classify_mnemonic_size(&phrase(count)), None, "{count} words");
        }
    }

    #[test]
    fn repeated_spaces_do_not_add_words() {
        let spaced = phrase(12).replace(' ', "  ");
        assert_eq!(word_count(&spaced), 12);
        assert_eq!(classify_mnemonic_size(&format!(" {spaced} ")), Some(MnemonicSize::TwelveWords));
    }

    #[test]
    fn only_spaces_separate_words() {
        // Tabs and newlines are part of a word.
        let tabbed = phrase(12).replace(' ', "\t");
        assert_eq!(word_count(&tabbed), 1);
    }

    #[test]
    fn word_count_roundtrips_through_size() {
        for size in [
            MnemonicSize::TwelveWords,
            MnemonicSize::EighteenWords,
            MnemonicSize::TwentyFourWords,
        ] {
            assert_eq!(MnemonicSize::from_word_count(size.word_count()), Some(size));
        }
    }
}
