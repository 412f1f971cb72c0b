#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for mnemonic size classification.

use proptest::prelude::*;
use seedkeeper_core::{classify_mnemonic_size, MnemonicSize, Payload};

fn phrase(words: &[String], gaps: &[usize]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        let gap = gaps.get(i).copied().unwrap_or(1);
        if i > 0 {
            out.push_str(&" ".repeat(gap));
        }
        out.push_str(word);
    }
    out
}

proptest! {
    /// Classification depends only on the number of space-separated words,
    /// however many spaces separate them.
    #[test]
    fn classification_follows_word_count(
        words in proptest::collection::vec("[a-z]{1,8}", 0..30),
        gaps in proptest::collection::vec(1usize..4, 0..30),
    ) {
        let text = phrase(&words, &gaps);
        let expected = match words.len() {
            12 => Some(MnemonicSize::TwelveWords),
            18 => Some(MnemonicSize::EighteenWords),
            24 => Some(MnemonicSize::TwentyFourWords),
            _ => None,
        };
        prop_assert_eq!(classify_mnemonic_size(&text), expected);
    }

    /// Leading and trailing spaces never change the result.
    #[test]
    fn surrounding_spaces_are_ignored(
        words in proptest::collection::vec("[a-z]{1,8}", 0..30),
        lead in 0usize..3,
        trail in 0usize..3,
    ) {
        let text = phrase(&words, &[]);
        let padded = format!("{}{}{}", " ".repeat(lead), text, " ".repeat(trail));
        prop_assert_eq!(classify_mnemonic_size(&padded), classify_mnemonic_size(&text));
    }

    /// Payload-level classification agrees with the free function.
    #[test]
    fn payload_size_matches_phrase(words in proptest::collection::vec("[a-z]{1,8}", 0..30)) {
        let text = phrase(&words, &[]);
        let payload = Payload::bip39_mnemonic("m", text.clone(), None);
        prop_assert_eq!(payload.mnemonic_size(), classify_mnemonic_size(&text));
    }
}
