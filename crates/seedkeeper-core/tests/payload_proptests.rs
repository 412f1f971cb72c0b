#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! Property-based tests for payload encoding and fingerprints.

use proptest::prelude::*;
use seedkeeper_core::{split_fields, Payload, SecretError, Sha256, MAX_FIELD_LEN};

/// Bytes that fit a single field.
fn field_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..=MAX_FIELD_LEN)
}

/// Short printable text (ASCII keeps byte length == char count).
fn field_text() -> impl Strategy<Value = String> {
    "[ -~]{0,64}"
}

/// Any payload whose fields fit.
fn payload_strategy() -> impl Strategy<Value = Payload> {
    prop_oneof![
        field_bytes().prop_map(|b| Payload::masterseed("s", b)),
        field_bytes().prop_map(|b| Payload::pubkey("p", b)),
        field_bytes().prop_map(|b| Payload::secret_2fa("t", b)),
        field_bytes().prop_map(|b| Payload::generic("g", b)),
        (field_text(), proptest::option::of(field_text()))
            .prop_map(|(m, p)| Payload::bip39_mnemonic("b", m, p)),
        (field_text(), proptest::option::of(field_text()))
            .prop_map(|(m, p)| Payload::electrum_mnemonic("e", m, p)),
        (
            field_text(),
            proptest::option::of(field_text()),
            proptest::option::of(field_text())
        )
            .prop_map(|(pw, login, url)| Payload::password("w", pw, login, url)),
    ]
}

/// Content fields of a payload, in wire order.
fn expected_fields(payload: &Payload) -> Vec<Vec<u8>> {
    match payload {
        Payload::Masterseed { seed: bytes, .. }
        | Payload::Pubkey { pubkey: bytes, .. }
        | Payload::Secret2Fa { secret: bytes, .. }
        | Payload::Default { data: bytes, .. } => vec![bytes.clone()],
        Payload::ElectrumMnemonic {
            mnemonic,
            passphrase,
            ..
        }
        | Payload::Bip39Mnemonic {
            mnemonic,
            passphrase,
            ..
        } => std::iter::once(mnemonic)
            .chain(passphrase.iter())
            .map(|s| s.as_bytes().to_vec())
            .collect(),
        Payload::Password {
            password,
            login,
            url,
            ..
        } => std::iter::once(password)
            .chain(login.iter())
            .chain(url.iter())
            .map(|s| s.as_bytes().to_vec())
            .collect(),
    }
}

proptest! {
    /// Encoding the same payload twice yields identical bytes.
    #[test]
    fn encode_is_deterministic(payload in payload_strategy()) {
        let first = payload.encode().unwrap();
        let second = payload.clone().encode().unwrap();
        prop_assert_eq!(first, second);
    }

    /// Every field group is its length byte followed by exactly that many
    /// content bytes, in variant order.
    #[test]
    fn fields_are_length_prefixed(payload in payload_strategy()) {
        let encoded = payload.encode().unwrap();
        let fields = split_fields(&encoded).unwrap();
        let expected = expected_fields(&payload);
        prop_assert_eq!(fields.len(), expected.len());
        for (field, want) in fields.iter().zip(expected.iter()) {
            prop_assert_eq!(*field, want.as_slice());
        }
        let total: usize = expected.iter().map(|f| f.len() + 1).sum();
        prop_assert_eq!(encoded.len(), total);
    }

    /// Fields of 256 bytes or more are rejected, never truncated.
    #[test]
    fn oversized_fields_fail(len in (MAX_FIELD_LEN + 1)..1024usize) {
        let payload = Payload::masterseed("big", vec![0x5Au8; len]);
        prop_assert_eq!(
            payload.encode().unwrap_err(),
            SecretError::FieldTooLarge { field: "seed", len }
        );

        let payload = Payload::password("big", "pw", Some("x".repeat(len)), None);
        prop_assert_eq!(
            payload.encode().unwrap_err(),
            SecretError::FieldTooLarge { field: "login", len }
        );
    }

    /// Equal encodings always give equal fingerprints.
    #[test]
    fn fingerprint_follows_encoding(a in payload_strategy(), b in payload_strategy()) {
        let (ea, eb) = (a.encode().unwrap(), b.encode().unwrap());
        let (fa, fb) = (a.fingerprint(&Sha256).unwrap(), b.fingerprint(&Sha256).unwrap());
        if ea == eb {
            prop_assert_eq!(fa, fb);
        }
        prop_assert_eq!(fa, a.fingerprint(&Sha256).unwrap());
    }

    /// Decoding what was encoded gives back the payload, except that a URL
    /// without a login comes back in the login position.
    #[test]
    fn decode_inverts_encode(payload in payload_strategy()) {
        let encoded = payload.encode().unwrap();
        let decoded = Payload::decode(payload.secret_type(), payload.label(), &encoded).unwrap();
        prop_assert_eq!(decoded.encode().unwrap(), encoded);
        if !matches!(&payload, Payload::Password { login: None, url: Some(_), .. }) {
            prop_assert_eq!(decoded, payload);
        }
    }
}
