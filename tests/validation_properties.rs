//! Property tests for recipient and body validation.

use proptest::prelude::*;
use sms_outbox::domain::value_objects::NetworkPrefixes;
use sms_outbox::{Network, normalize_number, validate_message, validate_recipient};

fn network_strategy() -> impl Strategy<Value = Network> {
    prop_oneof![Just(Network::Tm), Just(Network::Globe)]
}

/// Digits interleaved with the separators people actually type.
fn formatted_number_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => "[0-9]",
            1 => "[ ()+.-]",
            1 => "[a-z]",
        ],
        0..20,
    )
    .prop_map(|parts| parts.concat())
}

fn digits_of(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn is_forbidden(c: char) -> bool {
    let code = c as u32;
    (code <= 0x08) || code == 0x0B || code == 0x0C || (0x0E..=0x1F).contains(&code) || code == 0x7F
}

proptest! {
    #[test]
    fn recipient_valid_iff_eleven_digits_with_known_prefix(
        raw in formatted_number_strategy(),
        network in network_strategy(),
    ) {
        let digits = digits_of(&raw);
        let prefixes = NetworkPrefixes::default();
        let expected = digits.len() == 11 && prefixes.contains(network, &digits[..4]);
        prop_assert_eq!(validate_recipient(&raw, network), expected);
    }

    #[test]
    fn valid_local_numbers_normalize_to_country_code(
        subscriber in "[0-9]{7}",
        network in network_strategy(),
    ) {
        let raw = format!("0917-{}", subscriber);
        prop_assert!(validate_recipient(&raw, network));
        let normalized = normalize_number(&raw);
        prop_assert_eq!(normalized.len(), 12);
        prop_assert!(normalized.starts_with("63917"));
    }

    #[test]
    fn body_valid_iff_length_in_range_and_no_forbidden_controls(body in "\\PC{0,170}|[\\x00-\\x7F]{0,170}") {
        let len = body.encode_utf16().count();
        let expected = (1..=160).contains(&len) && !body.chars().any(is_forbidden);
        prop_assert_eq!(validate_message(&body), expected);
    }

    #[test]
    fn astral_body_is_measured_in_utf16_units(count in 1usize..120) {
        let body = "\u{1F600}".repeat(count);
        prop_assert_eq!(validate_message(&body), count <= 80);
    }

    #[test]
    fn overlong_body_is_always_rejected(body in "[a-zA-Z0-9 ]{161,300}") {
        prop_assert!(!validate_message(&body));
    }
}
