//! Recipient and body checks applied before any delivery attempt.
//!
//! All functions here are pure. Recipients are compared on their cleaned
//! digits (every non-ASCII-digit stripped), never on the raw input.

use crate::domain::{errors::ValidationError, models::Network, value_objects::NetworkPrefixes};

pub const COUNTRY_CODE: &str = "63";
pub const TRUNK_PREFIX: char = '0';
pub const RECIPIENT_DIGITS: usize = 11;
/// Measured in UTF-16 code units.
pub const MAX_BODY_UNITS: usize = 160;

const PREFIX_DIGITS: usize = 4;

pub fn clean_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Rewrites a local trunk-prefixed number into international form, e.g.
/// `0917 123 4567` becomes `639171234567`. Anything else is returned as its digits.
pub fn normalize_number(raw: &str) -> String {
    let digits = clean_digits(raw);
    match digits.strip_prefix(TRUNK_PREFIX) {
        Some(rest) => format!("{COUNTRY_CODE}{rest}"),
        None => digits,
    }
}

/// Checks `raw` against the built-in prefix tables.
pub fn validate_recipient(raw: &str, network: Network) -> bool {
    recipient_matches(&NetworkPrefixes::default(), raw, network)
}

pub fn recipient_matches(prefixes: &NetworkPrefixes, raw: &str, network: Network) -> bool {
    let Some(table) = prefixes.get(network) else {
        return false;
    };
    let digits = clean_digits(raw);
    if digits.len() != RECIPIENT_DIGITS {
        return false;
    }
    table.contains(&digits[..PREFIX_DIGITS])
}

pub fn is_forbidden_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}')
}

pub fn validate_message(body: &str) -> bool {
    let len = body.encode_utf16().count();
    (1..=MAX_BODY_UNITS).contains(&len) && !body.chars().any(is_forbidden_control)
}

/// Validation rules bundled with the prefix tables they consult.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    prefixes: NetworkPrefixes,
}

impl Validator {
    pub fn new(prefixes: NetworkPrefixes) -> Self {
        Self { prefixes }
    }

    pub fn prefixes(&self) -> &NetworkPrefixes {
        &self.prefixes
    }

    pub fn validate(&self, recipient: &str, body: &str, network: Network) -> Result<(), ValidationError> {
        if !recipient_matches(&self.prefixes, recipient, network) {
            return Err(ValidationError::InvalidRecipient { network });
        }
        if !validate_message(body) {
            return Err(ValidationError::InvalidBody);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_globe_number_with_formatting() {
        assert!(validate_recipient("09171234567", Network::Globe));
        assert!(validate_recipient("0917-123-4567", Network::Globe));
        assert!(validate_recipient("(0917) 123 4567", Network::Tm));
    }

    #[test]
    fn rejects_prefix_outside_network() {
        // 0960 is Globe only.
        assert!(validate_recipient("09601234567", Network::Globe));
        assert!(!validate_recipient("09601234567", Network::Tm));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!validate_recipient("12345", Network::Tm));
        assert!(!validate_recipient("0917123456", Network::Globe));
        assert!(!validate_recipient("091712345678", Network::Globe));
        assert!(!validate_recipient("+63 917 123 4567", Network::Globe));
        assert!(!validate_recipient("", Network::Tm));
    }

    #[test]
    fn missing_prefix_table_fails_closed() {
        let prefixes = NetworkPrefixes::empty().with_network(Network::Tm, ["0917"]);
        assert!(recipient_matches(&prefixes, "09171234567", Network::Tm));
        assert!(!recipient_matches(&prefixes, "09171234567", Network::Globe));
    }

    #[test]
    fn normalizes_trunk_prefix_to_country_code() {
        assert_eq!(normalize_number("0917 123 4567"), "639171234567");
        assert_eq!(normalize_number("+63 917 123 4567"), "639171234567");
        assert_eq!(normalize_number("abc"), "");
    }

    #[test]
    fn message_length_bounds() {
        assert!(!validate_message(""));
        assert!(validate_message("hi"));
        assert!(validate_message(&"a".repeat(160)));
        assert!(!validate_message(&"a".repeat(161)));
        assert!(validate_message(&"é".repeat(160)));
    }

    #[test]
    fn astral_characters_count_twice() {
        assert!(validate_message(&"\u{1F600}".repeat(80)));
        assert!(!validate_message(&"\u{1F600}".repeat(81)));
        assert!(!validate_message(&format!("{}{}", "a".repeat(159), "\u{1F600}")));
    }

    #[test]
    fn message_control_characters() {
        assert!(validate_message("line one\nline two\r\n\tindented"));
        assert!(!validate_message("bell\u{07}"));
        assert!(!validate_message("\u{0B}"));
        assert!(!validate_message("esc\u{1B}[0m"));
        assert!(!validate_message("del\u{7F}"));
    }

    #[test]
    fn validator_reports_first_failing_rule() {
        let validator = Validator::default();
        assert_eq!(validator.validate("09171234567", "hi", Network::Globe), Ok(()));
        assert_eq!(
            validator.validate("12345", "", Network::Tm),
            Err(ValidationError::InvalidRecipient {
                network: Network::Tm
            })
        );
        assert_eq!(
            validator.validate("09171234567", "", Network::Tm),
            Err(ValidationError::InvalidBody)
        );
    }
}
