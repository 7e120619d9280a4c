use once_cell::sync::Lazy;
use regex::Regex;

static NON_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("Invalid regex pattern"));

fn digits_of(raw: &str) -> String {
    NON_DIGITS.replace_all(raw, "").into_owned()
}

/// Drops everything that is not a digit and truncates to the 11 digits a CPF
/// can hold. Both the lookup API and browser storage only ever see this form.
pub fn strip(raw: &str) -> String {
    digits_of(raw).chars().take(11).collect()
}

/// Shape check only: a CPF is accepted iff stripping non-digits leaves
/// exactly 11 of them. The verification-digit checksum is deliberately not
/// applied here.
pub fn validate(raw: &str) -> bool {
    digits_of(raw).len() == 11
}

/// Re-punctuates a CPF for display, progressively, so partial input stays
/// legible while the visitor is still typing (`123.456.789-01` when complete).
pub fn format(raw: &str) -> String {
    let digits = strip(raw);
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}.{}", &digits[..3], &digits[3..]),
        7..=9 => format!("{}.{}.{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..]
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_limits_to_eleven_digits() {
        assert_eq!(strip("123.456.789-01"), "12345678901");
        assert_eq!(strip("12345678901234"), "12345678901");
        assert_eq!(strip("abc"), "");
    }

    #[test]
    fn test_validate_requires_exactly_eleven_digits() {
        assert!(validate("12345678901"));
        assert!(validate("123.456.789-09"));
        assert!(!validate("123.456.789"));
        assert!(!validate(""));
        // over-long input is malformed, not truncated into validity
        assert!(!validate("123456789012"));
    }

    #[test]
    fn test_format_complete_cpf() {
        assert_eq!(format("12345678901"), "123.456.789-01");
    }

    #[test]
    fn test_format_partial_input() {
        assert_eq!(format(""), "");
        assert_eq!(format("123"), "123");
        assert_eq!(format("1234"), "123.4");
        assert_eq!(format("123456"), "123.456");
        assert_eq!(format("1234567"), "123.456.7");
        assert_eq!(format("123456789"), "123.456.789");
        assert_eq!(format("1234567890"), "123.456.789-0");
    }

    #[test]
    fn test_format_is_idempotent() {
        for input in ["", "12", "1234567", "12345678901", "1a2b3c4d5e6f7g8h9i0j1"] {
            let once = format(input);
            assert_eq!(format(&once), once, "format not idempotent for {input:?}");
        }
    }
}
