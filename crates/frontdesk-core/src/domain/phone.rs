pub const PHONE_MATCH_DIGITS: usize = 10;

pub fn phone_digits(value: &str) -> String {
    value.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

pub fn phone_match_key(digits: &str) -> &str {
    if digits.len() >= PHONE_MATCH_DIGITS {
        &digits[digits.len() - PHONE_MATCH_DIGITS..]
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::{phone_digits, phone_match_key};

    #[test]
    fn phone_digits_strips_formatting() {
        assert_eq!(phone_digits("  (415) 555-1212  "), "4155551212");
        assert_eq!(phone_digits("+91 98765 43210"), "919876543210");
    }

    #[test]
    fn phone_digits_empty_yields_empty_key() {
        assert_eq!(phone_digits(""), "");
        assert_eq!(phone_digits("ext."), "");
    }

    #[test]
    fn phone_digits_is_idempotent() {
        for raw in ["+1 (415) 555-1212", "0098765 43210", "", "12"] {
            let once = phone_digits(raw);
            assert_eq!(phone_digits(&once), once);
        }
    }

    #[test]
    fn match_key_keeps_last_ten_digits() {
        assert_eq!(phone_match_key("919876543210"), "9876543210");
        assert_eq!(phone_match_key("9876543210"), "9876543210");
        assert_eq!(phone_match_key("12345"), "12345");
    }
}
