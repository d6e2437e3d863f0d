use crate::domain::phone::PHONE_MATCH_DIGITS;
use crate::domain::{normalize_email, phone_digits, phone_match_key};

pub const MIN_EMAIL_QUERY_LEN: usize = 5;
pub const MIN_PHONE_QUERY_DIGITS: usize = PHONE_MATCH_DIGITS;

pub fn is_searchable_email(raw: &str) -> bool {
    let email = normalize_email(raw);
    email.chars().count() >= MIN_EMAIL_QUERY_LEN && email.contains('@')
}

pub fn is_searchable_phone(raw: &str) -> bool {
    phone_digits(raw).len() >= MIN_PHONE_QUERY_DIGITS
}

pub fn email_query(raw: &str) -> Option<String> {
    is_searchable_email(raw).then(|| normalize_email(raw))
}

pub fn phone_query(raw: &str) -> Option<String> {
    let digits = phone_digits(raw);
    if digits.len() < MIN_PHONE_QUERY_DIGITS {
        return None;
    }
    Some(phone_match_key(&digits).to_string())
}

#[cfg(test)]
mod tests {
    use super::{email_query, is_searchable_email, is_searchable_phone, phone_query};

    #[test]
    fn email_needs_five_chars_and_at_sign() {
        assert!(!is_searchable_email("a@bc"));
        assert!(!is_searchable_email("abcdef"));
        assert!(is_searchable_email("a@bcd"));
        assert!(!is_searchable_email("  a@b  "));
    }

    #[test]
    fn phone_needs_ten_digits() {
        assert!(!is_searchable_phone("987-654-321"));
        assert!(is_searchable_phone("987-654-3210"));
    }

    #[test]
    fn queries_are_normalized() {
        assert_eq!(email_query(" Ada@Example.com ").as_deref(), Some("ada@example.com"));
        assert_eq!(email_query("ada"), None);
        assert_eq!(phone_query("+91 98765 43210").as_deref(), Some("9876543210"));
        assert_eq!(phone_query("98765 4321"), None);
    }
}
