use crate::domain::{
    normalize_email, phone_digits, phone_match_key, Visitor, VisitorId, PHONE_MATCH_DIGITS,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    None,
    Email,
    Phone,
    Both,
}

impl MatchKind {
    pub const fn from_flags(email: bool, phone: bool) -> Self {
        match (email, phone) {
            (false, false) => MatchKind::None,
            (true, false) => MatchKind::Email,
            (false, true) => MatchKind::Phone,
            (true, true) => MatchKind::Both,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            MatchKind::None => "none",
            MatchKind::Email => "email",
            MatchKind::Phone => "phone",
            MatchKind::Both => "both",
        }
    }

    pub const fn is_match(self) -> bool {
        !matches!(self, MatchKind::None)
    }
}

pub fn matches_email(candidate: &Visitor, query: &str) -> bool {
    let query = normalize_email(query);
    if query.is_empty() {
        return false;
    }
    candidate
        .email
        .as_deref()
        .is_some_and(|email| normalize_email(email) == query)
}

/// `query_digits` must already be normalized with [`phone_digits`].
pub fn matches_phone(candidate: &Visitor, query_digits: &str) -> bool {
    let Some(phone) = candidate.phone.as_deref() else {
        return false;
    };
    let digits = phone_digits(phone);
    if digits.is_empty() {
        return false;
    }

    if digits.len() >= PHONE_MATCH_DIGITS && query_digits.len() >= PHONE_MATCH_DIGITS {
        phone_match_key(&digits) == phone_match_key(query_digits)
    } else {
        digits == query_digits
    }
}

pub fn find_match<'a, P>(
    candidates: &'a [Visitor],
    predicate: P,
    excluding: Option<&VisitorId>,
) -> Option<&'a Visitor>
where
    P: Fn(&Visitor) -> bool,
{
    candidates
        .iter()
        .filter(|candidate| excluding != Some(&candidate.id))
        .find(|candidate| predicate(*candidate))
}
