pub mod debounce;
pub mod searchable;

pub use debounce::{DEFAULT_EMAIL_DEBOUNCE_MS, DEFAULT_PHONE_DEBOUNCE_MS, MAX_DEBOUNCE_MS};
pub use searchable::{
    email_query, is_searchable_email, is_searchable_phone, phone_query, MIN_EMAIL_QUERY_LEN,
    MIN_PHONE_QUERY_DIGITS,
};
