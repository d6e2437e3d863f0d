pub const DEFAULT_EMAIL_DEBOUNCE_MS: u64 = 400;
pub const DEFAULT_PHONE_DEBOUNCE_MS: u64 = 500;
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

#[cfg(test)]
mod tests {
    use super::{DEFAULT_EMAIL_DEBOUNCE_MS, DEFAULT_PHONE_DEBOUNCE_MS, MAX_DEBOUNCE_MS};

    #[test]
    fn defaults_fit_under_the_limit() {
        assert!(DEFAULT_EMAIL_DEBOUNCE_MS > 0);
        assert!(DEFAULT_EMAIL_DEBOUNCE_MS < DEFAULT_PHONE_DEBOUNCE_MS);
        assert!(DEFAULT_PHONE_DEBOUNCE_MS <= MAX_DEBOUNCE_MS);
    }
}
