pub fn normalize_email(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}
