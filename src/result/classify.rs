/// True if the string holds at least one ASCII digit.
///
/// Digit-free strings ("dnf", "dns", "dq", "nm", "") are status codes and
/// bypass parsing entirely.
pub fn has_numeric_content(raw: &str) -> bool {
    raw.chars().any(|c| c.is_ascii_digit())
}
