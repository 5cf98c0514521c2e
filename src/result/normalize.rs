/// Replace comma decimal separators with periods and lower-case the string.
///
/// Whitespace is left alone so colon and minute layouts can still be
/// recognized before spaces are stripped.
pub fn normalize_decimal_separators(raw: &str) -> String {
    raw.to_lowercase().replace(',', ".")
}
