//! Slug derivation and validation.
//!
//! A slug is a URL-safe, human-readable identifier derived from a display
//! name. Uniqueness is resolved elsewhere; this module is pure.

/// Derive a candidate slug from a display name.
///
/// Lower-cases the input, collapses every run of whitespace into a single
/// hyphen, then drops any character that is not an ASCII word character or
/// hyphen. No length cap and no transliteration: non-ASCII characters are
/// simply removed, so a fully non-Latin name can produce an empty candidate.
pub fn slugify(name: &str) -> String {
    let mut hyphenated = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                hyphenated.push('-');
                in_whitespace = true;
            }
        } else {
            in_whitespace = false;
            hyphenated.push(ch);
        }
    }

    hyphenated
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_' || *ch == '-')
        .collect()
}

/// Append the numeric collision suffix to a candidate: `candidate-count`.
pub fn suffixed(candidate: &str, count: u32) -> String {
    format!("{}-{}", candidate, count)
}

/// Return `true` when `value` could have been produced by [`slugify`]
/// (possibly with a numeric suffix). Used to reject malformed path segments
/// before touching storage.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '-')
}
