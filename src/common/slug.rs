/// Used when a name sanitizes down to nothing
pub const PLACEHOLDER_SLUG: &str = "namespace";

/// Normalize a namespace name into a lowercase, DNS- and filesystem-safe slug.
///
/// Whitespace and any character outside `[a-z0-9_-]` become a hyphen, runs of
/// hyphens collapse to one and leading/trailing `-`/`_` are trimmed. The
/// result always matches `^[a-z0-9_-]+$`.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for ch in raw.trim().chars().flat_map(char::to_lowercase) {
        let mapped = if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
            ch
        } else {
            '-'
        };
        if mapped == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(mapped);
    }

    let trimmed = slug.trim_matches(&['-', '_'][..]);
    if trimmed.is_empty() {
        PLACEHOLDER_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}
