/// Extract namespace candidates from a plain list, one per line.
///
/// Blank lines and `#` comments are dropped. Returns the 1-based line number
/// with the trimmed entry so callers can point at the offending line.
pub fn parse_list(text: &str) -> Vec<(usize, String)> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                None
            } else {
                Some((idx + 1, entry.to_string()))
            }
        })
        .collect()
}
