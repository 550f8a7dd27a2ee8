/// Coerce one dotted-version segment to an integer part.
///
/// An empty segment is absent (`None`). Otherwise the leading run of ASCII
/// digits is the value, so `"12beta"` is 12 and non-numeric text is 0.
pub(crate) fn coerce_part(segment: &str) -> Option<u64> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    Some(segment[..end].parse::<u64>().unwrap_or(0))
}

/// Split a dotted version into its first three coerced parts.
pub(crate) fn split_parts(version: &str) -> [Option<u64>; 3] {
    let mut segments = version.split('.');
    let mut parts = [None; 3];
    for part in parts.iter_mut() {
        *part = segments.next().and_then(coerce_part);
    }
    parts
}

/// Lowercase a device category and drop separators so `"Mobile Phone"`,
/// `"mobile-phone"` and `"mobilephone"` compare equal.
pub(crate) fn normalize_category(category: &str) -> String {
    category
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
