// Tag catalog and the tutor's selected tags.

/// Parse a catalog where tags are separated by blank lines.
///
/// Windows line endings are accepted; surrounding whitespace and empty
/// entries are dropped.
pub fn parse_tag_catalog(raw: &str) -> Vec<String> {
    raw.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

// Case-insensitive substring match; an empty search keeps everything.
pub fn filter_tags<'a>(catalog: &'a [String], search: &str) -> Vec<&'a str> {
    let needle = search.trim().to_lowercase();
    catalog
        .iter()
        .filter(|tag| tag.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

pub fn with_tag(selected: &[String], tag: &str) -> Vec<String> {
    let mut tags = selected.to_vec();
    if !tags.iter().any(|existing| existing == tag) {
        tags.push(tag.to_string());
    }
    tags
}

pub fn without_tag(selected: &[String], tag: &str) -> Vec<String> {
    selected
        .iter()
        .filter(|existing| existing.as_str() != tag)
        .cloned()
        .collect()
}
