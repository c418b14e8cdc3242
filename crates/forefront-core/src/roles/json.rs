use serde::de::DeserializeOwned;

/// Balanced `{...}` spans of model output, in order of their opening brace.
///
/// Every `{` is tried as a start, so prose like `use {placeholders}` before
/// the real object does not hide it. Braces inside string literals are
/// ignored.
pub fn json_object_candidates(raw: &str) -> impl Iterator<Item = &str> {
    raw.match_indices('{')
        .filter_map(move |(start, _)| balanced_object_at(raw, start))
}

fn balanced_object_at(raw: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in raw[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Locate the first balanced, syntactically valid JSON object in model output.
///
/// Tolerates prose and markdown fences around the object.
#[must_use]
pub fn extract_json_object(raw: &str) -> Option<&str> {
    json_object_candidates(raw)
        .find(|candidate| serde_json::from_str::<serde_json::Value>(candidate).is_ok())
}

/// Deserialize the first candidate object that fits `T`
#[must_use]
pub fn parse_json_object<T: DeserializeOwned>(raw: &str) -> Option<T> {
    json_object_candidates(raw).find_map(|candidate| serde_json::from_str(candidate).ok())
}
