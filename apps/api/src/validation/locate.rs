//! Finds the JSON document inside free-form model output.

use serde_json::Value;

/// Returns the preferred JSON document of the given kind, see `candidates`.
pub fn locate_json(raw: &str, opener: char) -> Option<Value> {
    candidates(raw, opener).into_iter().next()
}

/// Every top-level balanced `opener ... closer` span that parses as JSON,
/// longest first.
///
/// Spans nested inside an earlier candidate are never reported separately,
/// so a `{}` or `[1]` in surrounding prose cannot displace the real answer.
/// A balanced but unparseable span is skipped as a whole. An unbalanced
/// opener followed by prose is skipped; one that starts like JSON is a
/// truncated document and ends the search, since anything after it would be
/// a fragment of that document.
pub fn candidates(raw: &str, opener: char) -> Vec<Value> {
    let mut found: Vec<(usize, Value)> = Vec::new();
    let mut offset = 0;

    while let Some(pos) = raw[offset..].find(opener) {
        let start = offset + pos;
        let Some(len) = balanced_len(&raw[start..]) else {
            if opens_json(&raw[start + opener.len_utf8()..], opener) {
                break;
            }
            offset = start + opener.len_utf8();
            continue;
        };
        let candidate = &raw[start..start + len];
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            found.push((len, value));
        }
        offset = start + len;
    }

    // Stable: equal lengths keep document order.
    found.sort_by(|a, b| b.0.cmp(&a.0));
    found.into_iter().map(|(_, value)| value).collect()
}

/// Whether the text after an opener can continue a JSON object or array.
fn opens_json(rest: &str, opener: char) -> bool {
    let Some(next) = rest.trim_start().chars().next() else {
        return true;
    };
    match opener {
        '{' => matches!(next, '"' | '}'),
        _ => matches!(next, '"' | '{' | '[' | ']' | '-' | '0'..='9' | 't' | 'f' | 'n'),
    }
}

/// Length in bytes of the bracketed span starting at `text[0]`, honoring
/// JSON string literals and escapes.
fn balanced_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
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
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_object() {
        assert_eq!(locate_json(r#"{"a": 1}"#, '{'), Some(json!({"a": 1})));
    }

    #[test]
    fn test_json_fence() {
        let raw = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(locate_json(raw, '{'), Some(json!({"key": "value"})));
    }

    #[test]
    fn test_fence_without_tag_and_prose() {
        let raw = "Sure! Here is the result:\n```\n{\"score\": 70}\n```\nLet me know if you need more.";
        assert_eq!(locate_json(raw, '{'), Some(json!({"score": 70})));
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let raw = r#"Result: {"summary": "uses } and { freely", "n": [1, 2]} trailing"#;
        assert_eq!(
            locate_json(raw, '{'),
            Some(json!({"summary": "uses } and { freely", "n": [1, 2]}))
        );
    }

    #[test]
    fn test_escaped_quotes_inside_strings() {
        let raw = r#"{"quote": "she said \"hi}\"", "ok": true}"#;
        assert_eq!(
            locate_json(raw, '{'),
            Some(json!({"quote": "she said \"hi}\"", "ok": true}))
        );
    }

    #[test]
    fn test_skips_unparseable_balanced_prose() {
        let raw = r#"Note {this is not json}. Answer: {"a": true}"#;
        assert_eq!(locate_json(raw, '{'), Some(json!({"a": true})));
    }

    #[test]
    fn test_array_opener() {
        let raw = "Here are the items:\n[{\"title\": \"Rust\"}]";
        assert_eq!(locate_json(raw, '['), Some(json!([{"title": "Rust"}])));
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(locate_json("[]", '['), Some(json!([])));
    }

    #[test]
    fn test_truncated_document_is_not_salvaged_from_inside() {
        let raw = r#"{"about": {"name": "Jane"}, "skills": ["Rust""#;
        assert_eq!(locate_json(raw, '{'), None);
    }

    #[test]
    fn test_longest_top_level_document_wins() {
        let raw = "I did not return {} since there was data.\n{\"score\": 80}";
        assert_eq!(locate_json(raw, '{'), Some(json!({"score": 80})));
    }

    #[test]
    fn test_candidates_are_longest_first_and_not_nested() {
        let raw = r#"See [1]. [{"skills": ["Rust"]}] and [2]"#;
        assert_eq!(
            candidates(raw, '['),
            vec![json!([{"skills": ["Rust"]}]), json!([1]), json!([2])]
        );
    }

    #[test]
    fn test_unmatched_opener_in_prose_is_skipped() {
        let raw = "Note: the template's { placeholder was ignored.\n{\"score\": 50}";
        assert_eq!(locate_json(raw, '{'), Some(json!({"score": 50})));
    }

    #[test]
    fn test_unmatched_array_opener_in_prose_is_skipped() {
        let raw = "Options [see below:\n[\"a\", \"b\"]";
        assert_eq!(locate_json(raw, '['), Some(json!(["a", "b"])));
    }

    #[test]
    fn test_no_json_at_all() {
        assert_eq!(locate_json("I cannot help with that.", '{'), None);
    }
}
