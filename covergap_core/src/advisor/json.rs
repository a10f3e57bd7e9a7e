//! Lenient JSON extraction from model replies
//!
//! Models wrap JSON in prose or code fences. Each `[` or `{` is tried as the
//! start of a value; the first value the caller accepts is the payload.

use serde_json::Value;

/// First JSON array or object embedded in `text` that satisfies `accept`
///
/// Candidates are parsed in place with a streaming deserializer, which stops
/// at the end of the value or the first byte that cannot continue it. A
/// parsed but rejected value is skipped whole, so brackets nested inside it
/// are never re-parsed.
pub fn extract_json(text: &str, accept: impl Fn(&Value) -> bool) -> Option<Value> {
    let mut resume_at = 0;

    for (start, c) in text.char_indices() {
        if start < resume_at || (c != '[' && c != '{') {
            continue;
        }

        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        let Some(Ok(value)) = stream.next() else {
            continue;
        };
        let len = stream.byte_offset();

        if accept(&value) {
            tracing::debug!("Extracted {} byte JSON fragment at offset {}", len, start);
            return Some(value);
        }
        tracing::debug!("Skipping rejected JSON fragment at offset {}", start);
        resume_at = start + len;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn any(_: &Value) -> bool {
        true
    }

    #[test]
    fn test_bare_array() {
        assert_eq!(extract_json(r#"[{"a": 1}]"#, any), Some(json!([{"a": 1}])));
    }

    #[test]
    fn test_code_fenced_reply() {
        let reply = "Here are the gaps:\n```json\n[{\"type\": \"audit\"}]\n```\nLet me know!";
        assert_eq!(extract_json(reply, any), Some(json!([{"type": "audit"}])));
    }

    #[test]
    fn test_brackets_inside_strings_ignored() {
        let reply = r#"Result: {"description": "missing [edge] cases }", "n": 2} trailing"#;
        assert_eq!(
            extract_json(reply, any),
            Some(json!({"description": "missing [edge] cases }", "n": 2}))
        );
    }

    #[test]
    fn test_skips_unparseable_candidates() {
        let reply = r#"See [note 1] then [{"type": "performance"}]"#;
        assert_eq!(extract_json(reply, any), Some(json!([{"type": "performance"}])));
    }

    #[test]
    fn test_rejected_values_are_skipped() {
        let reply = r#"Per section [2] and {"ref": [3]}: [{"type": "audit"}]"#;
        let arrays_of_objects = |v: &Value| {
            v.as_array()
                .is_some_and(|items| items.iter().any(Value::is_object))
        };
        assert_eq!(
            extract_json(reply, arrays_of_objects),
            Some(json!([{"type": "audit"}]))
        );
    }

    #[test]
    fn test_long_unbalanced_prefix() {
        let mut reply = "[".repeat(5_000);
        reply.push_str(&"{".repeat(5_000));
        reply.push_str(r#" then {"gaps": []}"#);
        assert_eq!(extract_json(&reply, any), Some(json!({"gaps": []})));
    }

    #[test]
    fn test_no_json() {
        assert_eq!(extract_json("I could not find any gaps.", any), None);
        assert_eq!(extract_json("[unterminated", any), None);
        assert_eq!(extract_json("", any), None);
        assert_eq!(extract_json("[1] and [2]", |v| v.is_object()), None);
    }
}
