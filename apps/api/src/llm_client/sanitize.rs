//! Turns a model's free-text reply into JSON, tolerating the usual wrapping noise:
//! markdown fences and chatty prose around the object.

use serde_json::Value;
use thiserror::Error;

/// A reply that still wasn't valid JSON after sanitizing.
/// `raw` is the post-sanitization text so callers can see what the model sent.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{details}")]
pub struct ParseFailure {
    pub details: String,
    pub raw: String,
}

/// Strips fences and any prose outside the outermost `{ ... }` span.
pub fn sanitize_reply(reply: &str) -> &str {
    let mut text = reply.trim();

    if let Some(stripped) = text.strip_prefix("```json") {
        text = stripped;
    } else if let Some(stripped) = text.strip_prefix("```") {
        text = stripped;
    }

    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }

    if let (Some(first), Some(last)) = (text.find('{'), text.rfind('}')) {
        if last > first {
            text = &text[first..=last];
        }
    }

    text.trim()
}

/// Sanitizes then strictly decodes a reply.
pub fn parse_reply(reply: &str) -> Result<Value, ParseFailure> {
    let cleaned = sanitize_reply(reply);
    serde_json::from_str(cleaned).map_err(|e| ParseFailure {
        details: e.to_string(),
        raw: cleaned.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_reply_with_surrounding_prose() {
        let reply = "Sure! ```json\n{\"a\":1}\n``` Hope that helps!";
        assert_eq!(parse_reply(reply).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_clean_and_wrapped_replies_decode_identically() {
        let clean = r#"{"claims": ["x"], "metrics_mentioned": []}"#;
        let wrapped = format!("Here you go:\n```json\n{clean}\n```\nLet me know!");
        assert_eq!(parse_reply(clean).unwrap(), parse_reply(&wrapped).unwrap());
    }

    #[test]
    fn test_sanitizing_is_stable() {
        let reply = "```json\n  {\"a\": {\"b\": 2}}  \n```";
        let once = sanitize_reply(reply);
        assert_eq!(once, r#"{"a": {"b": 2}}"#);
        assert_eq!(sanitize_reply(once), once);
    }

    #[test]
    fn test_bare_fence_is_stripped() {
        let reply = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(sanitize_reply(reply), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_nested_braces_keep_outermost_span() {
        let reply = r#"Result: {"outer": {"inner": [1, 2]}} -- done"#;
        assert_eq!(
            parse_reply(reply).unwrap(),
            json!({"outer": {"inner": [1, 2]}})
        );
    }

    #[test]
    fn test_non_json_reports_failure_with_raw_text() {
        let err = parse_reply("not json at all").unwrap_err();
        assert_eq!(err.raw, "not json at all");
        assert!(!err.details.is_empty());
    }

    #[test]
    fn test_failure_is_deterministic() {
        let a = parse_reply("{ broken").unwrap_err();
        let b = parse_reply("{ broken").unwrap_err();
        assert_eq!(a, b);
        assert_eq!(a.raw, "{ broken");
    }

    #[test]
    fn test_reversed_braces_are_left_alone() {
        assert_eq!(sanitize_reply("} nothing here {"), "} nothing here {");
    }
}
