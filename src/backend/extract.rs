//! JSON extraction from free-form backend output.
//!
//! The backend is asked for a bare JSON object but may wrap it in prose or
//! a code fence. The fallback grammar is fixed: take the first balanced
//! `{...}` block (string and escape aware) and parse it.

use crate::error::ApiError;
use serde_json::Value;

/// Locate and parse the first JSON object within `text`.
///
/// Fails with `ApiError::Generation` when no balanced object is present or
/// the candidate does not parse; fails with `ApiError::Schema` when the
/// parsed value is not an object.
pub fn extract_json_object(text: &str) -> Result<Value, ApiError> {
    let candidate = first_balanced_object(text).ok_or_else(|| {
        ApiError::Generation("no JSON object found in backend response".into())
    })?;

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| ApiError::Generation(format!("backend JSON did not parse: {e}")))?;

    if !value.is_object() {
        return Err(ApiError::Schema("backend response is not a JSON object".into()));
    }
    Ok(value)
}

/// First balanced `{...}` block in `s`, or `None`.
fn first_balanced_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let tail = &s[start..];

    let mut brace_count = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in tail.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => brace_count += 1,
            '}' if !in_string => {
                brace_count -= 1;
                if brace_count == 0 {
                    return Some(&tail[..=i]);
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

    #[test]
    fn extracts_bare_object() {
        let value = extract_json_object(r#"{"name":"Test"}"#).unwrap();
        assert_eq!(value["name"], "Test");
    }

    #[test]
    fn extracts_from_code_fence() {
        let text = "Here you go:\n```json\n{\"name\":\"Test\",\"deities\":[]}\n```\nEnjoy!";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["name"], "Test");
    }

    #[test]
    fn extracts_nested_objects() {
        let text = r#"prose {"outer":{"inner":{"deep":1}},"list":[{"x":2}]} trailing {"other":3}"#;
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["outer"]["inner"]["deep"], 1);
        assert!(value.get("other").is_none());
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_the_scanner() {
        let text = r#"{"story":"the gate } opened { twice","ok":true}"#;
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn escaped_quotes_inside_strings() {
        let text = r#"{"quote":"she said \"rise\" and {fell}","n":1}"#;
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["n"], 1);
    }

    #[test]
    fn missing_object_is_a_generation_error() {
        let err = extract_json_object("no json here at all").unwrap_err();
        assert!(matches!(err, ApiError::Generation(_)));
    }

    #[test]
    fn unbalanced_object_is_a_generation_error() {
        let err = extract_json_object(r#"{"name":"Test""#).unwrap_err();
        assert!(matches!(err, ApiError::Generation(_)));
    }

    #[test]
    fn invalid_json_in_balanced_block_is_a_generation_error() {
        let err = extract_json_object("{not valid json}").unwrap_err();
        assert!(matches!(err, ApiError::Generation(_)));
    }
}
