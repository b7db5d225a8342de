//! Helper functions for safe access to loosely-typed entity payloads
//!
//! Entity payloads keep their nested fields as raw JSON; these accessors
//! avoid unwrap() and default to empty values for absent fields.

use serde_json::Value;

/// Get a string field from a JSON object with default
pub fn get_str_or<'a>(obj: &'a Value, key: &str, default: &'a str) -> &'a str {
    obj.get(key).and_then(|v| v.as_str()).unwrap_or(default)
}

/// Get an optional object field from a JSON value
pub fn get_object_opt<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| v.is_object())
}

/// Dig a string out of a nested `{outer: {inner: "..."}}` shape, default empty
pub fn get_nested_str<'a>(obj: &'a Value, outer: &str, inner: &str) -> &'a str {
    get_object_opt(obj, outer)
        .map(|o| get_str_or(o, inner, ""))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_str_or() {
        let v = json!({"code": "JW"});
        assert_eq!(get_str_or(&v, "code", ""), "JW");
        assert_eq!(get_str_or(&v, "missing", "x"), "x");
        // non-string values fall back to the default
        let v = json!({"code": 7});
        assert_eq!(get_str_or(&v, "code", ""), "");
    }

    #[test]
    fn test_get_nested_str() {
        let v = json!({"publication": {"code": "JW"}});
        assert_eq!(get_nested_str(&v, "publication", "code"), "JW");
        assert_eq!(get_nested_str(&v, "publication", "missing"), "");
        assert_eq!(get_nested_str(&v, "missing", "code"), "");
    }
}
