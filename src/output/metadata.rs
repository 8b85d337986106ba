// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

/// Reduce a metadata query result to a single value.
///
/// A query result is a list of match records. The first record's `value`
/// field is returned when present, otherwise the whole record. Empty or
/// non-list results yield `None`. Matches after the first are ignored.
pub fn unwrap_first_match(raw: &Value) -> Option<Value> {
    let first = raw.as_array()?.first()?;
    match first.get("value") {
        Some(value) if !value.is_null() => Some(value.clone()),
        _ => Some(first.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn returns_value_of_first_record() {
        let raw = json!([{ "func": "metadata", "value": "draft" }]);
        assert_eq!(unwrap_first_match(&raw), Some(json!("draft")));
    }

    #[test]
    fn returns_record_when_value_missing() {
        let raw = json!([{ "func": "heading", "depth": 1 }]);
        assert_eq!(
            unwrap_first_match(&raw),
            Some(json!({ "func": "heading", "depth": 1 }))
        );
    }

    #[test]
    fn ignores_matches_after_the_first() {
        let raw = json!([{ "value": { "title": "A" } }, { "value": { "title": "B" } }]);
        assert_eq!(unwrap_first_match(&raw), Some(json!({ "title": "A" })));
    }

    #[test]
    fn empty_result_is_none() {
        assert_eq!(unwrap_first_match(&json!([])), None);
    }

    #[test]
    fn non_list_result_is_none() {
        assert_eq!(unwrap_first_match(&json!({ "value": 1 })), None);
        assert_eq!(unwrap_first_match(&Value::Null), None);
    }

    #[test]
    fn falsy_values_are_still_values() {
        assert_eq!(unwrap_first_match(&json!([{ "value": false }])), Some(json!(false)));
        assert_eq!(unwrap_first_match(&json!([{ "value": "" }])), Some(json!("")));
    }
}
