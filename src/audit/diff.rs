//! Diff generation for audit logging

use serde_json::Value;

/// Summarize top-level field changes between two JSON values
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_changes() {
        let value = json!({"title": "Fuel", "amount": "60"});
        assert_eq!(generate_diff(&value, &value), None);
    }

    #[test]
    fn test_changed_field() {
        let before = json!({"title": "Fuel", "amount": "60"});
        let after = json!({"title": "Fuel", "amount": "65"});
        assert_eq!(
            generate_diff(&before, &after).as_deref(),
            Some("amount: \"60\" -> \"65\"")
        );
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"category": "Food"});
        let after = json!({"date": "2025-01-01"});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("category: \"Food\" -> (removed)"));
        assert!(diff.contains("date: (added) -> \"2025-01-01\""));
    }

    #[test]
    fn test_long_multibyte_string_is_truncated_safely() {
        let before = json!({"name": "é".repeat(60)});
        let after = json!({"name": "x"});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\""));
    }
}
