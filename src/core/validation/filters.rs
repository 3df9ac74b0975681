//! Reusable field filters
//!
//! These filters transform raw form values before validation

use anyhow::Result;
use serde_json::{Value, json};

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: coerce a form value to a number
///
/// Missing and blank values coerce to `0`, so they fail a later
/// `greater_than(0)` check rather than a type check. Text that does not parse,
/// or parses to NaN/infinity, becomes `null`.
pub fn coerce_number() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        let coerced = match value {
            Value::Null => json!(0.0),
            Value::Number(_) => value,
            Value::Bool(b) => json!(if b { 1.0 } else { 0.0 }),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    json!(0.0)
                } else {
                    match s.parse::<f64>() {
                        Ok(n) if n.is_finite() => json!(n),
                        _ => Value::Null,
                    }
                }
            }
            Value::Array(_) | Value::Object(_) => Value::Null,
        };
        Ok(coerced)
    }
}
