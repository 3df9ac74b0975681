//! Reusable field validators
//!
//! Each validator inspects an already-filtered field value and returns a
//! human-readable reason on failure. Schemas may replace the reason with a
//! field-level message.

use serde_json::Value;

/// Validator: field is required (not null)
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_null() {
            Err(format!("'{}' is required", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: value must be a string with at least one non-whitespace character
pub fn non_empty_string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::String(s) if s.trim().is_empty() => Err(format!("'{}' must not be empty", field)),
        Value::String(_) | Value::Null => Ok(()),
        other => Err(format!("'{}' must be a string (got: {})", field, other)),
    }
}

/// Validator: number must be strictly greater than `min`
pub fn greater_than(min: f64) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(num) = value.as_f64() {
            if num > min {
                Ok(())
            } else {
                Err(format!(
                    "'{}' must be greater than {} (value: {})",
                    field, min, num
                ))
            }
        } else if value.is_null() {
            Ok(())
        } else {
            Err(format!("'{}' must be a number", field))
        }
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value {
        Value::Null => Ok(()),
        Value::String(s) if allowed.iter().any(|a| a == s) => Ok(()),
        other => Err(format!(
            "'{}' must be one of: {:?} (value: {})",
            field, allowed, other
        )),
    }
}

/// Validator: date must match format
pub fn date_format(
    format: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            match chrono::NaiveDate::parse_from_str(s, format) {
                Ok(_) => Ok(()),
                Err(_) => Err(format!(
                    "'{}' must use the format {} (value: {})",
                    field, format, s
                )),
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: string must be a UUID
pub fn uuid_format() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            uuid::Uuid::parse_str(s)
                .map(|_| ())
                .map_err(|_| format!("'{}' must be a UUID (value: {})", field, s))
        } else {
            Ok(())
        }
    }
}
