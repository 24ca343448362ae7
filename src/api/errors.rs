//! Turning failed API responses into user-facing messages

use serde_json::Value;

/// Extract the message from an error body.
///
/// Looks for `error`, then `detail`, then joins field-level validation
/// errors (`{"email": ["already exists"]}`) in the order the server sent
/// the fields.
pub fn error_message(body: &Value) -> Option<String> {
    match body {
        Value::Object(map) => {
            for key in ["error", "detail"] {
                if let Some(Value::String(message)) = map.get(key) {
                    return Some(message.clone());
                }
            }
            let parts: Vec<String> = map.values().flat_map(strings_in).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        Value::Array(_) => {
            let parts = strings_in(body);
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn strings_in(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(strings_in).collect(),
        _ => Vec::new(),
    }
}
