//! Rendering metadata values as plain text

use serde_json::Value;

/// Render `value` the way it appears in names and filters.
///
/// Strings are used verbatim, everything else as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Join list elements with `.` (`[0.1, 0.01]` becomes `0.1.0.01`).
pub fn join_list(items: &[Value]) -> String {
    items.iter().map(render_value).collect::<Vec<_>>().join(".")
}
