// Total lookups over loosely shaped JSON payloads
use serde_json::Value;

/// Walk `path` through nested objects. Anything that is not an object along
/// the way, or an explicit `null`, yields `None`.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    if current.is_null() { None } else { Some(current) }
}

pub fn text(value: &Value, path: &[&str]) -> Option<String> {
    lookup(value, path).and_then(scalar_text)
}

pub fn flag(value: &Value, path: &[&str]) -> Option<bool> {
    match lookup(value, path)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn number(value: &Value, path: &[&str]) -> Option<f64> {
    match lookup(value, path)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whole numbers only; `1.5` is not an integer but `2.0` is.
pub fn integer(value: &Value, path: &[&str]) -> Option<i64> {
    let n = number(value, path)?;
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Display form of a scalar. Objects and arrays have none.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => format_decimal(f),
            _ => n.to_string(),
        }),
        _ => None,
    }
}

fn format_decimal(f: f64) -> String {
    let rendered = format!("{:.2}", f);
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
