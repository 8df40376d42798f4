//! Value coercion shared by filters, tags and output rendering.

use std::cmp::Ordering;

use serde_json::Value;

/// Text form of a value as it appears in rendered output. Null is
/// empty, arrays concatenate the text of their elements.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(to_text).collect(),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Liquid truthiness: only null and false are falsy. Empty strings,
/// zero and empty arrays all count as true.
pub fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// A number pulled out of a value. Integer identity is preserved so the
/// math filters can do integer arithmetic when both sides are integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    /// Numeric coercion: numbers directly, strings that parse as
    /// numbers, booleans and everything else refuse.
    pub fn from_value(value: &Value) -> Option<Num> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Num::Int(i))
                } else {
                    n.as_f64().map(Num::Float)
                }
            }
            Value::String(s) => {
                let s = s.trim();
                if let Ok(i) = s.parse::<i64>() {
                    Some(Num::Int(i))
                } else {
                    s.parse::<f64>().ok().map(Num::Float)
                }
            }
            _ => None,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Float(f) => f,
        }
    }

    pub fn to_value(self) -> Value {
        match self {
            Num::Int(i) => Value::from(i),
            Num::Float(f) => Value::from(f),
        }
    }
}

/// Total ordering across mixed value types, used by `sort` and the
/// `case` tag. Numbers compare numerically (numeric strings included);
/// otherwise the text forms compare.
pub fn cmp_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(sa), Value::String(sb)) => {
            match (Num::from_value(a), Num::from_value(b)) {
                (Some(na), Some(nb)) => cmp_f64(na.as_f64(), nb.as_f64()),
                _ => sa.cmp(sb),
            }
        }
        (Value::Bool(ba), Value::Bool(bb)) => ba.cmp(bb),
        _ => match (Num::from_value(a), Num::from_value(b)) {
            (Some(na), Some(nb)) => cmp_f64(na.as_f64(), nb.as_f64()),
            _ => to_text(a).cmp(&to_text(b)),
        },
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    if (a - b).abs() < f64::EPSILON {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}
