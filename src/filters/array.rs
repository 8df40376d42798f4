//! Filters over arrays (several also accept strings).

use itertools::Itertools;
use serde_json::Value;

use crate::errors::Result;
use crate::filters::Filter;
use crate::value::{cmp_values, to_text};

pub struct First;

impl Filter for First {
    fn name(&self) -> &str {
        "first"
    }

    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        Ok(match input {
            Value::Array(items) => items.first().cloned().unwrap_or(Value::Null),
            Value::String(s) => s
                .chars()
                .next()
                .map(|c| Value::String(c.to_string()))
                .unwrap_or(Value::Null),
            _ => Value::Null,
        })
    }
}

pub struct Last;

impl Filter for Last {
    fn name(&self) -> &str {
        "last"
    }

    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        Ok(match input {
            Value::Array(items) => items.last().cloned().unwrap_or(Value::Null),
            Value::String(s) => s
                .chars()
                .last()
                .map(|c| Value::String(c.to_string()))
                .unwrap_or(Value::Null),
            _ => Value::Null,
        })
    }
}

pub struct Join;

impl Filter for Join {
    fn name(&self) -> &str {
        "join"
    }

    // Glue defaults to a single space.
    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        let glue = params.first().map(to_text).unwrap_or_else(|| " ".to_string());
        Ok(match input {
            Value::Array(items) => {
                Value::String(items.iter().map(to_text).join(&glue))
            }
            other => Value::String(to_text(other)),
        })
    }
}

pub struct Map;

impl Filter for Map {
    fn name(&self) -> &str {
        "map"
    }

    /// Plucks a key from every element: `products | map: 'title'`.
    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        self.check_params(params, 1)?;
        let key = to_text(self.param(0, params)?);
        let pluck = |item: &Value| match item {
            Value::Object(map) => map.get(&key).cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        };
        Ok(match input {
            Value::Array(items) => Value::Array(items.iter().map(pluck).collect()),
            object @ Value::Object(_) => pluck(object),
            _ => Value::Null,
        })
    }
}

pub struct Size;

impl Filter for Size {
    fn name(&self) -> &str {
        "size"
    }

    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        let size = match input {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            Value::String(s) => s.chars().count(),
            _ => 0,
        };
        Ok(Value::from(size))
    }
}

pub struct Sort;

impl Filter for Sort {
    fn name(&self) -> &str {
        "sort"
    }

    /// Sorts an array by value order, or by a property when one is
    /// given: `products | sort: 'price'`.
    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        let items = match input {
            Value::Array(items) => items.clone(),
            other => return Ok(other.clone()),
        };
        let sorted = match params.first() {
            Some(key) => {
                let key = to_text(key);
                items
                    .into_iter()
                    .sorted_by(|a, b| {
                        let pa = a.get(&key).cloned().unwrap_or(Value::Null);
                        let pb = b.get(&key).cloned().unwrap_or(Value::Null);
                        cmp_values(&pa, &pb)
                    })
                    .collect()
            }
            None => items.into_iter().sorted_by(cmp_values).collect(),
        };
        Ok(Value::Array(sorted))
    }
}
