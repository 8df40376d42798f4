use std::collections::HashMap;

use serde_json::Value;

/// Mutable variable bindings for one top-level render.
///
/// Tags mutate it freely (`assign`, `capture`, loop variables); the
/// `cycle` tag keeps its per-group counters here too, so repeated
/// renders against the same context keep cycling.
#[derive(Clone, Default)]
pub struct Context {
    vars: HashMap<String, Value>,
    cycles: HashMap<String, usize>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the bindings from a JSON object; non-objects seed nothing.
    pub fn from_value(value: Value) -> Self {
        let mut ctx = Self::new();
        if let Value::Object(map) = value {
            for (k, v) in map {
                ctx.vars.insert(k, v);
            }
        }
        ctx
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    /// Dotted-path lookup: `user.name`, `items.0`, `a.b.2.c`. A miss at
    /// any step resolves to null rather than an error, matching how
    /// templates treat absent variables.
    pub fn resolve(&self, path: &str) -> Value {
        let mut segments = path.split('.');
        let head = match segments.next() {
            Some(h) => h,
            None => return Value::Null,
        };
        let mut current = match self.vars.get(head) {
            Some(v) => v,
            None => return Value::Null,
        };
        for seg in segments {
            current = match current {
                Value::Object(map) => match map.get(seg) {
                    Some(v) => v,
                    None => return Value::Null,
                },
                Value::Array(items) => match seg.parse::<usize>().ok().and_then(|i| items.get(i)) {
                    Some(v) => v,
                    None => return Value::Null,
                },
                _ => return Value::Null,
            };
        }
        current.clone()
    }

    /// Next index for a cycle group, advancing the counter. `len` is
    /// the number of choices in the group; the index wraps.
    pub(crate) fn cycle_index(&mut self, key: &str, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let counter = self.cycles.entry(key.to_string()).or_insert(0);
        let index = *counter % len;
        *counter += 1;
        index
    }
}
