//! String-manipulating filters.

use serde_json::Value;

use crate::errors::Result;
use crate::filters::Filter;
use crate::value::to_text;

pub struct Append;

impl Filter for Append {
    fn name(&self) -> &str {
        "append"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        self.check_params(params, 1)?;
        let mut out = to_text(input);
        out.push_str(&to_text(self.param(0, params)?));
        Ok(Value::String(out))
    }
}

pub struct Prepend;

impl Filter for Prepend {
    fn name(&self) -> &str {
        "prepend"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        self.check_params(params, 1)?;
        let mut out = to_text(self.param(0, params)?);
        out.push_str(&to_text(input));
        Ok(Value::String(out))
    }
}

pub struct Capitalize;

impl Filter for Capitalize {
    fn name(&self) -> &str {
        "capitalize"
    }

    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        let text = to_text(input);
        let mut chars = text.chars();
        let out = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
            None => String::new(),
        };
        Ok(Value::String(out))
    }
}

pub struct Downcase;

impl Filter for Downcase {
    fn name(&self) -> &str {
        "downcase"
    }

    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        Ok(Value::String(to_text(input).to_lowercase()))
    }
}

pub struct Upcase;

impl Filter for Upcase {
    fn name(&self) -> &str {
        "upcase"
    }

    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        Ok(Value::String(to_text(input).to_uppercase()))
    }
}

pub struct Remove;

impl Filter for Remove {
    fn name(&self) -> &str {
        "remove"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        self.check_params(params, 1)?;
        let needle = to_text(self.param(0, params)?);
        Ok(Value::String(to_text(input).replace(&needle, "")))
    }
}

pub struct RemoveFirst;

impl Filter for RemoveFirst {
    fn name(&self) -> &str {
        "remove_first"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        self.check_params(params, 1)?;
        let needle = to_text(self.param(0, params)?);
        Ok(Value::String(to_text(input).replacen(&needle, "", 1)))
    }
}

pub struct Replace;

impl Filter for Replace {
    fn name(&self) -> &str {
        "replace"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        self.check_params(params, 2)?;
        let needle = to_text(self.param(0, params)?);
        let with = to_text(self.param(1, params)?);
        Ok(Value::String(to_text(input).replace(&needle, &with)))
    }
}

pub struct ReplaceFirst;

impl Filter for ReplaceFirst {
    fn name(&self) -> &str {
        "replace_first"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        self.check_params(params, 2)?;
        let needle = to_text(self.param(0, params)?);
        let with = to_text(self.param(1, params)?);
        Ok(Value::String(to_text(input).replacen(&needle, &with, 1)))
    }
}

pub struct Split;

impl Filter for Split {
    fn name(&self) -> &str {
        "split"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        self.check_params(params, 1)?;
        let text = to_text(input);
        let sep = to_text(self.param(0, params)?);
        let parts: Vec<Value> = if sep.is_empty() {
            text.chars().map(|c| Value::String(c.to_string())).collect()
        } else {
            text.split(&sep).map(|s| Value::String(s.to_string())).collect()
        };
        Ok(Value::Array(parts))
    }
}

pub struct StripNewlines;

impl Filter for StripNewlines {
    fn name(&self) -> &str {
        "strip_newlines"
    }

    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        let out: String = to_text(input).chars().filter(|c| *c != '\n' && *c != '\r').collect();
        Ok(Value::String(out))
    }
}

const DEFAULT_TRUNCATE_LENGTH: usize = 50;
const DEFAULT_TRUNCATE_WORDS: usize = 15;
const ELLIPSIS: &str = "...";

pub struct Truncate;

impl Filter for Truncate {
    fn name(&self) -> &str {
        "truncate"
    }

    // truncate: 'abcdef' | truncate: 5 => "ab...". The ellipsis counts
    // toward the requested length. Both params are optional.
    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        let text = to_text(input);
        let length = params
            .first()
            .and_then(|v| crate::value::Num::from_value(v))
            .map(|n| n.as_f64().max(0.0) as usize)
            .unwrap_or(DEFAULT_TRUNCATE_LENGTH);
        let ellipsis = params.get(1).map(to_text).unwrap_or_else(|| ELLIPSIS.to_string());

        if text.chars().count() <= length {
            return Ok(Value::String(text));
        }
        let keep = length.saturating_sub(ellipsis.chars().count());
        let mut out: String = text.chars().take(keep).collect();
        out.push_str(&ellipsis);
        Ok(Value::String(out))
    }
}

pub struct Truncatewords;

impl Filter for Truncatewords {
    fn name(&self) -> &str {
        "truncatewords"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        let text = to_text(input);
        let count = params
            .first()
            .and_then(|v| crate::value::Num::from_value(v))
            .map(|n| n.as_f64().max(0.0) as usize)
            .unwrap_or(DEFAULT_TRUNCATE_WORDS);
        let ellipsis = params.get(1).map(to_text).unwrap_or_else(|| ELLIPSIS.to_string());

        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() <= count {
            return Ok(Value::String(text));
        }
        let mut out = words[..count].join(" ");
        out.push_str(&ellipsis);
        Ok(Value::String(out))
    }
}
