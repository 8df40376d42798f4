//! HTML escaping and stripping filters.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::errors::Result;
use crate::filters::Filter;
use crate::value::to_text;

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

pub struct Escape;

impl Filter for Escape {
    fn name(&self) -> &str {
        "escape"
    }

    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        Ok(Value::String(escape_text(&to_text(input))))
    }
}

/// Short alias for `escape`, kept under its own registry name.
pub struct H;

impl Filter for H {
    fn name(&self) -> &str {
        "h"
    }

    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        Ok(Value::String(escape_text(&to_text(input))))
    }
}

pub struct EscapeOnce;

impl Filter for EscapeOnce {
    fn name(&self) -> &str {
        "escape_once"
    }

    // Ampersands that already begin an entity stay untouched, so
    // feeding escaped output back through is a no-op. The alternation
    // prefers the entity branch, leaving bare `&` to the second arm.
    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        static AMP: OnceLock<Regex> = OnceLock::new();
        let amp = AMP.get_or_init(|| Regex::new(r"&(?:[a-zA-Z]+|#[0-9]+);|&").unwrap());
        let text = to_text(input);
        let amp_escaped = amp.replace_all(&text, |caps: &regex::Captures| {
            let hit = &caps[0];
            if hit == "&" {
                "&amp;".to_string()
            } else {
                hit.to_string()
            }
        });
        let mut out = String::with_capacity(amp_escaped.len());
        for c in amp_escaped.chars() {
            match c {
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                other => out.push(other),
            }
        }
        Ok(Value::String(out))
    }
}

pub struct StripHtml;

impl Filter for StripHtml {
    fn name(&self) -> &str {
        "strip_html"
    }

    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        static MARKUP: OnceLock<Regex> = OnceLock::new();
        let markup = MARKUP.get_or_init(|| {
            Regex::new(r"(?is)<script.*?</script>|<style.*?</style>|<!--.*?-->|<[^>]*>").unwrap()
        });
        let text = to_text(input);
        Ok(Value::String(markup.replace_all(&text, "").into_owned()))
    }
}
