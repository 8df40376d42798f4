//! The `date` filter: strftime-style formatting.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::trace;

use crate::errors::Result;
use crate::filters::Filter;
use crate::value::to_text;

/// Formats a date with a strftime pattern: `ts | date: "%Y-%m-%d"`.
///
/// Accepts epoch seconds (number or numeric string), RFC 3339 strings,
/// `"%Y-%m-%d %H:%M:%S"` / `"%Y-%m-%d"` strings, or the literals
/// `"now"` and `"today"` (the one documented non-deterministic input).
/// Anything unparseable, including a bad format pattern, passes the
/// input through unchanged. Times are treated as UTC.
pub struct Date;

impl Filter for Date {
    fn name(&self) -> &str {
        "date"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        self.check_params(params, 1)?;
        let pattern = to_text(self.param(0, params)?);

        let parsed = match input {
            Value::Number(n) => n.as_i64().and_then(from_epoch),
            Value::String(s) => parse_text(s),
            _ => None,
        };
        let date = match parsed {
            Some(d) => d,
            None => {
                trace!(input = %to_text(input), "date filter input did not parse, passing through");
                return Ok(input.clone());
            }
        };

        let items: Vec<Item> = StrftimeItems::new(&pattern).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            trace!(%pattern, "invalid strftime pattern, passing input through");
            return Ok(input.clone());
        }
        Ok(Value::String(date.format_with_items(items.iter()).to_string()))
    }
}

fn from_epoch(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("now") || s.eq_ignore_ascii_case("today") {
        return Some(Utc::now());
    }
    if let Ok(secs) = s.parse::<i64>() {
        return from_epoch(secs);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }
    None
}
