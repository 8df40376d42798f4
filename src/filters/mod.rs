//! The filter contract and the standard filter set.
//!
//! Output markup takes filters: the first input of a filter is always
//! the rendered left side of the pipe, and its return value becomes the
//! left value for the next filter in the chain. Extra arguments arrive
//! as an ordered, already-evaluated parameter list.

mod array;
mod date;
mod html;
mod math;
mod string;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::errors::{Error, Result};

pub use array::{First, Join, Last, Map, Size, Sort};
pub use date::Date;
pub use html::{Escape, EscapeOnce, H, StripHtml};
pub use math::{DividedBy, Minus, Modulo, Plus, Times};
pub use string::{
    Append, Capitalize, Downcase, Prepend, Remove, RemoveFirst, Replace, ReplaceFirst, Split,
    StripNewlines, Truncate, Truncatewords, Upcase,
};

/// A named, composable value transformation.
///
/// Implementations are stateless beyond their identity and must be
/// deterministic for identical inputs (`date` with `"now"` input being
/// the documented exception). Registration keys on `name()`.
pub trait Filter: Send + Sync {
    /// Lookup name, case-sensitive.
    fn name(&self) -> &str;

    /// Applies the filter to `input`. `params` holds the extra
    /// arguments in call order; absence is an empty slice, never null.
    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value>;

    /// Fails unless exactly `expected` parameters were passed. The
    /// reported counts include the piped left value as an implicit
    /// first argument, so two params against three expected reads
    /// "(3 for 4)".
    fn check_params(&self, params: &[Value], expected: usize) -> Result<()> {
        if params.len() != expected {
            return Err(Error::FilterArity {
                filter: self.name().to_string(),
                expected,
                actual: params.len(),
            });
        }
        Ok(())
    }

    /// Parameter at `index`, or a `ParameterIndex` error naming the
    /// filter and the full list.
    fn param<'a>(&self, index: usize, params: &'a [Value]) -> Result<&'a Value> {
        params.get(index).ok_or_else(|| Error::ParameterIndex {
            filter: self.name().to_string(),
            index,
            params: Value::Array(params.to_vec()).to_string(),
        })
    }
}

/// Lookup name derived from a type's name, lower-cased: sugar for
/// custom filters whose struct is already named after the filter
/// (`Upcase` registers as `"upcase"`).
pub fn derived_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_lowercase()
}

/// The immutable standard set, built once per process and shared by
/// every engine until overridden.
pub(crate) fn standard_set() -> &'static Arc<HashMap<String, Arc<dyn Filter>>> {
    static STANDARD: OnceLock<Arc<HashMap<String, Arc<dyn Filter>>>> = OnceLock::new();
    STANDARD.get_or_init(|| {
        let filters: Vec<Arc<dyn Filter>> = vec![
            Arc::new(Append),
            Arc::new(Capitalize),
            Arc::new(Date),
            Arc::new(DividedBy),
            Arc::new(Downcase),
            Arc::new(Escape),
            Arc::new(EscapeOnce),
            Arc::new(First),
            Arc::new(H),
            Arc::new(Join),
            Arc::new(Last),
            Arc::new(Map),
            Arc::new(Minus),
            Arc::new(Modulo),
            Arc::new(Plus),
            Arc::new(Prepend),
            Arc::new(Remove),
            Arc::new(RemoveFirst),
            Arc::new(Replace),
            Arc::new(ReplaceFirst),
            Arc::new(Size),
            Arc::new(Sort),
            Arc::new(Split),
            Arc::new(StripHtml),
            Arc::new(StripNewlines),
            Arc::new(Times),
            Arc::new(Truncate),
            Arc::new(Truncatewords),
            Arc::new(Upcase),
        ];
        Arc::new(
            filters
                .into_iter()
                .map(|f| (f.name().to_string(), f))
                .collect(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn derived_name_lowercases_the_type_name() {
        assert_eq!(derived_name::<Upcase>(), "upcase");
        assert_eq!(derived_name::<StripHtml>(), "striphtml");
    }

    #[test]
    fn arity_message_counts_the_piped_value() {
        let err = Upcase.check_params(&[json!(1), json!(2)], 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "filter 'upcase': wrong number of arguments (3 for 4)"
        );
    }

    #[test]
    fn param_access_in_and_out_of_range() {
        let params = [json!("p0"), json!("p1"), json!("p2")];
        for (i, expected) in params.iter().enumerate() {
            assert_eq!(Upcase.param(i, &params).unwrap(), expected);
        }
        let err = Upcase.param(3, &params).unwrap_err();
        assert_eq!(
            err.to_string(),
            "error in filter 'upcase': cannot get param index: 3 from: [\"p0\",\"p1\",\"p2\"]"
        );
    }

    proptest! {
        #[test]
        fn check_params_fails_iff_count_differs(len in 0usize..6, expected in 0usize..6) {
            let params = vec![json!(0); len];
            let outcome = Upcase.check_params(&params, expected);
            prop_assert_eq!(outcome.is_ok(), len == expected);
        }
    }
}
