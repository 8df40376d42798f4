//! Arithmetic filters. Integer math when both operands are integral,
//! float math otherwise; non-numeric operands coerce to zero.

use serde_json::Value;

use crate::errors::{Error, Result};
use crate::filters::Filter;
use crate::value::Num;

fn operands(filter: &dyn Filter, input: &Value, params: &[Value]) -> Result<(Num, Num)> {
    filter.check_params(params, 1)?;
    let left = Num::from_value(input).unwrap_or(Num::Int(0));
    let right = Num::from_value(filter.param(0, params)?).unwrap_or(Num::Int(0));
    Ok((left, right))
}

pub struct Plus;

impl Filter for Plus {
    fn name(&self) -> &str {
        "plus"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        Ok(match operands(self, input, params)? {
            (Num::Int(a), Num::Int(b)) => Num::Int(a.wrapping_add(b)),
            (a, b) => Num::Float(a.as_f64() + b.as_f64()),
        }
        .to_value())
    }
}

pub struct Minus;

impl Filter for Minus {
    fn name(&self) -> &str {
        "minus"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        Ok(match operands(self, input, params)? {
            (Num::Int(a), Num::Int(b)) => Num::Int(a.wrapping_sub(b)),
            (a, b) => Num::Float(a.as_f64() - b.as_f64()),
        }
        .to_value())
    }
}

pub struct Times;

impl Filter for Times {
    fn name(&self) -> &str {
        "times"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        Ok(match operands(self, input, params)? {
            (Num::Int(a), Num::Int(b)) => Num::Int(a.wrapping_mul(b)),
            (a, b) => Num::Float(a.as_f64() * b.as_f64()),
        }
        .to_value())
    }
}

pub struct DividedBy;

impl Filter for DividedBy {
    fn name(&self) -> &str {
        "divided_by"
    }

    // Integral division truncates: 7 | divided_by: 2 == 3.
    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        Ok(match operands(self, input, params)? {
            (_, Num::Int(0)) => {
                return Err(Error::Render("divided_by: division by zero".into()))
            }
            (Num::Int(a), Num::Int(b)) => Num::Int(a / b),
            (a, b) => {
                if b.as_f64() == 0.0 {
                    return Err(Error::Render("divided_by: division by zero".into()));
                }
                Num::Float(a.as_f64() / b.as_f64())
            }
        }
        .to_value())
    }
}

pub struct Modulo;

impl Filter for Modulo {
    fn name(&self) -> &str {
        "modulo"
    }

    fn apply(&self, input: &Value, params: &[Value]) -> Result<Value> {
        Ok(match operands(self, input, params)? {
            (_, Num::Int(0)) => return Err(Error::Render("modulo: division by zero".into())),
            (Num::Int(a), Num::Int(b)) => Num::Int(a % b),
            (a, b) => {
                if b.as_f64() == 0.0 {
                    return Err(Error::Render("modulo: division by zero".into()));
                }
                Num::Float(a.as_f64() % b.as_f64())
            }
        }
        .to_value())
    }
}
