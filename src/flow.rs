use serde_json::Value;

use crate::value::to_text;

/// What rendering a node produces: ordinary content, or a control-flow
/// signal on its way to the nearest enclosing loop.
///
/// Break and Continue are not values. Iteration tags consume them;
/// every other composing construct must pass them through unchanged so
/// a `break` buried in nested conditionals still reaches its loop.
/// Matching this enum exhaustively is what keeps that protocol honest.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Content(Value),
    Break,
    Continue,
}

impl Flow {
    /// The content of this flow. The textual form of a signal is the
    /// empty string, so one that escapes every loop renders as nothing.
    pub fn into_content(self) -> Value {
        match self {
            Flow::Content(v) => v,
            Flow::Break | Flow::Continue => Value::String(String::new()),
        }
    }

    /// Text form of the content, empty for signals.
    pub fn into_text(self) -> String {
        to_text(&self.into_content())
    }

    pub fn is_signal(&self) -> bool {
        matches!(self, Flow::Break | Flow::Continue)
    }
}

impl From<Value> for Flow {
    fn from(value: Value) -> Self {
        Flow::Content(value)
    }
}
