//! The tag contract, the control-flow signaling protocol, and the
//! standard tag set.
//!
//! Tags are the logic of a template. A tag renders against the mutable
//! variable context and its child nodes, and yields either ordinary
//! content or a Break/Continue signal. The protocol: iteration tags
//! consume signals; every other composing tag passes them through
//! unchanged, however deeply nested, so a `break` inside an `if` inside
//! a `for` still stops the loop.

mod binding;
mod control;
mod iteration;
mod misc;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::context::Context;
use crate::errors::{Error, Result};
use crate::flow::Flow;
use crate::nodes::NodeRef;
use crate::value::to_text;
use crate::Engine;

pub use binding::{Assign, Capture, Include};
pub use control::{Case, If, Unless};
pub use iteration::{For, Tablerow};
pub use misc::{Comment, Cycle, Raw};

/// A named template construct rendering a subtree against the context.
pub trait Tag: Send + Sync {
    /// Lookup name, case-sensitive.
    fn name(&self) -> &str;

    /// Renders this tag. `nodes` is the child layout the tree builder
    /// produced for it; a layout the tag does not accept is an
    /// `Error::Render`. May mutate the context.
    fn render(&self, engine: &Engine, ctx: &mut Context, nodes: &[NodeRef]) -> Result<Flow>;
}

/// Renders `nodes` in document order, concatenating their text. The
/// first Break or Continue aborts the walk and is returned unchanged:
/// the non-consuming composition primitive for every tag that is not a
/// loop.
pub fn render_block(engine: &Engine, ctx: &mut Context, nodes: &[NodeRef]) -> Result<Flow> {
    let mut out = String::new();
    for node in nodes {
        match node.render(engine, ctx)? {
            Flow::Content(v) => out.push_str(&to_text(&v)),
            signal => return Ok(signal),
        }
    }
    Ok(Flow::Content(Value::String(out)))
}

pub(crate) fn layout_error(tag: &str, expected: &str) -> Error {
    Error::Render(format!("tag '{tag}' expects nodes [{expected}]"))
}

/// The immutable standard set, built once per process and shared by
/// every engine until overridden.
pub(crate) fn standard_set() -> &'static Arc<HashMap<String, Arc<dyn Tag>>> {
    static STANDARD: OnceLock<Arc<HashMap<String, Arc<dyn Tag>>>> = OnceLock::new();
    STANDARD.get_or_init(|| {
        let tags: Vec<Arc<dyn Tag>> = vec![
            Arc::new(Assign),
            Arc::new(Case),
            Arc::new(Capture),
            Arc::new(Comment),
            Arc::new(Cycle),
            Arc::new(For),
            Arc::new(If),
            Arc::new(Include),
            Arc::new(Raw),
            Arc::new(Tablerow),
            Arc::new(Unless),
        ];
        Arc::new(tags.into_iter().map(|t| (t.name().to_string(), t)).collect())
    })
}
