//! Tags that bind variables or splice subtrees: `assign`, `capture`,
//! `include`.

use serde_json::Value;

use crate::context::Context;
use crate::errors::Result;
use crate::flow::Flow;
use crate::nodes::NodeRef;
use crate::tags::{layout_error, render_block, Tag};
use crate::value::to_text;
use crate::Engine;

fn empty() -> Flow {
    Flow::Content(Value::String(String::new()))
}

/// `{% assign x = expr %}`. Child layout: [target-name, value-expr].
/// The value expression may itself be a filtered output node.
pub struct Assign;

impl Tag for Assign {
    fn name(&self) -> &str {
        "assign"
    }

    fn render(&self, engine: &Engine, ctx: &mut Context, nodes: &[NodeRef]) -> Result<Flow> {
        let (target_node, value_node) = match nodes {
            [t, v] => (t, v),
            _ => return Err(layout_error("assign", "target, value")),
        };
        let target = match target_node.render(engine, ctx)? {
            Flow::Content(v) => to_text(&v),
            signal => return Ok(signal),
        };
        let value = match value_node.render(engine, ctx)? {
            Flow::Content(v) => v,
            signal => return Ok(signal),
        };
        ctx.set(target, value);
        Ok(empty())
    }
}

/// `{% capture x %}…{% endcapture %}`. Child layout: [target-name,
/// body…]. Renders the body to text and binds it; a signal escaping the
/// body propagates unchanged and nothing is bound.
pub struct Capture;

impl Tag for Capture {
    fn name(&self) -> &str {
        "capture"
    }

    fn render(&self, engine: &Engine, ctx: &mut Context, nodes: &[NodeRef]) -> Result<Flow> {
        let (target_node, body) = match nodes.split_first() {
            Some(split) => split,
            None => return Err(layout_error("capture", "target, body...")),
        };
        let target = match target_node.render(engine, ctx)? {
            Flow::Content(v) => to_text(&v),
            signal => return Ok(signal),
        };
        match render_block(engine, ctx, body)? {
            Flow::Content(v) => {
                ctx.set(target, Value::String(to_text(&v)));
                Ok(empty())
            }
            signal => Ok(signal),
        }
    }
}

/// `{% include %}`. Loading and parsing the included template is the
/// tree builder's job; this tag receives the already-built subtree.
/// Child layout: [subtree] or [subtree, bind-name, bind-value] for
/// `include … with …`; the binding is scoped to the inclusion.
pub struct Include;

impl Tag for Include {
    fn name(&self) -> &str {
        "include"
    }

    fn render(&self, engine: &Engine, ctx: &mut Context, nodes: &[NodeRef]) -> Result<Flow> {
        match nodes {
            [subtree] => subtree.render(engine, ctx),
            [subtree, bind_node, value_node] => {
                let bind = match bind_node.render(engine, ctx)? {
                    Flow::Content(v) => to_text(&v),
                    signal => return Ok(signal),
                };
                let value = match value_node.render(engine, ctx)? {
                    Flow::Content(v) => v,
                    signal => return Ok(signal),
                };
                let saved = ctx.get(&bind).cloned();
                ctx.set(bind.as_str(), value);
                let flow = subtree.render(engine, ctx);
                match saved {
                    Some(v) => ctx.set(bind.as_str(), v),
                    None => {
                        ctx.remove(&bind);
                    }
                }
                flow
            }
            _ => Err(layout_error(
                "include",
                "subtree, (bind-name, bind-value)?",
            )),
        }
    }
}
