//! Conditional tags: `if`, `unless`, `case`.
//!
//! None of these are loops, so a Break or Continue coming out of a
//! chosen branch is returned unchanged to the caller.

use serde_json::Value;

use crate::context::Context;
use crate::errors::Result;
use crate::flow::Flow;
use crate::nodes::NodeRef;
use crate::tags::{layout_error, Tag};
use crate::value::is_truthy;
use crate::Engine;

/// `{% if %}` / `{% elsif %}` / `{% else %}`. Child layout: one
/// (condition, block) pair per branch, plus an optional trailing else
/// block.
pub struct If;

impl Tag for If {
    fn name(&self) -> &str {
        "if"
    }

    fn render(&self, engine: &Engine, ctx: &mut Context, nodes: &[NodeRef]) -> Result<Flow> {
        if nodes.is_empty() {
            return Err(layout_error("if", "(condition, block)+, else-block?"));
        }
        for pair in nodes.chunks(2) {
            match pair {
                [condition, block] => {
                    let outcome = match condition.render(engine, ctx)? {
                        Flow::Content(v) => v,
                        signal => return Ok(signal),
                    };
                    if is_truthy(&outcome) {
                        return block.render(engine, ctx);
                    }
                }
                // Odd trailing node: the else block.
                [fallback] => return fallback.render(engine, ctx),
                _ => unreachable!("chunks(2) yields one or two nodes"),
            }
        }
        Ok(Flow::Content(Value::String(String::new())))
    }
}

/// `{% unless %}`: renders its block when the condition is falsy.
/// Child layout: [condition, block, else-block?].
pub struct Unless;

impl Tag for Unless {
    fn name(&self) -> &str {
        "unless"
    }

    fn render(&self, engine: &Engine, ctx: &mut Context, nodes: &[NodeRef]) -> Result<Flow> {
        let (condition, block) = match nodes {
            [c, b] | [c, b, _] => (c, b),
            _ => return Err(layout_error("unless", "condition, block, else-block?")),
        };
        let outcome = match condition.render(engine, ctx)? {
            Flow::Content(v) => v,
            signal => return Ok(signal),
        };
        if !is_truthy(&outcome) {
            block.render(engine, ctx)
        } else if let Some(fallback) = nodes.get(2) {
            fallback.render(engine, ctx)
        } else {
            Ok(Flow::Content(Value::String(String::new())))
        }
    }
}

/// `{% case %}` / `{% when %}`. Child layout: [subject, (when-value,
/// when-block)…, else-block?]. The first when-value equal to the
/// subject wins.
pub struct Case;

impl Tag for Case {
    fn name(&self) -> &str {
        "case"
    }

    fn render(&self, engine: &Engine, ctx: &mut Context, nodes: &[NodeRef]) -> Result<Flow> {
        let (subject_node, rest) = match nodes.split_first() {
            Some(split) => split,
            None => return Err(layout_error("case", "subject, (when, block)+, else-block?")),
        };
        let subject = match subject_node.render(engine, ctx)? {
            Flow::Content(v) => v,
            signal => return Ok(signal),
        };
        for pair in rest.chunks(2) {
            match pair {
                [candidate, block] => {
                    let candidate = match candidate.render(engine, ctx)? {
                        Flow::Content(v) => v,
                        signal => return Ok(signal),
                    };
                    if candidate == subject {
                        return block.render(engine, ctx);
                    }
                }
                [fallback] => return fallback.render(engine, ctx),
                _ => unreachable!("chunks(2) yields one or two nodes"),
            }
        }
        Ok(Flow::Content(Value::String(String::new())))
    }
}
