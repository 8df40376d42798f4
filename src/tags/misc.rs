//! `comment`, `raw` and `cycle`.

use itertools::Itertools;
use serde_json::Value;

use crate::context::Context;
use crate::errors::Result;
use crate::flow::Flow;
use crate::nodes::NodeRef;
use crate::tags::{layout_error, render_block, Tag};
use crate::value::to_text;
use crate::Engine;

/// `{% comment %}…{% endcomment %}`: children are never rendered.
pub struct Comment;

impl Tag for Comment {
    fn name(&self) -> &str {
        "comment"
    }

    fn render(&self, _engine: &Engine, _ctx: &mut Context, _nodes: &[NodeRef]) -> Result<Flow> {
        Ok(Flow::Content(Value::String(String::new())))
    }
}

/// `{% raw %}…{% endraw %}`: children are literal text nodes by
/// construction, emitted without markup interpretation.
pub struct Raw;

impl Tag for Raw {
    fn name(&self) -> &str {
        "raw"
    }

    fn render(&self, engine: &Engine, ctx: &mut Context, nodes: &[NodeRef]) -> Result<Flow> {
        render_block(engine, ctx, nodes)
    }
}

/// `{% cycle 'a', 'b', 'c' %}`. Child layout: [group-name, choice…];
/// the group name may render empty, in which case the choice list
/// itself identifies the group. The counter lives in the context, so
/// every loop iteration advances it.
pub struct Cycle;

impl Tag for Cycle {
    fn name(&self) -> &str {
        "cycle"
    }

    fn render(&self, engine: &Engine, ctx: &mut Context, nodes: &[NodeRef]) -> Result<Flow> {
        let (group_node, choice_nodes) = match nodes.split_first() {
            Some(split) if !split.1.is_empty() => split,
            _ => return Err(layout_error("cycle", "group-name, choice...")),
        };
        let group = match group_node.render(engine, ctx)? {
            Flow::Content(v) => to_text(&v),
            signal => return Ok(signal),
        };
        let mut choices = Vec::with_capacity(choice_nodes.len());
        for node in choice_nodes {
            match node.render(engine, ctx)? {
                Flow::Content(v) => choices.push(v),
                signal => return Ok(signal),
            }
        }
        let key = format!(
            "{group}:{}",
            choices.iter().map(to_text).join(",")
        );
        let index = ctx.cycle_index(&key, choices.len());
        Ok(Flow::Content(choices.swap_remove(index)))
    }
}
