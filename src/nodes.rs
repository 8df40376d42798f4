//! Renderable tree elements.
//!
//! The text parser lives outside this crate; what it produces is a tree
//! of these nodes. Tags receive their children as `NodeRef` slices and
//! drive rendering through the same trait, so control-flow signals pass
//! through every layer uniformly.

use std::sync::Arc;

use serde_json::Value;

use crate::context::Context;
use crate::errors::Result;
use crate::flow::Flow;
use crate::tags::render_block;
use crate::Engine;

/// A parsed template-tree element.
pub trait Node: Send + Sync {
    fn render(&self, engine: &Engine, ctx: &mut Context) -> Result<Flow>;
}

pub type NodeRef = Arc<dyn Node>;

/// Literal template text between markup.
pub struct Text(pub String);

impl Text {
    pub fn new(text: impl Into<String>) -> NodeRef {
        Arc::new(Text(text.into()))
    }
}

impl Node for Text {
    fn render(&self, _engine: &Engine, _ctx: &mut Context) -> Result<Flow> {
        Ok(Flow::Content(Value::String(self.0.clone())))
    }
}

/// An already-evaluated constant.
pub struct Literal(pub Value);

impl Literal {
    pub fn new(value: impl Into<Value>) -> NodeRef {
        Arc::new(Literal(value.into()))
    }
}

impl Node for Literal {
    fn render(&self, _engine: &Engine, _ctx: &mut Context) -> Result<Flow> {
        Ok(Flow::Content(self.0.clone()))
    }
}

/// Context lookup by dotted path. Missing variables resolve to null.
pub struct Variable(pub String);

impl Variable {
    pub fn new(path: impl Into<String>) -> NodeRef {
        Arc::new(Variable(path.into()))
    }
}

impl Node for Variable {
    fn render(&self, _engine: &Engine, ctx: &mut Context) -> Result<Flow> {
        Ok(Flow::Content(ctx.resolve(&self.0)))
    }
}

/// One step of an output pipe: a filter name plus its argument nodes.
pub struct FilterCall {
    pub name: String,
    pub params: Vec<NodeRef>,
}

impl FilterCall {
    pub fn new(name: impl Into<String>, params: Vec<NodeRef>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// An output expression: `{{ expr | f1 | f2: a, b }}`.
///
/// The expression value threads left-to-right through the pipe, each
/// filter resolved by name at render time and fed the prior output.
/// Parameters are evaluated before the filter runs.
pub struct Output {
    expr: NodeRef,
    filters: Vec<FilterCall>,
}

impl Output {
    pub fn new(expr: NodeRef, filters: Vec<FilterCall>) -> NodeRef {
        Arc::new(Output { expr, filters })
    }
}

impl Node for Output {
    fn render(&self, engine: &Engine, ctx: &mut Context) -> Result<Flow> {
        let mut value = match self.expr.render(engine, ctx)? {
            Flow::Content(v) => v,
            signal => return Ok(signal),
        };
        for call in &self.filters {
            let filter = engine.filter(&call.name)?;
            let mut params = Vec::with_capacity(call.params.len());
            for param in &call.params {
                match param.render(engine, ctx)? {
                    Flow::Content(v) => params.push(v),
                    signal => return Ok(signal),
                }
            }
            value = filter.apply(&value, &params)?;
        }
        Ok(Flow::Content(value))
    }
}

/// A tag invocation. The tag is resolved by name against the engine at
/// render time and handed this node's children.
pub struct TagNode {
    name: String,
    nodes: Vec<NodeRef>,
}

impl TagNode {
    pub fn new(name: impl Into<String>, nodes: Vec<NodeRef>) -> NodeRef {
        Arc::new(TagNode {
            name: name.into(),
            nodes,
        })
    }
}

impl Node for TagNode {
    fn render(&self, engine: &Engine, ctx: &mut Context) -> Result<Flow> {
        let tag = engine.tag(&self.name)?;
        tag.render(engine, ctx, &self.nodes)
    }
}

/// `{% break %}`.
pub struct BreakNode;

impl BreakNode {
    pub fn new() -> NodeRef {
        Arc::new(BreakNode)
    }
}

impl Node for BreakNode {
    fn render(&self, _engine: &Engine, _ctx: &mut Context) -> Result<Flow> {
        Ok(Flow::Break)
    }
}

/// `{% continue %}`.
pub struct ContinueNode;

impl ContinueNode {
    pub fn new() -> NodeRef {
        Arc::new(ContinueNode)
    }
}

impl Node for ContinueNode {
    fn render(&self, _engine: &Engine, _ctx: &mut Context) -> Result<Flow> {
        Ok(Flow::Continue)
    }
}

/// A sequence of children rendered in document order. Signals from a
/// child abort the walk and bubble out unchanged; this is the unit tag
/// bodies are wrapped in.
pub struct Block(pub Vec<NodeRef>);

impl Block {
    pub fn new(nodes: Vec<NodeRef>) -> NodeRef {
        Arc::new(Block(nodes))
    }
}

impl Node for Block {
    fn render(&self, engine: &Engine, ctx: &mut Context) -> Result<Flow> {
        render_block(engine, ctx, &self.0)
    }
}
