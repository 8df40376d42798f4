//! Iteration tags: `for` and `tablerow`. These are the constructs that
//! consume Break and Continue.

use serde_json::{json, Value};

use crate::context::Context;
use crate::errors::Result;
use crate::flow::Flow;
use crate::nodes::NodeRef;
use crate::tags::{layout_error, Tag};
use crate::value::{to_text, Num};
use crate::Engine;

/// What a collection value iterates as: arrays per element, objects as
/// [key, value] pairs, null as nothing, any other scalar once.
fn items_of(value: Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| Value::Array(vec![Value::String(k), v]))
            .collect(),
        other => vec![other],
    }
}

fn restore(ctx: &mut Context, name: &str, saved: Option<Value>) {
    match saved {
        Some(v) => ctx.set(name, v),
        None => {
            ctx.remove(name);
        }
    }
}

/// `{% for x in collection %}`. Child layout: [loop-var-name,
/// collection-expr, body…].
///
/// Body children render one at a time, each child's output kept as it
/// is produced. A Break from a child ends the loop keeping what has
/// been rendered so far; a Continue abandons the rest of the current
/// iteration's body. Both are consumed here, never re-propagated.
pub struct For;

impl Tag for For {
    fn name(&self) -> &str {
        "for"
    }

    fn render(&self, engine: &Engine, ctx: &mut Context, nodes: &[NodeRef]) -> Result<Flow> {
        let (var_node, collection_node, body) = match nodes {
            [v, c, body @ ..] => (v, c, body),
            _ => return Err(layout_error("for", "loop-var, collection, body...")),
        };

        let var = match var_node.render(engine, ctx)? {
            Flow::Content(v) => to_text(&v),
            signal => return Ok(signal),
        };
        let collection = match collection_node.render(engine, ctx)? {
            Flow::Content(v) => v,
            signal => return Ok(signal),
        };
        let items = items_of(collection);
        let length = items.len();

        let saved_var = ctx.get(&var).cloned();
        let saved_forloop = ctx.get("forloop").cloned();

        let mut out = String::new();
        'iterations: for (i, item) in items.into_iter().enumerate() {
            ctx.set(var.as_str(), item);
            ctx.set("forloop", forloop_meta(i, length));
            for node in body {
                match node.render(engine, ctx)? {
                    Flow::Content(v) => out.push_str(&to_text(&v)),
                    Flow::Break => break 'iterations,
                    Flow::Continue => continue 'iterations,
                }
            }
        }

        restore(ctx, &var, saved_var);
        restore(ctx, "forloop", saved_forloop);
        Ok(Flow::Content(Value::String(out)))
    }
}

fn forloop_meta(index0: usize, length: usize) -> Value {
    json!({
        "length": length,
        "index": index0 + 1,
        "index0": index0,
        "rindex": length - index0,
        "rindex0": length - index0 - 1,
        "first": index0 == 0,
        "last": index0 + 1 == length,
    })
}

/// `{% tablerow x in collection cols:n %}`. Child layout:
/// [loop-var-name, collection-expr, cols-expr, body…]. Emits
/// `<tr class="rowN">` / `<td class="colN">` markup, wrapping every
/// `cols` cells; a non-positive or non-numeric cols puts everything in
/// one row. Consumes signals like `for`, closing the open markup.
pub struct Tablerow;

impl Tag for Tablerow {
    fn name(&self) -> &str {
        "tablerow"
    }

    fn render(&self, engine: &Engine, ctx: &mut Context, nodes: &[NodeRef]) -> Result<Flow> {
        let (var_node, collection_node, cols_node, body) = match nodes {
            [v, c, n, body @ ..] => (v, c, n, body),
            _ => return Err(layout_error("tablerow", "loop-var, collection, cols, body...")),
        };

        let var = match var_node.render(engine, ctx)? {
            Flow::Content(v) => to_text(&v),
            signal => return Ok(signal),
        };
        let collection = match collection_node.render(engine, ctx)? {
            Flow::Content(v) => v,
            signal => return Ok(signal),
        };
        let cols_value = match cols_node.render(engine, ctx)? {
            Flow::Content(v) => v,
            signal => return Ok(signal),
        };

        let items = items_of(collection);
        let cols = Num::from_value(&cols_value)
            .map(|n| n.as_f64() as i64)
            .filter(|n| *n > 0)
            .map(|n| n as usize)
            .unwrap_or_else(|| items.len().max(1));

        if items.is_empty() {
            return Ok(Flow::Content(Value::String(String::new())));
        }

        let saved_var = ctx.get(&var).cloned();
        let mut out = String::from("<tr class=\"row1\">\n");
        let mut row = 1;
        'items: for (i, item) in items.into_iter().enumerate() {
            let col = i % cols;
            if col == 0 && i > 0 {
                row += 1;
                out.push_str(&format!("</tr>\n<tr class=\"row{row}\">\n"));
            }
            ctx.set(var.as_str(), item);
            out.push_str(&format!("<td class=\"col{}\">", col + 1));

            let mut broke = false;
            for node in body {
                match node.render(engine, ctx)? {
                    Flow::Content(v) => out.push_str(&to_text(&v)),
                    Flow::Continue => break,
                    Flow::Break => {
                        broke = true;
                        break;
                    }
                }
            }
            out.push_str("</td>");
            if broke {
                break 'items;
            }
        }
        out.push_str("</tr>\n");

        restore(ctx, &var, saved_var);
        Ok(Flow::Content(Value::String(out)))
    }
}
