//! The Break/Continue protocol: loops consume, everything else
//! propagates, at any nesting depth.

use droplet::nodes::{
    Block, BreakNode, ContinueNode, Literal, Node, Output, TagNode, Text, Variable,
};
use droplet::{Context, Engine, Flow, NodeRef, Result};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Test-only condition node comparing a context path to a constant,
/// standing in for the parser's comparison expressions.
struct Equals {
    path: String,
    expected: Value,
}

impl Equals {
    fn new(path: &str, expected: impl Into<Value>) -> NodeRef {
        std::sync::Arc::new(Equals {
            path: path.to_string(),
            expected: expected.into(),
        })
    }
}

impl Node for Equals {
    fn render(&self, _engine: &Engine, ctx: &mut Context) -> Result<Flow> {
        Ok(Flow::Content(Value::Bool(ctx.resolve(&self.path) == self.expected)))
    }
}

fn for_over(items: Value, body: Vec<NodeRef>) -> NodeRef {
    let mut nodes = vec![Literal::new("x"), Literal::new(items)];
    nodes.extend(body);
    TagNode::new("for", nodes)
}

fn render(tree: Vec<NodeRef>, ctx: &mut Context) -> String {
    Engine::new().render(&tree, ctx).unwrap()
}

#[test]
fn break_stops_the_loop_keeping_prior_output() {
    let mut ctx = Context::new();
    let tree = vec![for_over(
        json!([1, 2, 3, 4]),
        vec![
            Output::new(Variable::new("x"), vec![]),
            TagNode::new(
                "if",
                vec![Equals::new("x", 3), Block::new(vec![BreakNode::new()])],
            ),
        ],
    )];
    // Iteration 3 emits its "3" before the break lands; 4 never runs.
    assert_eq!(render(tree, &mut ctx), "123");
}

#[test]
fn continue_skips_the_rest_of_the_current_iteration() {
    let mut ctx = Context::new();
    let tree = vec![for_over(
        json!([1, 2, 3]),
        vec![
            TagNode::new(
                "if",
                vec![Equals::new("x", 2), Block::new(vec![ContinueNode::new()])],
            ),
            Output::new(Variable::new("x"), vec![]),
        ],
    )];
    assert_eq!(render(tree, &mut ctx), "13");
}

#[test]
fn signals_cross_arbitrary_nesting_of_composing_tags() {
    let mut ctx = Context::new();
    // break inside if inside unless inside if, all inside the loop
    let deep = TagNode::new(
        "if",
        vec![
            Literal::new(true),
            Block::new(vec![TagNode::new(
                "unless",
                vec![
                    Literal::new(false),
                    Block::new(vec![TagNode::new(
                        "if",
                        vec![Equals::new("x", 2), Block::new(vec![BreakNode::new()])],
                    )]),
                ],
            )]),
        ],
    );
    let tree = vec![for_over(
        json!([1, 2, 3]),
        vec![Output::new(Variable::new("x"), vec![]), deep],
    )];
    assert_eq!(render(tree, &mut ctx), "12");
}

#[test]
fn a_composing_tag_returns_the_signal_unchanged() {
    let engine = Engine::new();
    let mut ctx = Context::new();
    let nodes = vec![
        Literal::new(true),
        Block::new(vec![BreakNode::new()]),
    ];
    let flow = engine
        .tag("if")
        .unwrap()
        .render(&engine, &mut ctx, &nodes)
        .unwrap();
    assert_eq!(flow, Flow::Break);

    // A truthy unless falls through to its else block.
    let nodes = vec![
        Literal::new(true),
        Block::new(vec![Text::new("unused")]),
        Block::new(vec![ContinueNode::new()]),
    ];
    let flow = engine
        .tag("unless")
        .unwrap()
        .render(&engine, &mut ctx, &nodes)
        .unwrap();
    assert_eq!(flow, Flow::Continue);
}

#[test]
fn capture_propagates_and_binds_nothing() {
    let engine = Engine::new();
    let mut ctx = Context::new();
    let nodes = vec![
        Literal::new("target"),
        Text::new("partial"),
        BreakNode::new(),
    ];
    let flow = engine
        .tag("capture")
        .unwrap()
        .render(&engine, &mut ctx, &nodes)
        .unwrap();
    assert_eq!(flow, Flow::Break);
    assert_eq!(ctx.get("target"), None);
}

#[test]
fn an_inner_loop_consumes_its_own_signals() {
    let mut ctx = Context::new();
    let inner = TagNode::new(
        "for",
        vec![
            Literal::new("y"),
            Literal::new(json!([5, 6])),
            Output::new(Variable::new("y"), vec![]),
            BreakNode::new(),
        ],
    );
    let tree = vec![for_over(
        json!([1, 2]),
        vec![inner, Output::new(Variable::new("x"), vec![])],
    )];
    // The inner break never reaches the outer loop.
    assert_eq!(render(tree, &mut ctx), "5152");
}

#[test]
fn continue_on_the_last_iteration_just_finishes() {
    let mut ctx = Context::new();
    let tree = vec![for_over(
        json!([1, 2]),
        vec![
            Output::new(Variable::new("x"), vec![]),
            ContinueNode::new(),
            Text::new("never"),
        ],
    )];
    assert_eq!(render(tree, &mut ctx), "12");
}

#[test]
fn tablerow_break_closes_the_markup() {
    let mut ctx = Context::new();
    let tree = vec![TagNode::new(
        "tablerow",
        vec![
            Literal::new("x"),
            Literal::new(json!(["a", "b", "c"])),
            Literal::new(3),
            Output::new(Variable::new("x"), vec![]),
            TagNode::new(
                "if",
                vec![Equals::new("x", "b"), Block::new(vec![BreakNode::new()])],
            ),
        ],
    )];
    assert_eq!(
        render(tree, &mut ctx),
        "<tr class=\"row1\">\n<td class=\"col1\">a</td><td class=\"col2\">b</td></tr>\n"
    );
}

#[test]
fn stray_signals_at_top_level_are_empty_no_ops() {
    let mut ctx = Context::new();
    assert_eq!(render(vec![BreakNode::new()], &mut ctx), "");
    assert_eq!(render(vec![ContinueNode::new()], &mut ctx), "");
    // Siblings after a stray signal still render.
    let tree = vec![Text::new("a"), BreakNode::new(), Text::new("b")];
    assert_eq!(render(tree, &mut ctx), "ab");
    // A signal escaping a conditional with no loop voids only that
    // subtree.
    let tree = vec![
        TagNode::new(
            "if",
            vec![
                Literal::new(true),
                Block::new(vec![Text::new("lost"), BreakNode::new()]),
            ],
        ),
        Text::new("kept"),
    ];
    assert_eq!(render(tree, &mut ctx), "kept");
}

#[test]
fn signals_never_equal_content() {
    assert_ne!(Flow::Break, Flow::Content(json!("")));
    assert_ne!(Flow::Continue, Flow::Content(Value::Null));
    assert_eq!(Flow::Break.into_content(), json!(""));
    assert_eq!(Flow::Continue.into_content(), json!(""));
}
