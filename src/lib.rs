//! Dispatch core for a Liquid-style template language: output
//! expressions piped through named filters, and block/inline tags with
//! a Break/Continue signaling protocol that composes across arbitrary
//! nesting.
//!
//! The text grammar lives elsewhere; this crate consumes an
//! already-built [`nodes::Node`] tree and provides the [`Engine`] the
//! tree renders against. The engine owns both lookup registries, seeded
//! from process-wide standard sets and extensible per instance:
//!
//! ```
//! use droplet::{Context, Engine};
//! use droplet::nodes::{FilterCall, Literal, Output};
//!
//! let engine = Engine::new();
//! let mut ctx = Context::new();
//! let tree = vec![Output::new(
//!     Literal::new("hello"),
//!     vec![FilterCall::new("upcase", vec![])],
//! )];
//! assert_eq!(engine.render(&tree, &mut ctx).unwrap(), "HELLO");
//! ```

pub mod context;
pub mod errors;
pub mod filters;
pub mod flow;
pub mod nodes;
pub mod registry;
pub mod tags;
pub mod value;

use std::sync::Arc;

use tracing::debug;

pub use context::Context;
pub use errors::{Error, Result};
pub use filters::{derived_name, Filter};
pub use flow::Flow;
pub use nodes::{Node, NodeRef};
pub use registry::Registry;
pub use tags::Tag;

/// Owns the filter and tag registries and drives rendering.
///
/// A fresh engine sees the standard sets; registrations are private to
/// the instance (clones taken earlier keep the state they saw, via
/// copy-on-write). Worker pools wanting custom extensions everywhere
/// should register them on each worker's engine, or build one
/// configured engine up front and clone it per worker.
#[derive(Clone)]
pub struct Engine {
    filters: Registry<dyn Filter>,
    tags: Registry<dyn Tag>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine seeded with the standard filter and tag sets.
    pub fn new() -> Self {
        Self {
            filters: Registry::seeded(filters::standard_set()),
            tags: Registry::seeded(tags::standard_set()),
        }
    }

    /// Registers a filter under its own name, replacing any previous
    /// entry under that name (standard ones included).
    pub fn register_filter(&mut self, filter: impl Filter + 'static) {
        let name = filter.name().to_string();
        debug!(%name, "registering filter");
        self.filters.insert(name, Arc::new(filter));
    }

    /// The filter registered under `name`, or [`Error::UnknownFilter`].
    /// No fallback, no fuzzy matching.
    pub fn filter(&self, name: &str) -> Result<Arc<dyn Filter>> {
        self.filters.lookup(name).ok_or_else(|| {
            debug!(%name, "filter lookup miss");
            Error::UnknownFilter(name.to_string())
        })
    }

    /// Registers a tag under its own name, replacing any previous entry.
    pub fn register_tag(&mut self, tag: impl Tag + 'static) {
        let name = tag.name().to_string();
        debug!(%name, "registering tag");
        self.tags.insert(name, Arc::new(tag));
    }

    /// The tag registered under `name`, or [`Error::UnknownTag`].
    pub fn tag(&self, name: &str) -> Result<Arc<dyn Tag>> {
        self.tags.lookup(name).ok_or_else(|| {
            debug!(%name, "tag lookup miss");
            Error::UnknownTag(name.to_string())
        })
    }

    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.names()
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.names()
    }

    /// Renders a node tree to text against `ctx`.
    ///
    /// A Break or Continue that escapes the outermost construct is a
    /// no-op yielding empty output for the offending subtree, not an
    /// error. Rendering imposes no iteration or recursion limit of its
    /// own; callers embedding untrusted templates should bound this
    /// call themselves.
    pub fn render(&self, nodes: &[NodeRef], ctx: &mut Context) -> Result<String> {
        debug!(nodes = nodes.len(), "rendering tree");
        let mut out = String::new();
        for node in nodes {
            // A stray signal's text form is empty; the siblings that
            // follow it still render.
            out.push_str(&node.render(self, ctx)?.into_text());
        }
        Ok(out)
    }
}

/// Renders with a fresh standard engine, for callers that need no
/// custom filters or tags.
pub fn render(nodes: &[NodeRef], ctx: &mut Context) -> Result<String> {
    Engine::new().render(nodes, ctx)
}
