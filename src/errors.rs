use thiserror::Error;

/// Errors raised while dispatching filters and tags or while rendering
/// a node tree. All of these abort the current render in full; the core
/// performs no recovery or retry.
#[derive(Debug, Error)]
pub enum Error {
    /// Filter lookup miss. No fallback, no fuzzy matching.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// Tag lookup miss.
    #[error("unknown tag: {0}")]
    UnknownTag(String),

    /// A filter was called with the wrong number of parameters. The
    /// reported counts include the left-hand pipe value as an implicit
    /// first argument ("3 for 4" means 2 params passed, 3 expected), a
    /// message convention kept for compatibility with the original
    /// language.
    #[error("filter '{filter}': wrong number of arguments ({} for {})", .actual + 1, .expected + 1)]
    FilterArity {
        filter: String,
        expected: usize,
        actual: usize,
    },

    /// A filter asked for a parameter index past the end of its list.
    #[error("error in filter '{filter}': cannot get param index: {index} from: {params}")]
    ParameterIndex {
        filter: String,
        index: usize,
        params: String,
    },

    /// Runtime render fault outside the taxonomy above, e.g. a tag
    /// dispatched with a node layout its contract does not accept.
    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
