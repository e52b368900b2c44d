/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a graph or bisecting it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An adjacency line without the `:` between source and neighbors.
    #[error("line {line}: missing ':' separator in {content:?}")]
    MissingSeparator { line: usize, content: String },

    /// An adjacency line whose source label is blank.
    #[error("line {line}: empty source label")]
    EmptyLabel { line: usize },

    #[error("cut size must be at least 1")]
    InvalidCutSize,

    /// The graph ran out of tallied edges before the cut was complete
    /// (e.g. a single-edge graph asked for a three-edge cut).
    #[error("needed {needed} cut edges but only {found} could be selected")]
    TooFewEdges { needed: usize, found: usize },

    /// Removing the selected edges did not split the graph into exactly two
    /// components covering every vertex.
    #[error("cut does not bisect the graph: components of {left} and {right} vertices, {total} total")]
    NotBisected {
        left: usize,
        right: usize,
        total: usize,
    },
}
