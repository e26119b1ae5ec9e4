//! Errors raised while building partition regions.

/// Geometric failures while deriving regions from splitting lines.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BspError {
    /// A splitting line did not cross the region boundary at two distinct points.
    #[error("split line crosses the region boundary at {found} distinct points, expected 2")]
    SplitLineCrossings { found: usize },

    /// A region without an active split line was asked for a child.
    #[error("parent region has no active split line to clip against")]
    MissingSplitLine,
}
