//! Split segment selection strategies for partition tree construction.
//!
//! The choice of splitting segment affects tree balance and how many
//! segments get cut during construction.

use crate::Segment;

/// Strategy for selecting which segment's supporting line splits a node.
pub trait SplitSelector {
    /// Returns the index of the splitting segment in `segments`.
    ///
    /// Returns `None` if the slice is empty.
    fn select(&self, segments: &[Segment]) -> Option<usize>;
}

/// Selects the first segment in the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSegment;

impl SplitSelector for FirstSegment {
    fn select(&self, segments: &[Segment]) -> Option<usize> {
        if segments.is_empty() { None } else { Some(0) }
    }
}

/// Prefers a free split, falling back to the first segment.
///
/// A segment whose endpoints were both produced by earlier cuts spans its
/// whole cell, so splitting on it cuts no other segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeSplit;

impl SplitSelector for FreeSplit {
    fn select(&self, segments: &[Segment]) -> Option<usize> {
        segments
            .iter()
            .position(Segment::is_free_split)
            .or_else(|| FirstSegment.select(segments))
    }
}
