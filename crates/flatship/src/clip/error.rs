use std::fmt;

use crate::geom::Segment;

/// Errors surfaced by the clipping pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipError {
    /// `split` was called on a segment with no endpoint off screen.
    DegenerateSplit { segment: Segment },
    /// `resolve` used up its split budget without reaching an on-screen polyline.
    SplitIterationExceeded { segment: Segment, limit: usize },
}

impl fmt::Display for ClipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipError::DegenerateSplit { segment } => write!(
                f,
                "segment {} does not leave the screen; nothing to split",
                segment
            ),
            ClipError::SplitIterationExceeded { segment, limit } => write!(
                f,
                "segment {} still leaves the screen after {} splits",
                segment, limit
            ),
        }
    }
}

impl std::error::Error for ClipError {}
