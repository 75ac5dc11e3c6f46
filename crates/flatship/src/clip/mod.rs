//! Wrap-and-split clipping of line segments on a glued screen.
//!
//! Purpose
//! - Turn one world-space segment into the ordered pieces that are visible on
//!   the screen once the segment is cut at the edges and re-enters through the
//!   glued opposite edge.
//!
//! Pipeline
//! - `SegmentClipper::goes_out` flags segments with an endpoint off screen.
//! - `SegmentClipper::split` resolves exactly one boundary crossing per call.
//! - `PolylineSplitter::resolve` repeats splits on the first offending piece
//!   until nothing leaves the screen, under a hard split cap.
//!
//! Code cross-refs: `topology::Topology::cross`, `geom::{Side, ClipCfg}`.

mod error;
mod polyline;
mod segment;

pub use error::ClipError;
pub use polyline::{Polyline, PolylineSplitter};
pub use segment::{SegmentClipper, Split};

#[cfg(test)]
mod tests;
