use std::ops::Index;
use std::slice;

use crate::geom::{ClipCfg, Segment};
use crate::topology::Topology;

use super::error::ClipError;
use super::segment::SegmentClipper;

/// Ordered pieces of one logical line after splitting; order is draw order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    segments: Vec<Segment>,
}

impl Polyline {
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn into_vec(self) -> Vec<Segment> {
        self.segments
    }
}

impl Index<usize> for Polyline {
    type Output = Segment;

    fn index(&self, i: usize) -> &Segment {
        &self.segments[i]
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = &'a Segment;
    type IntoIter = slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Reduces a segment to a `Polyline` whose pieces all stay on screen.
#[derive(Clone, Copy, Debug)]
pub struct PolylineSplitter {
    clipper: SegmentClipper,
}

impl PolylineSplitter {
    pub fn new(topology: Topology) -> Self {
        Self::with_cfg(topology, ClipCfg::default())
    }

    pub fn with_cfg(topology: Topology, cfg: ClipCfg) -> Self {
        Self {
            clipper: SegmentClipper::with_cfg(topology, cfg),
        }
    }

    #[inline]
    pub fn clipper(&self) -> &SegmentClipper {
        &self.clipper
    }

    /// Split `initial` until no piece leaves the screen.
    ///
    /// Each round replaces the first offending piece, in place, by the output
    /// of `SegmentClipper::split`. At most `cfg.max_splits` rounds run; if the
    /// polyline still leaves the screen after that, `SplitIterationExceeded`.
    pub fn resolve(&self, initial: Segment) -> Result<Polyline, ClipError> {
        let limit = self.clipper.cfg().max_splits;
        let mut segments = vec![initial];
        for _ in 0..limit {
            let Some(i) = segments.iter().position(|s| self.clipper.goes_out(s)) else {
                return Ok(Polyline { segments });
            };
            let split = self.clipper.split(&segments[i])?;
            segments.splice(i..=i, split);
        }
        if segments.iter().any(|s| self.clipper.goes_out(s)) {
            return Err(ClipError::SplitIterationExceeded {
                segment: initial,
                limit,
            });
        }
        Ok(Polyline { segments })
    }
}
