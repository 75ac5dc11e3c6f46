use std::iter::{Chain, Once};

use crate::geom::{ClipCfg, Point, Screen, Segment, Side};
use crate::topology::Topology;

use super::error::ClipError;

/// Point where `a → b` meets the line of `side`, plus a copy pushed `nudge`
/// past the edge.
///
/// Pre: `a` is beyond `side` and `b` is not, so the axis difference is non-zero.
fn edge_crossing(side: Side, screen: &Screen, a: Point, b: Point, nudge: f64) -> (Point, Point) {
    let Screen { width, height } = *screen;
    match side {
        Side::Left => {
            let y = a.y + (b.y - a.y) * a.x / (a.x - b.x);
            (Point::new(0.0, y), Point::new(-nudge, y))
        }
        Side::Right => {
            let y = a.y + (b.y - a.y) * (a.x - width) / (a.x - b.x);
            (Point::new(width, y), Point::new(width + nudge, y))
        }
        Side::Top => {
            let x = a.x + (b.x - a.x) * a.y / (a.y - b.y);
            (Point::new(x, 0.0), Point::new(x, -nudge))
        }
        Side::Bottom => {
            let x = a.x + (b.x - a.x) * (a.y - height) / (a.y - b.y);
            (Point::new(x, height), Point::new(x, height + nudge))
        }
    }
}

/// Result of resolving one boundary crossing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Split {
    /// Both endpoints were beyond the same edge; the segment was carried across
    /// it as a whole.
    Whole(Segment),
    /// The part beyond the edge, carried across it, followed by the remainder
    /// starting on the edge. Either may still leave the screen elsewhere.
    Cut { wrapped: Segment, rest: Segment },
}

impl IntoIterator for Split {
    type Item = Segment;
    type IntoIter = Chain<Once<Segment>, std::option::IntoIter<Segment>>;

    fn into_iter(self) -> Self::IntoIter {
        let (first, second) = match self {
            Split::Whole(s) => (s, None),
            Split::Cut { wrapped, rest } => (wrapped, Some(rest)),
        };
        std::iter::once(first).chain(second)
    }
}

/// Detects and resolves single boundary crossings against a `Topology`.
#[derive(Clone, Copy, Debug)]
pub struct SegmentClipper {
    topology: Topology,
    cfg: ClipCfg,
}

impl SegmentClipper {
    pub fn new(topology: Topology) -> Self {
        Self::with_cfg(topology, ClipCfg::default())
    }

    pub fn with_cfg(topology: Topology, cfg: ClipCfg) -> Self {
        Self { topology, cfg }
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[inline]
    pub fn cfg(&self) -> &ClipCfg {
        &self.cfg
    }

    /// True iff either endpoint lies strictly outside the closed screen.
    pub fn goes_out(&self, segment: &Segment) -> bool {
        let screen = self.topology.screen();
        !screen.contains(segment.start) || !screen.contains(segment.end)
    }

    /// Resolve one boundary crossing of `segment`.
    ///
    /// `start` is examined first, then `end`; the first endpoint beyond an edge
    /// (edges in `Side::PRIORITY` order) becomes `a`, the other becomes `b`.
    /// - `b` beyond the same edge: the whole segment crosses, no interpolation.
    /// - otherwise: the piece from `a` to just past the edge crosses, and the
    ///   remainder from the edge to `b` stays where it is.
    ///
    /// Only the gluing of that one edge is applied; a piece that is still off
    /// the other axis is left for the next call.
    pub fn split(&self, segment: &Segment) -> Result<Split, ClipError> {
        let screen = self.topology.screen();
        for (a, b) in [
            (segment.start, segment.end),
            (segment.end, segment.start),
        ] {
            if let Some(side) = Side::first_exit(&screen, a) {
                return Ok(self.split_at(&screen, side, a, b));
            }
        }
        Err(ClipError::DegenerateSplit { segment: *segment })
    }

    fn split_at(&self, screen: &Screen, side: Side, a: Point, b: Point) -> Split {
        let topo = &self.topology;
        if side.is_beyond(screen, b) {
            return Split::Whole(Segment::new(
                topo.cross_point(side, a),
                topo.cross_point(side, b),
            ));
        }
        let (on_edge, past_edge) = edge_crossing(side, screen, a, b, self.cfg.nudge);
        Split::Cut {
            wrapped: Segment::new(topo.cross_point(side, a), topo.cross_point(side, past_edge)),
            rest: Segment::new(on_edge, b),
        }
    }
}
