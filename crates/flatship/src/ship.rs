//! Ship hull and its renderer.
//!
//! The hull is four edges in ship-local offsets (nose along +x). Drawing
//! rotates them about the ship center, resolves each edge against the
//! topology and floors every visible piece onto the canvas.

use nalgebra::Rotation2;

use crate::canvas::Canvas;
use crate::clip::{ClipError, Polyline, PolylineSplitter};
use crate::geom::{Point, Segment};

/// Ship position and heading (radians).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ship {
    pub pos: Point,
    pub heading: f64,
}

impl Ship {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            heading,
        }
    }
}

/// Hull edges in ship-local offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hull {
    pub edges: [Segment; 4],
}

impl Hull {
    /// Arrowhead: nose at `(4, 0)`, wing tips at `(-6, ±5)`, notch at `(-3, 0)`.
    pub fn dart(size: f64) -> Self {
        let p = |x: f64, y: f64| Point::new(x * size, y * size);
        Self {
            edges: [
                Segment::new(p(4.0, 0.0), p(-6.0, -5.0)),
                Segment::new(p(4.0, 0.0), p(-6.0, 5.0)),
                Segment::new(p(-3.0, 0.0), p(-6.0, -5.0)),
                Segment::new(p(-3.0, 0.0), p(-6.0, 5.0)),
            ],
        }
    }

    /// Edges in world coordinates:
    /// `x' = x + dx·cos r − dy·sin r`, `y' = y + dy·cos r + dx·sin r`.
    pub fn place(&self, ship: &Ship) -> [Segment; 4] {
        let rot = Rotation2::new(ship.heading);
        self.edges
            .map(|e| Segment::new(ship.pos + rot * e.start, ship.pos + rot * e.end))
    }
}

impl Default for Hull {
    fn default() -> Self {
        Self::dart(1.0)
    }
}

/// Draws a hull through a `PolylineSplitter`.
#[derive(Clone, Copy, Debug)]
pub struct ShipRenderer {
    splitter: PolylineSplitter,
    hull: Hull,
}

impl ShipRenderer {
    pub fn new(splitter: PolylineSplitter, hull: Hull) -> Self {
        Self { splitter, hull }
    }

    #[inline]
    pub fn hull(&self) -> &Hull {
        &self.hull
    }

    /// Visible pieces of every hull edge, one polyline per edge.
    pub fn resolve(&self, ship: &Ship) -> Result<Vec<Polyline>, ClipError> {
        self.hull
            .place(ship)
            .into_iter()
            .map(|edge| self.splitter.resolve(edge))
            .collect()
    }

    /// Resolve all edges, then draw. Nothing is drawn if any edge fails.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, ship: &Ship) -> Result<(), ClipError> {
        let pieces = self.resolve(ship)?;
        Self::paint(canvas, &pieces);
        Ok(())
    }

    /// Draw already resolved polylines, flooring every endpoint.
    pub fn paint<C: Canvas + ?Sized>(canvas: &mut C, pieces: &[Polyline]) {
        for seg in pieces.iter().flatten() {
            let [x1, y1, x2, y2] = seg.floored();
            canvas.draw_line(x1, y1, x2, y2);
        }
    }
}
