//! Edge gluing for the two flat surfaces the ship can fly on.
//!
//! Purpose
//! - Answer "where does a point (and heading) that left the screen come back
//!   in?" for the selected surface.
//! - Torus: both edge pairs glued straight. Klein bottle: the top/bottom pair
//!   is glued with a horizontal mirror, which also reverses the heading.
//!
//! The y-axis is handled before the x-axis, one after the other, so a point
//! that is off on both axes is corrected on both in the same call.

use std::f64::consts::{PI, TAU};
use std::fmt;

use crate::geom::{Point, Screen, Side};

/// Surface the screen edges are glued into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SurfaceVariant {
    #[default]
    Torus,
    KleinBottle,
}

impl SurfaceVariant {
    /// Menu order.
    pub const ALL: [SurfaceVariant; 2] = [SurfaceVariant::Torus, SurfaceVariant::KleinBottle];

    /// Display name shown in the menu and the in-game banner.
    pub fn name(self) -> &'static str {
        match self {
            SurfaceVariant::Torus => "4D flat torus",
            SurfaceVariant::KleinBottle => "flat Klein bottle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            SurfaceVariant::Torus => 0,
            SurfaceVariant::KleinBottle => 1,
        }
    }

    /// Next entry in menu order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous entry in menu order, wrapping around.
    pub fn prev(self) -> Self {
        let n = Self::ALL.len();
        Self::ALL[(self.index() + n - 1) % n]
    }

    /// Whether crossing the top/bottom edges mirrors x and reverses heading.
    #[inline]
    pub fn flips_vertical_crossing(self) -> bool {
        matches!(self, SurfaceVariant::KleinBottle)
    }
}

impl fmt::Display for SurfaceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalize an angle into `[0, 2π)`.
#[inline]
pub fn normalize_heading(r: f64) -> f64 {
    let m = r.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if m >= TAU {
        0.0
    } else {
        m
    }
}

/// Selected surface plus the screen it is drawn on. Immutable for a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Topology {
    screen: Screen,
    variant: SurfaceVariant,
}

impl Topology {
    pub fn new(screen: Screen, variant: SurfaceVariant) -> Self {
        Self { screen, variant }
    }

    #[inline]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[inline]
    pub fn variant(&self) -> SurfaceVariant {
        self.variant
    }

    /// Carry a point and heading across one glued edge.
    ///
    /// Shifts by exactly one period on the edge's axis. Crossing the top or
    /// bottom edge of a Klein bottle also mirrors x and maps `r` to `π - r`.
    /// The heading is not normalized here.
    pub fn cross(&self, side: Side, x: f64, y: f64, heading: f64) -> (f64, f64, f64) {
        let Screen { width, height } = self.screen;
        match side {
            Side::Left => (x + width, y, heading),
            Side::Right => (x - width, y, heading),
            Side::Top | Side::Bottom => {
                let y = if side == Side::Top { y + height } else { y - height };
                if self.variant.flips_vertical_crossing() {
                    (width - x, y, PI - heading)
                } else {
                    (x, y, heading)
                }
            }
        }
    }

    /// Position-only `cross`.
    #[inline]
    pub fn cross_point(&self, side: Side, p: Point) -> Point {
        let (x, y, _) = self.cross(side, p.x, p.y, 0.0);
        Point::new(x, y)
    }

    /// Map a point and heading back onto the screen.
    ///
    /// Top, bottom, left, right are checked in that order and each is crossed
    /// at most once. In-bounds points come back unchanged; the heading is
    /// always renormalized into `[0, 2π)`.
    pub fn wrap(&self, x: f64, y: f64, heading: f64) -> (f64, f64, f64) {
        let mut state = (x, y, heading);
        for side in [Side::Top, Side::Bottom, Side::Left, Side::Right] {
            if side.is_beyond(&self.screen, Point::new(state.0, state.1)) {
                state = self.cross(side, state.0, state.1, state.2);
            }
        }
        let (x, y, r) = state;
        (x, y, normalize_heading(r))
    }

    /// Position-only wrap; the heading is irrelevant for segment endpoints.
    #[inline]
    pub fn wrap_point(&self, p: Point) -> Point {
        let (x, y, _) = self.wrap(p.x, p.y, 0.0);
        Point::new(x, y)
    }
}
