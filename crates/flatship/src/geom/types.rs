use std::fmt;

use nalgebra::Vector2;

/// A point in screen coordinates. Not bounded to the screen: pre-wrap and
/// pre-clip points routinely lie outside it.
pub type Point = Vector2<f64>;

/// Screen extent in pixels. Fixed for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub width: f64,
    pub height: f64,
}

impl Screen {
    /// Badge display the game was designed for.
    pub const BADGE: Screen = Screen {
        width: 295.0,
        height: 126.0,
    };

    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Closed containment: the edges and corners are inside.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Containment with `tol` of slack on every side.
    #[inline]
    pub fn contains_eps(&self, p: Point, tol: f64) -> bool {
        p.x >= -tol && p.x <= self.width + tol && p.y >= -tol && p.y <= self.height + tol
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::BADGE
    }
}

/// Screen edge a point lies beyond.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Priority order used when a point is beyond several edges at once.
    pub const PRIORITY: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// First edge in priority order that `p` lies strictly beyond.
    pub fn first_exit(screen: &Screen, p: Point) -> Option<Side> {
        Self::PRIORITY.into_iter().find(|s| s.is_beyond(screen, p))
    }

    #[inline]
    pub fn is_beyond(self, screen: &Screen, p: Point) -> bool {
        match self {
            Side::Left => p.x < 0.0,
            Side::Right => p.x > screen.width,
            Side::Top => p.y < 0.0,
            Side::Bottom => p.y > screen.height,
        }
    }

    #[inline]
    pub fn is_vertical_pair(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

/// Straight line between two points; the atomic drawable unit.
///
/// Drawing treats it as undirected, but `start`/`end` order decides which
/// endpoint the clipper looks at first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Pixel coordinates `[x1, y1, x2, y2]`, each floored.
    #[inline]
    pub fn floored(&self) -> [i32; 4] {
        [
            self.start.x.floor() as i32,
            self.start.y.floor() as i32,
            self.end.x.floor() as i32,
            self.end.y.floor() as i32,
        ]
    }

    /// Same line up to orientation, each coordinate within `tol`.
    pub fn approx_eq_undirected(&self, other: &Segment, tol: f64) -> bool {
        let close = |p: Point, q: Point| (p - q).amax() <= tol;
        (close(self.start, other.start) && close(self.end, other.end))
            || (close(self.start, other.end) && close(self.end, other.start))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}) -> ({:.3}, {:.3})",
            self.start.x, self.start.y, self.end.x, self.end.y
        )
    }
}
