//! Core geometry for a ship flying on a flat torus or a flat Klein bottle.
//!
//! The screen is a fixed rectangle whose edges are glued according to the
//! selected surface. Everything drawn on it goes through the wrap-and-split
//! pipeline in [`clip`], which turns one world-space line into the pieces that
//! are actually visible after crossing the glued edges.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - The driver in `crates/cli` is the only consumer; breaking changes are fine
//!   when they make the pipeline clearer.

pub mod canvas;
pub mod clip;
pub mod game;
pub mod geom;
pub mod input;
pub mod render;
pub mod sample;
pub mod ship;
pub mod topology;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::canvas::{Canvas, Font, Framebuffer, Recorder};
    pub use crate::clip::{ClipError, Polyline, PolylineSplitter, SegmentClipper, Split};
    pub use crate::game::{GameCfg, Session, Ship, Status};
    pub use crate::geom::{ClipCfg, Point, Screen, Segment, Side};
    pub use crate::input::{Button, ButtonEvent, Command, InputMode};
    pub use crate::ship::{Hull, ShipRenderer};
    pub use crate::topology::{SurfaceVariant, Topology};
}
