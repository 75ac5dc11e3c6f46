//! Plain 2D values shared by the whole pipeline.
//!
//! Purpose
//! - `Point`, `Segment` and `Screen` are small `Copy` values; every transform
//!   returns a new value instead of mutating in place.
//! - Tolerances and limits are collected in `cfg` and surfaced as `ClipCfg`.

pub mod cfg;
mod types;

pub use cfg::ClipCfg;
pub use types::{Point, Screen, Segment, Side};
