//! Random segments for stress runs, benchmarks and randomized tests.
//!
//! Model
//! - Pick the start uniformly on the screen, a direction uniformly on [0, 2π)
//!   and a length uniformly on [0, max_len]. The end may leave the screen.
//! - Determinism comes from the caller's RNG; seed it with
//!   `StdRng::seed_from_u64` for reproducible streams.

use std::f64::consts::TAU;

use rand::Rng;

use crate::geom::{Point, Screen, Segment};

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SegmentCfg {
    /// Upper bound on segment length. Keep it below the smaller screen side so
    /// a segment crosses each edge pair at most once.
    pub max_len: f64,
}

impl Default for SegmentCfg {
    fn default() -> Self {
        Self { max_len: 60.0 }
    }
}

/// Draw one segment starting on the screen.
pub fn random_segment<R: Rng>(rng: &mut R, screen: &Screen, cfg: &SegmentCfg) -> Segment {
    let start = Point::new(
        rng.gen_range(0.0..=screen.width),
        rng.gen_range(0.0..=screen.height),
    );
    let theta = rng.gen::<f64>() * TAU;
    let len = rng.gen_range(0.0..=cfg.max_len.max(0.0));
    let end = start + Point::new(theta.cos(), theta.sin()) * len;
    Segment::new(start, end)
}

/// Draw `n` segments.
pub fn random_segments<R: Rng>(
    rng: &mut R,
    screen: &Screen,
    cfg: &SegmentCfg,
    n: usize,
) -> Vec<Segment> {
    (0..n).map(|_| random_segment(rng, screen, cfg)).collect()
}
