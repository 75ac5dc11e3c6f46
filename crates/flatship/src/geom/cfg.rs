//! Tolerance and limit defaults for clipping (internal).
//!
//! Policy
//! - Defaults are fixed constants. `ClipCfg` exists so tests and the CLI can
//!   tighten or loosen them without touching call sites.

/// Distance a boundary crossing is pushed past the edge before wrapping, so the
/// wrapped copy lands strictly inside instead of exactly on the far edge.
pub const NUDGE: f64 = 0.1;
/// Maximum number of splits `PolylineSplitter::resolve` performs per segment.
pub const MAX_SPLITS: usize = 16;
/// Slack allowed when checking resolved endpoints against the screen.
pub const BOUNDARY_TOL: f64 = 0.2;

/// Clipping configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipCfg {
    pub nudge: f64,
    pub max_splits: usize,
}

impl Default for ClipCfg {
    fn default() -> Self {
        Self {
            nudge: NUDGE,
            max_splits: MAX_SPLITS,
        }
    }
}
