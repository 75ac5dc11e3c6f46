//! The two screens: surface menu and flight.

use crate::canvas::{Canvas, Font};
use crate::clip::ClipError;
use crate::geom::Screen;
use crate::ship::{Ship, ShipRenderer};
use crate::topology::SurfaceVariant;

pub const MENU_HINTS: [&str; 2] = [
    "Press up/down to choose a surface.",
    "Press A/B/START to begin.",
];

pub fn banner(variant: SurfaceVariant) -> String {
    format!("You are playing on a {}", variant.name())
}

/// Surface name in large type with two instruction lines below.
pub fn draw_menu<C: Canvas + ?Sized>(canvas: &mut C, selected: SurfaceVariant) {
    canvas.clear();
    canvas.draw_text(10, 10, selected.name(), Font::Title);
    canvas.draw_text(10, 40, MENU_HINTS[0], Font::Body);
    canvas.draw_text(10, 55, MENU_HINTS[1], Font::Body);
    canvas.flush();
}

/// One flight frame: banner near the bottom edge, then the hull.
///
/// The hull is resolved before anything touches the canvas, so a clipping
/// error leaves the previous frame on screen.
pub fn draw_flight<C: Canvas + ?Sized>(
    canvas: &mut C,
    renderer: &ShipRenderer,
    ship: &Ship,
    variant: SurfaceVariant,
    screen: &Screen,
) -> Result<(), ClipError> {
    let pieces = renderer.resolve(ship)?;
    canvas.clear();
    canvas.draw_text(10, screen.height as i32 - 15, &banner(variant), Font::Body);
    ShipRenderer::paint(canvas, &pieces);
    canvas.flush();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Op, Recorder};
    use crate::clip::PolylineSplitter;
    use crate::geom::ClipCfg;
    use crate::ship::Hull;
    use crate::topology::Topology;

    #[test]
    fn menu_layout() {
        let mut rec = Recorder::new();
        draw_menu(&mut rec, SurfaceVariant::KleinBottle);
        assert_eq!(rec.ops.first(), Some(&Op::Clear));
        assert_eq!(rec.ops.last(), Some(&Op::Flush));
        assert_eq!(
            rec.ops[1],
            Op::Text {
                x: 10,
                y: 10,
                text: "flat Klein bottle".into(),
                font: Font::Title
            }
        );
        assert_eq!(rec.texts().count(), 3);
    }

    #[test]
    fn flight_frame_has_banner_and_hull() {
        let topo = Topology::new(Screen::BADGE, SurfaceVariant::Torus);
        let renderer = ShipRenderer::new(PolylineSplitter::new(topo), Hull::default());
        let mut rec = Recorder::new();
        draw_flight(
            &mut rec,
            &renderer,
            &Ship::new(100.0, 60.0, 0.3),
            SurfaceVariant::Torus,
            &Screen::BADGE,
        )
        .unwrap();
        assert_eq!(
            rec.ops[1],
            Op::Text {
                x: 10,
                y: 111,
                text: "You are playing on a 4D flat torus".into(),
                font: Font::Body
            }
        );
        assert_eq!(rec.lines().count(), 4);
        assert_eq!(rec.ops.last(), Some(&Op::Flush));
    }

    #[test]
    fn failed_frame_draws_nothing() {
        let topo = Topology::new(Screen::BADGE, SurfaceVariant::Torus);
        let cfg = ClipCfg {
            max_splits: 0,
            ..ClipCfg::default()
        };
        let renderer = ShipRenderer::new(PolylineSplitter::with_cfg(topo, cfg), Hull::default());
        let mut rec = Recorder::new();
        let err = draw_flight(
            &mut rec,
            &renderer,
            &Ship::new(0.5, 60.0, 0.0),
            SurfaceVariant::Torus,
            &Screen::BADGE,
        );
        assert!(matches!(err, Err(ClipError::SplitIterationExceeded { .. })));
        assert!(rec.ops.is_empty());
    }
}
