use super::*;
use crate::geom::{cfg::BOUNDARY_TOL, ClipCfg, Point, Screen, Segment};
use crate::sample::{random_segment, SegmentCfg};
use crate::topology::{SurfaceVariant, Topology};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

const W: f64 = 295.0;
const H: f64 = 126.0;

fn splitter(variant: SurfaceVariant) -> PolylineSplitter {
    PolylineSplitter::new(Topology::new(Screen::BADGE, variant))
}

fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::from_coords(x1, y1, x2, y2)
}

fn assert_on_screen(poly: &Polyline) {
    let screen = Screen::BADGE;
    for s in poly {
        assert!(
            screen.contains_eps(s.start, BOUNDARY_TOL) && screen.contains_eps(s.end, BOUNDARY_TOL),
            "segment {} leaves the screen",
            s
        );
    }
}

#[test]
fn corners_are_in_bounds() {
    let c = SegmentClipper::new(Topology::new(Screen::BADGE, SurfaceVariant::Torus));
    assert!(!c.goes_out(&seg(0.0, 0.0, W, H)));
    assert!(c.goes_out(&seg(0.0, 0.0, W + 1e-9, H)));
    assert!(c.goes_out(&seg(-1e-9, 0.0, 10.0, 10.0)));
}

#[test]
fn torus_right_edge_scenario() {
    let poly = splitter(SurfaceVariant::Torus)
        .resolve(seg(290.0, 60.0, 300.0, 60.0))
        .unwrap();
    assert_eq!(poly.len(), 2);
    let expected = [seg(290.0, 60.0, 295.0, 60.0), seg(0.0, 60.0, 5.0, 60.0)];
    for e in &expected {
        assert!(
            poly.iter().any(|s| s.approx_eq_undirected(e, BOUNDARY_TOL)),
            "missing {} in {:?}",
            e,
            poly
        );
    }
    assert_on_screen(&poly);
}

#[test]
fn klein_bottom_edge_scenario_mirrors_x() {
    let poly = splitter(SurfaceVariant::KleinBottle)
        .resolve(seg(100.0, 120.0, 100.0, 140.0))
        .unwrap();
    assert_eq!(poly.len(), 2);
    assert!(poly
        .iter()
        .any(|s| s.approx_eq_undirected(&seg(100.0, 120.0, 100.0, 126.0), 1e-9)));
    // the re-entering piece runs from the top edge at the mirrored x
    assert!(poly
        .iter()
        .any(|s| s.approx_eq_undirected(&seg(195.0, 0.0, 195.0, 14.0), BOUNDARY_TOL)));
    assert_on_screen(&poly);
}

#[test]
fn fully_offscreen_segment_crosses_whole() {
    let poly = splitter(SurfaceVariant::Torus)
        .resolve(seg(-50.0, 60.0, -30.0, 60.0))
        .unwrap();
    assert_eq!(poly.segments(), &[seg(245.0, 60.0, 265.0, 60.0)]);

    let c = SegmentClipper::new(Topology::new(Screen::BADGE, SurfaceVariant::Torus));
    assert!(matches!(
        c.split(&seg(-50.0, 60.0, -30.0, 60.0)),
        Ok(Split::Whole(_))
    ));
}

#[test]
fn split_prefers_start_then_left_edge() {
    let c = SegmentClipper::new(Topology::new(Screen::BADGE, SurfaceVariant::Torus));
    // start is beyond left and top; left wins
    let split = c.split(&seg(-10.0, -10.0, 10.0, 10.0)).unwrap();
    match split {
        Split::Cut { wrapped, rest } => {
            assert_eq!(rest, seg(0.0, 0.0, 10.0, 10.0));
            assert!((wrapped.start - Point::new(285.0, -10.0)).norm() < 1e-12);
            assert!((wrapped.end - Point::new(W - 0.1, 0.0)).norm() < 1e-12);
        }
        other => panic!("expected a cut, got {:?}", other),
    }
    // only end is out: the pair is swapped so `end` is examined as `a`
    let split = c.split(&seg(10.0, 10.0, 10.0, -10.0)).unwrap();
    match split {
        Split::Cut { rest, .. } => assert_eq!(rest, seg(10.0, 0.0, 10.0, 10.0)),
        other => panic!("expected a cut, got {:?}", other),
    }
}

#[test]
fn corner_crossing_takes_several_splits() {
    let s = splitter(SurfaceVariant::Torus);
    let poly = s.resolve(seg(290.0, 120.0, 300.0, 130.0)).unwrap();
    assert!(poly.len() >= 3, "got {:?}", poly);
    assert_on_screen(&poly);
    // the first piece is the untouched on-screen part
    assert!(poly
        .iter()
        .any(|p| p.approx_eq_undirected(&seg(290.0, 120.0, 295.0, 125.0), 1e-9)));

    let k = splitter(SurfaceVariant::KleinBottle);
    let poly = k.resolve(seg(-2.0, 130.0, 5.0, 120.0)).unwrap();
    assert_on_screen(&poly);
}

#[test]
fn split_without_exit_is_degenerate() {
    let c = SegmentClipper::new(Topology::new(Screen::BADGE, SurfaceVariant::KleinBottle));
    let s = seg(10.0, 10.0, 20.0, 20.0);
    assert_eq!(c.split(&s), Err(ClipError::DegenerateSplit { segment: s }));
}

#[test]
fn split_cap_is_reported() {
    let cfg = ClipCfg {
        max_splits: 1,
        ..ClipCfg::default()
    };
    let s = PolylineSplitter::with_cfg(Topology::new(Screen::BADGE, SurfaceVariant::Torus), cfg);
    let corner = seg(290.0, 120.0, 300.0, 130.0);
    let err = s.resolve(corner).unwrap_err();
    assert_eq!(
        err,
        ClipError::SplitIterationExceeded {
            segment: corner,
            limit: 1
        }
    );
    assert!(err.to_string().contains("after 1 splits"));

    // zero budget is fine for segments that never leave
    let s0 = PolylineSplitter::with_cfg(
        Topology::new(Screen::BADGE, SurfaceVariant::Torus),
        ClipCfg {
            max_splits: 0,
            ..ClipCfg::default()
        },
    );
    assert_eq!(s0.resolve(seg(1.0, 1.0, 2.0, 2.0)).unwrap().len(), 1);
}

#[test]
fn split_replaces_in_place_preserving_order() {
    // right crossing: the wrapped piece comes first, then the on-screen remainder
    let poly = splitter(SurfaceVariant::Torus)
        .resolve(seg(290.0, 60.0, 300.0, 60.0))
        .unwrap();
    assert!((poly[0].start - Point::new(5.0, 60.0)).norm() < 1e-9);
    assert_eq!(poly[1], seg(295.0, 60.0, 290.0, 60.0));
}

#[test]
fn seeded_random_segments_resolve_on_screen() {
    let mut rng = StdRng::seed_from_u64(42);
    let cfg = SegmentCfg {
        max_len: 120.0,
        ..SegmentCfg::default()
    };
    for variant in SurfaceVariant::ALL {
        let s = splitter(variant);
        for _ in 0..500 {
            let segment = random_segment(&mut rng, &Screen::BADGE, &cfg);
            let poly = s.resolve(segment).unwrap();
            assert!(!poly.is_empty());
            assert_on_screen(&poly);
        }
    }
}

proptest! {
    #[test]
    fn resolve_is_identity_on_screen(
        x1 in 0.0..=W, y1 in 0.0..=H, x2 in 0.0..=W, y2 in 0.0..=H,
    ) {
        for variant in SurfaceVariant::ALL {
            let s = seg(x1, y1, x2, y2);
            let poly = splitter(variant).resolve(s).unwrap();
            prop_assert_eq!(poly.segments(), &[s][..]);
        }
    }

    #[test]
    fn resolved_pieces_stay_on_screen(
        cx in 0.0..=W,
        cy in 0.0..=H,
        theta in 0.0..std::f64::consts::TAU,
        len in 0.0..60.0f64,
        klein in any::<bool>(),
    ) {
        let variant = if klein { SurfaceVariant::KleinBottle } else { SurfaceVariant::Torus };
        let end = Point::new(cx + len * theta.cos(), cy + len * theta.sin());
        let poly = splitter(variant).resolve(Segment::new(Point::new(cx, cy), end)).unwrap();
        let screen = Screen::BADGE;
        for s in &poly {
            prop_assert!(screen.contains_eps(s.start, BOUNDARY_TOL));
            prop_assert!(screen.contains_eps(s.end, BOUNDARY_TOL));
        }
    }
}
