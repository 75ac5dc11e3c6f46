//! Print a few flight frames as ASCII art.
//!
//! The ship starts on the bottom-left corner of a Klein bottle, so the hull
//! is visibly cut and re-enters mirrored at the top.
//!
//!   cargo run -p flatship --example ascii_frame

use flatship::game::advance;
use flatship::prelude::*;

fn main() {
    let screen = Screen::BADGE;
    let topo = Topology::new(screen, SurfaceVariant::KleinBottle);
    let renderer = ShipRenderer::new(PolylineSplitter::new(topo), Hull::dart(3.0));
    let cfg = GameCfg {
        speed: 4.0,
        ..GameCfg::default()
    };
    let mut fb = Framebuffer::for_screen(&screen);
    let mut ship = Ship::new(2.0, 122.0, 2.4);
    for frame in 0..3 {
        fb.clear();
        if let Err(e) = renderer.draw(&mut fb, &ship) {
            eprintln!("frame {frame}: {e}");
            continue;
        }
        println!(
            "frame {frame}: ship at ({:.1}, {:.1}) heading {:.3}",
            ship.pos.x, ship.pos.y, ship.heading
        );
        print!("{}", fb.to_ascii());
        ship = advance(ship, &cfg, &topo);
    }
}
