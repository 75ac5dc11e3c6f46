//! Flight state, per-tick updates and the session that drives them.
//!
//! Purpose
//! - `advance` and `steer` are pure: they take a `Ship` snapshot and return
//!   the next one.
//! - `Session` owns the single mutable snapshot plus the input mode, applies
//!   commands between ticks and renders one frame per tick.

use std::f64::consts::PI;

use crate::canvas::Canvas;
use crate::clip::{ClipError, PolylineSplitter};
use crate::geom::{ClipCfg, Screen};
use crate::input::{ButtonEvent, Command, InputMode};
use crate::render::{draw_flight, draw_menu};
use crate::ship::{Hull, ShipRenderer};
use crate::topology::{SurfaceVariant, Topology};

pub use crate::ship::Ship;

/// Game constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameCfg {
    /// Distance travelled per tick, in pixels.
    pub speed: f64,
    /// Heading change per steering press, in radians.
    pub turn_step: f64,
    /// Wall-clock seconds between ticks (used by drivers that pace frames).
    pub frame_secs: f64,
    pub hull_size: f64,
    pub start: Ship,
}

impl Default for GameCfg {
    fn default() -> Self {
        Self {
            speed: 10.0,
            turn_step: PI / 8.0,
            frame_secs: 0.1,
            hull_size: 1.0,
            start: Ship::new(30.0, 30.0, 0.0),
        }
    }
}

/// Move one tick along the heading, then wrap onto the surface.
pub fn advance(ship: Ship, cfg: &GameCfg, topology: &Topology) -> Ship {
    let x = ship.pos.x + cfg.speed * ship.heading.cos();
    let y = ship.pos.y + cfg.speed * ship.heading.sin();
    let (x, y, heading) = topology.wrap(x, y, ship.heading);
    Ship::new(x, y, heading)
}

/// Apply a steering command. Other commands leave the ship as is.
pub fn steer(ship: Ship, command: Command, cfg: &GameCfg) -> Ship {
    let delta = match command {
        Command::TurnLeft => -cfg.turn_step,
        Command::TurnRight => cfg.turn_step,
        _ => return ship,
    };
    Ship {
        heading: ship.heading + delta,
        ..ship
    }
}

/// Whether the session still wants frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Exited,
}

#[derive(Clone, Copy, Debug)]
struct Flight {
    topology: Topology,
    renderer: ShipRenderer,
}

/// Menu, then flight, on one screen.
#[derive(Clone, Debug)]
pub struct Session {
    screen: Screen,
    cfg: GameCfg,
    clip: ClipCfg,
    mode: InputMode,
    selected: SurfaceVariant,
    ship: Ship,
    flight: Option<Flight>,
    status: Status,
    ticks: u64,
}

impl Session {
    pub fn new(screen: Screen, cfg: GameCfg) -> Self {
        Self {
            screen,
            cfg,
            clip: ClipCfg::default(),
            mode: InputMode::ChooseSurface,
            selected: SurfaceVariant::default(),
            ship: cfg.start,
            flight: None,
            status: Status::Running,
            ticks: 0,
        }
    }

    pub fn with_clip_cfg(mut self, clip: ClipCfg) -> Self {
        self.clip = clip;
        self
    }

    #[inline]
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    #[inline]
    pub fn selected(&self) -> SurfaceVariant {
        self.selected
    }

    #[inline]
    pub fn ship(&self) -> Ship {
        self.ship
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Flight ticks run so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Topology fixed when the flight began; `None` while still in the menu.
    pub fn topology(&self) -> Option<Topology> {
        self.flight.map(|f| f.topology)
    }

    /// Dispatch one button event and apply the resulting command.
    pub fn handle(&mut self, event: ButtonEvent) -> Command {
        if self.status == Status::Exited {
            return Command::None;
        }
        let command = self.mode.dispatch(event);
        match command {
            Command::NextSurface => self.selected = self.selected.next(),
            Command::PrevSurface => self.selected = self.selected.prev(),
            Command::Begin => self.begin(),
            Command::TurnLeft | Command::TurnRight => {
                self.ship = steer(self.ship, command, &self.cfg)
            }
            Command::Exit => self.status = Status::Exited,
            Command::None => {}
        }
        command
    }

    fn begin(&mut self) {
        let topology = Topology::new(self.screen, self.selected);
        let splitter = PolylineSplitter::with_cfg(topology, self.clip);
        self.flight = Some(Flight {
            topology,
            renderer: ShipRenderer::new(splitter, Hull::dart(self.cfg.hull_size)),
        });
        self.mode = InputMode::Flying;
    }

    /// Render one frame; in flight, advance the ship first.
    ///
    /// On a clipping error the ship has still moved; only the drawing of this
    /// frame is lost.
    pub fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Result<(), ClipError> {
        if self.status == Status::Exited {
            return Ok(());
        }
        match (self.mode, self.flight) {
            (InputMode::Flying, Some(flight)) => {
                self.ship = advance(self.ship, &self.cfg, &flight.topology);
                self.ticks += 1;
                draw_flight(
                    canvas,
                    &flight.renderer,
                    &self.ship,
                    flight.topology.variant(),
                    &self.screen,
                )
            }
            _ => {
                draw_menu(canvas, self.selected);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Op, Recorder};
    use crate::input::Button;
    use std::f64::consts::FRAC_PI_2;

    fn press(s: &mut Session, b: Button) -> Command {
        s.handle(ButtonEvent::press(b))
    }

    #[test]
    fn advance_moves_along_heading_and_wraps() {
        let cfg = GameCfg::default();
        let torus = Topology::new(Screen::BADGE, SurfaceVariant::Torus);
        let s = advance(Ship::new(290.0, 60.0, 0.0), &cfg, &torus);
        assert!((s.pos.x - 5.0).abs() < 1e-9);
        assert!((s.pos.y - 60.0).abs() < 1e-9);

        let klein = Topology::new(Screen::BADGE, SurfaceVariant::KleinBottle);
        let s = advance(Ship::new(100.0, 120.0, FRAC_PI_2), &cfg, &klein);
        assert!((s.pos.x - 195.0).abs() < 1e-9);
        assert!((s.pos.y - 4.0).abs() < 1e-9);
        assert!((s.heading - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn steer_adjusts_heading_only() {
        let cfg = GameCfg::default();
        let ship = Ship::new(1.0, 2.0, 1.0);
        let l = steer(ship, Command::TurnLeft, &cfg);
        let r = steer(ship, Command::TurnRight, &cfg);
        assert!((l.heading - (1.0 - PI / 8.0)).abs() < 1e-12);
        assert!((r.heading - (1.0 + PI / 8.0)).abs() < 1e-12);
        assert_eq!(l.pos, ship.pos);
        assert_eq!(steer(ship, Command::Begin, &cfg), ship);
    }

    #[test]
    fn menu_selects_surface_then_flies() {
        let mut s = Session::new(Screen::BADGE, GameCfg::default());
        let mut rec = Recorder::new();
        s.frame(&mut rec).unwrap();
        assert!(rec.texts().any(|t| t == "4D flat torus"));
        assert!(s.topology().is_none());

        assert_eq!(press(&mut s, Button::Up), Command::NextSurface);
        assert_eq!(s.selected(), SurfaceVariant::KleinBottle);
        // steering is ignored in the menu
        assert_eq!(press(&mut s, Button::Left), Command::None);
        assert_eq!(press(&mut s, Button::A), Command::Begin);
        assert_eq!(s.mode(), InputMode::Flying);
        assert_eq!(s.topology().map(|t| t.variant()), Some(SurfaceVariant::KleinBottle));

        // surface is fixed once flying
        assert_eq!(press(&mut s, Button::Up), Command::None);
        assert_eq!(s.selected(), SurfaceVariant::KleinBottle);

        let mut rec = Recorder::new();
        s.frame(&mut rec).unwrap();
        assert_eq!(s.ticks(), 1);
        assert!((s.ship().pos.x - 40.0).abs() < 1e-9);
        assert!(rec.texts().any(|t| t == "You are playing on a flat Klein bottle"));
        assert_eq!(rec.lines().count(), 4);
    }

    #[test]
    fn exit_stops_frames() {
        let mut s = Session::new(Screen::BADGE, GameCfg::default());
        press(&mut s, Button::Start);
        assert_eq!(press(&mut s, Button::B), Command::Exit);
        assert_eq!(s.status(), Status::Exited);
        let mut rec = Recorder::new();
        s.frame(&mut rec).unwrap();
        assert!(rec.ops.is_empty());
        assert_eq!(press(&mut s, Button::Right), Command::None);
    }

    #[test]
    fn long_flight_stays_on_screen() {
        let mut s = Session::new(Screen::BADGE, GameCfg::default());
        press(&mut s, Button::Down);
        press(&mut s, Button::Start);
        assert_eq!(s.topology().map(|t| t.variant()), Some(SurfaceVariant::KleinBottle));
        let screen = Screen::BADGE;
        let mut rec = Recorder::new();
        for tick in 0..400 {
            if tick % 7 == 0 {
                press(&mut s, Button::Right);
            }
            if tick % 11 == 0 {
                press(&mut s, Button::Left);
            }
            rec.ops.clear();
            s.frame(&mut rec).unwrap();
            let ship = s.ship();
            assert!(screen.contains(ship.pos));
            assert!((0.0..std::f64::consts::TAU).contains(&ship.heading));
            assert!(matches!(rec.ops.last(), Some(Op::Flush)));
        }
    }
}
