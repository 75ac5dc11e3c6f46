use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use flatship::canvas::{Canvas, Font, Framebuffer, Recorder};
use flatship::geom::{cfg::BOUNDARY_TOL, ClipCfg, Screen, Segment};
use flatship::prelude::{
    Button, ButtonEvent, GameCfg, PolylineSplitter, Session, Status, SurfaceVariant, Topology,
};
use flatship::sample::{random_segment, SegmentCfg};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Fly a ship on a flat torus or a flat Klein bottle, headless")]
struct Cmd {
    /// Screen width in pixels
    #[arg(long, default_value_t = 295.0)]
    width: f64,
    /// Screen height in pixels
    #[arg(long, default_value_t = 126.0)]
    height: f64,
    /// Split budget per segment
    #[arg(long, default_value_t = flatship::geom::cfg::MAX_SPLITS)]
    max_splits: usize,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SurfaceArg {
    Torus,
    Klein,
}

impl From<SurfaceArg> for SurfaceVariant {
    fn from(s: SurfaceArg) -> Self {
        match s {
            SurfaceArg::Torus => SurfaceVariant::Torus,
            SurfaceArg::Klein => SurfaceVariant::KleinBottle,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// List the surfaces in menu order
    Surfaces,
    /// Resolve one segment and print its on-screen pieces as JSON
    Resolve {
        #[arg(long, value_enum, default_value_t = SurfaceArg::Torus)]
        surface: SurfaceArg,
        #[arg(long, allow_negative_numbers = true)]
        x1: f64,
        #[arg(long, allow_negative_numbers = true)]
        y1: f64,
        #[arg(long, allow_negative_numbers = true)]
        x2: f64,
        #[arg(long, allow_negative_numbers = true)]
        y2: f64,
    },
    /// Run a session with scripted button presses; write the last frame as PBM
    Fly {
        #[arg(long, value_enum, default_value_t = SurfaceArg::Torus)]
        surface: SurfaceArg,
        #[arg(long, default_value_t = 50)]
        ticks: usize,
        /// Comma-separated presses, one slot per tick; `-` or empty for none
        #[arg(long, default_value = "")]
        inputs: String,
        #[arg(long)]
        out: String,
        /// Sleep one frame period between ticks
        #[arg(long)]
        realtime: bool,
    },
    /// Resolve random segments and check every piece stays on screen
    Stress {
        #[arg(long, value_enum, default_value_t = SurfaceArg::Klein)]
        surface: SurfaceArg,
        #[arg(long, default_value_t = 10_000)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 60.0)]
        max_len: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    if !(cmd.width > 0.0 && cmd.height > 0.0) {
        bail!("screen must have positive size, got {}x{}", cmd.width, cmd.height);
    }
    let screen = Screen::new(cmd.width, cmd.height);
    let clip = ClipCfg {
        max_splits: cmd.max_splits,
        ..ClipCfg::default()
    };
    match cmd.action {
        Action::Surfaces => surfaces(),
        Action::Resolve {
            surface,
            x1,
            y1,
            x2,
            y2,
        } => resolve(
            screen,
            clip,
            surface.into(),
            Segment::from_coords(x1, y1, x2, y2),
        ),
        Action::Fly {
            surface,
            ticks,
            inputs,
            out,
            realtime,
        } => {
            let script = parse_script(&inputs)?;
            let opts = FlyOpts {
                screen,
                clip,
                surface: surface.into(),
                ticks,
                realtime,
            };
            fly(&opts, &script, Path::new(&out)).map(|_| ())
        }
        Action::Stress {
            surface,
            count,
            seed,
            max_len,
        } => stress(screen, clip, surface.into(), count, seed, max_len),
        Action::Report => report(),
    }
}

fn surfaces() -> Result<()> {
    for v in SurfaceVariant::ALL {
        println!("{}", v.name());
    }
    Ok(())
}

#[derive(Serialize)]
struct Piece {
    start: [f64; 2],
    end: [f64; 2],
    pixels: [i32; 4],
}

impl From<&Segment> for Piece {
    fn from(s: &Segment) -> Self {
        Self {
            start: [s.start.x, s.start.y],
            end: [s.end.x, s.end.y],
            pixels: s.floored(),
        }
    }
}

fn resolve(screen: Screen, clip: ClipCfg, variant: SurfaceVariant, segment: Segment) -> Result<()> {
    tracing::info!(surface = variant.name(), %segment, "resolve");
    let splitter = PolylineSplitter::with_cfg(Topology::new(screen, variant), clip);
    let poly = splitter
        .resolve(segment)
        .with_context(|| format!("resolving {segment}"))?;
    let pieces: Vec<Piece> = poly.iter().map(Piece::from).collect();
    let obj = serde_json::json!({
        "surface": variant.name(),
        "screen": [screen.width, screen.height],
        "input": Piece::from(&segment),
        "pieces": pieces,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Parse `"up,a,-,left"` into one optional press per tick.
fn parse_script(inputs: &str) -> Result<Vec<Option<Button>>> {
    if inputs.trim().is_empty() {
        return Ok(Vec::new());
    }
    inputs
        .split(',')
        .enumerate()
        .map(|(i, tok)| match tok.trim() {
            "" | "-" => Ok(None),
            name => name
                .parse::<Button>()
                .map(Some)
                .with_context(|| format!("input slot {i}")),
        })
        .collect()
}

/// Menu presses that select `target` starting from the default entry, then confirm.
fn menu_presses(target: SurfaceVariant) -> Vec<Button> {
    let mut presses = vec![Button::Up; target.index()];
    presses.push(Button::A);
    presses
}

struct FlyOpts {
    screen: Screen,
    clip: ClipCfg,
    surface: SurfaceVariant,
    ticks: usize,
    realtime: bool,
}

#[derive(Serialize)]
struct TraceRow {
    tick: usize,
    press: Option<String>,
    x: f64,
    y: f64,
    heading: f64,
    lines: Vec<[i32; 4]>,
    error: Option<String>,
}

#[derive(Debug)]
struct FlySummary {
    frames: usize,
    aborted: usize,
    exited: bool,
    trace_path: PathBuf,
}

/// Forwards every call to both canvases.
struct Tee<'a, A: Canvas, B: Canvas>(&'a mut A, &'a mut B);

impl<A: Canvas, B: Canvas> Canvas for Tee<'_, A, B> {
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.0.draw_line(x1, y1, x2, y2);
        self.1.draw_line(x1, y1, x2, y2);
    }
    fn clear(&mut self) {
        self.0.clear();
        self.1.clear();
    }
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: Font) {
        self.0.draw_text(x, y, text, font);
        self.1.draw_text(x, y, text, font);
    }
    fn flush(&mut self) {
        self.0.flush();
        self.1.flush();
    }
}

fn fly(opts: &FlyOpts, script: &[Option<Button>], out: &Path) -> Result<FlySummary> {
    tracing::info!(
        surface = opts.surface.name(),
        ticks = opts.ticks,
        presses = script.iter().flatten().count(),
        out = %out.display(),
        "fly"
    );
    let cfg = GameCfg::default();
    let mut session = Session::new(opts.screen, cfg).with_clip_cfg(opts.clip);
    let mut fb = Framebuffer::for_screen(&opts.screen);

    session
        .frame(&mut fb)
        .context("drawing the surface menu")?;
    for b in menu_presses(opts.surface) {
        session.handle(ButtonEvent::press(b));
        session.handle(ButtonEvent::release(b));
    }

    let mut trace = Vec::with_capacity(opts.ticks);
    let mut aborted = 0usize;
    for tick in 0..opts.ticks {
        let press = script.get(tick).copied().flatten();
        if let Some(b) = press {
            let command = session.handle(ButtonEvent::press(b));
            session.handle(ButtonEvent::release(b));
            tracing::debug!(tick, button = %b, ?command, "press");
        }
        if session.status() == Status::Exited {
            tracing::info!(tick, "exit requested");
            break;
        }

        let mut rec = Recorder::new();
        let error = match session.frame(&mut Tee(&mut fb, &mut rec)) {
            Ok(()) => None,
            Err(e) => {
                aborted += 1;
                tracing::warn!(tick, error = %e, "frame aborted");
                Some(e.to_string())
            }
        };
        let ship = session.ship();
        tracing::debug!(tick, x = ship.pos.x, y = ship.pos.y, heading = ship.heading, "tick");
        trace.push(TraceRow {
            tick,
            press: press.map(|b| b.name().to_string()),
            x: ship.pos.x,
            y: ship.pos.y,
            heading: ship.heading,
            lines: rec.lines().collect(),
            error,
        });

        if opts.realtime {
            std::thread::sleep(Duration::from_secs_f64(cfg.frame_secs));
        }
    }

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, fb.to_pbm()).with_context(|| format!("writing {}", out.display()))?;
    let trace_path = provenance::sibling_path(out, ".trace.json");
    std::fs::write(&trace_path, serde_json::to_vec_pretty(&trace)?)
        .with_context(|| format!("writing {}", trace_path.display()))?;

    let summary = FlySummary {
        frames: trace.len(),
        aborted,
        exited: session.status() == Status::Exited,
        trace_path,
    };
    let payload = provenance::Payload::new(
        "fly",
        serde_json::json!({
            "surface": opts.surface.name(),
            "screen": [opts.screen.width, opts.screen.height],
            "max_splits": opts.clip.max_splits,
            "ticks": opts.ticks,
            "script": script.iter().map(|p| p.map(|b| b.name())).collect::<Vec<_>>(),
            "frames": summary.frames,
            "aborted": summary.aborted,
            "exited": summary.exited,
        }),
    );
    provenance::write_sidecar(out, payload)?;
    tracing::info!(
        frames = summary.frames,
        aborted = summary.aborted,
        exited = summary.exited,
        trace = %summary.trace_path.display(),
        "fly done"
    );
    Ok(summary)
}

#[derive(Debug, Default, PartialEq)]
struct StressStats {
    segments: usize,
    pieces: usize,
    max_pieces: usize,
    errors: usize,
    off_screen: usize,
}

fn stress_run(
    screen: Screen,
    clip: ClipCfg,
    variant: SurfaceVariant,
    count: usize,
    seed: u64,
    max_len: f64,
) -> StressStats {
    let splitter = PolylineSplitter::with_cfg(Topology::new(screen, variant), clip);
    let mut rng = StdRng::seed_from_u64(seed);
    let cfg = SegmentCfg { max_len };
    let mut stats = StressStats::default();
    for _ in 0..count {
        let segment = random_segment(&mut rng, &screen, &cfg);
        stats.segments += 1;
        match splitter.resolve(segment) {
            Ok(poly) => {
                stats.pieces += poly.len();
                stats.max_pieces = stats.max_pieces.max(poly.len());
                let bad = poly.iter().any(|s| {
                    !screen.contains_eps(s.start, BOUNDARY_TOL)
                        || !screen.contains_eps(s.end, BOUNDARY_TOL)
                });
                if bad {
                    stats.off_screen += 1;
                    tracing::warn!(%segment, "piece left the screen");
                }
            }
            Err(e) => {
                stats.errors += 1;
                tracing::warn!(error = %e, "resolve failed");
            }
        }
    }
    stats
}

fn stress(
    screen: Screen,
    clip: ClipCfg,
    variant: SurfaceVariant,
    count: usize,
    seed: u64,
    max_len: f64,
) -> Result<()> {
    tracing::info!(surface = variant.name(), count, seed, max_len, "stress");
    let stats = stress_run(screen, clip, variant, count, seed, max_len);
    tracing::info!(
        segments = stats.segments,
        pieces = stats.pieces,
        max_pieces = stats.max_pieces,
        errors = stats.errors,
        off_screen = stats.off_screen,
        "stress done"
    );
    let obj = serde_json::json!({
        "surface": variant.name(),
        "seed": seed,
        "segments": stats.segments,
        "pieces": stats.pieces,
        "max_pieces": stats.max_pieces,
        "errors": stats.errors,
        "off_screen": stats.off_screen,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    if stats.errors > 0 || stats.off_screen > 0 {
        bail!(
            "{} resolve errors, {} segments with off-screen pieces",
            stats.errors,
            stats.off_screen
        );
    }
    Ok(())
}

fn report() -> Result<()> {
    let surfaces: Vec<&str> = SurfaceVariant::ALL.iter().map(|v| v.name()).collect();
    let obj = provenance::block(
        "report",
        serde_json::json!({ "surfaces": surfaces }),
        Vec::new(),
    );
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
