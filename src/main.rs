//! Skyflap entry point
//!
//! Plays the game in a terminal as a self-running demo: fixed-timestep loop,
//! autopilot on the primary action, ANSI rendering, logged sound cues.
//! Pass a seed as the first argument for a reproducible run.

use std::cmp::Ordering;
use std::io::{self, Write};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;

use skyflap::consts::{MAX_SUBSTEPS, TICK_DT};
use skyflap::render::{self, Canvas, Color};
use skyflap::sim::{GamePhase, GameState, primary_action, tick};
use skyflap::{AudioRouter, Settings, SoundEffect, SoundSink, WorldConfig};

/// Demo runs this many games before exiting
const DEMO_GAMES: u32 = 3;

const COLS: usize = 64;
const ROWS: usize = 32;

/// Character-cell canvas; world coordinates scale down onto a char grid
struct TermCanvas {
    cells: [[char; COLS]; ROWS],
    scale: Vec2,
}

impl TermCanvas {
    fn new(world_width: f32, world_height: f32) -> Self {
        Self {
            cells: [[' '; COLS]; ROWS],
            scale: Vec2::new(COLS as f32 / world_width, ROWS as f32 / world_height),
        }
    }

    fn plot(&mut self, col: isize, row: isize, ch: char) {
        if (0..COLS as isize).contains(&col) && (0..ROWS as isize).contains(&row) {
            self.cells[row as usize][col as usize] = ch;
        }
    }

    fn to_cell(&self, pos: Vec2) -> (isize, isize) {
        (
            (pos.x * self.scale.x) as isize,
            (pos.y * self.scale.y) as isize,
        )
    }

    fn present(&self, out: &mut impl Write, status: &str) -> io::Result<()> {
        write!(out, "\x1b[H")?;
        for row in &self.cells {
            let line: String = row.iter().collect();
            writeln!(out, "{line}")?;
        }
        writeln!(out, "{status}\x1b[K")?;
        out.flush()
    }
}

impl Canvas for TermCanvas {
    fn clear(&mut self, _color: Color) {
        self.cells = [[' '; COLS]; ROWS];
    }

    fn rect(&mut self, min: Vec2, size: Vec2, _color: Color) {
        let (c0, r0) = self.to_cell(min);
        let (c1, r1) = self.to_cell(min + size);
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.plot(col, row, '#');
            }
        }
    }

    fn circle(&mut self, center: Vec2, radius: f32, _color: Color) {
        let (c0, r0) = self.to_cell(center - Vec2::splat(radius));
        let (c1, r1) = self.to_cell(center + Vec2::splat(radius));
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.plot(col, row, '@');
            }
        }
    }

    fn text(&mut self, center_x: f32, top_y: f32, _size: f32, _color: Color, text: &str) {
        let (center_col, row) = self.to_cell(Vec2::new(center_x, top_y));
        let start = center_col - text.chars().count() as isize / 2;
        for (i, ch) in text.chars().enumerate() {
            self.plot(start + i as isize, row, ch);
        }
    }
}

/// Logs cues instead of playing them; headless terminals have no speakers
struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {effect:?} at {volume:.2}");
    }
}

/// Demo autopilot: press when the bird is about to sink below the center of
/// the nearest gap ahead
fn autopilot_wants_flap(state: &GameState) -> bool {
    let bird = &state.bird;
    let target = state
        .stream
        .pipes
        .iter()
        .filter(|pipe| pipe.x + pipe.width > bird.pos.x - bird.radius)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
        .map(|pipe| (pipe.gap_top + pipe.gap_bottom) / 2.0)
        .unwrap_or(state.config.world_height / 2.0);

    // Lead the fall a few ticks so the kick lands before the gap floor
    bird.pos.y + bird.vel.y * 4.0 > target
}

fn run(seed: u64) -> io::Result<()> {
    let config = WorldConfig::default();
    let mut state = match GameState::new(config, seed) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("invalid world config: {err}");
            std::process::exit(2);
        }
    };
    log::info!(
        "world: {}",
        serde_json::to_string(&config).unwrap_or_else(|_| "<unprintable>".into())
    );

    let settings = Settings {
        show_fps: true,
        ..Default::default()
    };
    let router = AudioRouter::new(settings);
    let mut sink = LogSink;

    let mut canvas = TermCanvas::new(config.world_width, config.world_height);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "\x1b[2J")?;

    let mut games = 0u32;
    let mut press_queued = true; // first press leaves the title screen
    let mut last_phase = state.phase;
    let mut last = Instant::now();
    let mut accumulator = 0.0f32;

    // FPS over a one-second window
    let mut fps = 0u32;
    let mut frames = 0u32;
    let mut fps_window = Instant::now();

    while games < DEMO_GAMES {
        let now = Instant::now();
        accumulator += (now - last).as_secs_f32().min(0.1);
        last = now;

        let mut substeps = 0;
        while accumulator >= TICK_DT && substeps < MAX_SUBSTEPS {
            // One-shot input: applied once, then cleared
            if press_queued {
                primary_action(&mut state);
                press_queued = false;
            }
            tick(&mut state);
            accumulator -= TICK_DT;
            substeps += 1;
        }

        if state.phase == GamePhase::Playing && autopilot_wants_flap(&state) {
            press_queued = true;
        }
        if state.phase == GamePhase::GameOver && last_phase == GamePhase::Playing {
            games += 1;
            log::info!("game {games}/{DEMO_GAMES} over, score {}", state.score);
            press_queued = games < DEMO_GAMES;
        }
        last_phase = state.phase;

        let events = state.take_events();
        router.route(&events, &mut sink);

        frames += 1;
        if fps_window.elapsed() >= Duration::from_secs(1) {
            fps = frames;
            frames = 0;
            fps_window = Instant::now();
        }

        render::render_frame(&state, &mut canvas);
        let status = if router.settings().show_fps {
            format!(
                "seed {seed} | game {}/{DEMO_GAMES} | score {} | {fps} fps",
                (games + 1).min(DEMO_GAMES),
                state.score
            )
        } else {
            format!("seed {seed} | score {}", state.score)
        };
        canvas.present(&mut out, &status)?;

        std::thread::sleep(Duration::from_millis(16));
    }

    writeln!(out, "done: {DEMO_GAMES} games played")?;
    Ok(())
}

fn main() {
    env_logger::init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => match arg.parse() {
            Ok(seed) => seed,
            Err(_) => {
                eprintln!("usage: skyflap [seed]");
                std::process::exit(2);
            }
        },
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    };

    if let Err(err) = run(seed) {
        eprintln!("terminal error: {err}");
        std::process::exit(1);
    }
}
