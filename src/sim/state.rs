//! Game state and core simulation types
//!
//! Everything a session owns lives here. There are no ambient globals: score,
//! phase and entities all hang off one `GameState` so sessions can be created,
//! reset and tested independently.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, WorldConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first input
    Start,
    /// Active gameplay
    Playing,
    /// Run ended; the next input restarts
    GameOver,
}

/// Discrete events the simulation emits for the audio/UI glue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Bird received an upward impulse
    Flap,
    /// Bird struck a pipe
    Collision,
    /// Bird hit the ground
    GroundContact,
    /// Bird cleared a pipe's trailing edge
    PipePassed,
}

/// The player's bird
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Per-tick force accumulator, zeroed after integration
    pub acc: Vec2,
    pub radius: f32,
}

impl Bird {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            radius,
        }
    }

    /// Queue this tick's downward pull
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.acc.y += gravity;
    }

    /// Instant upward kick. Overwrites vertical velocity, so rapid repeated
    /// flaps never stack.
    pub fn flap(&mut self, impulse: f32) {
        self.vel.y = impulse;
    }

    /// Integrate one step: velocity from forces, position from velocity.
    /// Call exactly once per tick, after forces are queued.
    pub fn integrate(&mut self) {
        self.vel += self.acc;
        self.pos += self.vel;
        self.acc = Vec2::ZERO;
    }

    /// Clamp to the vertical world band. The ceiling just stops the bird;
    /// the ground ends the run, reported via the return value.
    pub fn clamp_vertical(&mut self, world_height: f32) -> bool {
        if self.pos.y < self.radius {
            self.pos.y = self.radius;
            self.vel.y = 0.0;
        }
        if self.pos.y > world_height - self.radius {
            self.pos.y = world_height - self.radius;
            self.vel.y = 0.0;
            return true;
        }
        false
    }
}

/// A scrolling pipe pair with a passable gap
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge in world coordinates
    pub x: f32,
    pub width: f32,
    /// Bottom edge of the upper pipe
    pub gap_top: f32,
    /// Top edge of the lower pipe
    pub gap_bottom: f32,
    /// Leftward movement per tick
    pub speed: f32,
    /// One-shot scoring flag; flips in `try_pass` only
    passed: bool,
}

impl Pipe {
    /// Spawn at `x` with a gap drawn uniformly inside the vertical margins
    pub fn new(x: f32, config: &WorldConfig, rng: &mut impl Rng) -> Self {
        let gap_top = sample_gap_top(config, rng);
        Self::with_gap(
            x,
            config.pipe_width,
            gap_top,
            gap_top + config.gap_height,
            config.scroll_speed,
        )
    }

    /// Fixed-gap constructor for frontends and tests; gameplay spawns go
    /// through `new`.
    pub fn with_gap(x: f32, width: f32, gap_top: f32, gap_bottom: f32, speed: f32) -> Self {
        Self {
            x,
            width,
            gap_top,
            gap_bottom,
            speed,
            passed: false,
        }
    }

    /// Scroll one tick leftward
    pub fn advance(&mut self) {
        self.x -= self.speed;
    }

    /// Fully past the left world edge
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width < 0.0
    }

    /// Circle-vs-gap collision test
    pub fn hits(&self, bird_pos: Vec2, bird_radius: f32) -> bool {
        super::collision::pipe_hits_circle(self, bird_pos, bird_radius)
    }

    /// True exactly once per pipe: the tick the bird's x first exceeds the
    /// trailing edge. Marks the pipe on the spot so it can never double-count.
    pub fn try_pass(&mut self, bird_x: f32) -> bool {
        if !self.passed && bird_x > self.x + self.width {
            self.passed = true;
            return true;
        }
        false
    }

    pub fn passed(&self) -> bool {
        self.passed
    }
}

/// Uniform gap placement inside the vertical margins. The generator is
/// injected so tests can pin the sequence.
pub fn sample_gap_top(config: &WorldConfig, rng: &mut impl Rng) -> f32 {
    let (lo, hi) = config.gap_top_range();
    rng.random_range(lo..hi)
}

/// Deterministic RNG bookkeeping. Serializes as two plain integers; each gap
/// draw derives a short-lived generator from (seed, draw index), so restoring
/// a session never replays or skips draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Gap draws made so far
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    /// Generator for the next draw; advances the draw counter
    pub fn next_draw(&mut self) -> Pcg32 {
        let stream = self.draws;
        self.draws += 1;
        Pcg32::seed_from_u64(self.seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }
}

/// Result of advancing the pipe stream one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamOutcome {
    /// At least one pipe hit the bird this tick
    pub collided: bool,
    /// Pipes whose trailing edge the bird cleared this tick
    pub score_delta: u32,
}

/// Live pipes in spawn order, which is also leftmost-first since spawn order
/// and scroll direction align.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeStream {
    pub pipes: Vec<Pipe>,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
}

impl PipeStream {
    /// A stream holding its single initial pipe
    pub fn seeded(config: &WorldConfig, rng: &mut RngState) -> Self {
        let mut stream = Self {
            pipes: Vec::new(),
            spawn_timer: 0,
        };
        stream.reset(config, rng);
        stream
    }

    /// Clear and reseed with exactly one pipe past the right edge, so the
    /// world is never empty after a reset
    pub fn reset(&mut self, config: &WorldConfig, rng: &mut RngState) {
        self.pipes.clear();
        self.pipes
            .push(Pipe::new(config.spawn_x(), config, &mut rng.next_draw()));
        self.spawn_timer = 0;
    }

    /// Advance the stream one tick: spawn on the interval, scroll every pipe,
    /// test hit and pass against the bird, then prune pipes that are fully
    /// off the left edge. Scoring runs before pruning; a pass and a hit on
    /// the same pipe in the same tick both fire.
    pub fn tick(
        &mut self,
        bird: &Bird,
        config: &WorldConfig,
        rng: &mut RngState,
        events: &mut Vec<GameEvent>,
    ) -> StreamOutcome {
        self.spawn_timer += 1;
        if self.spawn_timer >= config.spawn_interval {
            self.pipes
                .push(Pipe::new(config.spawn_x(), config, &mut rng.next_draw()));
            self.spawn_timer = 0;
            log::debug!(
                "spawned pipe at x={} ({} live)",
                config.spawn_x(),
                self.pipes.len()
            );
        }

        let mut outcome = StreamOutcome::default();
        for pipe in &mut self.pipes {
            pipe.advance();
            if pipe.hits(bird.pos, bird.radius) {
                outcome.collided = true;
            }
            if pipe.try_pass(bird.pos.x) {
                outcome.score_delta += 1;
                events.push(GameEvent::PipePassed);
            }
        }
        if outcome.collided {
            events.push(GameEvent::Collision);
        }

        // Scoring is settled; drop pipes fully past the left edge.
        let before = self.pipes.len();
        self.pipes.retain(|pipe| !pipe.is_offscreen());
        if self.pipes.len() < before {
            log::debug!("pruned {} offscreen pipe(s)", before - self.pipes.len());
        }

        outcome
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: WorldConfig,
    pub seed: u64,
    pub rng: RngState,
    /// Current phase
    pub phase: GamePhase,
    pub score: u32,
    /// Simulation tick counter, running across runs within the session
    pub time_ticks: u64,
    pub bird: Bird,
    pub stream: PipeStream,
    /// Events since the last drain; glue-facing, not part of the state proper
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session in the Start phase. Fails fast on an impossible
    /// configuration.
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = RngState::new(seed);
        let bird = Bird::new(config.bird_start, config.bird_radius);
        let stream = PipeStream::seeded(&config, &mut rng);
        Ok(Self {
            config,
            seed,
            rng,
            phase: GamePhase::Start,
            score: 0,
            time_ticks: 0,
            bird,
            stream,
            events: Vec::new(),
        })
    }

    /// Recreate the world for a fresh run: bird back at its start position,
    /// stream reseeded, score and spawn counter zeroed. Callable from Start
    /// or GameOver identically. The RNG stream keeps advancing, so each run
    /// sees fresh gaps while the session stays deterministic per seed.
    pub fn reset(&mut self) {
        self.bird = Bird::new(self.config.bird_start, self.config.bird_radius);
        self.stream.reset(&self.config, &mut self.rng);
        self.score = 0;
    }

    /// Take all events emitted since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
