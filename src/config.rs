//! World configuration
//!
//! Every constant the simulation depends on, fixed for the lifetime of a
//! session. Validated up front so an impossible world is rejected before the
//! first tick instead of panicking mid-run.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// World constants supplied at session creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// World width in world units
    pub world_width: f32,
    /// World height in world units
    pub world_height: f32,
    /// Downward acceleration added every tick
    pub gravity: f32,
    /// Vertical velocity set by a flap (negative = upward)
    pub flap_impulse: f32,
    /// Bird collision + draw radius
    pub bird_radius: f32,
    /// Bird position at the start of every run
    pub bird_start: Vec2,
    /// Horizontal extent of every pipe
    pub pipe_width: f32,
    /// Vertical extent of the passable gap
    pub gap_height: f32,
    /// Minimum distance between a gap edge and the world edge
    pub gap_margin: f32,
    /// Leftward pipe movement per tick
    pub scroll_speed: f32,
    /// Ticks between pipe spawns
    pub spawn_interval: u32,
    /// How far past the right world edge new pipes appear
    pub spawn_lead: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width: 480.0,
            world_height: 640.0,
            gravity: 0.45,
            flap_impulse: -6.5,
            bird_radius: 16.0,
            bird_start: Vec2::new(120.0, 320.0),
            pipe_width: 60.0,
            gap_height: 130.0,
            gap_margin: 60.0,
            scroll_speed: 2.5,
            spawn_interval: 90,
            spawn_lead: 40.0,
        }
    }
}

/// Rejected world configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A length, speed or force that must be strictly positive is not
    NonPositive { field: &'static str, value: f32 },
    /// Flap impulse must point upward (negative y)
    FlapNotUpward { value: f32 },
    /// Spawn interval of zero would spawn a pipe every tick forever
    ZeroSpawnInterval,
    /// Margins plus gap height leave no room to place a gap
    GapDoesNotFit { needed: f32, world_height: f32 },
    /// Bird start position lies outside the vertical clamp band
    StartOutOfBounds { y: f32, min: f32, max: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            ConfigError::FlapNotUpward { value } => {
                write!(f, "flap_impulse must be negative (upward), got {value}")
            }
            ConfigError::ZeroSpawnInterval => write!(f, "spawn_interval must be at least 1"),
            ConfigError::GapDoesNotFit {
                needed,
                world_height,
            } => write!(
                f,
                "gap_height plus margins needs {needed} world units but world_height is {world_height}"
            ),
            ConfigError::StartOutOfBounds { y, min, max } => {
                write!(f, "bird_start.y {y} outside clamp band [{min}, {max}]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl WorldConfig {
    /// Fail fast on a world the simulation cannot run in
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("gravity", self.gravity),
            ("bird_radius", self.bird_radius),
            ("pipe_width", self.pipe_width),
            ("gap_height", self.gap_height),
            ("gap_margin", self.gap_margin),
            ("scroll_speed", self.scroll_speed),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.flap_impulse >= 0.0 {
            return Err(ConfigError::FlapNotUpward {
                value: self.flap_impulse,
            });
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        // Gap tops are drawn from [margin, world_height - margin - gap_height);
        // an empty range would make every spawn panic.
        let needed = 2.0 * self.gap_margin + self.gap_height;
        if needed >= self.world_height {
            return Err(ConfigError::GapDoesNotFit {
                needed,
                world_height: self.world_height,
            });
        }
        let (min, max) = (self.bird_radius, self.world_height - self.bird_radius);
        if self.bird_start.y < min || self.bird_start.y > max {
            return Err(ConfigError::StartOutOfBounds {
                y: self.bird_start.y,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Half-open vertical range gap tops are drawn from
    pub fn gap_top_range(&self) -> (f32, f32) {
        (
            self.gap_margin,
            self.world_height - self.gap_margin - self.gap_height,
        )
    }

    /// X coordinate new pipes spawn at
    pub fn spawn_x(&self) -> f32 {
        self.world_width + self.spawn_lead
    }
}
