//! Skyflap - a flappy-style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `config`: World constants, validated at session creation
//! - `render`: Backend-agnostic drawing primitives
//! - `audio`: Game-event to sound-cue routing
//! - `settings`: Player preferences

pub mod audio;
pub mod config;
pub mod render;
pub mod settings;
pub mod sim;

pub use audio::{AudioRouter, SoundEffect, SoundSink};
pub use config::{ConfigError, WorldConfig};
pub use settings::Settings;

/// Frame timing constants
pub mod consts {
    /// Fixed simulation rate: one tick per nominal rendered frame
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const TICK_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum catch-up ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
