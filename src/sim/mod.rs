//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{breaches_gap, overlaps_column, pipe_hits_circle};
pub use state::{
    Bird, GameEvent, GamePhase, GameState, Pipe, PipeStream, RngState, StreamOutcome,
    sample_gap_top,
};
pub use tick::{primary_action, tick};
