//! Game-event to sound-cue routing
//!
//! The simulation emits `GameEvent`s; this module turns them into named cues
//! at mixed volumes. Whether anything actually plays is up to whatever
//! implements `SoundSink` - the core never depends on audio existing.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Flap kick
    Jump,
    /// Pipe cleared
    Score,
    /// Collision or ground contact
    GameOver,
    /// Looping background track
    Music,
}

impl SoundEffect {
    /// Per-cue base level before the settings mix
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Jump => 0.2,
            SoundEffect::Score => 0.1,
            SoundEffect::GameOver => 0.5,
            SoundEffect::Music => 0.5,
        }
    }

    /// Cue for a simulation event
    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::Flap => SoundEffect::Jump,
            GameEvent::PipePassed => SoundEffect::Score,
            GameEvent::Collision | GameEvent::GroundContact => SoundEffect::GameOver,
        }
    }
}

/// Playback sink implemented by the frontend
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Maps drained simulation events to cues at effective volumes
#[derive(Debug, Clone)]
pub struct AudioRouter {
    settings: Settings,
    muted: bool,
}

impl AudioRouter {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            muted: false,
        }
    }

    /// Mute/unmute all audio (e.g. on window blur)
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings.clamped();
    }

    /// Mixed volume for one cue
    pub fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = match effect {
            SoundEffect::Music => self.settings.music_volume,
            _ => self.settings.sfx_volume,
        };
        effect.base_volume() * channel * self.settings.master_volume
    }

    /// Route one drained event batch into the sink, skipping silent cues
    pub fn route(&self, events: &[GameEvent], sink: &mut impl SoundSink) {
        for &event in events {
            let effect = SoundEffect::for_event(event);
            let volume = self.effective_volume(effect);
            if volume > 0.0 {
                sink.play(effect, volume);
            }
        }
    }
}
