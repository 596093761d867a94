//! Fixed timestep simulation tick
//!
//! Advances one session deterministically. Input is not part of the tick:
//! the primary action is a discrete event applied synchronously on receipt,
//! in whatever phase it arrives in.

use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game by one simulation step. Only the Playing phase mutates
/// the world; Start and GameOver idle.
///
/// Per-tick ordering: gravity, integration, world-band clamp, then the pipe
/// stream (spawn, scroll, hit/pass, prune). Terminal transitions land in the
/// same tick that produced them.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    let config = state.config;
    state.bird.apply_gravity(config.gravity);
    state.bird.integrate();
    let grounded = state.bird.clamp_vertical(config.world_height);
    if grounded {
        state.events.push(GameEvent::GroundContact);
    }

    // Pipes still advance on a ground-contact tick, and a pass landing on
    // the same step as a hit still scores.
    let outcome = state
        .stream
        .tick(&state.bird, &config, &mut state.rng, &mut state.events);
    state.score += outcome.score_delta;

    if grounded || outcome.collided {
        log::info!(
            "run over at tick {} with score {}",
            state.time_ticks,
            state.score
        );
        state.phase = GamePhase::GameOver;
    }
}

/// Handle the discrete primary-action input (originally spacebar).
///
/// Start and GameOver restart the world and begin playing; during play the
/// action is a flap. Never queued: each received event takes effect
/// immediately, and with overwrite flap semantics the last one wins.
pub fn primary_action(state: &mut GameState) {
    match state.phase {
        GamePhase::Start | GamePhase::GameOver => {
            state.reset();
            state.phase = GamePhase::Playing;
            log::info!("new run (seed {}, draw {})", state.seed, state.rng.draws);
        }
        GamePhase::Playing => {
            state.bird.flap(state.config.flap_impulse);
            state.events.push(GameEvent::Flap);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::sim::state::{Bird, Pipe, PipeStream, RngState};
    use glam::Vec2;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(WorldConfig::default(), seed).expect("valid config");
        primary_action(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    #[test]
    fn test_start_phase_idles() {
        let mut state = GameState::new(WorldConfig::default(), 1).expect("valid config");
        let bird_before = state.bird;
        let pipes_before = state.stream.pipes.clone();

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.bird.pos, bird_before.pos);
        assert_eq!(state.stream.pipes.len(), pipes_before.len());
        assert_eq!(state.stream.pipes[0].x, pipes_before[0].x);
    }

    #[test]
    fn test_primary_action_starts_run() {
        let mut state = GameState::new(WorldConfig::default(), 1).expect("valid config");
        primary_action(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.stream.pipes.len(), 1);
        assert_eq!(state.bird.pos, state.config.bird_start);
    }

    #[test]
    fn test_flap_keeps_playing_phase() {
        let mut state = playing_state(1);
        state.score = 4;
        state.bird.vel.y = 3.0;

        primary_action(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 4);
        assert_eq!(state.bird.vel.y, state.config.flap_impulse);
        assert!(state.take_events().contains(&GameEvent::Flap));
    }

    #[test]
    fn test_first_tick_gravity_only() {
        // World height 640, radius 16, gravity 0.45, start y = 320, no flap
        let mut state = playing_state(1);
        tick(&mut state);

        assert_eq!(state.bird.vel.y, 0.45);
        assert_eq!(state.bird.pos.y, 320.45);
        assert_eq!(state.bird.pos.x, 120.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_gravity_accumulates_downward() {
        let mut state = playing_state(1);
        let mut last_vy = state.bird.vel.y;
        for _ in 0..20 {
            tick(&mut state);
            assert!(state.bird.vel.y > last_vy);
            last_vy = state.bird.vel.y;
        }
    }

    #[test]
    fn test_ground_contact_ends_run() {
        let mut state = playing_state(1);
        state.bird.pos.y = 624.0; // resting on the clamp boundary

        tick(&mut state);

        assert_eq!(state.bird.pos.y, 624.0);
        assert_eq!(state.bird.vel.y, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.take_events().contains(&GameEvent::GroundContact));
    }

    #[test]
    fn test_ceiling_clamp_is_not_terminal() {
        let mut state = playing_state(1);
        state.bird.pos.y = 18.0;
        state.bird.vel.y = -6.5;

        tick(&mut state);

        assert_eq!(state.bird.pos.y, 16.0);
        assert_eq!(state.bird.vel.y, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pipe_collision_ends_run() {
        let mut state = playing_state(1);
        state.stream.pipes.clear();
        // Gap far below the bird; the column overlaps it horizontally
        state
            .stream
            .pipes
            .push(Pipe::with_gap(100.0, 60.0, 500.0, 630.0, 2.5));

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        let events = state.take_events();
        assert_eq!(
            events.iter().filter(|&&e| e == GameEvent::Collision).count(),
            1
        );
    }

    #[test]
    fn test_pass_scores_exactly_once() {
        let mut state = playing_state(1);
        state.stream.pipes.clear();
        // Trailing edge crosses the bird's x this tick; gap wide enough to
        // swallow the bird's vertical extent
        state
            .stream
            .pipes
            .push(Pipe::with_gap(58.0, 60.0, 250.0, 450.0, 2.5));

        tick(&mut state);
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.take_events().contains(&GameEvent::PipePassed));

        tick(&mut state);
        assert_eq!(state.score, 1);
        assert!(!state.take_events().contains(&GameEvent::PipePassed));
    }

    #[test]
    fn test_pass_and_hit_same_tick_both_fire() {
        let mut state = playing_state(1);
        state.stream.pipes.clear();
        // Gap below the bird (breach) while the trailing edge slides past it
        state
            .stream
            .pipes
            .push(Pipe::with_gap(58.0, 60.0, 450.0, 580.0, 2.5));

        tick(&mut state);

        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.take_events();
        assert!(events.contains(&GameEvent::PipePassed));
        assert!(events.contains(&GameEvent::Collision));
    }

    #[test]
    fn test_stream_spawns_on_interval() {
        let config = WorldConfig::default();
        let mut rng = RngState::new(5);
        let mut stream = PipeStream::seeded(&config, &mut rng);
        let bird = Bird::new(config.bird_start, config.bird_radius);
        let mut events = Vec::new();

        assert_eq!(stream.pipes.len(), 1);
        for _ in 0..config.spawn_interval - 1 {
            stream.tick(&bird, &config, &mut rng, &mut events);
        }
        assert_eq!(stream.pipes.len(), 1);

        stream.tick(&bird, &config, &mut rng, &mut events);
        assert_eq!(stream.pipes.len(), 2);
        assert_eq!(stream.spawn_timer, 0);
        // The new pipe spawned one lead past the right edge, then scrolled once
        assert_eq!(
            stream.pipes[1].x,
            config.spawn_x() - config.scroll_speed
        );
    }

    #[test]
    fn test_prune_happens_after_scoring() {
        let config = WorldConfig::default();
        let mut rng = RngState::new(5);
        let mut stream = PipeStream::seeded(&config, &mut rng);
        let bird = Bird::new(config.bird_start, config.bird_radius);
        let mut events = Vec::new();

        stream.pipes.clear();
        // Trailing edge at 2.0: still visible, unpassed, about to leave
        stream
            .pipes
            .push(Pipe::with_gap(-58.0, 60.0, 250.0, 450.0, 2.5));

        let outcome = stream.tick(&bird, &config, &mut rng, &mut events);

        assert_eq!(outcome.score_delta, 1);
        assert!(stream.pipes.is_empty());
        assert!(events.contains(&GameEvent::PipePassed));
    }

    #[test]
    fn test_partially_visible_pipe_survives_prune() {
        let config = WorldConfig::default();
        let mut rng = RngState::new(5);
        let mut stream = PipeStream::seeded(&config, &mut rng);
        let bird = Bird::new(config.bird_start, config.bird_radius);
        let mut events = Vec::new();

        stream.pipes.clear();
        stream
            .pipes
            .push(Pipe::with_gap(-55.0, 60.0, 250.0, 450.0, 2.5));

        stream.tick(&bird, &config, &mut rng, &mut events);

        // Trailing edge at 2.5 after the scroll: still on screen
        assert_eq!(stream.pipes.len(), 1);
    }

    #[test]
    fn test_game_over_phase_idles() {
        let mut state = playing_state(1);
        state.phase = GamePhase::GameOver;
        let bird_before = state.bird;
        let ticks_before = state.time_ticks;

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_ticks, ticks_before);
        assert_eq!(state.bird.pos, bird_before.pos);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = playing_state(1);
        state.bird.pos.y = 624.0;
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);

        primary_action(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.stream.pipes.len(), 1);
        assert_eq!(state.bird.pos, Vec2::new(120.0, 320.0));
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and input script trace identically
        let mut a = GameState::new(WorldConfig::default(), 99999).expect("valid config");
        let mut b = GameState::new(WorldConfig::default(), 99999).expect("valid config");

        for step in 0..300u32 {
            if step % 25 == 0 {
                primary_action(&mut a);
                primary_action(&mut b);
            }
            tick(&mut a);
            tick(&mut b);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.bird.pos, b.bird.pos);
        assert_eq!(a.rng.draws, b.rng.draws);
        assert_eq!(a.stream.pipes.len(), b.stream.pipes.len());
        for (pa, pb) in a.stream.pipes.iter().zip(&b.stream.pipes) {
            assert_eq!(pa.x, pb.x);
            assert_eq!(pa.gap_top, pb.gap_top);
        }
    }
}
