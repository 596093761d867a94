//! Backend-agnostic drawing primitives
//!
//! `render_frame` replays the current state into a `Canvas` as plain
//! primitives: background, two rectangles per pipe, the bird circle, and the
//! per-phase text overlays. Nothing is ever read back from rendering.

use glam::Vec2;

use crate::sim::{GamePhase, GameState};

/// RGBA color, 0-1 channels
pub type Color = [f32; 4];

pub const BACKGROUND: Color = [0.35, 0.60, 0.90, 1.0];
pub const PIPE: Color = [0.66, 1.00, 0.26, 1.0];
pub const BIRD: Color = [1.00, 0.95, 0.19, 1.0];
pub const TEXT: Color = [1.00, 1.00, 1.00, 1.0];

/// Minimal drawing surface a frontend implements
pub trait Canvas {
    fn clear(&mut self, color: Color);
    /// Axis-aligned filled rectangle from its top-left corner
    fn rect(&mut self, min: Vec2, size: Vec2, color: Color);
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Text centered horizontally on `center_x`, top edge at `top_y`
    fn text(&mut self, center_x: f32, top_y: f32, size: f32, color: Color, text: &str);
}

/// Emit one frame's draw calls for the current state
pub fn render_frame(state: &GameState, canvas: &mut impl Canvas) {
    let config = &state.config;
    canvas.clear(BACKGROUND);

    for pipe in &state.stream.pipes {
        // Upper rect runs from the top of the world down to the gap, lower
        // rect from the gap to the ground.
        canvas.rect(
            Vec2::new(pipe.x, 0.0),
            Vec2::new(pipe.width, pipe.gap_top),
            PIPE,
        );
        canvas.rect(
            Vec2::new(pipe.x, pipe.gap_bottom),
            Vec2::new(pipe.width, config.world_height - pipe.gap_bottom),
            PIPE,
        );
    }

    // Bird last so it draws on top
    canvas.circle(state.bird.pos, state.bird.radius, BIRD);

    let mid_x = config.world_width / 2.0;
    let mid_y = config.world_height / 2.0;
    match state.phase {
        GamePhase::Start => {
            canvas.text(mid_x, mid_y - 40.0, 32.0, TEXT, "Skyflap");
            canvas.text(mid_x, mid_y - 5.0, 18.0, TEXT, "Press space to start");
        }
        GamePhase::Playing => {
            canvas.text(mid_x, 20.0, 32.0, TEXT, &state.score.to_string());
        }
        GamePhase::GameOver => {
            canvas.text(mid_x, mid_y - 40.0, 32.0, TEXT, "Game Over");
            canvas.text(mid_x, mid_y - 5.0, 20.0, TEXT, &format!("Score: {}", state.score));
            canvas.text(mid_x, mid_y + 35.0, 20.0, TEXT, "Press space to restart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::sim::primary_action;

    #[derive(Default)]
    struct RecordingCanvas {
        rects: Vec<(Vec2, Vec2)>,
        circles: Vec<(Vec2, f32)>,
        texts: Vec<String>,
        cleared: bool,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, _color: Color) {
            self.cleared = true;
        }
        fn rect(&mut self, min: Vec2, size: Vec2, _color: Color) {
            self.rects.push((min, size));
        }
        fn circle(&mut self, center: Vec2, radius: f32, _color: Color) {
            self.circles.push((center, radius));
        }
        fn text(&mut self, _center_x: f32, _top_y: f32, _size: f32, _color: Color, text: &str) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_two_rects_per_pipe_plus_bird() {
        let state = GameState::new(WorldConfig::default(), 1).expect("valid config");
        let mut canvas = RecordingCanvas::default();
        render_frame(&state, &mut canvas);

        assert!(canvas.cleared);
        assert_eq!(canvas.rects.len(), 2 * state.stream.pipes.len());
        assert_eq!(canvas.circles.len(), 1);
        assert_eq!(canvas.circles[0], (state.bird.pos, state.bird.radius));
    }

    #[test]
    fn test_pipe_rects_bracket_the_gap() {
        let state = GameState::new(WorldConfig::default(), 1).expect("valid config");
        let pipe = state.stream.pipes[0];
        let mut canvas = RecordingCanvas::default();
        render_frame(&state, &mut canvas);

        let (upper_min, upper_size) = canvas.rects[0];
        let (lower_min, lower_size) = canvas.rects[1];
        assert_eq!(upper_min.y, 0.0);
        assert_eq!(upper_size.y, pipe.gap_top);
        assert_eq!(lower_min.y, pipe.gap_bottom);
        assert!((lower_min.y + lower_size.y - state.config.world_height).abs() < 1e-3);
    }

    #[test]
    fn test_overlays_follow_phase() {
        let mut state = GameState::new(WorldConfig::default(), 1).expect("valid config");

        let mut canvas = RecordingCanvas::default();
        render_frame(&state, &mut canvas);
        assert!(canvas.texts.iter().any(|t| t.contains("start")));

        primary_action(&mut state);
        state.score = 3;
        let mut canvas = RecordingCanvas::default();
        render_frame(&state, &mut canvas);
        assert_eq!(canvas.texts, vec!["3".to_string()]);

        state.phase = GamePhase::GameOver;
        let mut canvas = RecordingCanvas::default();
        render_frame(&state, &mut canvas);
        assert!(canvas.texts.iter().any(|t| t == "Game Over"));
        assert!(canvas.texts.iter().any(|t| t == "Score: 3"));
    }
}
