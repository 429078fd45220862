//! Per-frame simulation advance
//!
//! One tick: integrate the held direction, resolve the move against the
//! obstacle set, refresh the camera. The joystick runs interrupt-style
//! between ticks; the tick only ever sees its latest emission.

use glam::Vec2;

use super::collision::resolve_movement;
use super::state::SceneState;
use crate::consts::REFERENCE_DT;

/// Input snapshot for one tick
///
/// `direction` is the joystick's latest emission, or zero if the session
/// never started or has stopped. Copied as a whole at the start of the
/// tick so its two components can never tear.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub direction: Vec2,
}

/// Position delta for a direction held over `dt` seconds
///
/// Speed is map units per reference frame, so the host's actual scheduling
/// rate never changes how fast the character moves.
#[inline]
pub fn integrate(direction: Vec2, speed: f32, dt: f32) -> Vec2 {
    direction * speed * (dt / REFERENCE_DT)
}

/// Advance the scene by one frame
pub fn tick(state: &mut SceneState, input: &TickInput, dt: f32) {
    let direction = input.direction;

    if direction != Vec2::ZERO {
        let delta = integrate(direction, state.character.speed, dt);
        let candidate = state.character.pos + delta;
        state.character.pos = resolve_movement(
            state.character.pos,
            candidate,
            &state.obstacles,
            state.character_size,
            state.map_size,
        );
        // Sprite art faces up; atan2's zero points right
        state.character.facing = direction.y.atan2(direction.x).to_degrees() + 90.0;
    }

    state.viewport.follow(state.character.pos);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::map::MapConfig;

    fn open_scene() -> SceneState {
        let config = MapConfig {
            map_width: 100.0,
            map_height: 100.0,
            display_width: Some(50.0),
            display_height: Some(50.0),
            objects: Vec::new(),
        };
        SceneState::new(&config)
    }

    #[test]
    fn test_zero_direction_moves_nothing() {
        let mut state = open_scene();
        let before = state.character.pos;

        let input = TickInput::default();
        for _ in 0..10 {
            tick(&mut state, &input, REFERENCE_DT);
        }
        assert_eq!(state.character.pos, before);
    }

    #[test]
    fn test_integrate_scales_with_dt() {
        let delta = integrate(Vec2::new(1.0, 0.0), 2.0, REFERENCE_DT);
        assert!((delta.x - 2.0).abs() < 1e-5);

        // Half the frame rate, double the per-tick displacement
        let delta = integrate(Vec2::new(1.0, 0.0), 2.0, REFERENCE_DT * 2.0);
        assert!((delta.x - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_facing_follows_direction() {
        let mut state = open_scene();

        tick(
            &mut state,
            &TickInput {
                direction: Vec2::new(1.0, 0.0),
            },
            REFERENCE_DT,
        );
        assert!((state.character.facing - 90.0).abs() < 1e-4);

        tick(
            &mut state,
            &TickInput {
                direction: Vec2::new(0.0, 1.0),
            },
            REFERENCE_DT,
        );
        assert!((state.character.facing - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_facing_retained_when_stopped() {
        let mut state = open_scene();
        tick(
            &mut state,
            &TickInput {
                direction: Vec2::new(0.0, -1.0),
            },
            REFERENCE_DT,
        );
        let facing = state.character.facing;

        tick(&mut state, &TickInput::default(), REFERENCE_DT);
        assert_eq!(state.character.facing, facing);
    }

    #[test]
    fn test_viewport_tracks_character() {
        let mut state = open_scene();
        let input = TickInput {
            direction: Vec2::new(1.0, 0.0),
        };
        for _ in 0..10 {
            tick(&mut state, &input, REFERENCE_DT);
        }
        let expected_x = state.character.pos.x - 25.0;
        assert!((state.viewport.offset.x - expected_x).abs() < 1e-4);
        assert_eq!(state.viewport.offset.y, 25.0);
    }

    #[test]
    fn test_character_stops_at_map_edge() {
        let mut state = open_scene();
        let input = TickInput {
            direction: Vec2::new(1.0, 0.0),
        };
        // Far more ticks than the map is wide
        for _ in 0..100 {
            tick(&mut state, &input, REFERENCE_DT);
        }
        // Pinned at map width minus the character's half size
        assert_eq!(state.character.pos, Vec2::new(98.0, 50.0));
        // Camera is clamped too
        assert_eq!(state.viewport.offset, Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_long_frame_does_not_change_speed_per_second() {
        let mut a = open_scene();
        let mut b = open_scene();
        let input = TickInput {
            direction: Vec2::new(0.0, 1.0),
        };

        // Same wall-clock span, different scheduling granularity
        for _ in 0..4 {
            tick(&mut a, &input, REFERENCE_DT);
        }
        tick(&mut b, &input, REFERENCE_DT * 4.0);

        assert!((a.character.pos.y - b.character.pos.y).abs() < 1e-4);
    }
}
