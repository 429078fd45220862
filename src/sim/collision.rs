//! Rectangle collision and axis-separated sliding resolution
//!
//! Movement is resolved per axis: a diagonal push into a wall still slides
//! along the open axis instead of stopping dead.

use glam::Vec2;

use super::state::Obstacle;

/// True iff a character box centered at `pos` overlaps any obstacle.
/// Order-independent: any overlap disqualifies the position.
pub fn collides(pos: Vec2, size: Vec2, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| o.overlaps_box(pos, size))
}

/// Clamp a center position so the whole box stays inside the map
pub fn clamp_to_map(pos: Vec2, size: Vec2, map_size: Vec2) -> Vec2 {
    let half = size * 0.5;
    pos.clamp(half, (map_size - half).max(half))
}

/// Nearest admissible position for a move from `prev` to `candidate`
///
/// The horizontal move is tested against the previous y, then the vertical
/// move against whatever x survived. If the combined point is still blocked
/// (a diagonal shove into a corner), whichever lone axis is free wins;
/// failing both, the character stays put. Map bounds are enforced last,
/// independent of obstacles.
pub fn resolve_movement(
    prev: Vec2,
    candidate: Vec2,
    obstacles: &[Obstacle],
    size: Vec2,
    map_size: Vec2,
) -> Vec2 {
    let mut resolved = candidate;

    if candidate.x != prev.x && collides(Vec2::new(candidate.x, prev.y), size, obstacles) {
        resolved.x = prev.x;
    }
    if candidate.y != prev.y && collides(Vec2::new(resolved.x, candidate.y), size, obstacles) {
        resolved.y = prev.y;
    }

    if collides(resolved, size, obstacles) {
        let x_only = Vec2::new(candidate.x, prev.y);
        let y_only = Vec2::new(prev.x, candidate.y);
        resolved = if !collides(x_only, size, obstacles) {
            x_only
        } else if !collides(y_only, size, obstacles) {
            y_only
        } else {
            prev
        };
    }

    clamp_to_map(resolved, size, map_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::map::ObjectKind;
    use proptest::prelude::*;

    const SIZE: Vec2 = Vec2::new(4.0, 4.0);
    const MAP: Vec2 = Vec2::new(200.0, 200.0);

    fn wall(id: &str, x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle {
            id: id.into(),
            kind: ObjectKind::Wall,
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            priority: 0,
        }
    }

    #[test]
    fn test_slide_along_vertical_wall() {
        // Diagonal move into a wall on the right: x holds, y advances
        let obstacles = [wall("w", 60.0, 50.0, 10.0, 100.0)];
        let resolved = resolve_movement(
            Vec2::new(50.0, 50.0),
            Vec2::new(55.0, 55.0),
            &obstacles,
            SIZE,
            MAP,
        );
        assert_eq!(resolved, Vec2::new(50.0, 55.0));
    }

    #[test]
    fn test_slide_along_horizontal_wall() {
        let obstacles = [wall("w", 50.0, 60.0, 100.0, 10.0)];
        let resolved = resolve_movement(
            Vec2::new(50.0, 50.0),
            Vec2::new(45.0, 55.0),
            &obstacles,
            SIZE,
            MAP,
        );
        assert_eq!(resolved, Vec2::new(45.0, 50.0));
    }

    #[test]
    fn test_blocked_on_both_axes_freezes() {
        let obstacles = [
            wall("right", 58.0, 50.0, 4.0, 40.0),
            wall("below", 50.0, 58.0, 40.0, 4.0),
        ];
        let prev = Vec2::new(50.0, 50.0);
        let resolved = resolve_movement(prev, Vec2::new(55.0, 55.0), &obstacles, SIZE, MAP);
        assert_eq!(resolved, prev);
    }

    #[test]
    fn test_free_diagonal_passes_through() {
        let obstacles = [wall("far", 150.0, 150.0, 10.0, 10.0)];
        let resolved = resolve_movement(
            Vec2::new(50.0, 50.0),
            Vec2::new(55.0, 45.0),
            &obstacles,
            SIZE,
            MAP,
        );
        assert_eq!(resolved, Vec2::new(55.0, 45.0));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        // Character box right edge at 52, wall left edge at 52
        let obstacles = [wall("w", 55.0, 50.0, 6.0, 20.0)];
        assert!(!collides(Vec2::new(50.0, 50.0), SIZE, &obstacles));
        assert!(collides(Vec2::new(50.1, 50.0), SIZE, &obstacles));
    }

    #[test]
    fn test_clamp_to_map() {
        assert_eq!(
            clamp_to_map(Vec2::new(-3.0, 250.0), SIZE, MAP),
            Vec2::new(2.0, 198.0)
        );
        assert_eq!(
            clamp_to_map(Vec2::new(100.0, 100.0), SIZE, MAP),
            Vec2::new(100.0, 100.0)
        );
    }

    #[test]
    fn test_resolver_clamps_without_obstacles() {
        let resolved = resolve_movement(Vec2::new(3.0, 3.0), Vec2::new(1.0, 1.0), &[], SIZE, MAP);
        assert_eq!(resolved, Vec2::new(2.0, 2.0));
    }

    proptest! {
        #[test]
        fn prop_resolved_never_overlaps(
            px in 0.0f32..200.0,
            py in 0.0f32..200.0,
            cx in 0.0f32..200.0,
            cy in 0.0f32..200.0,
        ) {
            let obstacles = [
                wall("a", 60.0, 50.0, 10.0, 100.0),
                wall("b", 120.0, 120.0, 30.0, 8.0),
            ];
            let prev = Vec2::new(px, py);
            prop_assume!(!collides(prev, SIZE, &obstacles));
            let resolved = resolve_movement(prev, Vec2::new(cx, cy), &obstacles, SIZE, MAP);
            prop_assert!(!collides(resolved, SIZE, &obstacles));
        }
    }
}
