//! Scene state and core simulation types
//!
//! Everything the rendering collaborator reads after a tick lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Viewport;
use super::collision::clamp_to_map;
use super::map::{MapConfig, ObjectKind, compile};
use crate::consts::{CHARACTER_SIZE, CHARACTER_SPEED};

/// An axis-aligned rectangular obstacle
///
/// Center-based: bounds are `pos ± size/2` on each axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: String,
    pub kind: ObjectKind,
    /// Center position in map units
    pub pos: Vec2,
    /// Full width/height in map units
    pub size: Vec2,
    /// Paint order: higher draws above lower
    pub priority: i32,
}

impl Obstacle {
    /// Strict AABB overlap against a box centered at `center`.
    /// Touching edges do not count as overlap.
    pub fn overlaps_box(&self, center: Vec2, size: Vec2) -> bool {
        (center.x - self.pos.x).abs() * 2.0 < size.x + self.size.x
            && (center.y - self.pos.y).abs() * 2.0 < size.y + self.size.y
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterState {
    /// Center position in map units
    pub pos: Vec2,
    /// Facing angle in degrees; the sprite's neutral orientation faces up.
    /// Holds its last value while the character stands still.
    pub facing: f32,
    /// Map units per reference frame, constant for the scene's lifetime
    pub speed: f32,
}

/// Published simulation state, updated in place each tick
///
/// Consumers (the rendering collaborator) read it after a tick; nothing in
/// the simulation notifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneState {
    /// Map extents in map units
    pub map_size: Vec2,
    pub character: CharacterState,
    /// Character bounding box for collision
    pub character_size: Vec2,
    pub viewport: Viewport,
    /// Compiled obstacles, priority descending (paint order)
    pub obstacles: Vec<Obstacle>,
}

impl SceneState {
    /// Build a scene from external map configuration.
    ///
    /// Obstacles are compiled once and treated as immutable for the scene's
    /// lifetime. The character spawns at the map center.
    pub fn new(config: &MapConfig) -> Self {
        let map_size = config.map_size();
        let obstacles = compile(&config.objects);
        let character_size = Vec2::splat(CHARACTER_SIZE);
        let spawn = clamp_to_map(map_size * 0.5, character_size, map_size);

        let mut viewport = Viewport::new(config.display_size(), map_size);
        viewport.follow(spawn);

        log::info!(
            "Scene ready: {}x{} map, {} obstacles from {} objects",
            map_size.x,
            map_size.y,
            obstacles.len(),
            config.objects.len()
        );

        Self {
            map_size,
            character: CharacterState {
                pos: spawn,
                facing: 0.0,
                speed: CHARACTER_SPEED,
            },
            character_size,
            viewport,
            obstacles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let obstacle = Obstacle {
            id: "block".into(),
            kind: ObjectKind::Wall,
            pos: Vec2::new(55.0, 50.0),
            size: Vec2::new(6.0, 20.0),
            priority: 0,
        };
        // Character box [48, 52] just touches the obstacle's left edge at 52
        assert!(!obstacle.overlaps_box(Vec2::new(50.0, 50.0), Vec2::new(4.0, 4.0)));
        // A hair closer and the boxes interpenetrate
        assert!(obstacle.overlaps_box(Vec2::new(50.1, 50.0), Vec2::new(4.0, 4.0)));
    }

    #[test]
    fn test_scene_spawns_at_center() {
        let config = MapConfig {
            map_width: 100.0,
            map_height: 100.0,
            display_width: Some(50.0),
            display_height: Some(50.0),
            objects: Vec::new(),
        };
        let state = SceneState::new(&config);
        assert_eq!(state.character.pos, Vec2::new(50.0, 50.0));
        // Viewport starts centered on the spawn
        assert_eq!(state.viewport.offset, Vec2::new(25.0, 25.0));
        assert!(state.obstacles.is_empty());
    }
}
