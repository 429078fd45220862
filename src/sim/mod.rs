//! Deterministic simulation module
//!
//! All movement logic lives here. This module must stay pure:
//! - No rendering or platform dependencies
//! - Obstacles compiled once per configuration, immutable afterwards
//! - Every tick is a plain function of (state, input, dt)

pub mod camera;
pub mod collision;
pub mod map;
pub mod state;
pub mod tick;

pub use camera::Viewport;
pub use collision::{clamp_to_map, collides, resolve_movement};
pub use map::{MapConfig, MapObject, ObjectKind, compile, demo_map};
pub use state::{CharacterState, Obstacle, SceneState};
pub use tick::{TickInput, integrate, tick};
