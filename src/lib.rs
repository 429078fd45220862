//! Wander - pointer-driven 2D character movement
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collision, camera)
//! - `joystick`: Virtual joystick pointer-session state machine
//! - `platform`: Browser event/frame glue with explicit teardown
//! - `settings`: Presentation-shell preferences

pub mod joystick;
pub mod platform;
pub mod settings;
pub mod sim;

pub use joystick::VirtualJoystick;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference frame interval the movement speed is expressed against.
    /// Speed means "map units per 60 Hz frame" no matter how fast the host
    /// actually schedules ticks.
    pub const REFERENCE_DT: f32 = 1.0 / 60.0;
    /// Longest frame delta fed to the simulation (a backgrounded tab can
    /// deliver multi-second gaps)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Joystick widget diameter in host pixels
    pub const JOYSTICK_SIZE: f32 = 150.0;
    /// Joystick knob diameter in host pixels
    pub const STICK_SIZE: f32 = 60.0;

    /// Character bounding box edge in map units
    pub const CHARACTER_SIZE: f32 = 4.0;
    /// Character speed in map units per reference frame
    pub const CHARACTER_SPEED: f32 = 1.2;

    /// Fallback size for map objects that omit width/height
    pub const DEFAULT_OBJECT_SIZE: f32 = 5.0;
    /// Fallback paint priority
    pub const DEFAULT_PRIORITY: i32 = 0;
    /// Fallback dungeon wall thickness
    pub const DEFAULT_BORDER: f32 = 3.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
