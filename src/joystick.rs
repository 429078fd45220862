//! Virtual joystick: pointer sessions in, direction vectors out
//!
//! Owns at most one pointer session at a time; mouse and touch share the
//! slot. Raw pointer coordinates become a radius-clamped, normalized
//! direction with magnitude <= 1. The host surface feeds events in and
//! forwards the emitted signals; rendering reads the knob offset.

use glam::Vec2;

use crate::consts::{JOYSTICK_SIZE, STICK_SIZE};
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Identity of the pointer that owns the active session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerId {
    Mouse,
    /// Touch identifier from the host's touch list
    Touch(i32),
}

/// Output signal of the joystick
///
/// `Stop` is distinct from `Move(ZERO)` so consumers can tell "released"
/// from "held at center". It is emitted exactly once per session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JoystickSignal {
    Move(Vec2),
    Stop,
}

/// Pointer-tracking virtual joystick
///
/// State machine: idle until a pointer goes down on the widget, active
/// until that same pointer is released. Events from any other pointer are
/// ignored while a session runs.
#[derive(Debug, Clone)]
pub struct VirtualJoystick {
    /// Widget diameter in host pixels
    size: f32,
    /// Knob diameter in host pixels
    stick_size: f32,
    /// Widget center in host coordinates, captured at session start
    center: Vec2,
    /// Clamped knob offset from the center, host pixels
    knob: Vec2,
    /// Latest emitted direction, zero when idle
    direction: Vec2,
    session: Option<PointerId>,
}

impl Default for VirtualJoystick {
    fn default() -> Self {
        Self::new(JOYSTICK_SIZE, STICK_SIZE)
    }
}

impl VirtualJoystick {
    pub fn new(size: f32, stick_size: f32) -> Self {
        Self {
            size,
            stick_size,
            center: Vec2::ZERO,
            knob: Vec2::ZERO,
            direction: Vec2::ZERO,
            session: None,
        }
    }

    /// Widget diameter in host pixels
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Knob diameter in host pixels
    pub fn stick_size(&self) -> f32 {
        self.stick_size
    }

    /// True while a pointer session is active
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Latest emitted direction (zero when idle), magnitude <= 1
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Clamped knob offset in host pixels, for the presentation layer
    pub fn knob_offset(&self) -> Vec2 {
        self.knob
    }

    /// Pointer pressed on the widget
    ///
    /// Starts a session unless one is already active (a second touch, or a
    /// mouse press mid-touch, is silently ignored). `center` is the widget
    /// center in the same coordinate space as `pos`.
    pub fn pointer_down(
        &mut self,
        id: PointerId,
        center: Vec2,
        pos: Vec2,
    ) -> Option<JoystickSignal> {
        if self.session.is_some() {
            return None;
        }
        self.session = Some(id);
        self.center = center;
        Some(self.track(pos))
    }

    /// Pointer moved anywhere on the host surface
    ///
    /// Only the session's own pointer is tracked; a move while idle, or
    /// from a foreign pointer, is a no-op.
    pub fn pointer_move(&mut self, id: PointerId, pos: Vec2) -> Option<JoystickSignal> {
        if self.session != Some(id) {
            return None;
        }
        Some(self.track(pos))
    }

    /// Pointer released
    ///
    /// Ends the session iff `id` owns it, emitting `Stop` exactly once.
    pub fn pointer_up(&mut self, id: PointerId) -> Option<JoystickSignal> {
        if self.session != Some(id) {
            return None;
        }
        Some(self.reset())
    }

    /// Force the session closed regardless of owner (host focus loss).
    /// No-op when idle.
    pub fn force_release(&mut self) -> Option<JoystickSignal> {
        if self.session.is_none() {
            return None;
        }
        Some(self.reset())
    }

    fn track(&mut self, pos: Vec2) -> JoystickSignal {
        let max_radius = self.size / 2.0;
        let (r, theta) = cartesian_to_polar(pos - self.center);
        // Zero-length offsets stay zero instead of propagating NaN
        self.knob = if r > 0.0 {
            polar_to_cartesian(r.min(max_radius), theta)
        } else {
            Vec2::ZERO
        };
        self.direction = self.knob / max_radius;
        JoystickSignal::Move(self.direction)
    }

    fn reset(&mut self) -> JoystickSignal {
        self.session = None;
        self.knob = Vec2::ZERO;
        self.direction = Vec2::ZERO;
        JoystickSignal::Stop
    }
}
