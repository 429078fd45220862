//! Shell settings and preferences
//!
//! Persisted in LocalStorage. Only presentation preferences live here;
//! the simulation itself is session-local and never saved.

use serde::{Deserialize, Serialize};

use crate::consts::{JOYSTICK_SIZE, STICK_SIZE};

/// Presentation-shell preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Joystick widget diameter, CSS pixels
    pub joystick_size: f32,
    /// Joystick knob diameter, CSS pixels
    pub stick_size: f32,
    /// Show the FPS counter
    pub show_fps: bool,
    /// Mirror the joystick to the left edge of the screen
    pub left_handed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            joystick_size: JOYSTICK_SIZE,
            stick_size: STICK_SIZE,
            show_fps: false,
            left_handed: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "wander_settings";

    /// Clamp sizes to something usable; the knob never exceeds the widget
    pub fn sanitize(mut self) -> Self {
        self.joystick_size = self.joystick_size.clamp(60.0, 400.0);
        self.stick_size = self.stick_size.clamp(20.0, self.joystick_size);
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str::<Settings>(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings.sanitize();
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_clamps_sizes() {
        let settings = Settings {
            joystick_size: 1000.0,
            stick_size: 900.0,
            ..Settings::default()
        }
        .sanitize();
        assert_eq!(settings.joystick_size, 400.0);
        assert_eq!(settings.stick_size, 400.0);

        let settings = Settings {
            joystick_size: 10.0,
            stick_size: 5.0,
            ..Settings::default()
        }
        .sanitize();
        assert_eq!(settings.joystick_size, 60.0);
        assert_eq!(settings.stick_size, 20.0);
    }
}
