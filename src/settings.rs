//! Visitor preferences
//!
//! Persisted in LocalStorage; the native build always uses defaults.

use serde::{Deserialize, Serialize};

use crate::choreo::Timings;
use crate::consts::{KEYFRAME_STEPS, PERSPECTIVE};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Motion ===
    /// Collapse every animation to an instant hand-off
    pub reduced_motion: bool,
    /// Choreography durations
    pub timings: Timings,

    // === Orbits ===
    /// Samples per orbit keyframe timeline
    pub keyframe_steps: u32,
    /// CSS perspective distance of the solar system (px)
    pub perspective: f32,

    // === Guides ===
    /// Draw the projection lines from the orbit to a settled body
    pub show_projection: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            timings: Timings::default(),

            keyframe_steps: KEYFRAME_STEPS,
            perspective: PERSPECTIVE,

            show_projection: true,
        }
    }
}

impl Settings {
    /// Timings actually handed to the controller (respects reduced_motion)
    pub fn effective_timings(&self) -> Timings {
        if self.reduced_motion {
            Timings::reduced()
        } else {
            self.timings
        }
    }

    /// Keyframe sample count, never below one segment
    pub fn effective_keyframe_steps(&self) -> u32 {
        self.keyframe_steps.max(1)
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "orbit_folio_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(err) => log::warn!("Ignoring stored settings: {err}"),
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
