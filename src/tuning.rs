//! Motion tuning
//!
//! Every constant the integrator uses lives here so it can be tweaked from
//! JSON without a rebuild. Persisted in LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Bounds;

/// How coasting drag relates to elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DragMode {
    /// `drag_factor` applied once per (non-empty) tick, whatever its length
    #[default]
    PerTick,
    /// `drag_factor` applied once per time unit: `drag_factor^dt`
    PerTimeUnit,
}

impl DragMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DragMode::PerTick => "PerTick",
            DragMode::PerTimeUnit => "PerTimeUnit",
        }
    }

    /// The other mode
    pub fn toggled(&self) -> Self {
        match self {
            DragMode::PerTick => DragMode::PerTimeUnit,
            DragMode::PerTimeUnit => DragMode::PerTick,
        }
    }

    /// Velocity multiplier for a tick of length `dt`
    pub fn factor(&self, drag_factor: f32, dt: f32) -> f32 {
        if dt <= 0.0 {
            return 1.0;
        }
        match self {
            DragMode::PerTick => drag_factor,
            DragMode::PerTimeUnit => drag_factor.powf(dt),
        }
    }
}

/// Motion constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Turn rate magnitude (radians per ms)
    pub turn_rate: f32,
    /// Rotation rate of the spinning square (radians per ms)
    pub spin_rate: f32,
    /// Acceleration along the heading while thrusting (px/ms²)
    pub thrust_accel: f32,
    /// Velocity multiplier while coasting, in [0, 1]
    pub drag_factor: f32,
    pub drag_mode: DragMode,
    /// Per-axis velocity limit (px/ms)
    pub max_speed: f32,
    /// Play area extents
    pub bounds: Bounds,
    /// Largest dt a session hands to the integrator. `None` disables the cap.
    pub max_frame_dt: Option<f32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            turn_rate: TURN_RATE,
            spin_rate: SPIN_RATE,
            thrust_accel: THRUST_ACCEL,
            drag_factor: DRAG_FACTOR,
            drag_mode: DragMode::PerTick,
            max_speed: MAX_SPEED,
            bounds: Bounds::new(WORLD_WIDTH, WORLD_HEIGHT),
            max_frame_dt: Some(MAX_FRAME_DT),
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "thrust_ship_tuning";

    /// Parse tuning from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Force values into ranges the integrator can work with.
    /// Non-finite values fall back to their defaults.
    pub fn sanitized(mut self) -> Self {
        self.turn_rate = finite_or(self.turn_rate, TURN_RATE);
        self.spin_rate = finite_or(self.spin_rate, SPIN_RATE);
        self.thrust_accel = finite_or(self.thrust_accel, THRUST_ACCEL);
        self.drag_factor = finite_or(self.drag_factor, DRAG_FACTOR).clamp(0.0, 1.0);
        self.max_speed = finite_or(self.max_speed, MAX_SPEED).abs();
        self.bounds = Bounds::new(
            finite_or(self.bounds.width, WORLD_WIDTH).abs(),
            finite_or(self.bounds.height, WORLD_HEIGHT).abs(),
        );
        self.max_frame_dt = self
            .max_frame_dt
            .filter(|cap| cap.is_finite() && *cap > 0.0);
        self
    }

    /// Cap a host frame time according to `max_frame_dt`
    pub fn cap_dt(&self, dt: f32) -> f32 {
        match self.max_frame_dt {
            Some(cap) => dt.min(cap),
            None => dt,
        }
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
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

#[inline]
fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
