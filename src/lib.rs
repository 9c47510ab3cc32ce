//! Thrust Ship - a canvas ship that turns, thrusts and wraps around the screen
//!
//! Core modules:
//! - `input`: Held-key tracking from raw keydown/keyup identifiers
//! - `sim`: Pure motion integration (rotation, thrust, drag, clamp, wrap)
//! - `tuning`: Data-driven motion constants
//! - `session`: Host-facing owner of the ship and keyboard state

pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;

pub use input::{Controls, Key, KeyboardState};
pub use session::{Event, Session};
pub use sim::{Bounds, Ship, Variant, advance};
pub use tuning::{DragMode, Tuning};

/// Default motion constants. Time is measured in milliseconds.
pub mod consts {
    use std::f32::consts::FRAC_PI_2;

    /// Turn rate: a quarter turn every 200 ms
    pub const TURN_RATE: f32 = FRAC_PI_2 / 200.0;
    /// Spin rate of the rotating square: a quarter turn per second
    pub const SPIN_RATE: f32 = FRAC_PI_2 / 1000.0;
    /// Thrust acceleration (px/ms²)
    pub const THRUST_ACCEL: f32 = 0.07;
    /// Velocity multiplier applied while coasting
    pub const DRAG_FACTOR: f32 = 0.98;
    /// Per-axis speed limit (px/ms)
    pub const MAX_SPEED: f32 = 1.0;

    /// Play area
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Largest frame time fed to the integrator (ms), guards against resumed tabs
    pub const MAX_FRAME_DT: f32 = 100.0;
    /// Nominal frame time at 60 Hz (ms)
    pub const FRAME_DT: f32 = 1000.0 / 60.0;
}

/// Teleporting wrap into `[0, extent]`.
///
/// Below zero snaps to `extent`, above `extent` snaps to zero. This is a snap,
/// not a modulo: overshoot beyond the boundary is discarded.
#[inline]
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

/// Elapsed time usable by the integrator: negative, NaN and infinite values become 0
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}

/// Clamp into `[-|limit|, |limit|]`. A NaN limit leaves the value as is.
#[inline]
pub fn clamp_axis(value: f32, limit: f32) -> f32 {
    let limit = limit.abs();
    value.max(-limit).min(limit)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    if !angle.is_finite() {
        return 0.0;
    }
    angle %= 2.0 * PI;
    if angle >= PI {
        angle -= 2.0 * PI;
    } else if angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
