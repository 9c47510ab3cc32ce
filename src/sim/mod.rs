//! Motion simulation
//!
//! Pure and synchronous: every function here takes a ship snapshot and
//! returns the next one. No rendering, platform or logging dependencies.

pub mod state;
pub mod tick;
pub mod variant;

pub use state::{Bounds, Ship};
pub use tick::{advance, clamp_velocity, drag, integrate_position, thrust, turn};
pub use variant::Variant;
