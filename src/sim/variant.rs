//! Demo variants sharing the same ship state
//!
//! Each variant is a subset of the full thrust-ship motion.

use serde::{Deserialize, Serialize};

use super::state::Ship;
use super::tick::{advance, turn};
use crate::input::Controls;
use crate::sanitize_dt;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Variant {
    /// A square spinning at a constant rate, no input
    SpinningSquare,
    /// A ship that turns in place with Left/Right
    RotatingShip,
    /// Turn, thrust, drag and wrap-around
    #[default]
    ThrustShip,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::SpinningSquare,
        Variant::RotatingShip,
        Variant::ThrustShip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::SpinningSquare => "Spinning square",
            Variant::RotatingShip => "Rotating ship",
            Variant::ThrustShip => "Thrust ship",
        }
    }

    /// Advance the ship by `dt` ms under this variant's rules
    pub fn step(&self, ship: Ship, controls: &Controls, tuning: &Tuning, dt: f32) -> Ship {
        let dt = sanitize_dt(dt);
        match self {
            Variant::SpinningSquare => Ship {
                rotation: ship.rotation + tuning.spin_rate * dt,
                ..ship
            },
            Variant::RotatingShip => Ship {
                rotation: turn(ship.rotation, controls, tuning.turn_rate, dt),
                ..ship
            },
            Variant::ThrustShip => advance(ship, controls, tuning, dt),
        }
    }
}
