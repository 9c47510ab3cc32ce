//! Ship kinematic state and play area

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::normalize_angle;

/// Size of the toroidal play area. Positions live in `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_HEIGHT)
    }
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }
}

/// The controllable ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Heading in radians, unbounded (never wrapped by the simulation)
    pub rotation: f32,
    /// Screen position (y grows downward)
    pub pos: Vec2,
    /// Velocity in px/ms
    pub vel: Vec2,
}

impl Ship {
    /// Initial heading: pointing up the screen
    pub const START_ROTATION: f32 = -std::f32::consts::FRAC_PI_2;

    /// A ship at rest in the middle of the play area, nose up
    pub fn new(bounds: Bounds) -> Self {
        Self {
            rotation: Self::START_ROTATION,
            pos: bounds.center(),
            vel: Vec2::ZERO,
        }
    }

    /// Unit vector along the current heading
    #[inline]
    pub fn heading(&self) -> Vec2 {
        Vec2::new(self.rotation.cos(), self.rotation.sin())
    }

    /// Heading reduced to [-π, π) for drawing
    pub fn display_rotation(&self) -> f32 {
        normalize_angle(self.rotation)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}
