//! Session: the one ship and keyboard state a host drives
//!
//! Hosts call the typed entry points directly from their event callbacks,
//! or queue `Event`s and feed them through `handle`.

use crate::input::{Controls, Key, KeyboardState};
use crate::sim::{Ship, Variant};
use crate::sanitize_dt;
use crate::tuning::Tuning;

/// Host input delivered to a session
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Raw key identifier went down
    KeyDown(String),
    /// Raw key identifier went up
    KeyUp(String),
    /// Animation frame with elapsed ms since the previous one
    Frame(f32),
}

#[derive(Debug, Clone)]
pub struct Session {
    ship: Ship,
    keys: KeyboardState,
    tuning: Tuning,
    variant: Variant,
    /// Frames advanced since the last reset
    ticks: u64,
    /// Simulated ms since the last reset (after capping)
    elapsed: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            ship: Ship::new(tuning.bounds),
            keys: KeyboardState::new(),
            tuning,
            variant: Variant::default(),
            ticks: 0,
            elapsed: 0.0,
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn keys(&self) -> &KeyboardState {
        &self.keys
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn key_down(&mut self, raw: &str) -> Key {
        let key = self.keys.key_down(raw);
        log::debug!("key down: {:?} ({:?})", key, raw);
        key
    }

    pub fn key_up(&mut self, raw: &str) -> Key {
        let key = self.keys.key_up(raw);
        log::debug!("key up: {:?} ({:?})", key, raw);
        key
    }

    /// Release everything, e.g. on window blur where keyup never arrives
    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    /// Advance one animation frame. Returns the updated ship.
    pub fn frame(&mut self, dt: f32) -> &Ship {
        let dt = sanitize_dt(dt);
        let capped = self.tuning.cap_dt(dt);
        if capped < dt {
            log::warn!("Frame time {:.1} ms capped to {:.1} ms", dt, capped);
        }

        let controls = Controls::from_keys(&self.keys);
        self.ship = self.variant.step(self.ship, &controls, &self.tuning, capped);
        self.ticks += 1;
        self.elapsed += f64::from(capped);
        &self.ship
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::KeyDown(raw) => {
                self.key_down(&raw);
            }
            Event::KeyUp(raw) => {
                self.key_up(&raw);
            }
            Event::Frame(dt) => {
                self.frame(dt);
            }
        }
    }

    /// Put the ship back at the start. Held keys are kept.
    pub fn reset(&mut self) {
        self.ship = Ship::new(self.tuning.bounds);
        self.ticks = 0;
        self.elapsed = 0.0;
        log::info!("Session reset ({})", self.variant.as_str());
    }

    /// Switch variant and restart from the initial ship
    pub fn set_variant(&mut self, variant: Variant) {
        if variant != self.variant {
            log::info!("Variant: {} -> {}", self.variant.as_str(), variant.as_str());
            self.variant = variant;
        }
        self.reset();
    }

    /// Swap tuning without touching the current ship
    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.tuning = tuning.sanitized();
    }
}
