//! Per-frame motion integration
//!
//! Steps run in a fixed order every tick:
//! 1. turn (Left/Right)
//! 2. thrust along the heading, or coast with drag
//! 3. clamp each velocity axis to `max_speed`
//! 4. move and wrap each position axis
//!
//! Thrust uses the heading from *before* this tick's turn.

use glam::Vec2;

use super::state::{Bounds, Ship};
use crate::input::Controls;
use crate::tuning::{DragMode, Tuning};
use crate::{clamp_axis, sanitize_dt, wrap_axis};

/// Advance the ship by `dt` milliseconds.
///
/// Pure: returns the next state. A `dt` of zero (or negative/NaN/infinite,
/// treated as zero) returns the ship untouched.
pub fn advance(ship: Ship, controls: &Controls, tuning: &Tuning, dt: f32) -> Ship {
    let dt = sanitize_dt(dt);
    if dt == 0.0 {
        return ship;
    }

    let heading = ship.heading();
    let rotation = turn(ship.rotation, controls, tuning.turn_rate, dt);

    let vel = if controls.thrust {
        thrust(ship.vel, heading, tuning.thrust_accel, dt)
    } else {
        drag(ship.vel, tuning.drag_factor, tuning.drag_mode, dt)
    };
    let vel = clamp_velocity(vel, tuning.max_speed);
    let pos = integrate_position(ship.pos, vel, tuning.bounds, dt);

    Ship { rotation, pos, vel }
}

/// Apply the held turn direction. Rotation is never wrapped.
#[inline]
pub fn turn(rotation: f32, controls: &Controls, turn_rate: f32, dt: f32) -> f32 {
    rotation + controls.turn() * turn_rate * dt
}

#[inline]
pub fn thrust(vel: Vec2, heading: Vec2, accel: f32, dt: f32) -> Vec2 {
    vel + heading * accel * dt
}

#[inline]
pub fn drag(vel: Vec2, drag_factor: f32, mode: DragMode, dt: f32) -> Vec2 {
    vel * mode.factor(drag_factor, dt)
}

/// Axis-wise box clamp. A diagonal velocity may reach `max_speed * √2`.
#[inline]
pub fn clamp_velocity(vel: Vec2, max_speed: f32) -> Vec2 {
    Vec2::new(clamp_axis(vel.x, max_speed), clamp_axis(vel.y, max_speed))
}

/// Move by `vel * dt`, then snap each axis back into the play area
#[inline]
pub fn integrate_position(pos: Vec2, vel: Vec2, bounds: Bounds, dt: f32) -> Vec2 {
    let next = pos + vel * dt;
    Vec2::new(
        wrap_axis(next.x, bounds.width),
        wrap_axis(next.y, bounds.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use proptest::prelude::*;

    const EPS: f32 = 1e-5;

    fn ship_at(rotation: f32, pos: Vec2, vel: Vec2) -> Ship {
        Ship { rotation, pos, vel }
    }

    fn thrusting() -> Controls {
        Controls {
            thrust: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let tuning = Tuning::default();
        // Out-of-range state would be clamped/wrapped by a real tick
        let ship = ship_at(7.0, Vec2::new(-50.0, 900.0), Vec2::new(3.0, -3.0));
        let controls = Controls {
            left: true,
            right: false,
            thrust: true,
        };
        assert_eq!(advance(ship, &controls, &tuning, 0.0), ship);
        assert_eq!(advance(ship, &Controls::default(), &tuning, 0.0), ship);
        assert_eq!(advance(ship, &controls, &tuning, -16.0), ship);
        assert_eq!(advance(ship, &controls, &tuning, f32::NAN), ship);
        assert_eq!(advance(ship, &controls, &tuning, f32::INFINITY), ship);
    }

    #[test]
    fn test_infinite_dt_keeps_resting_ship_finite() {
        let tuning = Tuning::default();
        let ship = Ship::new(tuning.bounds);
        let next = advance(ship, &Controls::default(), &tuning, f32::INFINITY);
        assert_eq!(next, ship);
        assert!(tuning.bounds.contains(next.pos));
    }

    #[test]
    fn test_negative_max_speed_clamps_by_magnitude() {
        let tuning = Tuning {
            max_speed: -1.0,
            ..Default::default()
        };
        let ship = ship_at(0.0, Vec2::new(400.0, 300.0), Vec2::new(3.0, -3.0));
        let next = advance(ship, &Controls::default(), &tuning, 16.0);
        assert_eq!(next.vel, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_thrust_from_rest() {
        let tuning = Tuning::default();
        let ship = ship_at(0.0, Vec2::new(400.0, 300.0), Vec2::ZERO);
        let next = advance(ship, &thrusting(), &tuning, 1.0);
        assert!((next.vel.x - 0.07).abs() < EPS);
        assert!(next.vel.y.abs() < EPS);
        assert!((next.pos.x - 400.07).abs() < 1e-3);
    }

    #[test]
    fn test_coasting_applies_drag() {
        let tuning = Tuning::default();
        let ship = ship_at(0.0, Vec2::new(400.0, 300.0), Vec2::new(1.0, 0.0));
        let next = advance(ship, &Controls::default(), &tuning, FRAME_DT);
        assert!((next.vel.x - 0.98).abs() < EPS);
        assert_eq!(next.vel.y, 0.0);
    }

    #[test]
    fn test_per_tick_drag_ignores_dt_length() {
        let tuning = Tuning::default();
        let ship = ship_at(0.0, Vec2::new(400.0, 300.0), Vec2::new(0.5, 0.0));
        let short = advance(ship, &Controls::default(), &tuning, 1.0);
        let long = advance(ship, &Controls::default(), &tuning, 30.0);
        assert_eq!(short.vel, long.vel);
    }

    #[test]
    fn test_per_time_unit_drag_compounds() {
        let tuning = Tuning {
            drag_mode: DragMode::PerTimeUnit,
            ..Default::default()
        };
        let ship = ship_at(0.0, Vec2::new(400.0, 300.0), Vec2::new(0.5, 0.0));
        let one = advance(ship, &Controls::default(), &tuning, 1.0);
        let two = advance(one, &Controls::default(), &tuning, 1.0);
        let both = advance(ship, &Controls::default(), &tuning, 2.0);
        assert!((two.vel.x - both.vel.x).abs() < EPS);
    }

    #[test]
    fn test_velocity_is_clamped_per_axis() {
        let tuning = Tuning::default();
        assert_eq!(clamp_velocity(Vec2::new(1.2, -1.2), 1.0), Vec2::new(1.0, -1.0));

        // Diagonal thrust saturates both axes, exceeding max_speed in magnitude
        let ship = ship_at(std::f32::consts::FRAC_PI_4, Vec2::new(400.0, 300.0), Vec2::ONE);
        let next = advance(ship, &thrusting(), &tuning, FRAME_DT);
        assert_eq!(next.vel, Vec2::new(1.0, 1.0));
        assert!(next.speed() > tuning.max_speed);
    }

    #[test]
    fn test_position_wraps_to_opposite_edge() {
        let tuning = Tuning::default();

        let ship = ship_at(0.0, Vec2::new(799.5, 300.0), Vec2::new(1.0, 0.0));
        let next = advance(ship, &thrusting(), &tuning, 1.0);
        assert_eq!(next.pos.x, 0.0);

        let ship = ship_at(0.0, Vec2::new(400.0, 0.5), Vec2::new(0.0, -1.0));
        let next = advance(ship, &Controls::default(), &tuning, 1.0);
        assert_eq!(next.pos.y, tuning.bounds.height);
    }

    #[test]
    fn test_integrate_position_snaps() {
        let bounds = Bounds::new(800.0, 600.0);
        let pos = integrate_position(Vec2::new(-4.0, 300.0), Vec2::new(-1.0, 0.0), bounds, 1.0);
        assert_eq!(pos, Vec2::new(800.0, 300.0));
        let pos = integrate_position(Vec2::new(804.0, 300.0), Vec2::new(1.0, 0.0), bounds, 1.0);
        assert_eq!(pos, Vec2::new(0.0, 300.0));
    }

    #[test]
    fn test_turn_direction() {
        let tuning = Tuning::default();
        let ship = Ship::new(tuning.bounds);

        let left = Controls {
            left: true,
            ..Default::default()
        };
        let right = Controls {
            right: true,
            ..Default::default()
        };
        let both = Controls {
            left: true,
            right: true,
            thrust: false,
        };

        let dt = 200.0;
        let quarter = std::f32::consts::FRAC_PI_2;
        let after_left = advance(ship, &left, &tuning, dt);
        let after_right = advance(ship, &right, &tuning, dt);
        let after_both = advance(ship, &both, &tuning, dt);
        assert!((after_left.rotation - (ship.rotation - quarter)).abs() < 1e-4);
        assert!((after_right.rotation - (ship.rotation + quarter)).abs() < 1e-4);
        assert_eq!(after_both.rotation, after_left.rotation);
    }

    #[test]
    fn test_rotation_is_not_wrapped() {
        let tuning = Tuning::default();
        let right = Controls {
            right: true,
            ..Default::default()
        };
        let mut ship = Ship::new(tuning.bounds);
        for _ in 0..120 {
            ship = advance(ship, &right, &tuning, FRAME_DT);
        }
        // 2 s at a quarter turn per 200 ms is 2.5 full turns
        assert!(ship.rotation > 4.0 * std::f32::consts::PI);
    }

    #[test]
    fn test_thrust_uses_heading_before_turn() {
        let tuning = Tuning {
            thrust_accel: 0.001,
            ..Default::default()
        };
        let controls = Controls {
            left: true,
            right: false,
            thrust: true,
        };
        let ship = ship_at(0.0, Vec2::new(400.0, 300.0), Vec2::ZERO);
        let next = advance(ship, &controls, &tuning, 100.0);

        assert!(next.rotation < 0.0);
        assert!((next.vel.x - 0.1).abs() < EPS);
        assert_eq!(next.vel.y, 0.0);
    }

    fn arb_ship() -> impl Strategy<Value = Ship> {
        (-100.0f32..100.0, -1000.0f32..2000.0, -1000.0f32..2000.0, -5.0f32..5.0, -5.0f32..5.0)
            .prop_map(|(rotation, x, y, vx, vy)| ship_at(rotation, Vec2::new(x, y), Vec2::new(vx, vy)))
    }

    fn arb_controls() -> impl Strategy<Value = Controls> {
        (any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(left, right, thrust)| Controls { left, right, thrust })
    }

    proptest! {
        #[test]
        fn prop_zero_dt_returns_same_ship(ship in arb_ship(), controls in arb_controls()) {
            prop_assert_eq!(advance(ship, &controls, &Tuning::default(), 0.0), ship);
        }

        #[test]
        fn prop_position_stays_in_bounds(ship in arb_ship(), controls in arb_controls(), dt in 0.001f32..1000.0) {
            let tuning = Tuning::default();
            let next = advance(ship, &controls, &tuning, dt);
            prop_assert!(tuning.bounds.contains(next.pos), "pos out of bounds: {:?}", next.pos);
        }

        #[test]
        fn prop_velocity_stays_clamped(ship in arb_ship(), controls in arb_controls(), dt in 0.001f32..1000.0) {
            let tuning = Tuning::default();
            let next = advance(ship, &controls, &tuning, dt);
            prop_assert!(next.vel.x.abs() <= tuning.max_speed);
            prop_assert!(next.vel.y.abs() <= tuning.max_speed);
        }
    }
}
