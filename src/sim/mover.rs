//! The integration core: acceleration → velocity → position, once per tick.
//!
//! Friction here is a discrete damping term (proportional to the
//! *current* velocity, applied once before integration), not true drag.

use glam::Vec2;
use hecs::World;

use crate::defs::{LIQUID_VEL_EPSILON, VEL_EPSILON};
use crate::world::Grid;

use super::{Collider, FrictionAxis, Mover, Position, Velocity};

/// Pipeline step 2: integrate every mover.
pub fn integrate(world: &mut World, grid: &Grid) {
    for (_, (pos, vel, mover, collider)) in world.query_mut::<(
        &mut Position,
        &mut Velocity,
        &mut Mover,
        Option<&mut Collider>,
    )>() {
        /* acceleration: base + input, then damping on the friction axis */
        let mut acc = mover.base_accel + mover.input_accel;
        match mover.friction_axis {
            FrictionAxis::X => acc.x += vel.0.x * mover.friction,
            FrictionAxis::Y => acc.y += vel.0.y * mover.friction,
            FrictionAxis::Both => acc += vel.0 * mover.friction,
            FrictionAxis::None => {}
        }
        mover.accel = acc;

        /* velocity, with snap-to-zero below epsilon */
        let mut v = vel.0 + acc;
        if let Some(collider) = collider {
            if collider.liquid_slowdown != 0.0 {
                v.x /= 1.0 + collider.liquid_slowdown;
                if v.x.abs() < LIQUID_VEL_EPSILON {
                    v.x = 0.0;
                }
                collider.liquid_slowdown = 0.0;
            }
        }
        if v.x.abs() < VEL_EPSILON {
            v.x = 0.0;
        }
        if v.y.abs() < VEL_EPSILON {
            v.y = 0.0;
        }
        vel.0 = v;

        /* position: Verlet-like half-acceleration term, plain Euler for
        frictionless movers */
        let delta = if mover.friction_axis == FrictionAxis::None {
            v
        } else {
            v + 0.5 * acc
        };
        write_position(pos, vel, pos.0 + delta, grid);
    }
}

/// Clamped position write: positions stay inside
/// `[0, grid.width] × [0, grid.height]`, and hitting a world edge kills
/// momentum on that axis instead of bouncing.
///
/// The min/max composition also keeps a NaN coordinate from ever being
/// stored: `NaN.min(b).max(a)` resolves to a bound.
pub fn write_position(pos: &mut Position, vel: &mut Velocity, new: Vec2, grid: &Grid) {
    let (w, h) = (grid.width(), grid.height());
    if new.x < 0.0 || w < new.x {
        vel.0.x = 0.0;
    }
    if new.y < 0.0 || h < new.y {
        vel.0.y = 0.0;
    }
    pos.0.x = new.x.min(w).max(0.0);
    pos.0.y = new.y.min(h).max(0.0);
}
