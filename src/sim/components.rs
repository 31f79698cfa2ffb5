//! Capability components for the *hecs* world.
//!
//! An entity opts into a behavior by carrying the matching component; the
//! per-tick pipeline in [`tic`](super::tic) runs each behavior's system in
//! a fixed order. The editor cursor is `Position + Velocity + Mover +
//! InputDriven + Sprite`; the player additionally carries `Collider`,
//! `Jumper` and `Animated`.

use glam::Vec2;

use crate::renderer::Rgba;

/// Bottom-center anchor of the entity's bounding box, in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

/// Which velocity component(s) receive damping each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrictionAxis {
    None,
    X,
    Y,
    Both,
}

/// Acceleration/velocity/position integration state.
#[derive(Debug, Clone, Copy)]
pub struct Mover {
    /// Constant per-tick contribution (gravity for the player, zero for
    /// the cursor).
    pub base_accel: Vec2,
    /// Input-driven contribution, rewritten by `sample_input` every tick.
    pub input_accel: Vec2,
    /// Last computed total acceleration (kept for the position update).
    pub accel: Vec2,
    /// Damping coefficient, negative for drag.
    pub friction: f32,
    pub friction_axis: FrictionAxis,
}

impl Mover {
    pub fn new(base_accel: Vec2, friction: f32, friction_axis: FrictionAxis) -> Self {
        Self {
            base_accel,
            input_accel: Vec2::ZERO,
            accel: Vec2::ZERO,
            friction,
            friction_axis,
        }
    }
}

/// Scales normalized axis readings into acceleration.
#[derive(Debug, Clone, Copy)]
pub struct InputDriven {
    pub scale: Vec2,
    pub deadzone: f32,
}

/// Collision participant: a bounding box around [`Position`].
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    pub size: Vec2,
    /// Slowdown recorded by the resolver when overlapping a liquid block;
    /// consumed (and cleared) by the next velocity step.
    pub liquid_slowdown: f32,
}

impl Collider {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            liquid_slowdown: 0.0,
        }
    }
}

/// Fallback visual for entities without an animation (and the editor
/// cursor's marker).
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub color: Rgba,
    pub size: Vec2,
}
