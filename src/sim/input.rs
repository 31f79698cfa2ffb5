//! Maps raw analog axis values to movement intent.
//!
//! The axis *device* is a host concern; the sim only sees the
//! [`AxisSource`] trait. A missing controller degrades to idle (all zero),
//! it is never an error.

use glam::Vec2;
use hecs::World;

use crate::defs::AXIS_CLAMP;

use super::{InputDriven, Mover};

pub const AXIS_X: usize = 0;
pub const AXIS_Y: usize = 1;

pub trait AxisSource {
    /// Raw reading for `axis` in [-1, 1]; 0.0 when no device is attached.
    fn axis(&self, axis: usize) -> f32;
}

/// The degrade-to-idle device.
pub struct NoDevice;

impl AxisSource for NoDevice {
    fn axis(&self, _axis: usize) -> f32 {
        0.0
    }
}

/// Deadzone-filter and clamp one raw axis reading.
///
/// Readings below the deadzone are stick drift and become 0; readings at
/// or beyond ±1 are clamped to ±0.99 so downstream velocity math never
/// sees an exact full deflection. Non-finite readings are treated as a
/// dead stick.
pub fn normalized(raw: f32, deadzone: f32) -> f32 {
    if !raw.is_finite() || raw.abs() < deadzone {
        return 0.0;
    }
    raw.clamp(-AXIS_CLAMP, AXIS_CLAMP)
}

/// Pipeline step 1: write each input-driven entity's acceleration intent.
pub fn sample_input(world: &mut World, axes: &dyn AxisSource) {
    for (_, (driven, mover)) in world.query_mut::<(&InputDriven, &mut Mover)>() {
        let x = normalized(axes.axis(AXIS_X), driven.deadzone);
        let y = normalized(axes.axis(AXIS_Y), driven.deadzone);
        mover.input_accel = Vec2::new(x * driven.scale.x, y * driven.scale.y);
    }
}
