mod animation;
mod collision;
mod components;
mod input;
mod jump;
mod mover;
mod spawn;
mod tic;

pub use animation::{
    Animated, Animation, AnimationError, AnimationSet, AnimationSource, Clock, Facing, FrameId,
    ManualClock, SystemClock,
};
pub use collision::{Hit, detect, is_on_plat};
pub use components::{Collider, FrictionAxis, InputDriven, Mover, Position, Sprite, Velocity};
pub use input::{AXIS_X, AXIS_Y, AxisSource, NoDevice, normalized};
pub use jump::{JumpCmd, JumpState, Jumper};
pub use spawn::{spawn_arrow, spawn_player};
pub use tic::TicRunner;
