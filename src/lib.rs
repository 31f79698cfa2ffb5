//! plat_rs: a tiny 2D platformer engine with a built-in level editor.
//!
//! The library is split the same way the runtime is:
//!
//! * [`world`] - the tile grid that is both terrain and collision surface.
//! * [`sim`] - per-tick entity simulation (input, movement, collision,
//!   jumping, animation) on top of a *hecs* world.
//! * [`session`] - one level session: grid + entities + edit/play modes.
//! * [`renderer`] - the `Canvas` abstraction and a software back-end.
//!
//! Window, input device and clock are host concerns; `src/bin/plat.rs`
//! wires them up with *minifb*.

pub mod defs;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod world;
