//! Rendering abstraction layer.
//!
//! The engine never touches a pixel buffer directly: drawing goes through
//! the narrow [`Canvas`] trait ("fill this rectangle", "draw this frame
//! there"), so back-ends are swappable without touching game logic.

pub mod software;

use crate::sim::FrameId;
use crate::world::Aabb;

/// Pixel format `0x00RRGGBB`.
pub type Rgba = u32;

pub const WHITE: Rgba = 0x00FF_FFFF;
pub const BLACK: Rgba = 0x0000_0000;
pub const RED: Rgba = 0x00FF_0000;
pub const GREEN: Rgba = 0x0000_FF00;
pub const BLUE: Rgba = 0x0000_00FF;
pub const GREY: Rgba = 0x00D3_D3D3;

pub trait Canvas {
    /// Fill `dst` (world pixels) with a solid color.
    fn fill_rect(&mut self, color: Rgba, dst: Aabb);

    /// Draw a sprite frame stretched over `dst`, optionally mirrored
    /// horizontally.
    fn draw(&mut self, frame: FrameId, dst: Aabb, flip: bool);
}
