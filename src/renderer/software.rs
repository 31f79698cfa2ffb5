//! Software back-end: a plain `u32` framebuffer plus a tiny sprite bank.
//!
//! The bank doubles as the [`AnimationSource`] collaborator: it maps the
//! animation names in [`defs::ANIMATIONS`](crate::defs::ANIMATIONS) to
//! generated placeholder frames, the way a real host would map them to
//! sprite-sheet cut-outs.

use std::collections::HashMap;

use crate::defs;
use crate::sim::{Animation, AnimationSource, FrameId};
use crate::world::Aabb;

use super::{BLUE, Canvas, Rgba, WHITE};

/// Sentinel pixel value treated as transparent when blitting (alpha byte
/// set, outside the `0x00RRGGBB` range).
pub const TRANSPARENT: Rgba = 0xFF00_0000;

#[derive(Clone, Debug)]
pub struct Frame {
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

/// Named sprite frames, addressed by [`FrameId`].
#[derive(Default)]
pub struct SpriteBank {
    frames: Vec<Frame>,
    by_name: HashMap<String, FrameId>,
}

impl SpriteBank {
    /// Bank pre-filled with generated placeholder frames for every name
    /// the default animation table references.
    pub fn with_placeholders() -> Self {
        let mut bank = Self::default();
        for names in defs::ANIMATIONS.values() {
            for (step, name) in names.iter().enumerate() {
                if !bank.by_name.contains_key(*name) {
                    bank.insert(name, placeholder_frame(step));
                }
            }
        }
        bank
    }

    pub fn insert(&mut self, name: &str, frame: Frame) -> FrameId {
        let id = FrameId(self.frames.len() as u16);
        self.frames.push(frame);
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(id.0 as usize)
    }

    pub fn id(&self, name: &str) -> Option<FrameId> {
        self.by_name.get(name).copied()
    }
}

impl AnimationSource for SpriteBank {
    fn animation(&self, name: &str, delay_ms: u64, flip: bool) -> Option<Animation> {
        let names = defs::ANIMATIONS.get(name)?;
        let frames = names
            .iter()
            .map(|n| self.id(n))
            .collect::<Option<Vec<_>>>()?;
        Some(Animation::new(frames, delay_ms, flip))
    }
}

/// 10×10 stick figure; the legs shift with `step` so walking visibly
/// cycles even with placeholder art.
fn placeholder_frame(step: usize) -> Frame {
    const W: usize = 10;
    const H: usize = 10;
    let mut pixels = vec![TRANSPARENT; W * H];
    for y in 1..7 {
        for x in 2..8 {
            pixels[y * W + x] = BLUE;
        }
    }
    let leg = 2 + (step % 3);
    for y in 7..H {
        pixels[y * W + leg] = BLUE;
        pixels[y * W + (W - 1 - leg)] = BLUE;
    }
    Frame {
        w: W,
        h: H,
        pixels,
    }
}

/* ── framebuffer canvas ─────────────────────────────────────────────── */

pub struct Software {
    width: usize,
    height: usize,
    fb: Vec<Rgba>,
    bank: SpriteBank,
}

impl Software {
    pub fn new(width: usize, height: usize, bank: SpriteBank) -> Self {
        Self {
            width,
            height,
            fb: vec![WHITE; width * height],
            bank,
        }
    }

    #[inline]
    pub fn bank(&self) -> &SpriteBank {
        &self.bank
    }

    #[inline]
    pub fn buffer(&self) -> &[Rgba] {
        &self.fb
    }

    pub fn begin_frame(&mut self, clear: Rgba) {
        self.fb.fill(clear);
    }

    /// Horizontal line clipped to the buffer, for grid overlays.
    pub fn hline(&mut self, y: i32, color: Rgba) {
        if (0..self.height as i32).contains(&y) {
            let row = y as usize * self.width;
            self.fb[row..row + self.width].fill(color);
        }
    }

    /// Vertical line clipped to the buffer.
    pub fn vline(&mut self, x: i32, color: Rgba) {
        if (0..self.width as i32).contains(&x) {
            for y in 0..self.height {
                self.fb[y * self.width + x as usize] = color;
            }
        }
    }

    fn clip(&self, dst: &Aabb) -> (usize, usize, usize, usize) {
        let x0 = (dst.min.x.max(0.0) as usize).min(self.width);
        let y0 = (dst.min.y.max(0.0) as usize).min(self.height);
        let x1 = ((dst.max.x.min(self.width as f32)).max(0.0) as usize).max(x0);
        let y1 = ((dst.max.y.min(self.height as f32)).max(0.0) as usize).max(y0);
        (x0, y0, x1, y1)
    }
}

impl Canvas for Software {
    fn fill_rect(&mut self, color: Rgba, dst: Aabb) {
        let (x0, y0, x1, y1) = self.clip(&dst);
        for y in y0..y1 {
            self.fb[y * self.width + x0..y * self.width + x1].fill(color);
        }
    }

    fn draw(&mut self, frame: FrameId, dst: Aabb, flip: bool) {
        let Some(frame) = self.bank.frame(frame).cloned() else {
            return;
        };
        let (x0, y0, x1, y1) = self.clip(&dst);
        let (dw, dh) = (x1.saturating_sub(x0), y1.saturating_sub(y0));
        if dw == 0 || dh == 0 {
            return;
        }
        // nearest-neighbour stretch
        for dy in 0..dh {
            let sy = dy * frame.h / dh;
            for dx in 0..dw {
                let mut sx = dx * frame.w / dw;
                if flip {
                    sx = frame.w - 1 - sx;
                }
                let texel = frame.pixels[sy * frame.w + sx];
                if texel != TRANSPARENT {
                    self.fb[(y0 + dy) * self.width + x0 + dx] = texel;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RED;
    use glam::Vec2;

    #[test]
    fn bank_resolves_default_animations() {
        let bank = SpriteBank::with_placeholders();
        let walk = bank.animation(defs::ANIM_WALK, 120, false).unwrap();
        let stand = bank.animation(defs::ANIM_STAND, 120, true).unwrap();
        assert!(!walk.flip);
        assert!(stand.flip);
        assert!(bank.animation("moonwalk", 120, false).is_none());
    }

    #[test]
    fn fill_rect_clips_to_buffer() {
        let mut sw = Software::new(16, 16, SpriteBank::default());
        sw.fill_rect(RED, Aabb::new(Vec2::new(-5.0, -5.0), Vec2::new(4.0, 4.0)));
        assert_eq!(sw.buffer()[0], RED);
        assert_eq!(sw.buffer()[3 * 16 + 3], RED);
        assert_eq!(sw.buffer()[4 * 16 + 4], WHITE);
    }

    #[test]
    fn fill_rect_fully_outside_is_a_noop() {
        let mut sw = Software::new(16, 16, SpriteBank::default());
        // entirely right of and below the buffer
        sw.fill_rect(RED, Aabb::new(Vec2::new(20.0, 0.0), Vec2::new(30.0, 4.0)));
        sw.fill_rect(RED, Aabb::new(Vec2::new(0.0, 20.0), Vec2::new(4.0, 30.0)));
        assert!(sw.buffer().iter().all(|&px| px == WHITE));
    }

    #[test]
    fn flipped_draw_mirrors_pixels() {
        let mut bank = SpriteBank::default();
        // 2x1 frame: red | blue
        let id = bank.insert(
            "half",
            Frame {
                w: 2,
                h: 1,
                pixels: vec![RED, BLUE],
            },
        );
        let mut sw = Software::new(2, 1, bank);

        sw.draw(id, Aabb::new(Vec2::ZERO, Vec2::new(2.0, 1.0)), false);
        assert_eq!(sw.buffer(), &[RED, BLUE]);

        sw.draw(id, Aabb::new(Vec2::ZERO, Vec2::new(2.0, 1.0)), true);
        assert_eq!(sw.buffer(), &[BLUE, RED]);
    }
}
