//! Axis-aligned boxes in pixel space.
//!
//! Screen convention throughout the engine: +x right, +y **down**, so
//! `min.y` is the top edge and `max.y` the bottom edge.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of `size` anchored at its bottom-center point.
    ///
    /// Entities use the bottom-center as their canonical position, so
    /// this is the bridge between `Position` and collision space.
    pub fn from_midbottom(anchor: Vec2, size: Vec2) -> Self {
        let min = Vec2::new(anchor.x - size.x * 0.5, anchor.y - size.y);
        Self {
            min,
            max: min + size,
        }
    }

    #[inline]
    pub fn midbottom(&self) -> Vec2 {
        Vec2::new((self.min.x + self.max.x) * 0.5, self.max.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Strict overlap test: boxes that merely share an edge do not
    /// overlap, which is what keeps a grounded entity from colliding
    /// with the block it is standing on.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midbottom_round_trip() {
        let bb = Aabb::from_midbottom(Vec2::new(100.0, 80.0), Vec2::new(10.0, 20.0));
        assert_eq!(bb.min, Vec2::new(95.0, 60.0));
        assert_eq!(bb.max, Vec2::new(105.0, 80.0));
        assert_eq!(bb.midbottom(), Vec2::new(100.0, 80.0));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = a.translated(Vec2::new(10.0, 0.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&b.translated(Vec2::new(-0.5, 0.0))));
    }
}
