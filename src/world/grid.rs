//! The tile grid: renderable terrain and collision surface in one.
//!
//! Every cell always holds exactly one [`Block`]; editing swaps the block
//! at a coordinate, never moves an existing one. Grid dimensions are fixed
//! after construction.

use std::fmt;

use bitflags::bitflags;
use glam::Vec2;

use crate::renderer::{BLUE, RED, Rgba, WHITE};
use crate::world::Aabb;

bitflags! {
    /// Which faces of a solid block push entities back.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SideFlags: u8 {
        const TOP    = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT   = 0b0100;
        const RIGHT  = 0b1000;
    }
}

/// Collision identity of a cell. Purely visual attributes live in
/// [`Block::color`], not here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlockKind {
    /// Walkable air.
    Empty,
    /// Impassable on the flagged sides.
    Solid { sides: SideFlags },
    /// Passable, but drags horizontal velocity down while overlapped.
    Liquid { slowdown: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    pub col: usize,
    pub row: usize,
    pub kind: BlockKind,
    pub color: Rgba,
}

impl Block {
    pub fn empty(col: usize, row: usize) -> Self {
        Self {
            col,
            row,
            kind: BlockKind::Empty,
            color: WHITE,
        }
    }

    /// Solid on all four sides.
    pub fn solid(col: usize, row: usize) -> Self {
        Self {
            col,
            row,
            kind: BlockKind::Solid {
                sides: SideFlags::all(),
            },
            color: RED,
        }
    }

    pub fn liquid(col: usize, row: usize, slowdown: f32) -> Self {
        Self {
            col,
            row,
            kind: BlockKind::Liquid { slowdown },
            color: BLUE,
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }
}

pub struct Grid {
    rows: usize,
    cols: usize,
    bwidth: f32,
    bheight: f32,
    /// Row-major, `rows * cols` entries.
    cells: Vec<Block>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, bwidth: f32, bheight: f32) -> Self {
        assert!(rows > 0 && cols > 0, "grid must have at least one cell");
        assert!(
            bwidth > 0.0 && bheight > 0.0,
            "block size must be positive"
        );
        let mut grid = Self {
            rows,
            cols,
            bwidth,
            bheight,
            cells: Vec::new(),
        };
        grid.reset();
        grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn bwidth(&self) -> f32 {
        self.bwidth
    }

    #[inline]
    pub fn bheight(&self) -> f32 {
        self.bheight
    }

    /// World pixel width = `cols * bwidth`.
    #[inline]
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.bwidth
    }

    /// World pixel height = `rows * bheight`.
    #[inline]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.bheight
    }

    /// Regenerate every cell as an empty block, discarding all edits.
    pub fn reset(&mut self) {
        log::debug!("regenerating {self}");
        self.cells = (0..self.rows)
            .flat_map(|r| (0..self.cols).map(move |c| Block::empty(c, r)))
            .collect();
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Pixel coordinate → cell coordinate, `None` outside the world.
    ///
    /// Points exactly on the far edge belong to the last cell so that a
    /// clamped entity position always maps somewhere.
    fn cell_of(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !(0.0..=self.width()).contains(&x) || !(0.0..=self.height()).contains(&y) {
            return None;
        }
        let col = ((x / self.bwidth) as usize).min(self.cols - 1);
        let row = ((y / self.bheight) as usize).min(self.rows - 1);
        Some((col, row))
    }

    pub fn block_at(&self, col: usize, row: usize) -> &Block {
        assert!(
            col < self.cols && row < self.rows,
            "cell ({col}, {row}) outside {self}"
        );
        &self.cells[self.index(col, row)]
    }

    /// Block occupying the pixel coordinate.
    ///
    /// Panics when the coordinate lies outside the world. Callers clamp
    /// entity positions *before* lookup, so an out-of-bounds coordinate
    /// here is a programming error, never a runtime condition.
    pub fn get_square(&self, x: f32, y: f32) -> &Block {
        let (col, row) = self
            .cell_of(x, y)
            .unwrap_or_else(|| panic!("pixel ({x}, {y}) outside {self}"));
        &self.cells[self.index(col, row)]
    }

    /// Mutable variant of [`Grid::get_square`], same panic contract.
    pub fn get_square_mut(&mut self, x: f32, y: f32) -> &mut Block {
        let (col, row) = self
            .cell_of(x, y)
            .unwrap_or_else(|| panic!("pixel ({x}, {y}) outside {self}"));
        let idx = self.index(col, row);
        &mut self.cells[idx]
    }

    /// Non-panicking lookup for speculative probes.
    pub fn try_square(&self, x: f32, y: f32) -> Option<&Block> {
        let (col, row) = self.cell_of(x, y)?;
        Some(&self.cells[self.index(col, row)])
    }

    /// Replace the block at the cell under the pixel coordinate.
    ///
    /// The stored block adopts the target cell's coordinates, so the old
    /// block is gone wholesale. Panics outside the world, like
    /// [`Grid::get_square`].
    pub fn set_square(&mut self, x: f32, y: f32, mut block: Block) {
        let slot = self.get_square_mut(x, y);
        (block.col, block.row) = (slot.col, slot.row);
        *slot = block;
    }

    /// Pixel rectangle covered by a block.
    #[inline]
    pub fn block_aabb(&self, block: &Block) -> Aabb {
        let min = Vec2::new(block.col as f32 * self.bwidth, block.row as f32 * self.bheight);
        Aabb::new(min, min + Vec2::new(self.bwidth, self.bheight))
    }

    /// All blocks whose cell rectangle strictly overlaps `bbox`. The cell
    /// range is clamped to the grid, so a box poking past the world edge
    /// is fine.
    pub fn blocks_overlapping<'g>(&'g self, bbox: Aabb) -> impl Iterator<Item = &'g Block> {
        let c0 = (bbox.min.x / self.bwidth).floor().max(0.0) as usize;
        let r0 = (bbox.min.y / self.bheight).floor().max(0.0) as usize;
        let c1 = ((bbox.max.x / self.bwidth).floor() as usize).min(self.cols.saturating_sub(1));
        let r1 = ((bbox.max.y / self.bheight).floor() as usize).min(self.rows.saturating_sub(1));

        (r0..=r1.max(r0))
            .flat_map(move |r| (c0..=c1.max(c0)).map(move |c| self.block_at(c, r)))
            .filter(move |b| bbox.overlaps(&self.block_aabb(b)))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grid: {}x{} ({}x{})",
            self.rows,
            self.cols,
            self.height(),
            self.width()
        )
    }
}
