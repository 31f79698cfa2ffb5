mod geometry;
mod grid;

pub use geometry::Aabb;
pub use grid::{Block, BlockKind, Grid, SideFlags};
