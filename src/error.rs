use thiserror::Error;

use crate::grid::Cell;

/// A tile query outside the grid extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell ({}, {}) lies outside the {width}x{height} grid", .cell.col, .cell.row)]
pub struct OutOfBounds {
    pub cell: Cell,
    pub width: usize,
    pub height: usize,
}

/// Reasons a static maze is rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze layout has no tiles")]
    EmptyLayout,
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile code {code} at ({}, {})", .cell.col, .cell.row)]
    UnknownTile { cell: Cell, code: u8 },
    #[error("spawn tile ({}, {}) lies outside the maze", .cell.col, .cell.row)]
    SpawnOutOfBounds { cell: Cell },
    #[error("spawn tile ({}, {}) is a wall", .cell.col, .cell.row)]
    SpawnOnWall { cell: Cell },
    #[error("maze contains no pellets")]
    NoPellets,
}
