use crate::error::MazeError;
use crate::grid::{Cell, Grid};

/// A static maze together with the spawn tiles of everything that walks it.
#[derive(Debug, Clone)]
pub struct Level {
    pub layout: Vec<Vec<u8>>,
    pub player_spawn: Cell,
    pub ghost_spawns: Vec<Cell>,
}

impl Level {
    pub fn new(layout: Vec<Vec<u8>>, player_spawn: Cell, ghost_spawns: Vec<Cell>) -> Self {
        Self {
            layout,
            player_spawn,
            ghost_spawns,
        }
    }

    /// The bundled 7x7 board: a ring with a cross-bar, two ghosts.
    pub fn classic() -> Self {
        let layout = vec![
            vec![1, 1, 1, 1, 1, 1, 1],
            vec![1, 2, 2, 3, 2, 2, 1],
            vec![1, 2, 1, 1, 1, 2, 1],
            vec![1, 2, 2, 2, 2, 2, 1],
            vec![1, 3, 1, 1, 1, 3, 1],
            vec![1, 2, 2, 2, 2, 2, 1],
            vec![1, 1, 1, 1, 1, 1, 1],
        ];

        Self {
            layout,
            player_spawn: Cell::new(3, 3),
            ghost_spawns: vec![Cell::new(3, 1), Cell::new(3, 5)],
        }
    }

    /// Decodes the layout and checks that every spawn tile can be stood on.
    pub fn build_grid(&self) -> Result<Grid, MazeError> {
        let grid = Grid::from_codes(&self.layout)?;

        for &cell in std::iter::once(&self.player_spawn).chain(&self.ghost_spawns) {
            if !grid.in_bounds(cell) {
                return Err(MazeError::SpawnOutOfBounds { cell });
            }
            if !grid.is_walkable(cell) {
                return Err(MazeError::SpawnOnWall { cell });
            }
        }

        if grid.total_pellets() == 0 {
            return Err(MazeError::NoPellets);
        }
        Ok(grid)
    }
}
