use crate::direction::Direction;
use crate::error::{MazeError, OutOfBounds};

pub const PELLET_SCORE: u32 = 10;
pub const POWER_PELLET_SCORE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Wall,
    Empty,
    Pellet,
    PowerPellet,
}

impl TileKind {
    pub fn is_consumable(self) -> bool {
        matches!(self, TileKind::Pellet | TileKind::PowerPellet)
    }
}

impl TryFrom<u8> for TileKind {
    type Error = u8;

    /// Maze encoding: `1` wall, `0` empty, `2` pellet, `3` power pellet.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TileKind::Empty),
            1 => Ok(TileKind::Wall),
            2 => Ok(TileKind::Pellet),
            3 => Ok(TileKind::PowerPellet),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

impl Cell {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// The adjacent cell in `dir`, or `None` when it would fall off the
    /// top/left edge. `Direction::None` yields the cell itself.
    pub fn step(self, dir: Direction) -> Option<Cell> {
        let (dx, dy) = dir.delta();
        let col = self.col.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        Some(Cell { col, row })
    }
}

/// What a single `Grid::consume` call yielded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Consumed {
    pub points: u32,
    pub power: bool,
}

impl Consumed {
    pub const NOTHING: Consumed = Consumed {
        points: 0,
        power: false,
    };

    pub fn is_nothing(&self) -> bool {
        self.points == 0 && !self.power
    }
}

/// The maze: a fixed rectangle of tiles in which only pellets ever change
/// (to `Empty`, when eaten).
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Vec<TileKind>>,
    initial: Vec<Vec<TileKind>>,
    pellets_left: usize,
}

impl Grid {
    /// Decodes a row-major layout of tile codes.
    pub fn from_codes(layout: &[Vec<u8>]) -> Result<Self, MazeError> {
        let height = layout.len();
        let width = layout.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(MazeError::EmptyLayout);
        }

        let mut tiles = Vec::with_capacity(height);
        for (row, codes) in layout.iter().enumerate() {
            if codes.len() != width {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: width,
                    found: codes.len(),
                });
            }
            let decoded = codes
                .iter()
                .enumerate()
                .map(|(col, &code)| {
                    TileKind::try_from(code).map_err(|code| MazeError::UnknownTile {
                        cell: Cell::new(col, row),
                        code,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            tiles.push(decoded);
        }

        let pellets_left = count_pellets(&tiles);
        Ok(Self {
            width,
            height,
            initial: tiles.clone(),
            tiles,
            pellets_left,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.col < self.width && cell.row < self.height
    }

    pub fn tile_at(&self, cell: Cell) -> Result<TileKind, OutOfBounds> {
        if !self.in_bounds(cell) {
            return Err(OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.tiles[cell.row][cell.col])
    }

    /// Anything outside the grid counts as wall.
    pub fn is_walkable(&self, cell: Cell) -> bool {
        matches!(self.tile_at(cell), Ok(kind) if kind != TileKind::Wall)
    }

    /// Whether the neighbour of `cell` in `dir` can be entered.
    pub fn can_enter(&self, cell: Cell, dir: Direction) -> bool {
        if dir.is_none() {
            return false;
        }
        cell.step(dir).is_some_and(|next| self.is_walkable(next))
    }

    /// Eats whatever pellet sits on `cell`. Empty tiles and walls yield
    /// nothing, so eating the same tile twice is harmless.
    pub fn consume(&mut self, cell: Cell) -> Consumed {
        debug_assert!(self.in_bounds(cell), "consume outside grid: {cell:?}");
        if !self.in_bounds(cell) {
            return Consumed::NOTHING;
        }

        let tile = &mut self.tiles[cell.row][cell.col];
        let consumed = match *tile {
            TileKind::Pellet => Consumed {
                points: PELLET_SCORE,
                power: false,
            },
            TileKind::PowerPellet => Consumed {
                points: POWER_PELLET_SCORE,
                power: true,
            },
            TileKind::Empty | TileKind::Wall => return Consumed::NOTHING,
        };
        *tile = TileKind::Empty;
        self.pellets_left = self.pellets_left.saturating_sub(1);
        consumed
    }

    pub fn pellets_remaining(&self) -> usize {
        self.pellets_left
    }

    /// Pellets present when the grid was loaded.
    pub fn total_pellets(&self) -> usize {
        count_pellets(&self.initial)
    }

    /// Puts every eaten pellet back.
    pub fn reset(&mut self) {
        self.tiles.clone_from(&self.initial);
        self.pellets_left = count_pellets(&self.tiles);
    }

    /// Row-major view of the current tiles, for drawing.
    pub fn rows(&self) -> &[Vec<TileKind>] {
        &self.tiles
    }
}

fn count_pellets(tiles: &[Vec<TileKind>]) -> usize {
    tiles
        .iter()
        .flat_map(|row| row.iter())
        .filter(|tile| tile.is_consumable())
        .count()
}
