//! Tile-aligned movement shared by the player and the ghosts.
//!
//! A mover's position is an anchor cell plus a fractional progress in
//! `[0, 1)` toward the neighbouring cell in its current direction. Keeping
//! the integer cell separate means positions never drift off the tile
//! centres, and "at a tile centre" is simply `progress == 0`.

use crate::direction::Direction;
use crate::grid::{Cell, Grid};

/// Progress this close to the next centre counts as having arrived.
const ALIGN_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    Blocked,
}

#[derive(Debug, Clone)]
pub struct Mover {
    cell: Cell,
    progress: f32,
    direction: Direction,
    speed: f32,
}

impl Mover {
    /// `speed` is in tiles per second.
    pub fn new(cell: Cell, speed: f32) -> Self {
        Self {
            cell,
            progress: 0.0,
            direction: Direction::None,
            speed,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The tile whose centre the mover most recently passed.
    pub fn anchor(&self) -> Cell {
        self.cell
    }

    /// The tile containing the mover's centre point.
    pub fn occupied_cell(&self) -> Cell {
        if self.progress >= 0.5 {
            self.cell.step(self.direction).unwrap_or(self.cell)
        } else {
            self.cell
        }
    }

    /// Continuous position in tile units; tile centres sit on whole numbers.
    pub fn position(&self) -> (f32, f32) {
        let (dx, dy) = self.direction.delta();
        (
            self.cell.col as f32 + dx as f32 * self.progress,
            self.cell.row as f32 + dy as f32 * self.progress,
        )
    }

    pub fn is_at_intersection(&self) -> bool {
        self.progress == 0.0
    }

    /// Whether a `try_move` in `dir` would make progress right now.
    pub fn can_move(&self, grid: &Grid, dir: Direction) -> bool {
        if dir.is_none() {
            return false;
        }
        if self.is_at_intersection() {
            grid.can_enter(self.cell, dir)
        } else {
            dir == self.direction || dir == self.direction.reverse()
        }
    }

    /// Directions whose neighbouring tile is walkable, in `Direction::CARDINAL`
    /// order. With `exclude_reverse`, the way back is left out.
    pub fn available_directions(&self, grid: &Grid, exclude_reverse: bool) -> Vec<Direction> {
        let back = self.direction.reverse();
        Direction::CARDINAL
            .into_iter()
            .filter(|&dir| grid.can_enter(self.cell, dir))
            .filter(|&dir| !(exclude_reverse && !back.is_none() && dir == back))
            .collect()
    }

    /// Advances `speed * dt` tiles toward `dir`.
    ///
    /// Turns only happen on a tile centre; mid-tile the mover keeps to its
    /// axis, though it may reverse. Movement stops at the next centre even
    /// if distance is left over, so every centre is visited with
    /// `progress == 0`. A blocked mover stays on its centre and loses its
    /// direction.
    pub fn try_move(&mut self, grid: &Grid, dir: Direction, dt: f32) -> MoveResult {
        let mut dir = dir;

        if self.is_at_intersection() {
            if !grid.can_enter(self.cell, dir) {
                self.direction = Direction::None;
                return MoveResult::Blocked;
            }
            self.direction = dir;
        } else if dir == self.direction.reverse() && !dir.is_none() {
            if let Some(next) = self.cell.step(self.direction) {
                self.cell = next;
                self.progress = 1.0 - self.progress;
                self.direction = dir;
            }
        } else {
            dir = self.direction;
        }

        self.progress += self.speed * dt.max(0.0);
        if self.progress >= 1.0 - ALIGN_EPSILON {
            if let Some(next) = self.cell.step(dir) {
                self.cell = next;
            }
            self.progress = 0.0;
        }
        MoveResult::Moved
    }

    /// Drops the current direction. Only meaningful on a tile centre.
    pub fn stop(&mut self) {
        if self.is_at_intersection() {
            self.direction = Direction::None;
        }
    }

    /// Places the mover on the centre of `cell`, motionless.
    pub fn reset_to(&mut self, cell: Cell) {
        self.cell = cell;
        self.progress = 0.0;
        self.direction = Direction::None;
    }
}
