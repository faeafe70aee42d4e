use crate::direction::Direction;
use crate::grid::{Cell, Consumed, Grid};
use crate::mover::{MoveResult, Mover};

/// What the player's tick produced for the game to account for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerTick {
    pub movement: MoveResult,
    pub cell: Cell,
    pub consumed: Consumed,
}

#[derive(Debug, Clone)]
pub struct Player {
    mover: Mover,
    direction: Direction,
    next_direction: Option<Direction>,
}

impl Player {
    pub fn new(spawn: Cell, speed: f32) -> Self {
        Self {
            mover: Mover::new(spawn, speed),
            direction: Direction::None,
            next_direction: None,
        }
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn queued_direction(&self) -> Option<Direction> {
        self.next_direction
    }

    /// Remembers the latest input; it is applied on the next tile centre
    /// from which it is walkable. `Direction::None` means "no input".
    pub fn queue_direction(&mut self, dir: Direction) {
        if !dir.is_none() {
            self.next_direction = Some(dir);
        }
    }

    pub fn update(&mut self, grid: &mut Grid, dt: f32) -> PlayerTick {
        if self.mover.is_at_intersection() {
            match self.next_direction {
                Some(next) if self.mover.can_move(grid, next) => {
                    self.direction = next;
                    self.next_direction = None;
                }
                _ if !self.mover.can_move(grid, self.direction) => {
                    self.direction = Direction::None;
                    self.mover.stop();
                }
                _ => {}
            }
        }

        let movement = if self.direction.is_none() {
            MoveResult::Blocked
        } else {
            self.mover.try_move(grid, self.direction, dt)
        };

        let cell = self.mover.occupied_cell();
        PlayerTick {
            movement,
            cell,
            consumed: grid.consume(cell),
        }
    }

    pub fn respawn(&mut self, spawn: Cell) {
        self.mover.reset_to(spawn);
        self.direction = Direction::None;
        self.next_direction = None;
    }
}
