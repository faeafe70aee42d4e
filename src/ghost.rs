use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::direction::Direction;
use crate::grid::{Cell, Grid};
use crate::mover::Mover;

/// Behaviour the game imposes on every ghost for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostMode {
    Normal,
    Frightened,
}

#[derive(Debug, Clone)]
pub struct Ghost {
    mover: Mover,
    spawn: Cell,
    frightened_speed_factor: f32,
    respawn_timer: f32,
    eaten: bool,
}

impl Ghost {
    pub fn new(spawn: Cell, speed: f32, frightened_speed_factor: f32) -> Self {
        Self {
            mover: Mover::new(spawn, speed),
            spawn,
            frightened_speed_factor,
            respawn_timer: 0.0,
            eaten: false,
        }
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn spawn(&self) -> Cell {
        self.spawn
    }

    pub fn direction(&self) -> Direction {
        self.mover.direction()
    }

    /// Parked on its spawn tile after being eaten; ignored by collisions.
    pub fn is_respawning(&self) -> bool {
        self.respawn_timer > 0.0
    }

    /// Eaten during the current power mode and so not edible again until
    /// it ends.
    pub fn is_eaten(&self) -> bool {
        self.eaten
    }

    /// On a tile centre, picks a random walkable direction that is not the
    /// way it came; reversing only happens at dead ends. Then moves.
    pub fn update(&mut self, grid: &Grid, dt: f32, mode: GhostMode, rng: &mut impl Rng) {
        if self.is_respawning() {
            self.respawn_timer = (self.respawn_timer - dt).max(0.0);
            return;
        }

        let mut dir = self.mover.direction();

        if self.mover.is_at_intersection() {
            let mut options = self.mover.available_directions(grid, true);
            if options.is_empty() {
                options = self.mover.available_directions(grid, false);
            }
            dir = options.choose(rng).copied().unwrap_or(Direction::None);
            trace!(
                "ghost at {:?} picked {:?} from {:?}",
                self.mover.anchor(),
                dir,
                options
            );
        }

        if dir.is_none() {
            return;
        }
        let dt = match mode {
            GhostMode::Normal => dt,
            GhostMode::Frightened => dt * self.frightened_speed_factor,
        };
        self.mover.try_move(grid, dir, dt);
    }

    /// Sends the ghost home, where it waits `delay` seconds before moving.
    pub fn mark_eaten(&mut self, delay: f32) {
        self.mover.reset_to(self.spawn);
        self.respawn_timer = delay.max(0.0);
        self.eaten = true;
    }

    /// Makes an eaten ghost edible again; a pending respawn wait still runs.
    pub fn recover(&mut self) {
        self.eaten = false;
    }

    pub fn respawn(&mut self) {
        self.mover.reset_to(self.spawn);
        self.respawn_timer = 0.0;
        self.eaten = false;
    }
}
