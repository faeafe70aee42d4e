use log::{debug, info};
use rand::Rng;

use crate::config::{GameConfig, GHOST_EAT_SCORE};
use crate::direction::Direction;
use crate::error::MazeError;
use crate::ghost::{Ghost, GhostMode};
use crate::grid::{Cell, Grid};
use crate::level::Level;
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Playing
    }
}

/// Something notable that happened during a single `Game::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PelletEaten { cell: Cell, points: u32 },
    PowerPelletEaten { cell: Cell, points: u32 },
    PowerModeEnded,
    GhostEaten { ghost: usize, points: u32 },
    LifeLost { lives_left: u32 },
    Won,
    Lost,
}

/// One play session: owns the maze, the player, the ghosts and the random
/// source the ghosts steer with.
pub struct Game<R> {
    config: GameConfig,
    level: Level,
    grid: Grid,
    player: Player,
    ghosts: Vec<Ghost>,
    score: u32,
    lives: u32,
    power_timer: f32,
    status: GameStatus,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(level: Level, config: GameConfig, rng: R) -> Result<Self, MazeError> {
        let grid = level.build_grid()?;
        let player = Player::new(level.player_spawn, config.player_speed);
        let ghosts = level
            .ghost_spawns
            .iter()
            .map(|&spawn| Ghost::new(spawn, config.ghost_speed, config.frightened_speed_factor))
            .collect();

        info!(
            "new game on {}x{} maze: {} pellets, {} ghosts",
            grid.width(),
            grid.height(),
            grid.total_pellets(),
            level.ghost_spawns.len()
        );

        Ok(Self {
            lives: config.starting_lives,
            config,
            level,
            grid,
            player,
            ghosts,
            score: 0,
            power_timer: 0.0,
            status: GameStatus::Playing,
            rng,
        })
    }

    pub fn queue_direction(&mut self, dir: Direction) {
        if self.status == GameStatus::Playing {
            self.player.queue_direction(dir);
        }
    }

    /// Advances the session by `dt` seconds and reports what happened.
    /// Does nothing once the game is won or lost.
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.status.is_over() {
            return events;
        }
        let dt = dt.max(0.0);

        let player_before = self.player.mover().occupied_cell();
        let ghosts_before: Vec<Cell> = self
            .ghosts
            .iter()
            .map(|ghost| ghost.mover().occupied_cell())
            .collect();

        let tick = self.player.update(&mut self.grid, dt);
        if tick.consumed.points > 0 {
            self.score += tick.consumed.points;
            events.push(if tick.consumed.power {
                GameEvent::PowerPelletEaten {
                    cell: tick.cell,
                    points: tick.consumed.points,
                }
            } else {
                GameEvent::PelletEaten {
                    cell: tick.cell,
                    points: tick.consumed.points,
                }
            });
        }
        if tick.consumed.power {
            debug!("power mode for {:.1}s", self.config.power_duration);
            self.power_timer = self.config.power_duration;
            for ghost in &mut self.ghosts {
                ghost.recover();
            }
        }

        if self.grid.pellets_remaining() == 0 {
            info!("maze cleared with score {}", self.score);
            self.status = GameStatus::Won;
            events.push(GameEvent::Won);
            return events;
        }

        if self.power_timer > 0.0 {
            self.power_timer = (self.power_timer - dt).max(0.0);
            if self.power_timer == 0.0 {
                debug!("power mode ended");
                for ghost in &mut self.ghosts {
                    ghost.recover();
                }
                events.push(GameEvent::PowerModeEnded);
            }
        }

        let mode = self.mode();
        for ghost in &mut self.ghosts {
            ghost.update(&self.grid, dt, mode, &mut self.rng);
        }

        self.resolve_collisions(mode, player_before, &ghosts_before, &mut events);
        events
    }

    /// Ghosts are checked in index order. A ghost collides when it shares
    /// the player's tile, or when the two swapped tiles during this tick.
    /// Ghosts waiting to respawn never collide, and a ghost already eaten
    /// in this power mode cannot be eaten again.
    fn resolve_collisions(
        &mut self,
        mode: GhostMode,
        player_before: Cell,
        ghosts_before: &[Cell],
        events: &mut Vec<GameEvent>,
    ) {
        let player_now = self.player.mover().occupied_cell();

        for (idx, ghost_before) in ghosts_before.iter().copied().enumerate() {
            let ghost = &self.ghosts[idx];
            if ghost.is_respawning() || (ghost.is_eaten() && mode == GhostMode::Frightened) {
                continue;
            }
            let ghost_now = ghost.mover().occupied_cell();
            let swapped = player_now != player_before
                && ghost_now == player_before
                && ghost_before == player_now;
            if ghost_now != player_now && !swapped {
                continue;
            }

            match mode {
                GhostMode::Frightened => {
                    debug!("ghost {idx} eaten at {player_now:?}");
                    self.ghosts[idx].mark_eaten(self.config.respawn_delay);
                    self.score += GHOST_EAT_SCORE;
                    events.push(GameEvent::GhostEaten {
                        ghost: idx,
                        points: GHOST_EAT_SCORE,
                    });
                }
                GhostMode::Normal => {
                    self.lives = self.lives.saturating_sub(1);
                    info!("caught by ghost {idx}, {} lives left", self.lives);
                    events.push(GameEvent::LifeLost {
                        lives_left: self.lives,
                    });
                    if self.lives == 0 {
                        info!("game over with score {}", self.score);
                        self.status = GameStatus::Lost;
                        events.push(GameEvent::Lost);
                    } else {
                        self.reset_round();
                    }
                    return;
                }
            }
        }
    }

    /// Puts everyone back on their spawn tiles; pellets and score stay.
    fn reset_round(&mut self) {
        self.player.respawn(self.level.player_spawn);
        for ghost in &mut self.ghosts {
            ghost.respawn();
        }
        self.power_timer = 0.0;
    }

    /// Starts the session over: pellets, positions, score, lives and timer.
    pub fn restart(&mut self) {
        info!("restarting game");
        self.grid.reset();
        self.reset_round();
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.status = GameStatus::Playing;
    }
}

impl<R> Game<R> {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn pellets_remaining(&self) -> usize {
        self.grid.pellets_remaining()
    }

    /// Seconds of power mode left; zero when inactive.
    pub fn power_remaining(&self) -> f32 {
        self.power_timer
    }

    pub fn mode(&self) -> GhostMode {
        if self.power_timer > 0.0 {
            GhostMode::Frightened
        } else {
            GhostMode::Normal
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }
}
