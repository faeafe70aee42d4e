use std::str::FromStr;

use log::warn;

pub const GHOST_EAT_SCORE: u32 = 200;

const DEFAULT_PLAYER_SPEED: f32 = 2.8;
const DEFAULT_GHOST_SPEED: f32 = 2.45;
const DEFAULT_POWER_SECS: f32 = 6.0;
const DEFAULT_RESPAWN_SECS: f32 = 1.5;
const DEFAULT_LIVES: u32 = 3;

/// Gameplay tunables. Speeds are in tiles per second.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub player_speed: f32,
    pub ghost_speed: f32,
    pub frightened_speed_factor: f32,
    pub power_duration: f32,
    /// Seconds an eaten ghost waits on its spawn tile.
    pub respawn_delay: f32,
    pub starting_lives: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: DEFAULT_PLAYER_SPEED,
            ghost_speed: DEFAULT_GHOST_SPEED,
            frightened_speed_factor: 1.0,
            power_duration: DEFAULT_POWER_SECS,
            respawn_delay: DEFAULT_RESPAWN_SECS,
            starting_lives: DEFAULT_LIVES,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `MAZE_CHASE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            player_speed: positive(&lookup, "MAZE_CHASE_PLAYER_SPEED")
                .unwrap_or(defaults.player_speed),
            ghost_speed: positive(&lookup, "MAZE_CHASE_GHOST_SPEED")
                .unwrap_or(defaults.ghost_speed),
            frightened_speed_factor: defaults.frightened_speed_factor,
            power_duration: positive(&lookup, "MAZE_CHASE_POWER_SECS")
                .unwrap_or(defaults.power_duration),
            respawn_delay: positive(&lookup, "MAZE_CHASE_RESPAWN_SECS")
                .unwrap_or(defaults.respawn_delay),
            starting_lives: positive(&lookup, "MAZE_CHASE_LIVES")
                .unwrap_or(defaults.starting_lives),
        }
    }
}

fn positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Some(value),
        _ => {
            warn!("ignoring {key}={raw:?}: expected a positive number");
            None
        }
    }
}
