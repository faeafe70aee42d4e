use maze_chase::{
    Cell, Direction, Game, GameConfig, GameEvent, GameStatus, GhostMode, Level, TileKind,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn slow_config(lives: u32) -> GameConfig {
    GameConfig {
        player_speed: 1.0,
        ghost_speed: 1.0,
        frightened_speed_factor: 1.0,
        power_duration: 6.0,
        respawn_delay: 1.5,
        starting_lives: lives,
    }
}

fn start(level: Level, config: GameConfig) -> Game<ChaCha8Rng> {
    Game::new(level, config, ChaCha8Rng::seed_from_u64(0xC0FFEE)).expect("valid level")
}

/// Corridor along row 1 from the player at (1, 1) to a ghost parked in the
/// dead end at (5, 1). A spare pellet below the player keeps the game going.
fn corridor_with_ghost(row: Vec<u8>) -> Level {
    Level::new(
        vec![
            vec![1, 1, 1, 1, 1, 1, 1],
            row,
            vec![1, 2, 1, 1, 1, 1, 1],
            vec![1, 1, 1, 1, 1, 1, 1],
        ],
        Cell::new(1, 1),
        vec![Cell::new(5, 1)],
    )
}

#[test]
fn eating_the_last_pellet_wins_that_tick() {
    let level = Level::new(
        vec![vec![1, 1, 1, 1], vec![1, 0, 2, 1], vec![1, 1, 1, 1]],
        Cell::new(1, 1),
        Vec::new(),
    );
    let mut game = start(level, slow_config(3));
    assert_eq!(game.pellets_remaining(), 1);

    game.queue_direction(Direction::Right);
    let events = game.update(0.6);

    assert_eq!(game.score(), 10);
    assert_eq!(game.pellets_remaining(), 0);
    assert_eq!(game.status(), GameStatus::Won);
    assert!(events.contains(&GameEvent::PelletEaten {
        cell: Cell::new(2, 1),
        points: 10
    }));
    assert_eq!(events.last(), Some(&GameEvent::Won));
}

#[test]
fn power_pellet_starts_frightened_mode() {
    let level = Level::new(
        vec![
            vec![1, 1, 1, 1, 1, 1],
            vec![1, 0, 3, 2, 0, 1],
            vec![1, 1, 1, 1, 1, 1],
        ],
        Cell::new(1, 1),
        Vec::new(),
    );
    let mut game = start(level, slow_config(3));
    assert_eq!(game.mode(), GhostMode::Normal);

    game.queue_direction(Direction::Right);
    let events = game.update(0.6);

    assert_eq!(game.score(), 50);
    assert!((game.power_remaining() - (6.0 - 0.6)).abs() < 1e-4);
    assert_eq!(game.mode(), GhostMode::Frightened);
    assert!(events.contains(&GameEvent::PowerPelletEaten {
        cell: Cell::new(2, 1),
        points: 50
    }));
    assert_eq!(game.grid().tile_at(Cell::new(2, 1)), Ok(TileKind::Empty));
}

#[test]
fn power_mode_runs_out() {
    let level = Level::new(
        vec![
            vec![1, 1, 1, 1, 1],
            vec![1, 0, 3, 2, 1],
            vec![1, 1, 1, 1, 1],
        ],
        Cell::new(1, 1),
        Vec::new(),
    );
    let config = GameConfig {
        power_duration: 1.0,
        ..slow_config(3)
    };
    let mut game = start(level, config);
    game.queue_direction(Direction::Right);
    game.update(0.6);
    assert_eq!(game.mode(), GhostMode::Frightened);

    // Finishes the step onto the emptied power pellet tile.
    let events = game.update(0.5);
    assert_eq!(game.mode(), GhostMode::Normal);
    assert_eq!(game.power_remaining(), 0.0);
    assert!(events.contains(&GameEvent::PowerModeEnded));
}

#[test]
fn frightened_ghost_is_eaten_and_respawns() {
    let mut game = start(
        corridor_with_ghost(vec![1, 0, 3, 0, 0, 0, 1]),
        slow_config(3),
    );
    game.queue_direction(Direction::Right);

    game.update(0.6);
    assert_eq!(game.score(), 50);
    game.update(0.4);
    assert_eq!(game.ghosts()[0].mover().anchor(), Cell::new(4, 1));

    let events = game.update(0.5);
    assert!(events.contains(&GameEvent::GhostEaten {
        ghost: 0,
        points: 200
    }));
    assert_eq!(game.score(), 250);
    assert_eq!(game.lives(), 3);
    assert_eq!(game.status(), GameStatus::Playing);
    let ghost = &game.ghosts()[0];
    assert_eq!(ghost.mover().anchor(), ghost.spawn());
    assert!(ghost.is_respawning());
}

#[test]
fn eaten_ghost_cannot_be_eaten_again_on_its_spawn_tile() {
    let mut game = start(
        corridor_with_ghost(vec![1, 0, 3, 0, 0, 0, 1]),
        GameConfig::default(),
    );
    game.queue_direction(Direction::Right);

    let mut eaten = 0;
    for _ in 0..330 {
        eaten += game
            .update(1.0 / 60.0)
            .iter()
            .filter(|event| matches!(event, GameEvent::GhostEaten { .. }))
            .count();
    }

    // The player ran into the dead end and has been sitting on the spawn tile.
    assert_eq!(game.player().mover().anchor(), game.ghosts()[0].spawn());
    assert_eq!(game.mode(), GhostMode::Frightened);
    assert_eq!(eaten, 1);
    assert_eq!(game.score(), 50 + 200);
    assert_eq!(game.lives(), 3);
}

#[test]
fn last_life_lost_ends_the_game() {
    let mut game = start(
        corridor_with_ghost(vec![1, 0, 0, 0, 0, 0, 1]),
        slow_config(1),
    );
    game.queue_direction(Direction::Right);

    game.update(0.6);
    game.update(0.4);
    let events = game.update(0.5);

    assert_eq!(game.lives(), 0);
    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(
        events,
        vec![GameEvent::LifeLost { lives_left: 0 }, GameEvent::Lost]
    );

    let frozen = game.player().mover().position();
    assert!(game.update(1.0).is_empty());
    assert_eq!(game.player().mover().position(), frozen);
}

#[test]
fn losing_a_life_resets_positions() {
    let mut game = start(
        corridor_with_ghost(vec![1, 0, 0, 0, 0, 0, 1]),
        slow_config(3),
    );
    game.queue_direction(Direction::Right);

    game.update(0.6);
    game.update(0.4);
    let events = game.update(0.5);

    assert_eq!(events, vec![GameEvent::LifeLost { lives_left: 2 }]);
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.player().mover().position(), (1.0, 1.0));
    assert_eq!(game.player().direction(), Direction::None);
    assert_eq!(game.ghosts()[0].mover().position(), (5.0, 1.0));
}

#[test]
fn ghosts_passing_through_the_player_still_collide() {
    let level = Level::new(
        vec![
            vec![1, 1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 0, 1],
            vec![1, 2, 1, 1, 1, 1],
            vec![1, 1, 1, 1, 1, 1],
        ],
        Cell::new(1, 1),
        vec![Cell::new(4, 1)],
    );
    let mut game = start(level, slow_config(3));
    game.queue_direction(Direction::Right);

    for tick in 1..=5 {
        let events = game.update(0.25);
        assert!(events.is_empty(), "unexpected events on tick {tick}: {events:?}");
    }
    // Both cross the tile boundary between columns 2 and 3 together.
    let events = game.update(0.25);
    assert_eq!(events, vec![GameEvent::LifeLost { lives_left: 2 }]);
}

#[test]
fn queued_turn_into_wall_waits() {
    let level = Level::new(
        vec![
            vec![1, 1, 1, 1],
            vec![1, 0, 0, 1],
            vec![1, 2, 1, 1],
            vec![1, 1, 1, 1],
        ],
        Cell::new(1, 1),
        Vec::new(),
    );
    let mut game = start(level, slow_config(3));

    game.queue_direction(Direction::Up);
    game.update(0.3);
    assert_eq!(game.player().mover().position(), (1.0, 1.0));
    assert_eq!(game.player().direction(), Direction::None);
    assert_eq!(game.player().queued_direction(), Some(Direction::Up));

    game.queue_direction(Direction::Down);
    game.update(0.3);
    assert_eq!(game.player().direction(), Direction::Down);
    assert_eq!(game.player().queued_direction(), None);
}

#[test]
fn restart_restores_the_starting_session() {
    let mut game = start(
        corridor_with_ghost(vec![1, 0, 2, 0, 0, 0, 1]),
        slow_config(1),
    );
    game.queue_direction(Direction::Right);
    game.update(0.6);
    game.update(0.4);
    game.update(0.5);
    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(game.score(), 10);

    game.restart();

    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lives(), 1);
    assert_eq!(game.pellets_remaining(), game.grid().total_pellets());
    assert_eq!(game.pellets_remaining(), 2);
    assert_eq!(game.power_remaining(), 0.0);
    assert_eq!(game.player().mover().position(), (1.0, 1.0));
    assert_eq!(game.ghosts()[0].mover().position(), (5.0, 1.0));
    assert_eq!(game.grid().tile_at(Cell::new(2, 1)), Ok(TileKind::Pellet));
}

#[test]
fn malformed_level_fails_before_play() {
    let mut level = Level::classic();
    level.player_spawn = Cell::new(0, 0);
    let result = Game::new(level, GameConfig::default(), ChaCha8Rng::seed_from_u64(1));
    assert!(result.is_err());
}
