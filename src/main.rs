use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

use maze_chase::{
    Cell, Direction, Game, GameConfig, GameEvent, GameStatus, Ghost, GhostMode, Level, TileKind,
};

const CELL_W: usize = 2;
const DEFAULT_FPS: u64 = 60;
const MAX_FRAME_SECS: f32 = 0.25;
const NOTICE_TIME: Duration = Duration::from_millis(1500);

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Ghost,
    Frightened,
    Eyes,
    Wall,
    Empty,
    Pellet,
    Power,
}

#[derive(Clone, Copy, PartialEq)]
struct Sprite {
    glyph: Glyph,
    color: Color,
}

/// Short-lived message shown under the maze while playing.
struct Notice {
    text: String,
    color: Color,
    until: Instant,
}

struct Renderer {
    last: Vec<Sprite>,
    last_hud: String,
    last_banner: String,
    notice: Option<Notice>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Sprite {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            last_banner: String::new(),
            notice: None,
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Picks the most notable event of a tick for the banner line.
    fn note_events(&mut self, events: &[GameEvent]) {
        let picked = events.iter().rev().find_map(|event| match *event {
            GameEvent::LifeLost { lives_left } if lives_left > 0 => {
                Some((format!("Caught! {lives_left} lives left"), Color::Red))
            }
            GameEvent::GhostEaten { points, .. } => {
                Some((format!("Ghost eaten +{points}"), Color::Cyan))
            }
            GameEvent::PowerPelletEaten { .. } => {
                Some(("Power up! Ghosts are edible".to_string(), Color::Magenta))
            }
            GameEvent::PowerModeEnded => Some(("Power faded".to_string(), Color::DarkGrey)),
            _ => None,
        });
        if let Some((text, color)) = picked {
            self.notice = Some(Notice {
                text,
                color,
                until: Instant::now() + NOTICE_TIME,
            });
        }
    }
}

/// Puts the terminal back the way it was, however `run` ends.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if let Err(e) = stdout.execute(Show) {
            warn!("failed to show the cursor: {e}");
        }
        if let Err(e) = stdout.execute(LeaveAlternateScreen) {
            warn!("failed to leave the alternate screen: {e}");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("failed to disable raw mode: {e}");
        }
    }
}

struct Settings {
    fps: u64,
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = read_settings();
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(Level::classic(), GameConfig::from_env(), rng)
        .context("failed to load the maze")?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let guard = TerminalGuard;
    stdout
        .execute(EnterAlternateScreen)
        .and_then(|out| out.execute(Hide))
        .context("failed to prepare the terminal")?;

    let result = run(&mut stdout, &mut game, settings.fps);
    drop(guard);
    result?;

    info!("final score {}", game.score());
    Ok(())
}

fn run(stdout: &mut Stdout, game: &mut Game<StdRng>, fps: u64) -> io::Result<()> {
    let mut renderer = Renderer::new(game.grid().width(), game.grid().height());
    let frame_time = Duration::from_micros(1_000_000 / fps.max(1));
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') if game.status().is_over() => {
                        game.restart();
                        renderer.notice = None;
                        renderer.needs_full = true;
                    }
                    code => {
                        if let Some(dir) = dir_for_key(code) {
                            game.queue_direction(dir);
                        }
                    }
                }
            }
        }

        let dt = last_tick.elapsed().as_secs_f32().min(MAX_FRAME_SECS);
        last_tick = Instant::now();
        let events = game.update(dt);
        renderer.note_events(&events);
        render(stdout, game, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn read_settings() -> Settings {
    let fps = std::env::var("MAZE_CHASE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_FPS);
    let seed = std::env::var("MAZE_CHASE_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok());
    Settings { fps, seed }
}

fn dir_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

fn render(stdout: &mut Stdout, game: &Game<StdRng>, renderer: &mut Renderer) -> io::Result<()> {
    let width = game.grid().width();
    let height = game.grid().height();
    let needed_h = (height + 3) as u16;
    let needed_w = (width * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
    }

    let hud = format!(
        "Score: {}  Lives: {}  Pellets: {}  Power: {:.0}s  (q to quit)",
        game.score(),
        game.lives(),
        game.pellets_remaining(),
        game.power_remaining().ceil()
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for (row, tiles) in game.grid().rows().iter().enumerate() {
        for (col, &tile) in tiles.iter().enumerate() {
            let sprite = sprite_for(game, Cell::new(col, row), tile);
            let idx = row * width + col;
            if renderer.needs_full || sprite != renderer.last[idx] {
                renderer.last[idx] = sprite;
                draw_cell(stdout, renderer, col, row, sprite)?;
            }
        }
    }

    let (banner, color) = banner_for(game, renderer);
    if renderer.needs_full || banner != renderer.last_banner {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y + height as u16))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(color))?;
        stdout.queue(Print(&banner))?;
        stdout.queue(ResetColor)?;
        renderer.last_banner = banner;
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn sprite_for<R>(game: &Game<R>, cell: Cell, tile: TileKind) -> Sprite {
    if game.player().mover().occupied_cell() == cell {
        return Sprite {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = game
        .ghosts()
        .iter()
        .find(|ghost| ghost.mover().occupied_cell() == cell)
    {
        return ghost_sprite(ghost, game.mode());
    }
    let (glyph, color) = match tile {
        TileKind::Wall => (Glyph::Wall, Color::Blue),
        TileKind::Pellet => (Glyph::Pellet, Color::White),
        TileKind::PowerPellet => (Glyph::Power, Color::Magenta),
        TileKind::Empty => (Glyph::Empty, Color::Reset),
    };
    Sprite { glyph, color }
}

/// Ghosts that were just eaten show only their eyes until they are a
/// threat again.
fn ghost_sprite(ghost: &Ghost, mode: GhostMode) -> Sprite {
    let harmless = ghost.is_respawning() || (ghost.is_eaten() && mode == GhostMode::Frightened);
    let (glyph, color) = match mode {
        _ if harmless => (Glyph::Eyes, Color::White),
        GhostMode::Frightened => (Glyph::Frightened, Color::Blue),
        GhostMode::Normal => (Glyph::Ghost, Color::Red),
    };
    Sprite { glyph, color }
}

fn draw_cell(
    stdout: &mut Stdout,
    renderer: &Renderer,
    col: usize,
    row: usize,
    sprite: Sprite,
) -> io::Result<()> {
    let text = match sprite.glyph {
        Glyph::Player => "😃",
        Glyph::Ghost => "👻",
        Glyph::Frightened => "😱",
        Glyph::Eyes => "👀",
        Glyph::Wall => "██",
        Glyph::Empty => "  ",
        Glyph::Pellet => "· ",
        Glyph::Power => "● ",
    };
    let x_pos = renderer.origin_x + (col * CELL_W) as u16;
    let y_pos = renderer.origin_y + row as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(sprite.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

fn banner_for<R>(game: &Game<R>, renderer: &Renderer) -> (String, Color) {
    match game.status() {
        GameStatus::Won => (
            format!("YOU WIN with {}! r to restart, q to quit", game.score()),
            Color::Green,
        ),
        GameStatus::Lost => (
            format!("GAME OVER at {} - r to restart, q to quit", game.score()),
            Color::Red,
        ),
        GameStatus::Playing => match &renderer.notice {
            Some(notice) if notice.until > Instant::now() => (notice.text.clone(), notice.color),
            _ => (String::new(), Color::Reset),
        },
    }
}
