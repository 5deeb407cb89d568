#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Terminal rendering adapter for twenty48, built on crossterm.
//!
//! The backend switches the terminal into raw mode for the lifetime of
//! [`RenderingBackend::run`], reads one keystroke at a time, and redraws the
//! board after every turn. Raw mode is owned by a guard so the terminal is
//! restored on every exit path, including errors returned from the turn
//! closure.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, MoveToNextLine, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use log::{debug, info};
use twenty48_core::Direction;
use twenty48_rendering::{
    board_lines, outcome_banner, KeyAction, KeyBindings, Presentation, RenderingBackend, Scene,
};

/// Rendering backend that draws into the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalBackend;

impl TerminalBackend {
    /// Creates a new terminal backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RenderingBackend for TerminalBackend {
    fn run<F>(self, presentation: Presentation, scene: Scene, mut play_turn: F) -> Result<()>
    where
        F: FnMut(Direction, &mut Scene) -> Result<()>,
    {
        let mut scene = scene;
        let _raw_mode = RawModeGuard::new().context("failed to enter raw terminal mode")?;
        let mut stdout = io::stdout();
        draw(&mut stdout, &presentation, &scene)?;

        loop {
            let Some(action) = read_action(&presentation.bindings)? else {
                continue;
            };

            match action {
                KeyAction::Quit => {
                    info!("quit requested");
                    break;
                }
                KeyAction::Redraw => draw(&mut stdout, &presentation, &scene)?,
                KeyAction::Slide(direction) => {
                    play_turn(direction, &mut scene)?;
                    draw(&mut stdout, &presentation, &scene)?;
                    if scene.outcome.is_terminal() {
                        break;
                    }
                }
            }
        }

        Ok(())
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), Hide)?;
        debug!("raw mode enabled");
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show);
        let _ = terminal::disable_raw_mode();
        debug!("raw mode disabled");
    }
}

fn read_action(bindings: &KeyBindings) -> io::Result<Option<KeyAction>> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            debug!("key event: {:?} with modifiers {:?}", key.code, key.modifiers);
            Ok(translate_key(key, bindings))
        }
        _ => Ok(None),
    }
}

fn translate_key(key: KeyEvent, bindings: &KeyBindings) -> Option<KeyAction> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }
        KeyCode::Up => Some(KeyAction::Slide(Direction::Up)),
        KeyCode::Down => Some(KeyAction::Slide(Direction::Down)),
        KeyCode::Left => Some(KeyAction::Slide(Direction::Left)),
        KeyCode::Right => Some(KeyAction::Slide(Direction::Right)),
        KeyCode::Char(character) => bindings.resolve(character),
        _ => None,
    }
}

fn draw<W: Write>(out: &mut W, presentation: &Presentation, scene: &Scene) -> Result<()> {
    let lines = board_lines(&scene.grid, presentation.colored)?;

    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    for line in lines {
        queue!(out, Print(line), MoveToNextLine(1))?;
    }
    queue!(
        out,
        Print(presentation.bindings.help_line()),
        MoveToNextLine(1)
    )?;
    if let Some(banner) = outcome_banner(scene.outcome) {
        queue!(out, Print(banner), MoveToNextLine(1))?;
    }

    out.flush().context("failed to flush terminal output")
}
