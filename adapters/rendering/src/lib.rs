#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for twenty48 adapters.
//!
//! Everything here is backend-agnostic: the ANSI palette, the text layout of
//! the board, the key bindings, and the [`RenderingBackend`] trait that
//! concrete terminal adapters implement.

use std::fmt::Write as _;

use anyhow::Result as AnyResult;
use thiserror::Error;
use twenty48_core::{Direction, Grid, InvariantViolation, Outcome, Tile, GRID_SIZE};

const RESET: &str = "\x1b[0m";
const CELL_WIDTH: usize = 4;

/// ANSI foreground colors used for tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileColor {
    /// Standard red.
    Red,
    /// Standard green.
    Green,
    /// Standard blue.
    Blue,
    /// Standard magenta.
    Magenta,
    /// Standard cyan.
    Cyan,
    /// Standard white.
    White,
    /// Bright red.
    BrightRed,
    /// Bright yellow.
    BrightYellow,
    /// Bright blue.
    BrightBlue,
    /// Bright magenta.
    BrightMagenta,
    /// Bright cyan.
    BrightCyan,
    /// Bright white.
    BrightWhite,
}

impl TileColor {
    /// Escape sequence that switches the terminal foreground to this color.
    #[must_use]
    pub const fn ansi_code(self) -> &'static str {
        match self {
            TileColor::Red => "\x1b[31m",
            TileColor::Green => "\x1b[32m",
            TileColor::Blue => "\x1b[34m",
            TileColor::Magenta => "\x1b[35m",
            TileColor::Cyan => "\x1b[36m",
            TileColor::White => "\x1b[37m",
            TileColor::BrightRed => "\x1b[91m",
            TileColor::BrightYellow => "\x1b[93m",
            TileColor::BrightBlue => "\x1b[94m",
            TileColor::BrightMagenta => "\x1b[95m",
            TileColor::BrightCyan => "\x1b[96m",
            TileColor::BrightWhite => "\x1b[97m",
        }
    }

    /// Color assigned to a tile value.
    ///
    /// Power-of-two values above 2048 share the 2048 color. Anything else is
    /// not a tile and has no color.
    #[must_use]
    pub const fn for_tile(value: Tile) -> Option<Self> {
        let color = match value {
            0 => TileColor::White,
            2 => TileColor::BrightWhite,
            4 => TileColor::BrightRed,
            8 => TileColor::Red,
            16 => TileColor::BrightYellow,
            32 => TileColor::Green,
            64 => TileColor::BrightCyan,
            128 => TileColor::Cyan,
            256 => TileColor::Blue,
            512 => TileColor::BrightBlue,
            1024 => TileColor::Magenta,
            value if value >= 2048 && value.is_power_of_two() => TileColor::BrightMagenta,
            _ => return None,
        };
        Some(color)
    }
}

/// Action requested by a single keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Slide the board.
    Slide(Direction),
    /// Draw the board again without playing a turn.
    Redraw,
    /// End the session without touching the board.
    Quit,
}

/// Characters bound to each action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    /// Slides up.
    pub up: char,
    /// Slides down.
    pub down: char,
    /// Slides left.
    pub left: char,
    /// Slides right.
    pub right: char,
    /// Ends the session.
    pub quit: char,
    /// Reprints the board.
    pub redraw: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: 'w',
            down: 's',
            left: 'a',
            right: 'd',
            quit: 'q',
            redraw: 'p',
        }
    }
}

impl KeyBindings {
    /// Creates bindings, rejecting any character bound to two actions.
    pub fn new(
        up: char,
        down: char,
        left: char,
        right: char,
        quit: char,
        redraw: char,
    ) -> Result<Self, RenderingError> {
        let bindings = Self {
            up,
            down,
            left,
            right,
            quit,
            redraw,
        };
        let keys = bindings.keys();
        for (index, key) in keys.iter().enumerate() {
            if keys[index + 1..].contains(key) {
                return Err(RenderingError::DuplicateBinding { key: *key });
            }
        }
        Ok(bindings)
    }

    fn keys(&self) -> [char; 6] {
        [
            self.up,
            self.down,
            self.left,
            self.right,
            self.quit,
            self.redraw,
        ]
    }

    /// Action bound to `key`, if any.
    #[must_use]
    pub fn resolve(&self, key: char) -> Option<KeyAction> {
        let action = match key {
            key if key == self.up => KeyAction::Slide(Direction::Up),
            key if key == self.down => KeyAction::Slide(Direction::Down),
            key if key == self.left => KeyAction::Slide(Direction::Left),
            key if key == self.right => KeyAction::Slide(Direction::Right),
            key if key == self.quit => KeyAction::Quit,
            key if key == self.redraw => KeyAction::Redraw,
            _ => return None,
        };
        Some(action)
    }

    /// One-line reminder of the controls, shown under the board.
    #[must_use]
    pub fn help_line(&self) -> String {
        format!(
            "{}/{}/{}/{} or arrows to move, {} to redraw, {} to quit",
            self.up, self.left, self.down, self.right, self.redraw, self.quit
        )
    }
}

/// Immutable snapshot handed to backends for drawing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Board to draw.
    pub grid: Grid,
    /// Outcome after the most recent turn.
    pub outcome: Outcome,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub const fn new(grid: Grid, outcome: Outcome) -> Self {
        Self { grid, outcome }
    }
}

/// Backend-independent presentation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Key bindings the backend resolves keystrokes with.
    pub bindings: KeyBindings,
    /// Whether tiles are wrapped in ANSI color sequences.
    pub colored: bool,
}

impl Presentation {
    /// Creates a new presentation descriptor.
    #[must_use]
    pub const fn new(bindings: KeyBindings, colored: bool) -> Self {
        Self { bindings, colored }
    }
}

/// Rendering backend capable of presenting twenty48 scenes.
pub trait RenderingBackend {
    /// Runs the backend until the player quits or the outcome becomes terminal.
    ///
    /// The `play_turn` closure receives every slide requested by the player and
    /// may mutate the scene before it is drawn again.
    fn run<F>(self, presentation: Presentation, scene: Scene, play_turn: F) -> AnyResult<()>
    where
        F: FnMut(Direction, &mut Scene) -> AnyResult<()>;
}

/// Errors that can occur while preparing frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// The board holds a value that is not a tile.
    #[error("cannot draw board: {0}")]
    InvalidTile(#[from] InvariantViolation),
    /// The same character is bound to more than one action.
    #[error("key '{key}' is bound to more than one action")]
    DuplicateBinding {
        /// Character bound twice.
        key: char,
    },
}

/// Lays the board out as a bordered table, one line per entry.
///
/// Every cell is four characters wide and right aligned. When `colored` is
/// set each value is wrapped in its palette color followed by a reset.
pub fn board_lines(grid: &Grid, colored: bool) -> Result<Vec<String>, RenderingError> {
    grid.validate()?;

    let separator = format!("{}+", "+----".repeat(GRID_SIZE));
    let mut lines = Vec::with_capacity(GRID_SIZE * 2 + 1);

    for row in grid.rows() {
        lines.push(separator.clone());

        let mut line = String::from("|");
        for value in row {
            let color = TileColor::for_tile(*value).unwrap_or(TileColor::White);
            if colored {
                let _ = write!(
                    line,
                    "{}{value:>CELL_WIDTH$}{RESET}|",
                    color.ansi_code()
                );
            } else {
                let _ = write!(line, "{value:>CELL_WIDTH$}|");
            }
        }
        lines.push(line);
    }

    lines.push(separator);
    Ok(lines)
}

/// Message announcing a finished game.
#[must_use]
pub const fn outcome_banner(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Playing => None,
        Outcome::Victory => Some("You reached 2048. You win!"),
        Outcome::Defeat => Some("No moves left. Game over."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twenty48_core::CellCoord;

    #[test]
    fn plain_board_matches_table_layout() {
        let grid = Grid::from_rows([[0, 2, 0, 0], [0; 4], [0, 0, 1024, 0], [0, 0, 0, 2048]])
            .expect("valid grid");
        let lines = board_lines(&grid, false).expect("valid grid renders");

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "+----+----+----+----+");
        assert_eq!(lines[1], "|   0|   2|   0|   0|");
        assert_eq!(lines[5], "|   0|   0|1024|   0|");
        assert_eq!(lines[7], "|   0|   0|   0|2048|");
        assert_eq!(lines[8], lines[0]);
    }

    #[test]
    fn colored_board_wraps_each_cell() {
        let grid = Grid::from_rows([[4, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).expect("valid grid");
        let lines = board_lines(&grid, true).expect("valid grid renders");

        assert!(lines[1].starts_with("|\x1b[91m   4\x1b[0m|\x1b[37m   0\x1b[0m|"));
    }

    #[test]
    fn invalid_tiles_are_refused() {
        let mut grid = Grid::new();
        grid.set(CellCoord::new(1, 1), 6);

        assert_eq!(
            board_lines(&grid, false),
            Err(RenderingError::InvalidTile(InvariantViolation {
                cell: CellCoord::new(1, 1),
                value: 6,
            }))
        );
    }

    #[test]
    fn palette_covers_every_tile_up_to_the_goal() {
        let mut value = 2;
        while value <= 2048 {
            assert!(TileColor::for_tile(value).is_some(), "{value} has no color");
            value *= 2;
        }
        assert_eq!(TileColor::for_tile(4096), Some(TileColor::BrightMagenta));
        assert_eq!(TileColor::for_tile(3), None);
        assert_eq!(TileColor::for_tile(1), None);
    }

    #[test]
    fn default_bindings_use_wasd() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.resolve('w'), Some(KeyAction::Slide(Direction::Up)));
        assert_eq!(bindings.resolve('a'), Some(KeyAction::Slide(Direction::Left)));
        assert_eq!(bindings.resolve('s'), Some(KeyAction::Slide(Direction::Down)));
        assert_eq!(bindings.resolve('d'), Some(KeyAction::Slide(Direction::Right)));
        assert_eq!(bindings.resolve('q'), Some(KeyAction::Quit));
        assert_eq!(bindings.resolve('p'), Some(KeyAction::Redraw));
        assert_eq!(bindings.resolve('x'), None);
    }

    #[test]
    fn duplicate_bindings_are_rejected() {
        assert_eq!(
            KeyBindings::new('k', 'j', 'h', 'l', 'q', 'r').map(|b| b.resolve('h')),
            Ok(Some(KeyAction::Slide(Direction::Left)))
        );
        assert_eq!(
            KeyBindings::new('w', 's', 'a', 'd', 'w', 'p'),
            Err(RenderingError::DuplicateBinding { key: 'w' })
        );
    }

    #[test]
    fn only_terminal_outcomes_have_banners() {
        assert!(outcome_banner(Outcome::Playing).is_none());
        assert!(outcome_banner(Outcome::Victory).is_some());
        assert!(outcome_banner(Outcome::Defeat).is_some());
    }
}
