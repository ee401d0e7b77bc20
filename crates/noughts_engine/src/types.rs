//! Core domain types for tic-tac-toe.

use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// 3x3 tic-tac-toe board.
///
/// A square goes from empty to occupied once and stays that way; the only
/// way to clear the board is to start a new one. Search works on its own
/// copy and is the sole user of [`Board::lift`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Marks an empty square for `player`.
    ///
    /// Returns `false` and leaves the board untouched if the square is taken.
    pub fn place(&mut self, pos: Position, player: Player) -> bool {
        if !self.is_empty(pos) {
            return false;
        }
        self.squares[pos.to_index()] = Square::Occupied(player);
        true
    }

    /// Clears a square. Only used to undo trial moves on a scratch board.
    pub(crate) fn lift(&mut self, pos: Position) {
        self.squares[pos.to_index()] = Square::Empty;
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of squares holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based number so a player can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(Player::X) => "X".to_string(),
                    Square::Occupied(Player::O) => "O".to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Failure to read a board from its compact text form.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// A character other than `X`, `O`, or an empty marker.
    #[display("Unexpected character {found:?} in board")]
    BadCell {
        /// The offending character.
        found: char,
    },
    /// The text did not describe exactly nine squares.
    #[display("Board needs 9 squares, found {found}")]
    WrongLength {
        /// Number of squares actually read.
        found: usize,
    },
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses `"XX.OO...."` style text. `.`, `-` and `_` are empty squares;
    /// whitespace and `|` are ignored so grid-shaped literals work too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(9);
        for c in s.chars() {
            let square = match c.to_ascii_uppercase() {
                'X' => Square::Occupied(Player::X),
                'O' => Square::Occupied(Player::O),
                '.' | '-' | '_' => Square::Empty,
                c if c.is_whitespace() || c == '|' => continue,
                other => return Err(BoardParseError::BadCell { found: other }),
            };
            squares.push(square);
        }
        let squares: [Square; 9] = squares
            .try_into()
            .map_err(|v: Vec<Square>| BoardParseError::WrongLength { found: v.len() })?;
        Ok(Self { squares })
    }
}

/// Outcome of a board, derived on demand and never stored apart from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameOutcome {
    /// True for `Won` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Won(player) => Some(player),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "In progress"),
            GameOutcome::Won(player) => write!(f, "Player {} wins", player),
            GameOutcome::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_refuses_occupied_square() {
        let mut board = Board::new();
        assert!(board.place(Position::Center, Player::X));
        assert!(!board.place(Position::Center, Player::O));
        assert_eq!(board.get(Position::Center), Square::Occupied(Player::X));
    }

    #[test]
    fn test_parse_compact_and_grid_forms() {
        let compact: Board = "XX.OO....".parse().unwrap();
        let grid: Board = "X|X|.\nO|O|.\n.|.|.".parse().unwrap();
        assert_eq!(compact, grid);
        assert_eq!(compact.count(Player::X), 2);
        assert_eq!(compact.count(Player::O), 2);
        assert!(compact.is_empty(Position::TopRight));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "XX.OO...".parse::<Board>(),
            Err(BoardParseError::WrongLength { found: 8 })
        );
        assert_eq!(
            "XX.OO...Z".parse::<Board>(),
            Err(BoardParseError::BadCell { found: 'Z' })
        );
    }

    #[test]
    fn test_display_numbers_empty_squares() {
        let board: Board = "X...O....".parse().unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
