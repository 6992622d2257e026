//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    game::GameOutcome,
    lines::{LineAnalyzer, WINNING_LINES},
};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this mark, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Player who makes the move at `move_index` (X always opens)
    pub fn for_move_index(move_index: usize) -> Player {
        if move_index.is_multiple_of(2) {
            Player::X
        } else {
            Player::O
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// Result of evaluating a board for termination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Over(GameOutcome),
}

impl GameStatus {
    pub fn outcome(self) -> Option<GameOutcome> {
        match self {
            GameStatus::Over(outcome) => Some(outcome),
            GameStatus::InProgress => None,
        }
    }
}

/// Complete board state including cells and whose turn it is
///
/// Implements `Copy`: it is 10 bytes (9 cells + the player to move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; 9],
    pub to_move: Player,
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        BoardState {
            cells: [Cell::Empty; 9],
            to_move: Player::X,
        }
    }

    /// Clear every cell and give the turn back to X
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Create a board from a string representation.
    ///
    /// The string must contain 9 cell characters once whitespace and `/`
    /// separators are removed. The player to move is inferred from the piece
    /// counts (X always opens).
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 9 cells are given, a character is not a
    /// valid cell, or the piece counts cannot arise from X-first play.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if chars.len() < 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().take(9).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        let x_count = cells.iter().filter(|&&c| c == Cell::X).count();
        let o_count = cells.iter().filter(|&&c| c == Cell::O).count();
        let to_move = if x_count == o_count {
            Player::X
        } else if x_count == o_count + 1 {
            Player::O
        } else {
            return Err(crate::Error::InvalidPieceCounts { x_count, o_count });
        };

        Ok(BoardState { cells, to_move })
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Get all empty positions
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check a candidate position without touching the board
    pub fn validate_move(&self, pos: usize) -> Result<(), crate::Error> {
        if pos >= 9 {
            return Err(crate::Error::InvalidPosition { position: pos });
        }
        if !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }
        Ok(())
    }

    /// Make a move and return a new board state
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, pos: usize) -> Result<BoardState, crate::Error> {
        let mut next = *self;
        next.apply_move(pos)?;
        Ok(next)
    }

    /// Place the current player's mark at `pos` and pass the turn.
    ///
    /// The board is left untouched when the move is rejected.
    pub fn apply_move(&mut self, pos: usize) -> Result<(), crate::Error> {
        self.validate_move(pos)?;
        self.cells[pos] = self.to_move.to_cell();
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Evaluate rows, then columns, then diagonals for three in a row.
    ///
    /// A full board with no completed line is a draw.
    pub fn check_terminal(&self) -> GameStatus {
        if let Some(line) = LineAnalyzer::first_completed_line(&self.cells)
            && let Some(winner) = self.cells[WINNING_LINES[line][0]].to_player()
        {
            return GameStatus::Over(GameOutcome::Win(winner));
        }

        if self.cells.contains(&Cell::Empty) {
            GameStatus::InProgress
        } else {
            GameStatus::Over(GameOutcome::Draw)
        }
    }

    /// Get a compact string representation, e.g. `X...O...._X`
    pub fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            self.to_move
        )
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let cells = &self.cells[row * 3..row * 3 + 3];
            writeln!(
                f,
                "{} {} {}",
                cells[0].to_char(),
                cells[1].to_char(),
                cells[2].to_char()
            )?;
        }
        Ok(())
    }
}
