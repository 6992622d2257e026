//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;

pub use board::{BoardState, Cell, GameStatus, Player};
pub use game::{Game, GameOutcome, MatchResult, Move, replay_positions};
pub use lines::{LineAnalyzer, WINNING_LINES};
