//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// Outcome seen from one player's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl GameOutcome {
    /// Result of this outcome for `player`
    pub fn result_for(self, player: Player) -> MatchResult {
        match self {
            GameOutcome::Win(winner) if winner == player => MatchResult::Win,
            GameOutcome::Win(_) => MatchResult::Loss,
            GameOutcome::Draw => MatchResult::Draw,
        }
    }
}

/// A complete game with history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Game {
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game from the empty board
    pub fn new() -> Self {
        Game {
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Rebuild a game from a plain list of cell indices
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedHistory`] if a move is illegal at the
    /// point it is played or if moves continue after the game ended.
    pub fn from_positions(positions: &[usize]) -> Result<Self, crate::Error> {
        let mut game = Game::new();
        for (move_index, &position) in positions.iter().enumerate() {
            game.play(position)
                .map_err(|e| crate::Error::MalformedHistory {
                    move_index,
                    message: e.to_string(),
                })?;
        }
        Ok(game)
    }

    /// Play a move
    pub fn play(&mut self, position: usize) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let mut state = self.current_state()?;
        let player = state.to_move;
        state.apply_move(position)?;

        self.moves.push(Move { position, player });

        self.outcome = state.check_terminal().outcome();

        Ok(())
    }

    /// Returns the board state after applying moves[0..end_index].
    /// If end_index >= moves.len(), all moves are applied.
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the current state.
    /// This indicates corrupted game data.
    pub fn replay_until(&self, end_index: usize) -> Result<BoardState, crate::Error> {
        replay_positions(
            self.moves
                .iter()
                .take(end_index)
                .map(|m| m.position)
                .collect::<Vec<_>>()
                .as_slice(),
        )
    }

    /// Get current board state
    pub fn current_state(&self) -> Result<BoardState, crate::Error> {
        self.replay_until(self.moves.len())
    }
}

/// Replay a list of cell indices from the empty board.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedHistory`] naming the first move that
/// cannot be applied.
pub fn replay_positions(positions: &[usize]) -> Result<BoardState, crate::Error> {
    let mut state = BoardState::new();
    for (move_index, &position) in positions.iter().enumerate() {
        state
            .apply_move(position)
            .map_err(|e| crate::Error::MalformedHistory {
                move_index,
                message: e.to_string(),
            })?;
    }
    Ok(state)
}
