//! Credit assignment: turning a finished game into per-move training targets
//!
//! Every move the network made is replayed, re-evaluated and pushed towards a
//! target distribution. Winning and drawn games reinforce the move played;
//! lost games move probability away from it onto the other empty cells. The
//! step size grows linearly with how late in the game the move was made.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    network::{NeuralNetwork, OUTPUT_SIZE},
    tictactoe::{BoardState, Game, GameOutcome, MatchResult, Player},
};

/// Base reward for a game the network won
pub const WIN_REWARD: f64 = 1.0;

/// Base reward for a drawn game
pub const DRAW_REWARD: f64 = 0.3;

/// Base reward for a game the network lost
pub const LOSS_REWARD: f64 = -2.0;

/// Learning rate used for every credit-assignment update
pub const LEARNING_RATE: f64 = 0.01;

/// Importance of the first move of a game; the weight rises linearly from here
pub const MIN_MOVE_IMPORTANCE: f64 = 0.5;

/// Maximum number of moves in a game
const MAX_MOVES: usize = 9;

/// Base rewards by outcome, from the network's side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardSchedule {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            win: WIN_REWARD,
            draw: DRAW_REWARD,
            loss: LOSS_REWARD,
        }
    }
}

impl RewardSchedule {
    /// Base reward of `outcome` for the side playing `player`
    pub fn reward_for(&self, outcome: GameOutcome, player: Player) -> f64 {
        match outcome.result_for(player) {
            MatchResult::Win => self.win,
            MatchResult::Draw => self.draw,
            MatchResult::Loss => self.loss,
        }
    }
}

/// Hyperparameters of credit assignment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditConfig {
    pub rewards: RewardSchedule,
    pub learning_rate: f64,
}

impl CreditConfig {
    pub fn with_rewards(mut self, rewards: RewardSchedule) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Reject non-finite values and a non-positive learning rate
    pub fn validate(&self) -> Result<()> {
        let RewardSchedule { win, draw, loss } = self.rewards;
        if ![win, draw, loss].iter().all(|r| r.is_finite()) {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("rewards must be finite (win={win}, draw={draw}, loss={loss})"),
            });
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "learning rate must be positive and finite, got {}",
                    self.learning_rate
                ),
            });
        }
        Ok(())
    }
}

impl Default for CreditConfig {
    fn default() -> Self {
        Self {
            rewards: RewardSchedule::default(),
            learning_rate: LEARNING_RATE,
        }
    }
}

/// One training example produced from a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditUpdate {
    /// Index of the move within the game
    pub move_index: usize,
    /// Cell the network played
    pub position: usize,
    /// Base reward scaled by [`move_importance`]
    pub scaled_reward: f64,
    /// Distribution the network was trained towards
    pub target: [f64; OUTPUT_SIZE],
}

/// Weight of the move at `move_index` in a game of `num_moves` moves.
///
/// `0.5 + 0.5 * move_index / num_moves`: 0.5 for the opening move, rising
/// linearly towards 1.0.
pub fn move_importance(move_index: usize, num_moves: usize) -> f64 {
    if num_moves == 0 {
        return MIN_MOVE_IMPORTANCE;
    }
    MIN_MOVE_IMPORTANCE + (1.0 - MIN_MOVE_IMPORTANCE) * move_index as f64 / num_moves as f64
}

/// Training target for playing `played` on `board`.
///
/// A non-negative reward puts all mass on the move played. A negative reward
/// spreads the mass uniformly over every other empty cell; the result is all
/// zeros when no other cell is empty.
///
/// # Panics
///
/// Panics if `played` is not a cell index (`played >= 9`).
pub fn target_distribution(
    board: &BoardState,
    played: usize,
    scaled_reward: f64,
) -> [f64; OUTPUT_SIZE] {
    assert!(played < OUTPUT_SIZE, "played cell {played} is off the board");

    let mut target = [0.0; OUTPUT_SIZE];
    if scaled_reward >= 0.0 {
        target[played] = 1.0;
        return target;
    }

    let alternatives: Vec<usize> = board
        .empty_positions()
        .into_iter()
        .filter(|&pos| pos != played)
        .collect();
    if alternatives.is_empty() {
        return target;
    }
    let share = 1.0 / alternatives.len() as f64;
    for pos in alternatives {
        target[pos] = share;
    }
    target
}

/// Train `network` on every move it made in a finished game.
///
/// `network_player` is the mark the network played: X trains on the even
/// move indices, O on the odd ones. Opponent moves are skipped. Returns the
/// updates in the order they were applied.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedHistory`] without touching the network if
/// `moves` cannot be replayed from the empty board (illegal move, more than
/// nine moves, or moves after the game ended), if the game is unfinished, or
/// if its result differs from `outcome`.
pub fn learn_from_game(
    network: &mut NeuralNetwork,
    moves: &[usize],
    outcome: GameOutcome,
    network_player: Player,
    config: &CreditConfig,
) -> Result<Vec<CreditUpdate>> {
    if moves.len() > MAX_MOVES {
        return Err(crate::Error::MalformedHistory {
            move_index: MAX_MOVES,
            message: format!(
                "history has {} moves, a game has at most {MAX_MOVES}",
                moves.len()
            ),
        });
    }
    let game = Game::from_positions(moves)?;
    match game.outcome {
        Some(actual) if actual == outcome => {}
        Some(actual) => {
            return Err(crate::Error::MalformedHistory {
                move_index: moves.len(),
                message: format!("history ends in {actual:?}, not {outcome:?}"),
            });
        }
        None => {
            return Err(crate::Error::MalformedHistory {
                move_index: moves.len(),
                message: "game is not finished".to_string(),
            });
        }
    }

    let base_reward = config.rewards.reward_for(outcome, network_player);
    let num_moves = moves.len();
    let mut updates = Vec::with_capacity(num_moves.div_ceil(2));

    for (move_index, &position) in moves.iter().enumerate() {
        if Player::for_move_index(move_index) != network_player {
            continue;
        }

        let board = game.replay_until(move_index)?;
        network.evaluate(&board);

        let scaled_reward = base_reward * move_importance(move_index, num_moves);
        let target = target_distribution(&board, position, scaled_reward);
        network.backward(&target, config.learning_rate, scaled_reward);

        updates.push(CreditUpdate {
            move_index,
            position,
            scaled_reward,
            target,
        });
    }

    Ok(updates)
}
