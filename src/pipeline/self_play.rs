//! Plays a single game between two learners

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Learner, Observer},
    tictactoe::{BoardState, GameOutcome, GameStatus, Player},
};

/// Move history and outcome of a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Cell indices in play order, X first
    pub moves: Vec<usize>,
    pub outcome: GameOutcome,
}

impl GameRecord {
    /// Number of moves played
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Play one game from the empty board until it is won or drawn.
///
/// `agent` plays `agent_player`, `opponent` the other mark; X always opens.
/// Nobody learns here - the caller decides what to do with the record.
///
/// # Errors
///
/// Propagates learner and observer errors. A learner that picks an occupied
/// or out-of-range cell yields [`crate::Error::InvalidMove`] or
/// [`crate::Error::InvalidPosition`].
pub fn play_game(
    game_num: usize,
    agent: &mut dyn Learner,
    opponent: &mut dyn Learner,
    agent_player: Player,
    observers: &mut [Box<dyn Observer>],
) -> Result<GameRecord> {
    for observer in observers.iter_mut() {
        observer.on_game_start(game_num)?;
    }

    let mut state = BoardState::new();
    let mut moves = Vec::with_capacity(9);

    let outcome = loop {
        if let GameStatus::Over(outcome) = state.check_terminal() {
            break outcome;
        }

        let learner: &mut dyn Learner = if state.to_move == agent_player {
            &mut *agent
        } else {
            &mut *opponent
        };

        let weights_before = if observers.is_empty() {
            Vec::new()
        } else {
            learner.move_weights(&state).unwrap_or_default()
        };

        let move_pos = learner.select_move(&state)?;

        for observer in observers.iter_mut() {
            observer.on_move(game_num, moves.len(), &state, move_pos, &weights_before)?;
        }

        state.apply_move(move_pos)?;
        moves.push(move_pos);
    };

    Ok(GameRecord { moves, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::RandomLearner;

    #[test]
    fn random_game_is_well_formed() {
        let mut x = RandomLearner::with_seed("x", 1);
        let mut o = RandomLearner::with_seed("o", 2);
        for game_num in 0..50 {
            let record = play_game(game_num, &mut x, &mut o, Player::X, &mut []).unwrap();
            assert!(record.len() >= 5 && record.len() <= 9);

            let game = crate::tictactoe::Game::from_positions(&record.moves).unwrap();
            assert_eq!(game.outcome, Some(record.outcome));
        }
    }

    #[test]
    fn agent_as_o_moves_second() {
        struct Fixed(Vec<usize>);
        impl Learner for Fixed {
            fn select_move(&mut self, _state: &BoardState) -> Result<usize> {
                Ok(self.0.remove(0))
            }
            fn name(&self) -> &str {
                "fixed"
            }
        }

        let mut agent = Fixed(vec![3, 4]);
        let mut opponent = Fixed(vec![0, 1, 2]);
        let record = play_game(0, &mut agent, &mut opponent, Player::O, &mut []).unwrap();
        assert_eq!(record.moves, vec![0, 3, 1, 4, 2]);
        assert_eq!(record.outcome, GameOutcome::Win(Player::X));
    }

    #[test]
    fn illegal_choice_is_reported() {
        struct Stubborn;
        impl Learner for Stubborn {
            fn select_move(&mut self, _state: &BoardState) -> Result<usize> {
                Ok(4)
            }
            fn name(&self) -> &str {
                "stubborn"
            }
        }

        let err = play_game(0, &mut Stubborn, &mut Stubborn, Player::X, &mut []).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidMove { position: 4 }));
    }
}
