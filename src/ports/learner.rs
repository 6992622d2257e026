//! Learner port - anything that can take a side in a game

use crate::{
    Result,
    tictactoe::{BoardState, GameOutcome, Player},
};

/// Learner trait - unified interface for every kind of player
///
/// The self-play driver only talks to players through this trait, which
/// lets the same loop pit the neural network against a uniform-random
/// opponent during training and against a human afterwards.
///
/// # Examples
///
/// ```no_run
/// use ttt_rl::{ports::Learner, tictactoe::BoardState};
///
/// fn opening_move<L: Learner>(player: &mut L) -> ttt_rl::Result<usize> {
///     player.select_move(&BoardState::new())
/// }
/// ```
pub trait Learner: Send {
    /// Select a move for the given board state.
    ///
    /// Must return an empty cell of `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid moves are available (terminal state) or
    /// the move source failed (e.g. closed input).
    fn select_move(&mut self, state: &BoardState) -> Result<usize>;

    /// Update the learner after a game completes.
    ///
    /// # Parameters
    ///
    /// * `moves` - Sequence of move positions (0-8) made during the game,
    ///   starting with X
    /// * `outcome` - Final outcome of the game
    /// * `role` - Which player this learner was playing as
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for non-adaptive players.
    fn learn(&mut self, _moves: &[usize], _outcome: GameOutcome, _role: Player) -> Result<()> {
        Ok(())
    }

    /// Get the learner's name.
    fn name(&self) -> &str;

    /// Probability the learner assigns to each cell of `state`, if it has an
    /// explicit policy.
    fn move_weights(&mut self, _state: &BoardState) -> Option<Vec<(usize, f64)>> {
        None
    }

    /// Seed the learner's internal random number generator.
    ///
    /// Training pipelines call this when given a deterministic seed.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
