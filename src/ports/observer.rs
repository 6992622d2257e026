//! Observer port - training observation and reporting
//!
//! Observers receive training events without influencing training itself.

use crate::{
    Result,
    tictactoe::{BoardState, GameOutcome},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - For each move in the game
///    - `on_game_end(game_num, outcome)` - After the agent has learned
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use ttt_rl::{ports::Observer, tictactoe::GameOutcome};
///
/// struct CountingObserver {
///     game_count: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> ttt_rl::Result<()> {
///         self.game_count += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts. `game_num` is 0-based.
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each move, after it is selected and before it is applied.
    ///
    /// # Parameters
    ///
    /// * `state` - Board state before the move
    /// * `move_pos` - Position (0-8) where the move was made
    /// * `weights_before` - Policy of the moving player, empty if it has none
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _state: &BoardState,
        _move_pos: usize,
        _weights_before: &[(usize, f64)],
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game ends.
    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
