//! Training pipeline: repeated self-play followed by learning

use serde::{Deserialize, Serialize};

use super::{observers::OutcomeTally, self_play::play_game};
use crate::{
    Result,
    ports::{Learner, Observer},
    tictactoe::Player,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training games
    pub num_games: usize,

    /// Random seed for the opponent (and any seedable agent)
    pub seed: Option<u64>,

    /// Whether the agent plays as X or O
    pub agent_player: Player,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 150_000,
            seed: None,
            agent_player: Player::O,
        }
    }
}

impl TrainingConfig {
    pub fn with_games(mut self, num_games: usize) -> Self {
        self.num_games = num_games;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_agent_player(mut self, player: Player) -> Self {
        self.agent_player = player;
        self
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total games played
    pub total_games: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(total_games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }
}

impl From<OutcomeTally> for TrainingResult {
    fn from(tally: OutcomeTally) -> Self {
        Self::new(tally.total(), tally.wins, tally.draws, tally.losses)
    }
}

/// Training pipeline for a single learner against an opponent
///
/// Games are played and learned from strictly one after another: each game
/// is finished, the agent learns from it, and only then does the next game
/// start.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training with the given agent and opponent
    pub fn run(
        &mut self,
        agent: &mut dyn Learner,
        opponent: &mut dyn Learner,
    ) -> Result<TrainingResult> {
        self.seed_pair(agent, opponent)?;

        let agent_player = self.config.agent_player;
        let mut tally = OutcomeTally::default();

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_games)?;
        }

        for game_num in 0..self.config.num_games {
            let record = play_game(game_num, agent, opponent, agent_player, &mut self.observers)?;

            agent.learn(&record.moves, record.outcome, agent_player)?;
            opponent.learn(&record.moves, record.outcome, agent_player.opponent())?;

            tally.record(record.outcome, agent_player);

            for observer in &mut self.observers {
                observer.on_game_end(game_num, record.outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(tally.into())
    }

    fn seed_pair(&self, agent: &mut dyn Learner, opponent: &mut dyn Learner) -> Result<()> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
            opponent.set_rng_seed(seed.wrapping_add(1))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::RandomLearner;

    #[test]
    fn test_training_pipeline() {
        let config = TrainingConfig::default().with_games(10).with_seed(42);

        let mut pipeline = TrainingPipeline::new(config);
        let mut agent = RandomLearner::new("Agent");
        let mut opponent = RandomLearner::new("Opponent");

        let result = pipeline.run(&mut agent, &mut opponent).unwrap();

        assert_eq!(result.total_games, 10);
        assert!(result.wins + result.draws + result.losses == 10);
    }

    #[test]
    fn empty_result_has_zero_rates() {
        let result = TrainingResult::new(0, 0, 0, 0);
        assert_eq!(result.win_rate, 0.0);
        assert_eq!(result.loss_rate, 0.0);
    }
}
