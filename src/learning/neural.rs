//! Network-backed learner

use rand::{SeedableRng, rngs::StdRng};

use super::credit::{CreditConfig, CreditUpdate, learn_from_game};
use crate::{
    Result,
    network::{NetworkConfig, NeuralNetwork},
    ports::Learner,
    tictactoe::{BoardState, GameOutcome, Player},
};

/// Plays greedily from the network's policy and trains it after every game.
///
/// Owns the single long-lived [`NeuralNetwork`]; play and training both go
/// through `&mut self`, one game at a time.
#[derive(Debug, Clone)]
pub struct NeuralLearner {
    name: String,
    network: NeuralNetwork,
    credit: CreditConfig,
    games_trained: usize,
    last_updates: Vec<CreditUpdate>,
}

impl NeuralLearner {
    /// Wrap an existing network.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the network shape
    /// does not match the board encoding or the credit settings are invalid.
    pub fn new(name: impl Into<String>, network: NeuralNetwork, credit: CreditConfig) -> Result<Self> {
        network.config().validate_for_board()?;
        credit.validate()?;
        Ok(Self {
            name: name.into(),
            network,
            credit,
            games_trained: 0,
            last_updates: Vec::new(),
        })
    }

    /// Build a fresh network from `config`, seeded when `seed` is given
    pub fn from_config(
        name: impl Into<String>,
        config: NetworkConfig,
        credit: CreditConfig,
        seed: Option<u64>,
    ) -> Result<Self> {
        let network = match seed {
            Some(seed) => NeuralNetwork::with_seed(config, seed)?,
            None => NeuralNetwork::new(config, &mut StdRng::from_rng(&mut rand::rng()))?,
        };
        Self::new(name, network, credit)
    }

    pub fn network(&self) -> &NeuralNetwork {
        &self.network
    }

    /// Number of games this learner has been trained on
    pub fn games_trained(&self) -> usize {
        self.games_trained
    }

    /// Updates applied by the most recent call to `learn`
    pub fn last_updates(&self) -> &[CreditUpdate] {
        &self.last_updates
    }
}

impl Learner for NeuralLearner {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        self.network
            .select_move(state)
            .ok_or(crate::Error::NoValidMoves)
    }

    fn learn(&mut self, moves: &[usize], outcome: GameOutcome, role: Player) -> Result<()> {
        self.last_updates = learn_from_game(&mut self.network, moves, outcome, role, &self.credit)?;
        self.games_trained += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn move_weights(&mut self, state: &BoardState) -> Option<Vec<(usize, f64)>> {
        let outputs = self.network.evaluate(state);
        Some(outputs.iter().copied().enumerate().collect())
    }
}
