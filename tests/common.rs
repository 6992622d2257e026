//! Shared helpers for the integration tests

use ttt_rl::{
    learning::{CreditConfig, NeuralLearner},
    network::{NetworkConfig, NeuralNetwork},
    tictactoe::{BoardState, GameStatus},
};

/// Small seeded network so tests stay fast
pub fn small_network(seed: u64) -> NeuralNetwork {
    NeuralNetwork::with_seed(NetworkConfig::new(24), seed).unwrap()
}

/// Seeded learner around [`small_network`]
pub fn small_learner(seed: u64) -> NeuralLearner {
    NeuralLearner::new("Network", small_network(seed), CreditConfig::default()).unwrap()
}

/// Every board reachable from the empty board by legal play, terminal ones included
pub fn reachable_states() -> Vec<BoardState> {
    let mut seen = std::collections::HashSet::new();
    let mut stack = vec![BoardState::new()];
    let mut states = Vec::new();

    while let Some(state) = stack.pop() {
        if !seen.insert(state.encode()) {
            continue;
        }
        states.push(state);
        if state.check_terminal() != GameStatus::InProgress {
            continue;
        }
        for pos in state.empty_positions() {
            stack.push(state.make_move(pos).unwrap());
        }
    }
    states
}
