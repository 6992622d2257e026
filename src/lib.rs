//! Self-play tic-tac-toe trainer built on a small neural network
//!
//! This crate provides:
//! - Tic-tac-toe rules with validated moves and terminal detection
//! - A two-layer network (18 inputs, ReLU hidden layer, softmax over 9 cells)
//! - Outcome-based credit assignment that trains the network after each game
//! - A training pipeline against a random opponent with pluggable observers
//! - A CLI for training and for playing against the trained network

pub mod cli;
pub mod error;
pub mod learning;
pub mod network;
pub mod pipeline;
pub mod ports;
pub mod tictactoe;

pub use error::{Error, Result};
pub use learning::{CreditConfig, HumanLearner, NeuralLearner, RandomLearner};
pub use network::{NetworkConfig, NeuralNetwork, OutputActivation};
pub use tictactoe::{BoardState, Game, GameOutcome, Player};
