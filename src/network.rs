//! Policy network: board encoding, parameters, forward and backward passes

pub mod config;
pub mod encoding;
pub mod model;

pub use config::{DEFAULT_HIDDEN_SIZE, NetworkConfig, OUTPUT_SIZE, OutputActivation};
pub use encoding::{INPUT_SIZE, encode, encode_into};
pub use model::{NeuralNetwork, softmax};
