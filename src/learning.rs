//! Players and the credit-assignment trainer
//!
//! - [`credit`]: converts a finished game into training updates for the network
//! - [`NeuralLearner`]: the network as a player that learns after every game
//! - [`RandomLearner`]: uniform-random opponent used for bulk training
//! - [`HumanLearner`]: interactive player reading moves from text input

pub mod credit;
pub mod human;
pub mod neural;
pub mod random;

pub use credit::{
    CreditConfig, CreditUpdate, DRAW_REWARD, LEARNING_RATE, LOSS_REWARD, MIN_MOVE_IMPORTANCE,
    RewardSchedule, WIN_REWARD, learn_from_game, move_importance, target_distribution,
};
pub use human::HumanLearner;
pub use neural::NeuralLearner;
pub use random::RandomLearner;
