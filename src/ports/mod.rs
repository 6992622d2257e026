//! Ports (trait boundaries) between the game loop and its participants.
//!
//! Players and training observers are plugged into the pipeline through these
//! traits; concrete implementations live in [`crate::learning`] and
//! [`crate::pipeline::observers`].

pub mod learner;
pub mod observer;

pub use learner::Learner;
pub use observer::Observer;
