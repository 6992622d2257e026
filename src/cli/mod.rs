//! Command-line interface for training the network and playing against it

pub mod commands;
pub mod output;
