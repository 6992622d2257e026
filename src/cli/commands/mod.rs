//! Subcommands of the `ttt-rl` binary

pub mod play;
pub mod train;
