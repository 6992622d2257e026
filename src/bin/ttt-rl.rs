//! ttt-rl CLI - Train a tic-tac-toe network by self-play and play against it

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ttt-rl")]
#[command(version, about = "Neural-network tic-tac-toe trained from game outcomes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the network against a random opponent
    Train(ttt_rl::cli::commands::train::TrainArgs),

    /// Train the network, then play against it
    Play(ttt_rl::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => ttt_rl::cli::commands::train::execute(args),
        Commands::Play(args) => ttt_rl::cli::commands::play::execute(args),
    }
}
