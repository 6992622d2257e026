//! Play command - Train the network, then play against it interactively

use std::io::{self, BufRead, BufReader, Write};

use anyhow::Result;
use clap::Parser;

use super::train::{TrainArgs, parse_player_token, train_network};
use crate::{
    learning::{HumanLearner, NeuralLearner},
    pipeline::{OutcomeTally, play_game},
    ports::{Learner, Observer},
    tictactoe::{BoardState, MatchResult, Player, replay_positions},
};

#[derive(Parser, Debug)]
#[command(about = "Train the network, then play against it")]
pub struct PlayArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    /// Which token you play (`x` or `o`); X always moves first
    #[arg(long, default_value = "x")]
    pub human: String,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let human_player = parse_player_token(&args.human, "--human")?;
    let (mut network, _) = train_network(&args.train)?;

    let mut human = HumanLearner::new("Human", BufReader::new(io::stdin()), io::stdout());
    let tally = play_session(&mut network, &mut human, human_player, Box::new(io::stdout()))?;

    println!(
        "Session over. You won {}, lost {}, drew {}.",
        tally.wins, tally.losses, tally.draws
    );
    Ok(())
}

/// Announces the network's moves to the human
struct MoveAnnouncer {
    network_player: Player,
    writer: Box<dyn Write + Send>,
}

impl Observer for MoveAnnouncer {
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        state: &BoardState,
        move_pos: usize,
        _weights_before: &[(usize, f64)],
    ) -> crate::Result<()> {
        if state.to_move == self.network_player {
            writeln!(
                self.writer,
                "Computer placed {} in position {move_pos}",
                self.network_player
            )?;
            self.writer.flush()?;
        }
        Ok(())
    }
}

/// Play games until the human declines another one.
///
/// The network learns from every finished game, playing the side the human
/// does not. Its moves are announced on `announcer`. Returns the tally from
/// the human's side.
pub fn play_session<R, W>(
    network: &mut NeuralLearner,
    human: &mut HumanLearner<R, W>,
    human_player: Player,
    announcer: Box<dyn Write + Send>,
) -> Result<OutcomeTally>
where
    R: BufRead + Send,
    W: Write + Send,
{
    let network_player = human_player.opponent();
    let mut observers: Vec<Box<dyn Observer>> = vec![Box::new(MoveAnnouncer {
        network_player,
        writer: announcer,
    })];
    let mut tally = OutcomeTally::default();

    human.tell(&format!(
        "Welcome to Tic Tac Toe! You are {human_player}, the computer is {network_player}."
    ))?;
    human.tell("Enter positions as numbers from 0 to 8 (see picture).")?;
    human.tell("0 1 2\n3 4 5\n6 7 8")?;

    for game_num in 0.. {
        let record = play_game(game_num, network, human, network_player, &mut observers)?;
        network.learn(&record.moves, record.outcome, network_player)?;
        tally.record(record.outcome, human_player);

        let final_board = replay_positions(&record.moves)?;
        human.tell(final_board.to_string().trim_end())?;

        let verdict = match record.outcome.result_for(human_player) {
            MatchResult::Win => "You win!",
            MatchResult::Loss => "Computer wins!",
            MatchResult::Draw => "Draw!",
        };
        human.tell(verdict)?;

        if !human.confirm("Play again? (y/n)")? {
            break;
        }
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use std::{
        io::Cursor,
        sync::{Arc, Mutex},
    };

    use super::*;
    use crate::{learning::CreditConfig, network::NetworkConfig};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn network() -> NeuralLearner {
        NeuralLearner::from_config(
            "Network",
            NetworkConfig::new(16),
            CreditConfig::default(),
            Some(5),
        )
        .unwrap()
    }

    // Enough legal entries to finish any game; occupied cells are re-prompted.
    const EVERY_CELL: &str = "0\n1\n2\n3\n4\n5\n6\n7\n8\n";

    #[test]
    fn session_ends_when_the_human_declines() {
        let mut network = network();
        let announcer = SharedBuffer::default();
        let mut human = HumanLearner::new(
            "Human",
            Cursor::new(EVERY_CELL.to_string() + "n\n"),
            Vec::new(),
        );

        let tally =
            play_session(&mut network, &mut human, Player::X, Box::new(announcer.clone())).unwrap();
        assert_eq!(tally.total(), 1);
        assert_eq!(network.games_trained(), 1);

        let (_, output) = human.into_inner();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Play again? (y/n)"));
        assert!(announcer.text().contains("Computer placed O in position"));
    }

    #[test]
    fn only_the_network_moves_are_announced() {
        let mut network = network();
        let announcer = SharedBuffer::default();
        let mut human = HumanLearner::new(
            "Human",
            Cursor::new(EVERY_CELL.to_string() + "n\n"),
            Vec::new(),
        );

        play_session(&mut network, &mut human, Player::O, Box::new(announcer.clone())).unwrap();

        let text = announcer.text();
        let lines: Vec<&str> = text.lines().collect();
        // X opens and X needs at least three moves to end a game.
        assert!(lines.len() >= 3);
        assert!(
            lines
                .iter()
                .all(|line| line.starts_with("Computer placed X in position "))
        );

        let (_, output) = human.into_inner();
        assert!(!String::from_utf8(output).unwrap().contains("Computer placed"));
    }

    #[test]
    fn closed_input_mid_game_is_an_error() {
        let mut network = network();
        let mut human = HumanLearner::new("Human", Cursor::new(""), Vec::new());
        let err = play_session(
            &mut network,
            &mut human,
            Player::X,
            Box::new(SharedBuffer::default()),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::Error>(),
            Some(crate::Error::InputClosed)
        ));
        assert_eq!(network.games_trained(), 0);
    }
}
