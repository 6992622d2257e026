//! Observer implementations for training pipelines
//!
//! Observers collect statistics and produce reports during training without
//! coupling the training loop to any output format.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{BoardState, GameOutcome, MatchResult, Player},
};

/// Games between two batch reports by default
pub const DEFAULT_REPORT_INTERVAL: usize = 10_000;

/// Win/draw/loss tally from one player's side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl OutcomeTally {
    pub fn record(&mut self, outcome: GameOutcome, player: Player) {
        match outcome.result_for(player) {
            MatchResult::Win => self.wins += 1,
            MatchResult::Draw => self.draws += 1,
            MatchResult::Loss => self.losses += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            count as f64 / self.total() as f64 * 100.0
        }
    }

    pub fn win_percent(&self) -> f64 {
        self.percent(self.wins)
    }

    pub fn draw_percent(&self) -> f64 {
        self.percent(self.draws)
    }

    pub fn loss_percent(&self) -> f64 {
        self.percent(self.losses)
    }
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    agent_player: Player,
    progress_bar: Option<ProgressBar>,
    tally: OutcomeTally,
}

impl ProgressObserver {
    /// Create a new progress observer counting results for `agent_player`
    pub fn new(agent_player: Player) -> Self {
        Self {
            agent_player,
            progress_bar: None,
            tally: OutcomeTally::default(),
        }
    }

    fn message(&self) -> String {
        format!(
            "{} D:{} L:{}",
            self.tally.wins, self.tally.draws, self.tally.losses
        )
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.tally.record(outcome, self.agent_player);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
pub struct MetricsObserver {
    agent_player: Player,
    tally: OutcomeTally,
    move_counts: Vec<usize>,
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_game_length: f64,
}

impl MetricsObserver {
    /// Create a new metrics observer counting results for `agent_player`
    pub fn new(agent_player: Player) -> Self {
        Self {
            agent_player,
            tally: OutcomeTally::default(),
            move_counts: Vec::new(),
        }
    }

    /// Get average game length
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.tally.total(),
            wins: self.tally.wins,
            draws: self.tally.draws,
            losses: self.tally.losses,
            win_rate: self.tally.win_percent() / 100.0,
            draw_rate: self.tally.draw_percent() / 100.0,
            loss_rate: self.tally.loss_percent() / 100.0,
            avg_game_length: self.avg_game_length(),
        }
    }
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _state: &BoardState,
        _move_pos: usize,
        _weights_before: &[(usize, f64)],
    ) -> Result<()> {
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.tally.record(outcome, self.agent_player);
        Ok(())
    }
}

/// Rolling result percentages for one reporting window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Games played so far, including this window
    pub games_played: usize,
    pub window: OutcomeTally,
}

impl BatchReport {
    fn line(&self) -> String {
        format!(
            "Played {} games. In the last {}: Wins: {:.2}%, Losses: {:.2}%, Ties: {:.2}%",
            self.games_played,
            self.window.total(),
            self.window.win_percent(),
            self.window.loss_percent(),
            self.window.draw_percent()
        )
    }
}

/// Batch report observer - prints win/loss/draw percentages of the last
/// `interval` games every `interval` games, then starts a new window
pub struct BatchReportObserver {
    agent_player: Player,
    interval: usize,
    window: OutcomeTally,
    games_played: usize,
    reports: Vec<BatchReport>,
    writer: Box<dyn Write + Send>,
}

impl BatchReportObserver {
    /// Report to stdout
    pub fn new(agent_player: Player, interval: usize) -> Self {
        Self::with_writer(agent_player, interval, Box::new(io::stdout()))
    }

    /// Report to an arbitrary writer. An `interval` of 0 disables reporting.
    pub fn with_writer(agent_player: Player, interval: usize, writer: Box<dyn Write + Send>) -> Self {
        Self {
            agent_player,
            interval,
            window: OutcomeTally::default(),
            games_played: 0,
            reports: Vec::new(),
            writer,
        }
    }

    /// Reports emitted so far
    pub fn reports(&self) -> &[BatchReport] {
        &self.reports
    }
}

impl Observer for BatchReportObserver {
    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.games_played += 1;
        self.window.record(outcome, self.agent_player);

        if self.interval > 0 && self.games_played.is_multiple_of(self.interval) {
            let report = BatchReport {
                games_played: self.games_played,
                window: self.window,
            };
            writeln!(self.writer, "{}", report.line())?;
            self.reports.push(report);
            self.window = OutcomeTally::default();
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Observation of a single move during a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepObservation {
    pub step_num: usize,
    /// Board before the move, e.g. `X...O...._X`
    pub state: String,
    pub move_position: usize,
    /// Policy of the moving player before the move
    pub weights_before: Vec<(usize, f64)>,
}

/// Complete observation of a training game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub game_num: usize,
    pub outcome: String,
    pub steps: Vec<StepObservation>,
    pub total_moves: usize,
}

/// JSONL observer - Exports one JSON object per game
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_game_steps: Vec<StepObservation>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|source| crate::Error::Io {
            operation: format!("create {}", path.as_ref().display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            current_game_steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.current_game_steps.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        step_num: usize,
        state: &BoardState,
        move_pos: usize,
        weights_before: &[(usize, f64)],
    ) -> Result<()> {
        self.current_game_steps.push(StepObservation {
            step_num,
            state: state.encode(),
            move_position: move_pos,
            weights_before: weights_before.to_vec(),
        });
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        let observation = Observation {
            game_num,
            outcome: format!("{outcome:?}"),
            total_moves: self.current_game_steps.len(),
            steps: std::mem::take(&mut self.current_game_steps),
        };

        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn tally_counts_from_the_agent_side() {
        let mut tally = OutcomeTally::default();
        tally.record(GameOutcome::Win(Player::O), Player::O);
        tally.record(GameOutcome::Win(Player::X), Player::O);
        tally.record(GameOutcome::Draw, Player::O);
        tally.record(GameOutcome::Win(Player::O), Player::O);
        assert_eq!(
            tally,
            OutcomeTally {
                wins: 2,
                draws: 1,
                losses: 1
            }
        );
        assert_eq!(tally.win_percent(), 50.0);
    }

    #[test]
    fn batch_report_resets_its_window() {
        let buffer = SharedBuffer::default();
        let mut observer = BatchReportObserver::with_writer(Player::O, 2, Box::new(buffer.clone()));

        let outcomes = [
            GameOutcome::Win(Player::O),
            GameOutcome::Draw,
            GameOutcome::Win(Player::X),
            GameOutcome::Win(Player::X),
            GameOutcome::Draw,
        ];
        for (game_num, outcome) in outcomes.into_iter().enumerate() {
            observer.on_game_end(game_num, outcome).unwrap();
        }

        let reports = observer.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].games_played, 2);
        assert_eq!(reports[0].window.wins, 1);
        assert_eq!(reports[0].window.draws, 1);
        assert_eq!(reports[1].games_played, 4);
        assert_eq!(reports[1].window.losses, 2);

        let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(text.starts_with(
            "Played 2 games. In the last 2: Wins: 50.00%, Losses: 0.00%, Ties: 50.00%"
        ));
    }

    #[test]
    fn zero_interval_never_reports() {
        let mut observer = BatchReportObserver::with_writer(Player::X, 0, Box::new(io::sink()));
        for game_num in 0..10 {
            observer.on_game_end(game_num, GameOutcome::Draw).unwrap();
        }
        assert!(observer.reports().is_empty());
    }

    #[test]
    fn metrics_track_game_length() {
        let mut observer = MetricsObserver::new(Player::X);
        let board = BoardState::new();
        for game_num in 0..2 {
            observer.on_game_start(game_num).unwrap();
            for step in 0..(5 + game_num * 2) {
                observer.on_move(game_num, step, &board, 0, &[]).unwrap();
            }
            observer.on_game_end(game_num, GameOutcome::Draw).unwrap();
        }
        let summary = observer.summary();
        assert_eq!(summary.total_games, 2);
        assert_eq!(summary.avg_game_length, 6.0);
        assert_eq!(summary.draw_rate, 1.0);
    }
}
