//! Train command - Train the network against a random opponent

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::output::{format_number, print_kv, print_section, print_training_result},
    learning::{CreditConfig, NeuralLearner, RandomLearner},
    network::{DEFAULT_HIDDEN_SIZE, NetworkConfig, OutputActivation},
    pipeline::{
        BatchReportObserver, DEFAULT_REPORT_INTERVAL, JsonlObserver, ProgressObserver,
        TrainingConfig, TrainingPipeline, TrainingResult,
    },
    tictactoe::Player,
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    metadata: SummaryMetadata,
}

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    network_player: String,
    hidden_size: usize,
    output_activation: String,
    learning_rate: f64,
    seed: Option<u64>,
}

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" => Ok(Player::X),
        "o" | "second" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Trailing separator or no file name: treat as a directory.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Train the network against a random opponent")]
pub struct TrainArgs {
    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 150_000)]
    pub games: usize,

    /// Hidden layer width
    #[arg(long, default_value_t = DEFAULT_HIDDEN_SIZE)]
    pub hidden_size: usize,

    /// Activation applied to the output logits before softmax (linear or relu)
    #[arg(long, default_value = "linear")]
    pub output_activation: OutputActivation,

    /// Learning rate for online SGD
    #[arg(long, default_value_t = crate::learning::LEARNING_RATE)]
    pub learning_rate: f64,

    /// Random seed for reproducibility (network weights and opponent moves)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Which token the network controls while training (`x` or `o`)
    #[arg(long, default_value = "o")]
    pub network_player: String,

    /// Print a win/loss/tie report every N games (0 disables)
    #[arg(long, default_value_t = DEFAULT_REPORT_INTERVAL)]
    pub report_interval: usize,

    /// Show progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for JSONL observations (one line per game)
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Print the configuration before training
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

impl TrainArgs {
    fn network_config(&self) -> NetworkConfig {
        NetworkConfig::new(self.hidden_size).with_output_activation(self.output_activation)
    }

    fn credit_config(&self) -> CreditConfig {
        CreditConfig::default().with_learning_rate(self.learning_rate)
    }
}

/// Build a fresh network and train it as configured by `args`.
///
/// Returns the trained learner so the caller can keep playing with it.
pub fn train_network(args: &TrainArgs) -> Result<(NeuralLearner, TrainingResult)> {
    let network_player = parse_player_token(&args.network_player, "--network-player")?;

    let mut learner = NeuralLearner::from_config(
        "Network",
        args.network_config(),
        args.credit_config(),
        args.seed,
    )
    .context("Failed to create network")?;
    let mut opponent = match args.seed {
        Some(seed) => RandomLearner::with_seed("Random", seed),
        None => RandomLearner::new("Random"),
    };

    let mut config = TrainingConfig::default()
        .with_games(args.games)
        .with_agent_player(network_player);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    if args.verbose {
        print_section("Configuration");
        print_kv("Games", &format_number(config.num_games));
        print_kv("Network player", &network_player.to_string());
        print_kv("Hidden size", &args.hidden_size.to_string());
        print_kv("Output activation", &args.output_activation.to_string());
        print_kv("Learning rate", &args.learning_rate.to_string());
        print_kv(
            "Seed",
            &args
                .seed
                .map_or_else(|| "random".to_string(), |seed| seed.to_string()),
        );
    }

    let mut pipeline = TrainingPipeline::new(config).with_observer(Box::new(
        BatchReportObserver::new(network_player, args.report_interval),
    ));

    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new(network_player)));
    }

    if let Some(observations_path) = &args.observations {
        let jsonl_observer = JsonlObserver::new(observations_path)?;
        pipeline = pipeline.with_observer(Box::new(jsonl_observer));
    }

    println!(
        "Training NN against {} random games...",
        format_number(args.games)
    );
    let result = pipeline.run(&mut learner, &mut opponent)?;
    println!("Training complete!");

    Ok((learner, result))
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let summary_spec = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    let (_, result) = train_network(&args)?;

    print_section("Training Complete");
    print_training_result(&result);

    if let Some((summary_path, normalized)) = summary_spec {
        write_summary(&args, &result, &summary_path, normalized)?;
    }

    Ok(())
}

fn write_summary(
    args: &TrainArgs,
    result: &TrainingResult,
    summary_path: &Path,
    normalized: bool,
) -> Result<()> {
    if normalized {
        println!("\nNormalizing summary path to {}", summary_path.display());
    }

    if let Some(parent) = summary_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let network_player = parse_player_token(&args.network_player, "--network-player")?;
    let summary = TrainingSummaryFile {
        training: result.clone(),
        metadata: SummaryMetadata {
            network_player: format!("{network_player:?}"),
            hidden_size: args.hidden_size,
            output_activation: args.output_activation.to_string(),
            learning_rate: args.learning_rate,
            seed: args.seed,
        },
    };

    let file = File::create(summary_path)
        .with_context(|| format!("Failed to create {}", summary_path.display()))?;
    to_writer_pretty(file, &summary)?;
    println!("\nSummary written to {}", summary_path.display());
    Ok(())
}
