use clap::Parser;
use tempfile::tempdir;
use ttt_rl::cli::commands::train::{TrainArgs, execute, train_network};

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "ttt-rl-train",
        "--games",
        "5",
        "--hidden-size",
        "16",
        "--seed",
        "1",
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_games"], 5);
    assert_eq!(parsed["metadata"]["hidden_size"], 16);
    assert_eq!(parsed["metadata"]["network_player"], "O");
    assert_eq!(parsed["metadata"]["output_activation"], "linear");
    assert_eq!(parsed["metadata"]["seed"], 1);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}{}", summary_dir.display(), std::path::MAIN_SEPARATOR);

    let args = parse_args([
        "ttt-rl-train",
        "--games",
        "3",
        "--hidden-size",
        "8",
        "--summary",
        &summary_arg,
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_games"], 3);
}

#[test]
fn observations_file_has_a_line_per_game() {
    let tmp = tempdir().unwrap();
    let observations = tmp.path().join("games.jsonl");

    let args = parse_args([
        "ttt-rl-train",
        "--games",
        "4",
        "--hidden-size",
        "8",
        "--network-player",
        "x",
        "--observations",
        observations.to_str().unwrap(),
    ]);

    execute(args).expect("training with observations should succeed");

    let contents = std::fs::read_to_string(&observations).unwrap();
    assert_eq!(contents.lines().count(), 4);
}

#[test]
fn seeded_training_is_reproducible() {
    let args = parse_args([
        "ttt-rl-train",
        "--games",
        "20",
        "--hidden-size",
        "12",
        "--seed",
        "77",
        "--report-interval",
        "0",
    ]);

    let (first, first_result) = train_network(&args).unwrap();
    let (second, second_result) = train_network(&args).unwrap();
    assert_eq!(first.network(), second.network());
    assert_eq!(first_result.wins, second_result.wins);
    assert_eq!(first.games_trained(), 20);
}

#[test]
fn invalid_settings_are_rejected() {
    let zero_hidden = parse_args(["ttt-rl-train", "--games", "1", "--hidden-size", "0"]);
    assert!(train_network(&zero_hidden).is_err());

    let bad_player = parse_args(["ttt-rl-train", "--games", "1", "--network-player", "z"]);
    assert!(train_network(&bad_player).is_err());

    let bad_rate = parse_args(["ttt-rl-train", "--games", "1", "--learning-rate", "0"]);
    assert!(train_network(&bad_rate).is_err());

    assert!(
        TrainArgs::try_parse_from(["ttt-rl-train", "--output-activation", "tanh"]).is_err()
    );
}
