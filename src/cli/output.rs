//! Output formatting for CLI

use crate::pipeline::TrainingResult;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print win/draw/loss counts with their rates
pub fn print_training_result(result: &TrainingResult) {
    print_kv("Total games", &format_number(result.total_games));
    print_kv(
        "Wins",
        &format!("{} ({:.1}%)", format_number(result.wins), result.win_rate * 100.0),
    );
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", format_number(result.draws), result.draw_rate * 100.0),
    );
    print_kv(
        "Losses",
        &format!("{} ({:.1}%)", format_number(result.losses), result.loss_rate * 100.0),
    );
}
