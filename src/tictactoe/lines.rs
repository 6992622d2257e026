//! Winning lines on the 3x3 board

use super::Cell;

/// Winning line indices in evaluation order: rows, then columns, then diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Index into [`WINNING_LINES`] of the first completed line, if any
    pub fn first_completed_line(cells: &[Cell; 9]) -> Option<usize> {
        WINNING_LINES.iter().position(|line| {
            cells[line[0]] != Cell::Empty && line.iter().all(|&idx| cells[idx] == cells[line[0]])
        })
    }
}
