//! Board to network input encoding
//!
//! Two slots per cell: X is `(1, 0)`, O is `(0, 1)`, empty is `(0, 0)`.

use crate::tictactoe::{BoardState, Cell};

/// Length of an encoded board
pub const INPUT_SIZE: usize = 18;

/// Encode a board into a fresh input vector
pub fn encode(board: &BoardState) -> [f64; INPUT_SIZE] {
    let mut inputs = [0.0; INPUT_SIZE];
    encode_into(board, &mut inputs);
    inputs
}

/// Encode a board into an existing buffer of length [`INPUT_SIZE`]
pub fn encode_into(board: &BoardState, inputs: &mut [f64]) {
    assert_eq!(inputs.len(), INPUT_SIZE, "input buffer has the wrong length");
    for (i, cell) in board.cells.iter().enumerate() {
        let (x, o) = match cell {
            Cell::Empty => (0.0, 0.0),
            Cell::X => (1.0, 0.0),
            Cell::O => (0.0, 1.0),
        };
        inputs[i * 2] = x;
        inputs[i * 2 + 1] = o;
    }
}
