//! Uniform-random opponent

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{Result, ports::Learner, tictactoe::BoardState};

/// Plays a uniformly random empty cell
#[derive(Debug, Clone)]
pub struct RandomLearner {
    name: String,
    rng: StdRng,
}

impl RandomLearner {
    /// Create a new random learner
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random learner with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Learner for RandomLearner {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        let moves = state.empty_positions();
        if moves.is_empty() {
            return Err(crate::Error::NoValidMoves);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn move_weights(&mut self, state: &BoardState) -> Option<Vec<(usize, f64)>> {
        let moves = state.empty_positions();
        if moves.is_empty() {
            return None;
        }
        let weight = 1.0 / moves.len() as f64;
        Some(moves.into_iter().map(|mv| (mv, weight)).collect())
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_only_empty_cells() {
        let mut learner = RandomLearner::with_seed("Random", 3);
        let board = BoardState::from_string("XOX .O. X..").unwrap();
        for _ in 0..100 {
            let pos = learner.select_move(&board).unwrap();
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn same_seed_same_moves() {
        let mut a = RandomLearner::with_seed("a", 99);
        let mut b = RandomLearner::new("b");
        b.set_rng_seed(99).unwrap();
        let board = BoardState::new();
        for _ in 0..20 {
            assert_eq!(a.select_move(&board).unwrap(), b.select_move(&board).unwrap());
        }
    }

    #[test]
    fn full_board_has_no_move() {
        let mut learner = RandomLearner::with_seed("Random", 1);
        let board = BoardState::from_string("XOX XOO OXX").unwrap();
        assert!(learner.select_move(&board).is_err());
        assert!(learner.move_weights(&board).is_none());
    }
}
