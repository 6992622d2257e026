//! Human player reading moves from a text stream

use std::io::{BufRead, Write};

use crate::{Result, ports::Learner, tictactoe::BoardState};

/// Reads cell indices (0-8) line by line, re-prompting until a legal move is
/// entered. The board is never touched by a rejected entry.
pub struct HumanLearner<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanLearner<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    /// Give back the underlying streams
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Write one line of text to the player
    pub fn tell(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Ask a yes/no question. Anything starting with `y` is a yes; closed
    /// input is a no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;
        Ok(self
            .read_line()?
            .is_some_and(|answer| answer.to_ascii_lowercase().starts_with('y')))
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(|source| crate::Error::Io {
            operation: "read move".to_string(),
            source,
        })?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead + Send, W: Write + Send> Learner for HumanLearner<R, W> {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        if state.empty_positions().is_empty() {
            return Err(crate::Error::NoValidMoves);
        }

        loop {
            write!(self.output, "{state}Your move (0-8): ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Err(crate::Error::InputClosed);
            };

            let position = match line.parse::<usize>() {
                Ok(position) => position,
                Err(_) => {
                    writeln!(self.output, "Invalid move! Enter a number from 0 to 8.")?;
                    continue;
                }
            };

            match state.validate_move(position) {
                Ok(()) => return Ok(position),
                Err(e) => writeln!(self.output, "Invalid move! {e}. Try again.")?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
