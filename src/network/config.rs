//! Network shape and output-activation configuration

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::encoding::INPUT_SIZE;

/// One output score per board cell
pub const OUTPUT_SIZE: usize = 9;

/// Default hidden layer width
pub const DEFAULT_HIDDEN_SIZE: usize = 512;

/// What happens to the raw output logits before softmax.
///
/// `Linear` feeds the logits to softmax unchanged. `Relu` clips negative
/// logits to zero first, which flattens the policy over every cell whose
/// logit is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputActivation {
    #[default]
    Linear,
    Relu,
}

impl fmt::Display for OutputActivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputActivation::Linear => write!(f, "linear"),
            OutputActivation::Relu => write!(f, "relu"),
        }
    }
}

impl FromStr for OutputActivation {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "none" => Ok(OutputActivation::Linear),
            "relu" => Ok(OutputActivation::Relu),
            other => Err(crate::Error::InvalidConfiguration {
                message: format!("unknown output activation '{other}' (expected linear or relu)"),
            }),
        }
    }
}

/// Configuration for creating a [`super::NeuralNetwork`].
///
/// # Examples
///
/// ```
/// use ttt_rl::network::{NetworkConfig, OutputActivation};
///
/// let config = NetworkConfig::default()
///     .with_hidden_size(128)
///     .with_output_activation(OutputActivation::Relu);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub output_activation: OutputActivation,
}

impl NetworkConfig {
    /// Shape matching the board encoder, with the given hidden width
    pub fn new(hidden_size: usize) -> Self {
        Self {
            input_size: INPUT_SIZE,
            hidden_size,
            output_size: OUTPUT_SIZE,
            output_activation: OutputActivation::default(),
        }
    }

    pub fn with_hidden_size(mut self, hidden_size: usize) -> Self {
        self.hidden_size = hidden_size;
        self
    }

    pub fn with_output_activation(mut self, activation: OutputActivation) -> Self {
        self.output_activation = activation;
        self
    }

    /// Check that every layer is non-empty.
    pub fn validate(&self) -> crate::Result<()> {
        if self.input_size == 0 || self.hidden_size == 0 || self.output_size == 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "layer sizes must be positive (input={}, hidden={}, output={})",
                    self.input_size, self.hidden_size, self.output_size
                ),
            });
        }
        Ok(())
    }

    /// Check that the shape fits the board encoder and the 9 board cells.
    pub fn validate_for_board(&self) -> crate::Result<()> {
        self.validate()?;
        if self.input_size != INPUT_SIZE || self.output_size != OUTPUT_SIZE {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "board play needs input={INPUT_SIZE} and output={OUTPUT_SIZE}, got input={} and output={}",
                    self.input_size, self.output_size
                ),
            });
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HIDDEN_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shape_fits_the_board() {
        let config = NetworkConfig::default();
        assert_eq!(config.input_size, 18);
        assert_eq!(config.output_size, 9);
        assert_eq!(config.output_activation, OutputActivation::Linear);
        assert!(config.validate_for_board().is_ok());
    }

    #[test]
    fn zero_hidden_size_is_rejected() {
        let config = NetworkConfig::default().with_hidden_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn mismatched_input_is_rejected_for_board_play() {
        let config = NetworkConfig {
            input_size: 9,
            ..NetworkConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.validate_for_board().is_err());
    }

    #[test]
    fn parse_output_activation() {
        assert_eq!("ReLU".parse::<OutputActivation>().unwrap(), OutputActivation::Relu);
        assert_eq!(
            "linear".parse::<OutputActivation>().unwrap(),
            OutputActivation::Linear
        );
        assert!("tanh".parse::<OutputActivation>().is_err());
    }
}
