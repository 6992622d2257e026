//! Single-hidden-layer policy network
//!
//! The network maps an encoded board to a probability distribution over the
//! nine cells. Parameters are updated in place by online gradient descent,
//! one training example at a time.

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    config::{NetworkConfig, OutputActivation},
    encoding::encode,
};
use crate::tictactoe::BoardState;

fn relu(x: f64) -> f64 {
    x.max(0.0)
}

fn relu_derivative(x: f64) -> f64 {
    if x > 0.0 { 1.0 } else { 0.0 }
}

/// Numerically stable softmax of `logits` into `outputs`.
///
/// Falls back to a uniform distribution when the exponentials do not sum
/// to a positive finite value.
pub fn softmax(logits: &[f64], outputs: &mut [f64]) {
    assert_eq!(logits.len(), outputs.len(), "softmax buffers differ in length");
    if outputs.is_empty() {
        return;
    }

    let max_val = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for (out, &logit) in outputs.iter_mut().zip(logits) {
        *out = (logit - max_val).exp();
        sum += *out;
    }

    if sum > 0.0 && sum.is_finite() {
        for out in outputs.iter_mut() {
            *out /= sum;
        }
    } else {
        let uniform = 1.0 / outputs.len() as f64;
        outputs.fill(uniform);
    }
}

/// Feedforward network: input → ReLU hidden layer → softmax output.
///
/// `weights_ih` is stored row-major by input unit (`input * hidden_size +
/// hidden`), `weights_ho` row-major by hidden unit (`hidden * output_size +
/// output`).
///
/// The activation buffers hold the values of the most recent [`forward`]
/// call and are what [`backward`] differentiates, so a backward pass must
/// always follow the forward pass for the same example.
///
/// [`forward`]: NeuralNetwork::forward
/// [`backward`]: NeuralNetwork::backward
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralNetwork {
    config: NetworkConfig,

    weights_ih: Vec<f64>,
    weights_ho: Vec<f64>,
    biases_h: Vec<f64>,
    biases_o: Vec<f64>,

    inputs: Vec<f64>,
    hidden: Vec<f64>,
    raw_logits: Vec<f64>,
    outputs: Vec<f64>,
}

impl NeuralNetwork {
    /// Create a network with every weight and bias drawn uniformly from [-1, 1].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if any layer is empty.
    pub fn new<R: Rng>(config: NetworkConfig, rng: &mut R) -> crate::Result<Self> {
        config.validate()?;

        let mut draw = |len: usize| -> Vec<f64> {
            (0..len).map(|_| rng.random_range(-1.0..=1.0)).collect()
        };
        let weights_ih = draw(config.input_size * config.hidden_size);
        let weights_ho = draw(config.hidden_size * config.output_size);
        let biases_h = draw(config.hidden_size);
        let biases_o = draw(config.output_size);

        Ok(Self {
            config,
            weights_ih,
            weights_ho,
            biases_h,
            biases_o,
            inputs: vec![0.0; config.input_size],
            hidden: vec![0.0; config.hidden_size],
            raw_logits: vec![0.0; config.output_size],
            outputs: vec![0.0; config.output_size],
        })
    }

    /// Create a network from a deterministic seed
    pub fn with_seed(config: NetworkConfig, seed: u64) -> crate::Result<Self> {
        Self::new(config, &mut StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn weights_ih(&self) -> &[f64] {
        &self.weights_ih
    }

    pub fn weights_ho(&self) -> &[f64] {
        &self.weights_ho
    }

    pub fn biases_h(&self) -> &[f64] {
        &self.biases_h
    }

    pub fn biases_o(&self) -> &[f64] {
        &self.biases_o
    }

    /// Hidden activations (post-ReLU) of the last forward pass
    pub fn hidden(&self) -> &[f64] {
        &self.hidden
    }

    /// Output logits before softmax of the last forward pass
    pub fn raw_logits(&self) -> &[f64] {
        &self.raw_logits
    }

    /// Softmax outputs of the last forward pass
    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    /// Run the network on `input` and return the output distribution.
    ///
    /// # Panics
    ///
    /// Panics if `input.len()` differs from the configured input size.
    pub fn forward(&mut self, input: &[f64]) -> &[f64] {
        assert_eq!(
            input.len(),
            self.config.input_size,
            "forward input has the wrong length"
        );
        self.inputs.copy_from_slice(input);

        let hidden_size = self.config.hidden_size;
        let output_size = self.config.output_size;

        for h in 0..hidden_size {
            let mut sum = self.biases_h[h];
            for (i, &x) in self.inputs.iter().enumerate() {
                sum += x * self.weights_ih[i * hidden_size + h];
            }
            self.hidden[h] = relu(sum);
        }

        for o in 0..output_size {
            let mut sum = self.biases_o[o];
            for (h, &activation) in self.hidden.iter().enumerate() {
                sum += activation * self.weights_ho[h * output_size + o];
            }
            self.raw_logits[o] = sum;
        }

        match self.config.output_activation {
            OutputActivation::Linear => softmax(&self.raw_logits, &mut self.outputs),
            OutputActivation::Relu => {
                let clipped: Vec<f64> = self.raw_logits.iter().map(|&l| relu(l)).collect();
                softmax(&clipped, &mut self.outputs);
            }
        }

        &self.outputs
    }

    /// Apply one step of gradient descent towards `target`.
    ///
    /// The output error is `(output - target) * |reward_scale|`, so the scale
    /// changes the step size but never its direction. Differentiates the
    /// activations left by the last [`forward`](Self::forward) call.
    ///
    /// # Panics
    ///
    /// Panics if `target.len()` differs from the configured output size.
    pub fn backward(&mut self, target: &[f64], learning_rate: f64, reward_scale: f64) {
        assert_eq!(
            target.len(),
            self.config.output_size,
            "target distribution has the wrong length"
        );

        let hidden_size = self.config.hidden_size;
        let output_size = self.config.output_size;
        let scale = reward_scale.abs();

        let output_delta: Vec<f64> = self
            .outputs
            .iter()
            .zip(target)
            .zip(&self.raw_logits)
            .map(|((&out, &tgt), &logit)| {
                let gate = match self.config.output_activation {
                    OutputActivation::Linear => 1.0,
                    OutputActivation::Relu => relu_derivative(logit),
                };
                (out - tgt) * scale * gate
            })
            .collect();

        // Hidden error uses the hidden→output weights from before this update.
        let hidden_delta: Vec<f64> = (0..hidden_size)
            .map(|h| {
                let row = &self.weights_ho[h * output_size..(h + 1) * output_size];
                let error: f64 = row.iter().zip(&output_delta).map(|(w, d)| w * d).sum();
                error * relu_derivative(self.hidden[h])
            })
            .collect();

        for (h, &activation) in self.hidden.iter().enumerate() {
            let row = &mut self.weights_ho[h * output_size..(h + 1) * output_size];
            for (w, &delta) in row.iter_mut().zip(&output_delta) {
                *w -= learning_rate * delta * activation;
            }
        }
        for (b, &delta) in self.biases_o.iter_mut().zip(&output_delta) {
            *b -= learning_rate * delta;
        }

        for (i, &x) in self.inputs.iter().enumerate() {
            let row = &mut self.weights_ih[i * hidden_size..(i + 1) * hidden_size];
            for (w, &delta) in row.iter_mut().zip(&hidden_delta) {
                *w -= learning_rate * delta * x;
            }
        }
        for (b, &delta) in self.biases_h.iter_mut().zip(&hidden_delta) {
            *b -= learning_rate * delta;
        }
    }

    /// Run the network on an encoded board
    pub fn evaluate(&mut self, board: &BoardState) -> &[f64] {
        let inputs = encode(board);
        self.forward(&inputs)
    }

    /// Pick the empty cell with the highest output probability.
    ///
    /// Ties go to the lowest cell index. Returns `None` only when the board
    /// has no empty cell.
    pub fn select_move(&mut self, board: &BoardState) -> Option<usize> {
        let outputs = self.evaluate(board);
        let mut best: Option<(usize, f64)> = None;
        for (pos, &proba) in outputs.iter().enumerate() {
            if !board.is_empty(pos) {
                continue;
            }
            match best {
                Some((_, best_proba)) if proba <= best_proba => {}
                _ => best = Some((pos, proba)),
            }
        }
        best.map(|(pos, _)| pos)
    }
}
