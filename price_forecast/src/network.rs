//! Neural network backend for the trained-network model
//!
//! The model only talks to a [`NetworkProvider`], which hands out
//! [`NeuralNetwork`] instances. This keeps the numeric library an explicit
//! dependency: a provider that is not ready makes the model fail fast
//! instead of producing empty predictions.
//!
//! Two providers ship with the crate:
//!
//! - [`BurnProvider`] builds the network with `burn` on its ndarray CPU
//!   backend and trains it by full-batch SGD with momentum. It is the
//!   forecaster's default.
//! - [`FeedForwardProvider`] is a dependency-free fully connected sigmoid
//!   network trained online, one pair at a time, by back-propagation with
//!   momentum. It converges in fewer iterations on short histories.

use crate::config::NetworkSettings;
use crate::error::{ForecastError, Result};
use rand::RngCore;
use rand_distr::{Distribution, Uniform};
use trade_math::TrainingPair;

pub mod burn_backend;

pub use burn_backend::BurnProvider;

/// A trainable single-output regression network
pub trait NeuralNetwork: Send {
    /// Run one pass over `pairs` and return the mean squared training error
    fn train_iteration(&mut self, pairs: &[TrainingPair]) -> f64;

    /// Predict the value following `input`
    fn run(&self, input: &[f64]) -> Result<f64>;
}

/// Source of networks; stands in for an externally loaded numeric library
pub trait NetworkProvider: Send + Sync {
    /// Whether networks can be built right now
    fn is_ready(&self) -> bool;

    /// Build an untrained network taking `input_size` values
    fn build(
        &self,
        input_size: usize,
        settings: &NetworkSettings,
        rng: &mut dyn RngCore,
    ) -> Result<Box<dyn NeuralNetwork>>;
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Fully connected layer with sigmoid activation
#[derive(Debug, Clone)]
struct DenseLayer {
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
    /// Previous weight updates, for momentum
    changes: Vec<Vec<f64>>,
}

impl DenseLayer {
    fn new(input_size: usize, output_size: usize, rng: &mut dyn RngCore) -> Self {
        let init = Uniform::new(-0.2, 0.2);

        let weights = (0..output_size)
            .map(|_| (0..input_size).map(|_| init.sample(rng)).collect())
            .collect();
        let biases = (0..output_size).map(|_| init.sample(rng)).collect();

        Self {
            weights,
            biases,
            changes: vec![vec![0.0; input_size]; output_size],
        }
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| {
                let sum: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum();
                sigmoid(bias + sum)
            })
            .collect()
    }
}

/// Multilayer perceptron with sigmoid units in every layer
#[derive(Debug, Clone)]
pub struct FeedForwardNetwork {
    layers: Vec<DenseLayer>,
    input_size: usize,
    learning_rate: f64,
    momentum: f64,
}

impl FeedForwardNetwork {
    pub fn new(
        input_size: usize,
        settings: &NetworkSettings,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        if input_size == 0 {
            return Err(ForecastError::InvalidConfiguration(
                "Network input size must be positive".to_string(),
            ));
        }
        settings.validate()?;

        let mut layers = Vec::with_capacity(settings.hidden_layers.len() + 1);
        let mut prev_size = input_size;
        for &size in &settings.hidden_layers {
            layers.push(DenseLayer::new(prev_size, size, rng));
            prev_size = size;
        }
        layers.push(DenseLayer::new(prev_size, 1, rng));

        Ok(Self {
            layers,
            input_size,
            learning_rate: settings.learning_rate,
            momentum: settings.momentum,
        })
    }

    /// Outputs of every layer, starting with the input itself
    fn activations(&self, input: &[f64]) -> Vec<Vec<f64>> {
        let mut outputs = Vec::with_capacity(self.layers.len() + 1);
        outputs.push(input.to_vec());
        for layer in &self.layers {
            let next = layer.forward(&outputs[outputs.len() - 1]);
            outputs.push(next);
        }
        outputs
    }

    fn train_pair(&mut self, pair: &TrainingPair) -> f64 {
        let outputs = self.activations(&pair.input);
        let depth = self.layers.len();

        // Back-propagate deltas before touching any weight
        let mut deltas: Vec<Vec<f64>> = vec![Vec::new(); depth];
        let prediction = outputs[depth][0];
        let error = pair.output - prediction;
        deltas[depth - 1] = vec![error * prediction * (1.0 - prediction)];

        for l in (1..depth).rev() {
            let layer = &self.layers[l];
            let hidden = &outputs[l];
            deltas[l - 1] = hidden
                .iter()
                .enumerate()
                .map(|(i, &out)| {
                    let back: f64 = layer
                        .weights
                        .iter()
                        .zip(&deltas[l])
                        .map(|(row, delta)| row[i] * delta)
                        .sum();
                    back * out * (1.0 - out)
                })
                .collect();
        }

        for (l, layer) in self.layers.iter_mut().enumerate() {
            let input = &outputs[l];
            for (j, &delta) in deltas[l].iter().enumerate() {
                for (i, &x) in input.iter().enumerate() {
                    let change =
                        self.learning_rate * delta * x + self.momentum * layer.changes[j][i];
                    layer.changes[j][i] = change;
                    layer.weights[j][i] += change;
                }
                layer.biases[j] += self.learning_rate * delta;
            }
        }

        error * error
    }
}

impl NeuralNetwork for FeedForwardNetwork {
    fn train_iteration(&mut self, pairs: &[TrainingPair]) -> f64 {
        if pairs.is_empty() {
            return 0.0;
        }
        let total: f64 = pairs.iter().map(|pair| self.train_pair(pair)).sum();
        total / pairs.len() as f64
    }

    fn run(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.input_size {
            return Err(ForecastError::DataError(format!(
                "Network expects {} inputs, got {}",
                self.input_size,
                input.len()
            )));
        }
        let outputs = self.activations(input);
        Ok(outputs[outputs.len() - 1][0])
    }
}

/// Provider for [`FeedForwardNetwork`]; always ready
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedForwardProvider;

impl NetworkProvider for FeedForwardProvider {
    fn is_ready(&self) -> bool {
        true
    }

    fn build(
        &self,
        input_size: usize,
        settings: &NetworkSettings,
        rng: &mut dyn RngCore,
    ) -> Result<Box<dyn NeuralNetwork>> {
        Ok(Box::new(FeedForwardNetwork::new(input_size, settings, rng)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn constant_target_pairs() -> Vec<TrainingPair> {
        (0..8)
            .map(|k| TrainingPair {
                input: vec![k as f64 / 10.0, 0.5, 1.0 - k as f64 / 10.0],
                output: 0.8,
            })
            .collect()
    }

    #[test]
    fn test_training_reduces_error() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut net = FeedForwardNetwork::new(3, &NetworkSettings::default(), &mut rng).unwrap();
        let pairs = constant_target_pairs();

        let first = net.train_iteration(&pairs);
        let mut last = first;
        for _ in 0..500 {
            last = net.train_iteration(&pairs);
        }

        assert!(last < first, "error did not drop: {} -> {}", first, last);
    }

    #[test]
    fn test_output_is_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(1);
        let net = FeedForwardNetwork::new(4, &NetworkSettings::default(), &mut rng).unwrap();

        let out = net.run(&[0.1, 0.9, 0.4, 0.6]).unwrap();
        assert!((0.0..=1.0).contains(&out));
    }

    #[test]
    fn test_input_size_mismatch() {
        let mut rng = StdRng::seed_from_u64(1);
        let net = FeedForwardNetwork::new(4, &NetworkSettings::default(), &mut rng).unwrap();

        assert!(matches!(
            net.run(&[0.1, 0.2]),
            Err(ForecastError::DataError(_))
        ));
    }

    #[test]
    fn test_same_seed_same_network() {
        let settings = NetworkSettings::default();
        let a = FeedForwardNetwork::new(3, &settings, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = FeedForwardNetwork::new(3, &settings, &mut StdRng::seed_from_u64(3)).unwrap();

        let input = [0.2, 0.4, 0.6];
        assert_eq!(a.run(&input).unwrap(), b.run(&input).unwrap());
    }
}
