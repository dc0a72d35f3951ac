//! `burn`-backed network provider on the ndarray CPU backend
//!
//! Layers are plain [`Linear`] modules with sigmoid activations. Weights are
//! drawn from the injected random source so a seeded run builds the same
//! network. Each training iteration is one full-batch SGD step with momentum
//! over every training pair.

use crate::config::NetworkSettings;
use crate::error::{ForecastError, Result};
use crate::network::{NetworkProvider, NeuralNetwork};
use burn::backend::{Autodiff, NdArray};
use burn::module::{Module, Param};
use burn::nn::Linear;
use burn::optim::momentum::MomentumConfig;
use burn::optim::{GradientsParams, Optimizer, SgdConfig};
use burn::tensor::activation::sigmoid;
use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use rand::RngCore;
use rand_distr::{Distribution, Uniform};
use trade_math::TrainingPair;

type TrainBackend = Autodiff<NdArray<f32>>;
type Device = <TrainBackend as Backend>::Device;

const INIT_BOUND: f32 = 0.2;

/// Stack of sigmoid dense layers ending in a single output
#[derive(Module, Debug)]
pub struct SigmoidMlp<B: Backend> {
    layers: Vec<Linear<B>>,
}

impl<B: Backend> SigmoidMlp<B> {
    fn new(
        input_size: usize,
        hidden_layers: &[usize],
        rng: &mut dyn RngCore,
        device: &B::Device,
    ) -> Self {
        let mut layers = Vec::with_capacity(hidden_layers.len() + 1);
        let mut prev_size = input_size;
        for &size in hidden_layers.iter().chain(std::iter::once(&1)) {
            layers.push(dense_layer(prev_size, size, rng, device));
            prev_size = size;
        }
        Self { layers }
    }

    /// `[batch, input]` to `[batch, 1]`
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        self.layers
            .iter()
            .fold(input, |x, layer| sigmoid(layer.forward(x)))
    }
}

fn dense_layer<B: Backend>(
    input_size: usize,
    output_size: usize,
    rng: &mut dyn RngCore,
    device: &B::Device,
) -> Linear<B> {
    let init = Uniform::new(-INIT_BOUND, INIT_BOUND);
    let weights: Vec<f32> = (0..input_size * output_size)
        .map(|_| init.sample(rng))
        .collect();
    let biases: Vec<f32> = (0..output_size).map(|_| init.sample(rng)).collect();

    Linear {
        weight: Param::from_tensor(Tensor::from_data(
            TensorData::new(weights, [input_size, output_size]),
            device,
        )),
        bias: Some(Param::from_tensor(Tensor::from_data(
            TensorData::new(biases, [output_size]),
            device,
        ))),
    }
}

/// Trainable network plus its optimizer state
struct BurnNetwork<O> {
    model: SigmoidMlp<TrainBackend>,
    optimizer: O,
    learning_rate: f64,
    input_size: usize,
    device: Device,
}

impl<O> BurnNetwork<O> {
    fn batch(&self, pairs: &[TrainingPair]) -> (Tensor<TrainBackend, 2>, Tensor<TrainBackend, 2>) {
        let inputs: Vec<f32> = pairs
            .iter()
            .flat_map(|pair| pair.input.iter().map(|&v| v as f32))
            .collect();
        let targets: Vec<f32> = pairs.iter().map(|pair| pair.output as f32).collect();

        (
            Tensor::from_data(
                TensorData::new(inputs, [pairs.len(), self.input_size]),
                &self.device,
            ),
            Tensor::from_data(TensorData::new(targets, [pairs.len(), 1]), &self.device),
        )
    }
}

impl<O> NeuralNetwork for BurnNetwork<O>
where
    O: Optimizer<SigmoidMlp<TrainBackend>, TrainBackend>,
{
    fn train_iteration(&mut self, pairs: &[TrainingPair]) -> f64 {
        if pairs.is_empty() {
            return 0.0;
        }
        let (inputs, targets) = self.batch(pairs);

        let diff = self.model.forward(inputs) - targets;
        let loss = (diff.clone() * diff).mean();
        let error = loss.clone().into_scalar() as f64;

        let grads = GradientsParams::from_grads(loss.backward(), &self.model);
        self.model = self
            .optimizer
            .step(self.learning_rate, self.model.clone(), grads);

        error
    }

    fn run(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.input_size {
            return Err(ForecastError::DataError(format!(
                "Network expects {} inputs, got {}",
                self.input_size,
                input.len()
            )));
        }
        let values: Vec<f32> = input.iter().map(|&v| v as f32).collect();
        let tensor = Tensor::from_data(TensorData::new(values, [1, self.input_size]), &self.device);

        let output: Vec<f32> = self
            .model
            .forward(tensor)
            .into_data()
            .to_vec()
            .map_err(|e| ForecastError::DataError(format!("Unreadable network output: {:?}", e)))?;

        output
            .first()
            .map(|&v| f64::from(v))
            .ok_or_else(|| ForecastError::DataError("Network produced no output".to_string()))
    }
}

/// Provider backed by `burn` on the CPU ndarray backend
#[derive(Debug, Clone, Copy, Default)]
pub struct BurnProvider;

impl NetworkProvider for BurnProvider {
    fn is_ready(&self) -> bool {
        true
    }

    fn build(
        &self,
        input_size: usize,
        settings: &NetworkSettings,
        rng: &mut dyn RngCore,
    ) -> Result<Box<dyn NeuralNetwork>> {
        if input_size == 0 {
            return Err(ForecastError::InvalidConfiguration(
                "Network input size must be positive".to_string(),
            ));
        }
        settings.validate()?;

        let device = <Device as Default>::default();
        let model = SigmoidMlp::new(input_size, &settings.hidden_layers, rng, &device);
        let optimizer = SgdConfig::new()
            .with_momentum(Some(
                MomentumConfig::new()
                    .with_momentum(settings.momentum)
                    .with_dampening(0.0),
            ))
            .init::<TrainBackend, SigmoidMlp<TrainBackend>>();

        Ok(Box::new(BurnNetwork {
            model,
            optimizer,
            learning_rate: settings.learning_rate,
            input_size,
            device,
        }))
    }
}
