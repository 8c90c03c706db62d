//! Single-layer perceptron with a selectable output activation.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Normal;
use rand::rngs::StdRng;

use crate::activation::{OutputActivation, sigmoid_prime};
use crate::config::{positive, validate_learning_rate, validate_stdev};
use crate::dataset::TrainingExample;
use crate::error::{NetworkError, Result, check_len};
use crate::model::{LayerInfo, ModelInfo};
use crate::network::{outer, seeded_rng};

pub const DEFAULT_PERCEPTRON_STDEV: f64 = 0.5;

#[derive(Debug)]
pub struct Perceptron {
    activation: OutputActivation,
    weight_stdev: f64,
    /// output_size x input_size
    weights: Array2<f64>,
    bias: Array1<f64>,
    rng: StdRng,
}

impl Perceptron {
    pub fn new(
        input_size: usize,
        output_size: usize,
        activation: OutputActivation,
        weight_stdev: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        positive("input_size", input_size)?;
        positive("output_size", output_size)?;
        validate_stdev(weight_stdev)?;
        let mut perceptron = Self {
            activation,
            weight_stdev,
            weights: Array2::zeros((output_size, input_size)),
            bias: Array1::zeros(output_size),
            rng: seeded_rng(seed),
        };
        perceptron.reset()?;
        Ok(perceptron)
    }

    pub fn activation(&self) -> OutputActivation {
        self.activation
    }

    pub fn input_size(&self) -> usize {
        self.weights.ncols()
    }

    pub fn output_size(&self) -> usize {
        self.weights.nrows()
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn bias(&self) -> &Array1<f64> {
        &self.bias
    }

    /// Redraws weights and bias, keeping the shape.
    pub fn reset(&mut self) -> Result<()> {
        let normal = Normal::new(0.0, self.weight_stdev)
            .map_err(|e| NetworkError::InvalidHyperparameter(format!("weight distribution: {e}")))?;
        let bias = Array1::random_using(self.output_size(), normal, &mut self.rng);
        let weights = Array2::random_using(self.weights.dim(), normal, &mut self.rng);
        self.bias = bias;
        self.weights = weights;
        Ok(())
    }

    pub fn net_input(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        check_len("input", self.input_size(), x.len())?;
        Ok(self.weights.dot(x) + &self.bias)
    }

    pub fn forward(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        Ok(self.activation.apply(&self.net_input(x)?))
    }

    /// One update from a single example; returns the residual `y - prediction`.
    pub fn train_step(&mut self, x: &Array1<f64>, y: &Array1<f64>, learning_rate: f64) -> Result<Array1<f64>> {
        check_len("target", self.output_size(), y.len())?;
        validate_learning_rate(learning_rate)?;
        let prediction = self.forward(x)?;
        let residual = y - &prediction;
        let delta = match self.activation {
            OutputActivation::Sigmoid => &residual * &sigmoid_prime(&prediction),
            OutputActivation::Threshold | OutputActivation::Linear => residual.clone(),
        };
        self.bias.scaled_add(learning_rate, &delta);
        self.weights.scaled_add(learning_rate, &outer(&delta, x));
        Ok(residual)
    }

    /// One sequential pass; returns the mean of `sum(residual^2)` per example.
    pub fn epoch(&mut self, examples: &[TrainingExample], learning_rate: f64) -> Result<f64> {
        if examples.is_empty() {
            return Err(NetworkError::EmptyDataset);
        }
        validate_learning_rate(learning_rate)?;
        for example in examples {
            example.check_shape(self.input_size(), self.output_size())?;
        }
        let mut cost_sum = 0.0;
        for example in examples {
            let residual = self.train_step(example.input(), example.target(), learning_rate)?;
            cost_sum += residual.mapv(|r| r * r).sum();
        }
        Ok(cost_sum / examples.len() as f64)
    }

    pub fn describe(&self) -> ModelInfo {
        ModelInfo {
            name: "perceptron".to_string(),
            layers: vec![LayerInfo::dense(self.activation.name(), &self.weights, &self.bias)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::builtin;
    use ndarray::array;

    #[test]
    fn test_shapes() {
        let p = Perceptron::new(3, 2, OutputActivation::Linear, 0.5, Some(1)).unwrap();
        assert_eq!(p.weights().dim(), (2, 3));
        assert_eq!(p.bias().len(), 2);
        assert!(p.forward(&array![1.0, 2.0]).is_err());
    }

    #[test]
    fn test_threshold_update_is_plain_residual() {
        let mut p = Perceptron::new(2, 1, OutputActivation::Threshold, 0.5, Some(2)).unwrap();
        p.weights = array![[0.0, 0.0]];
        p.bias = array![0.0];
        // z = 0 -> prediction 1, target 0 -> residual -1
        let residual = p.train_step(&array![1.0, 0.0], &array![0.0], 0.1).unwrap();
        assert_eq!(residual, array![-1.0]);
        assert_eq!(p.bias, array![-0.1]);
        assert_eq!(p.weights, array![[-0.1, 0.0]]);
    }

    #[test]
    fn test_learns_and() {
        let ds = builtin("and").unwrap();
        let mut p = Perceptron::new(2, 1, OutputActivation::Threshold, 0.5, Some(11)).unwrap();
        let mut last = f64::MAX;
        for _ in 0..100 {
            last = p.epoch(ds.examples(), 0.1).unwrap();
        }
        assert_eq!(last, 0.0);
        for example in ds.examples() {
            assert_eq!(&p.forward(example.input()).unwrap(), example.target());
        }
    }

    #[test]
    fn test_reset_keeps_shape() {
        let mut p = Perceptron::new(2, 1, OutputActivation::Sigmoid, 0.5, Some(4)).unwrap();
        let before = p.weights().clone();
        p.reset().unwrap();
        assert_eq!(p.weights().dim(), (1, 2));
        assert_ne!(p.weights(), &before);
    }
}
