//! Explicit configuration passed into constructors and the training loop.

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Order in which an epoch visits the training examples.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExampleOrder {
    /// Dataset order, every epoch.
    #[default]
    Sequential,
    /// A fresh permutation per epoch, drawn from the network's RNG.
    Shuffled,
}

/// Shape and initialization of a two-layer network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub weight_mean: f64,
    pub weight_stdev: f64,
    pub example_order: ExampleOrder,
    /// Seed for initialization and shuffling; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_size: 2,
            hidden_size: 2,
            output_size: 1,
            weight_mean: 0.0,
            weight_stdev: 0.01,
            example_order: ExampleOrder::Sequential,
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize, weight_stdev: f64) -> Self {
        Self {
            input_size,
            hidden_size,
            output_size,
            weight_stdev,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_order(mut self, order: ExampleOrder) -> Self {
        self.example_order = order;
        self
    }

    pub fn validate(&self) -> Result<()> {
        positive("input_size", self.input_size)?;
        positive("hidden_size", self.hidden_size)?;
        positive("output_size", self.output_size)?;
        if !self.weight_mean.is_finite() {
            return Err(NetworkError::InvalidHyperparameter(format!(
                "weight_mean must be finite, got {}",
                self.weight_mean
            )));
        }
        validate_stdev(self.weight_stdev)
    }
}

/// Hyperparameters of a training run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    /// Emit an `info` event every this many epochs.
    pub log_every: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            epochs: 1000,
            log_every: 100,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        validate_learning_rate(self.learning_rate)?;
        positive("epochs", self.epochs)?;
        positive("log_every", self.log_every)
    }
}

pub(crate) fn positive(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(NetworkError::InvalidHyperparameter(format!(
            "{name} must be greater than zero"
        )));
    }
    Ok(())
}

pub(crate) fn validate_stdev(stdev: f64) -> Result<()> {
    if !stdev.is_finite() || stdev < 0.0 {
        return Err(NetworkError::InvalidHyperparameter(format!(
            "weight_stdev must be finite and non-negative, got {stdev}"
        )));
    }
    Ok(())
}

/// Learning rates are accepted in `[0, 1]`.
pub fn validate_learning_rate(learning_rate: f64) -> Result<()> {
    if !learning_rate.is_finite() || !(0.0..=1.0).contains(&learning_rate) {
        return Err(NetworkError::InvalidHyperparameter(format!(
            "learning_rate must be within [0, 1], got {learning_rate}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        NetworkConfig::default().validate().unwrap();
        TrainingConfig::default().validate().unwrap();
    }

    #[test]
    fn test_zero_hidden_size_rejected() {
        let config = NetworkConfig::new(2, 0, 1, 0.01);
        assert!(matches!(
            config.validate(),
            Err(NetworkError::InvalidHyperparameter(_))
        ));
    }

    #[test]
    fn test_bad_stdev_rejected() {
        assert!(NetworkConfig::new(2, 2, 1, -0.5).validate().is_err());
        assert!(NetworkConfig::new(2, 2, 1, f64::NAN).validate().is_err());
        assert!(NetworkConfig::new(2, 2, 1, 0.0).validate().is_ok());
    }

    #[test]
    fn test_learning_rate_range() {
        assert!(validate_learning_rate(0.0).is_ok());
        assert!(validate_learning_rate(1.0).is_ok());
        assert!(validate_learning_rate(1.5).is_err());
        assert!(validate_learning_rate(-0.1).is_err());
        assert!(validate_learning_rate(f64::INFINITY).is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TrainingConfig = serde_json::from_str(r#"{"epochs": 10}"#).unwrap();
        assert_eq!(config.epochs, 10);
        assert_eq!(config.learning_rate, 0.1);

        let config: NetworkConfig =
            serde_json::from_str(r#"{"hidden_size": 4, "example_order": "shuffled"}"#).unwrap();
        assert_eq!(config.hidden_size, 4);
        assert_eq!(config.example_order, ExampleOrder::Shuffled);
        assert_eq!(config.weight_stdev, 0.01);
    }
}
