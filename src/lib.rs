//! Two-layer feed-forward networks trained by online backpropagation, with
//! a single-layer perceptron and a handful of truth-table datasets to train
//! them on.
//!
//! # Example
//!
//! ```rust
//! use nn_trainer::{Network, NetworkConfig, TrainingConfig, dataset, fit};
//!
//! let xor = dataset::builtin("xor").unwrap();
//! let mut net = Network::new(NetworkConfig::new(2, 4, 1, 0.5).with_seed(7)).unwrap();
//! let report = fit(&mut net, &xor, &TrainingConfig { learning_rate: 0.5, ..Default::default() }).unwrap();
//! assert_eq!(report.history.len(), 1000);
//! ```

pub mod activation;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod model;
pub mod network;
pub mod perceptron;
pub mod trainer;

pub use activation::OutputActivation;
pub use config::{ExampleOrder, NetworkConfig, TrainingConfig};
pub use dataset::{Dataset, TrainingExample};
pub use error::{NetworkError, Result};
pub use model::{ForwardPassResult, ModelInfo, TrainingReport};
pub use network::Network;
pub use perceptron::Perceptron;
pub use trainer::{Learner, fit, predictions, train_for};
