//! Training loop shared by every model.

use ndarray::Array1;
use tracing::{debug, info, instrument};

use crate::config::TrainingConfig;
use crate::dataset::{Dataset, TrainingExample};
use crate::error::{Result, check_len};
use crate::model::{EpochRecord, ModelInfo, Prediction, TrainingReport};
use crate::network::Network;
use crate::perceptron::Perceptron;

/// A model that can be trained one epoch at a time.
pub trait Learner {
    fn name(&self) -> &'static str;

    fn input_size(&self) -> usize;

    fn output_size(&self) -> usize;

    fn predict(&self, x: &Array1<f64>) -> Result<Array1<f64>>;

    /// One pass over `examples`; returns the mean squared residual.
    fn epoch(&mut self, examples: &[TrainingExample], learning_rate: f64) -> Result<f64>;

    fn describe(&self) -> ModelInfo;
}

impl Learner for Network {
    fn name(&self) -> &'static str {
        "network"
    }

    fn input_size(&self) -> usize {
        Network::input_size(self)
    }

    fn output_size(&self) -> usize {
        Network::output_size(self)
    }

    fn predict(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        Network::predict(self, x)
    }

    fn epoch(&mut self, examples: &[TrainingExample], learning_rate: f64) -> Result<f64> {
        Network::epoch(self, examples, learning_rate)
    }

    fn describe(&self) -> ModelInfo {
        Network::describe(self)
    }
}

impl Learner for Perceptron {
    fn name(&self) -> &'static str {
        "perceptron"
    }

    fn input_size(&self) -> usize {
        Perceptron::input_size(self)
    }

    fn output_size(&self) -> usize {
        Perceptron::output_size(self)
    }

    fn predict(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        self.forward(x)
    }

    fn epoch(&mut self, examples: &[TrainingExample], learning_rate: f64) -> Result<f64> {
        Perceptron::epoch(self, examples, learning_rate)
    }

    fn describe(&self) -> ModelInfo {
        Perceptron::describe(self)
    }
}

fn check_dataset<L: Learner + ?Sized>(learner: &L, dataset: &Dataset) -> Result<()> {
    check_len("dataset input size", learner.input_size(), dataset.input_size())?;
    check_len("dataset output size", learner.output_size(), dataset.output_size())
}

/// Runs `epochs` epochs and returns the mean squared residual of each.
pub fn train_for<L: Learner + ?Sized>(
    learner: &mut L,
    dataset: &Dataset,
    learning_rate: f64,
    epochs: usize,
) -> Result<Vec<f64>> {
    check_dataset(learner, dataset)?;
    (0..epochs)
        .map(|_| learner.epoch(dataset.examples(), learning_rate))
        .collect()
}

/// Outputs for every example of `dataset`, in dataset order.
pub fn predictions<L: Learner + ?Sized>(learner: &L, dataset: &Dataset) -> Result<Vec<Prediction>> {
    check_dataset(learner, dataset)?;
    dataset
        .examples()
        .iter()
        .map(|example| {
            Ok(Prediction {
                input: example.input().to_vec(),
                target: example.target().to_vec(),
                output: learner.predict(example.input())?.to_vec(),
            })
        })
        .collect()
}

/// Trains `learner` on `dataset` and reports the residual history and the
/// final prediction for every example.
#[instrument(skip_all, fields(model = learner.name(), dataset = dataset.name()))]
pub fn fit<L: Learner + ?Sized>(
    learner: &mut L,
    dataset: &Dataset,
    config: &TrainingConfig,
) -> Result<TrainingReport> {
    config.validate()?;
    check_dataset(learner, dataset)?;
    info!(
        epochs = config.epochs,
        learning_rate = config.learning_rate,
        examples = dataset.len(),
        "training started"
    );

    let mut history = Vec::with_capacity(config.epochs);
    for epoch in 1..=config.epochs {
        let residual = learner.epoch(dataset.examples(), config.learning_rate)?;
        if epoch % config.log_every == 0 {
            info!(epoch, mean_squared_residual = residual, "progress");
        } else {
            debug!(epoch, mean_squared_residual = residual);
        }
        history.push(EpochRecord {
            epoch,
            mean_squared_residual: residual,
        });
    }

    let report = TrainingReport {
        dataset: dataset.name().to_string(),
        learning_rate: config.learning_rate,
        history,
        predictions: predictions(learner, dataset)?,
        model: learner.describe(),
    };
    info!(
        first = ?report.first_residual(),
        last = ?report.final_residual(),
        "training finished"
    );
    Ok(report)
}
