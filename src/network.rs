//! Two-layer feed-forward network trained by online backpropagation.
//!
//! `h = tanh(W_h·x + b_h)`, `o = sigmoid(W_o·h + b_o)`. Training uses the
//! signed residual `y - o` and *adds* the scaled deltas to the parameters.
//! The derivative helpers are handed the post-activation values `o` and `h`
//! (see [`crate::activation`]); both conventions shape what the network
//! learns and are kept exactly.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Normal;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::activation::{sigmoid, sigmoid_prime, tanh, tanh_prime};
use crate::config::{ExampleOrder, NetworkConfig, positive, validate_learning_rate};
use crate::dataset::TrainingExample;
use crate::error::{NetworkError, Result, check_len};
use crate::model::{ForwardPassResult, LayerInfo, ModelInfo};

#[derive(Debug)]
pub struct Network {
    config: NetworkConfig,
    /// hidden_size x input_size
    hidden_weights: Array2<f64>,
    hidden_bias: Array1<f64>,
    /// output_size x hidden_size
    output_weights: Array2<f64>,
    output_bias: Array1<f64>,
    rng: StdRng,
}

/// The four parameter arrays, always built and swapped in together.
struct Parameters {
    hidden_weights: Array2<f64>,
    hidden_bias: Array1<f64>,
    output_weights: Array2<f64>,
    output_bias: Array1<f64>,
}

impl Parameters {
    fn random(config: &NetworkConfig, rng: &mut StdRng) -> Result<Self> {
        let normal = Normal::new(config.weight_mean, config.weight_stdev)
            .map_err(|e| NetworkError::InvalidHyperparameter(format!("weight distribution: {e}")))?;
        let (i, h, o) = (config.input_size, config.hidden_size, config.output_size);
        Ok(Self {
            hidden_bias: Array1::random_using(h, normal, rng),
            hidden_weights: Array2::random_using((h, i), normal, rng),
            output_bias: Array1::random_using(o, normal, rng),
            output_weights: Array2::random_using((o, h), normal, rng),
        })
    }
}

impl Network {
    /// Builds a network with normally distributed weights and biases.
    pub fn new(config: NetworkConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let params = Parameters::random(&config, &mut rng)?;
        Ok(Self {
            config,
            hidden_weights: params.hidden_weights,
            hidden_bias: params.hidden_bias,
            output_weights: params.output_weights,
            output_bias: params.output_bias,
            rng,
        })
    }

    /// Builds a network from explicit parameters, checking every shape
    /// against `config`. Useful for pinning exact weights.
    pub fn from_parameters(
        config: NetworkConfig,
        hidden_weights: Array2<f64>,
        hidden_bias: Array1<f64>,
        output_weights: Array2<f64>,
        output_bias: Array1<f64>,
    ) -> Result<Self> {
        config.validate()?;
        check_len("hidden weight rows", config.hidden_size, hidden_weights.nrows())?;
        check_len("hidden weight columns", config.input_size, hidden_weights.ncols())?;
        check_len("hidden bias", config.hidden_size, hidden_bias.len())?;
        check_len("output weight rows", config.output_size, output_weights.nrows())?;
        check_len("output weight columns", config.hidden_size, output_weights.ncols())?;
        check_len("output bias", config.output_size, output_bias.len())?;
        let rng = seeded_rng(config.seed);
        Ok(Self {
            config,
            hidden_weights,
            hidden_bias,
            output_weights,
            output_bias,
            rng,
        })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn input_size(&self) -> usize {
        self.config.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.config.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.config.output_size
    }

    pub fn hidden_weights(&self) -> &Array2<f64> {
        &self.hidden_weights
    }

    pub fn hidden_bias(&self) -> &Array1<f64> {
        &self.hidden_bias
    }

    pub fn output_weights(&self) -> &Array2<f64> {
        &self.output_weights
    }

    pub fn output_bias(&self) -> &Array1<f64> {
        &self.output_bias
    }

    /// Returns the hidden activation `h` and the output activation `o`.
    pub fn forward(&self, x: &Array1<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        check_len("input", self.config.input_size, x.len())?;
        let h = tanh(&(self.hidden_weights.dot(x) + &self.hidden_bias));
        let o = sigmoid(&(self.output_weights.dot(&h) + &self.output_bias));
        Ok((h, o))
    }

    pub fn predict(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        self.forward(x).map(|(_, o)| o)
    }

    /// Activations of the input, hidden and output layers.
    pub fn forward_pass(&self, x: &Array1<f64>) -> Result<ForwardPassResult> {
        let (h, o) = self.forward(x)?;
        Ok(ForwardPassResult {
            activations: vec![x.to_vec(), h.to_vec(), o.to_vec()],
        })
    }

    /// Signed residual `y - o`. Positive entries mean the output should grow.
    pub fn cost(&self, y: &Array1<f64>, o: &Array1<f64>) -> Result<Array1<f64>> {
        check_len("target", self.config.output_size, y.len())?;
        check_len("output", self.config.output_size, o.len())?;
        Ok(y - o)
    }

    /// One in-place update from a single example's forward pass.
    ///
    /// All arguments are validated before any parameter changes.
    pub fn train_step(
        &mut self,
        x: &Array1<f64>,
        o: &Array1<f64>,
        h: &Array1<f64>,
        residual: &Array1<f64>,
        learning_rate: f64,
    ) -> Result<()> {
        check_len("input", self.config.input_size, x.len())?;
        check_len("output", self.config.output_size, o.len())?;
        check_len("hidden activation", self.config.hidden_size, h.len())?;
        check_len("residual", self.config.output_size, residual.len())?;
        validate_learning_rate(learning_rate)?;

        let output_delta = residual * &sigmoid_prime(o);
        // uses W_o before this step's update
        let hidden_delta = output_delta.dot(&self.output_weights) * &tanh_prime(h);

        self.output_bias.scaled_add(learning_rate, &output_delta);
        self.output_weights.scaled_add(learning_rate, &outer(&output_delta, h));

        self.hidden_bias.scaled_add(learning_rate, &hidden_delta);
        self.hidden_weights.scaled_add(learning_rate, &outer(&hidden_delta, x));
        Ok(())
    }

    /// One pass over `examples`, one train step each, in the configured
    /// [`ExampleOrder`]. Returns the mean of `sum(residual^2)` per example.
    pub fn epoch(&mut self, examples: &[TrainingExample], learning_rate: f64) -> Result<f64> {
        if examples.is_empty() {
            return Err(NetworkError::EmptyDataset);
        }
        validate_learning_rate(learning_rate)?;
        for example in examples {
            example.check_shape(self.config.input_size, self.config.output_size)?;
        }

        let mut order: Vec<usize> = (0..examples.len()).collect();
        if self.config.example_order == ExampleOrder::Shuffled {
            order.shuffle(&mut self.rng);
        }

        let mut cost_sum = 0.0;
        for idx in order {
            let example = &examples[idx];
            let x = example.input();
            let (h, o) = self.forward(x)?;
            let residual = self.cost(example.target(), &o)?;
            self.train_step(x, &o, &h, &residual, learning_rate)?;
            cost_sum += residual.mapv(|r| r * r).sum();
        }
        let mean = cost_sum / examples.len() as f64;
        debug!(mean_squared_residual = mean, "epoch complete");
        Ok(mean)
    }

    /// Redraws every parameter with a new hidden size. Input and output
    /// sizes are unchanged.
    pub fn reset(&mut self, hidden_size: usize) -> Result<()> {
        positive("hidden_size", hidden_size)?;
        let config = NetworkConfig {
            hidden_size,
            ..self.config.clone()
        };
        let params = Parameters::random(&config, &mut self.rng)?;
        if hidden_size != self.config.hidden_size {
            warn!(
                from = self.config.hidden_size,
                to = hidden_size,
                "hidden size changed, network reinitialized"
            );
        }
        self.config = config;
        self.hidden_weights = params.hidden_weights;
        self.hidden_bias = params.hidden_bias;
        self.output_weights = params.output_weights;
        self.output_bias = params.output_bias;
        Ok(())
    }

    pub fn describe(&self) -> ModelInfo {
        ModelInfo {
            name: "network".to_string(),
            layers: vec![
                LayerInfo::dense("tanh", &self.hidden_weights, &self.hidden_bias),
                LayerInfo::dense("sigmoid", &self.output_weights, &self.output_bias),
            ],
        }
    }
}

/// Seeded when `seed` is given, from entropy otherwise.
pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// `outer(a, b)[i][j] = a[i] * b[j]`
pub(crate) fn outer(a: &Array1<f64>, b: &Array1<f64>) -> Array2<f64> {
    Array2::from_shape_fn((a.len(), b.len()), |(i, j)| a[i] * b[j])
}
