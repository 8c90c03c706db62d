use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// One weight layer: its shape, activation and current parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayerInfo {
    #[serde(rename = "type")]
    pub layer_type: String,
    pub input_dim: usize,
    pub output_dim: usize,
    pub activation: String,
    /// `weights[to][from]`
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

impl LayerInfo {
    pub fn dense(activation: &str, weights: &Array2<f64>, bias: &Array1<f64>) -> Self {
        Self {
            layer_type: "Dense".to_string(),
            input_dim: weights.ncols(),
            output_dim: weights.nrows(),
            activation: activation.to_string(),
            weights: weights.outer_iter().map(|row| row.to_vec()).collect(),
            bias: bias.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub name: String,
    pub layers: Vec<LayerInfo>,
}

/// Activations of every layer for one input, input layer first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForwardPassResult {
    pub activations: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EpochRecord {
    pub epoch: usize,
    pub mean_squared_residual: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
    pub output: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingReport {
    pub dataset: String,
    pub learning_rate: f64,
    pub history: Vec<EpochRecord>,
    pub predictions: Vec<Prediction>,
    pub model: ModelInfo,
}

impl TrainingReport {
    pub fn first_residual(&self) -> Option<f64> {
        self.history.first().map(|r| r.mean_squared_residual)
    }

    pub fn final_residual(&self) -> Option<f64> {
        self.history.last().map(|r| r.mean_squared_residual)
    }
}
