//! Activation functions and the derivative helpers used by backpropagation.
//!
//! The derivative helpers take the value they are given as a pre-activation
//! and evaluate the activation again. Training passes them the already
//! activated outputs, so `sigmoid_prime(o)` is really `s(o)·(1 - s(o))` with
//! `o = s(z)`. Learned weights depend on this, so it must stay this way.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Output activation of a single-layer perceptron.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputActivation {
    /// 1 / (1 + exp(-z))
    #[default]
    Sigmoid,
    /// 1 if z >= 0, else 0
    Threshold,
    /// z
    Linear,
}

impl OutputActivation {
    pub fn apply(&self, z: &Array1<f64>) -> Array1<f64> {
        match self {
            OutputActivation::Sigmoid => sigmoid(z),
            OutputActivation::Threshold => threshold(z),
            OutputActivation::Linear => z.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputActivation::Sigmoid => "sigmoid",
            OutputActivation::Threshold => "threshold",
            OutputActivation::Linear => "linear",
        }
    }
}

#[inline]
fn sigmoid_scalar(v: f64) -> f64 {
    1.0 / (1.0 + (-v).exp())
}

pub fn sigmoid(z: &Array1<f64>) -> Array1<f64> {
    z.mapv(sigmoid_scalar)
}

/// `sigmoid(z) * (1 - sigmoid(z))`, evaluated at whatever `z` is passed in.
pub fn sigmoid_prime(z: &Array1<f64>) -> Array1<f64> {
    z.mapv(|v| {
        let s = sigmoid_scalar(v);
        s * (1.0 - s)
    })
}

pub fn tanh(z: &Array1<f64>) -> Array1<f64> {
    z.mapv(f64::tanh)
}

/// `1 - tanh(z)^2`, evaluated at whatever `z` is passed in.
pub fn tanh_prime(z: &Array1<f64>) -> Array1<f64> {
    let t = tanh(z);
    1.0 - &t * &t
}

pub fn threshold(z: &Array1<f64>) -> Array1<f64> {
    z.mapv(|v| if v >= 0.0 { 1.0 } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_sigmoid_at_zero() {
        let y = sigmoid(&array![0.0]);
        assert_eq!(y[0], 0.5);
    }

    #[test]
    fn test_sigmoid_prime_reapplies_sigmoid() {
        // s(0.5) = 0.6224593..., so the derivative helper sees 0.5 as a pre-activation
        let d = sigmoid_prime(&array![0.5]);
        let s = 1.0 / (1.0 + (-0.5f64).exp());
        assert_relative_eq!(d[0], s * (1.0 - s), epsilon = 1e-15);
        assert!(d[0] < 0.25);
    }

    #[test]
    fn test_tanh_prime() {
        let d = tanh_prime(&array![0.0, 1.0]);
        assert_eq!(d[0], 1.0);
        assert_relative_eq!(d[1], 1.0 - 1.0f64.tanh().powi(2), epsilon = 1e-15);
    }

    #[test]
    fn test_threshold_boundary() {
        let y = threshold(&array![-0.1, 0.0, 2.0]);
        assert_eq!(y, array![0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_output_activation_apply() {
        let z = array![-1.0, 3.0];
        assert_eq!(OutputActivation::Linear.apply(&z), z);
        assert_eq!(OutputActivation::Threshold.apply(&z), array![0.0, 1.0]);
        assert_eq!(OutputActivation::Sigmoid.apply(&z), sigmoid(&z));
    }
}
