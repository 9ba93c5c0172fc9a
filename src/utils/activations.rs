//! Activation functions applied by dense layers at inference time
//!
//! - Linear (identity)
//! - ReLU
//! - Sigmoid
//! - Tanh
//! - Softmax (row-wise)

use crate::error::{Result, TopologyError};
use serde::{Deserialize, Serialize};

/// Activation applied to the output of a dense layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    const NAMES: [&'static str; 5] = ["linear", "relu", "sigmoid", "tanh", "softmax"];

    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "relu" => Ok(Self::Relu),
            "sigmoid" => Ok(Self::Sigmoid),
            "tanh" => Ok(Self::Tanh),
            "softmax" => Ok(Self::Softmax),
            _ => Err(TopologyError::architecture(format!(
                "Invalid activation function '{}'. Must be one of: {}",
                name,
                Self::NAMES.join(", ")
            ))),
        }
    }

    /// Applies the activation in place to a row-major `rows × cols` matrix.
    pub fn apply(self, data: &mut [f32], rows: usize, cols: usize) {
        match self {
            Self::Linear => {}
            Self::Relu => relu_inplace(data),
            Self::Sigmoid => {
                for value in data.iter_mut() {
                    *value = sigmoid(*value);
                }
            }
            Self::Tanh => {
                for value in data.iter_mut() {
                    *value = value.tanh();
                }
            }
            Self::Softmax => softmax_rows(data, rows, cols),
        }
    }
}

/// Sigmoid activation function.
///
/// Returns the sigmoid of the input: 1 / (1 + exp(-x))
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// ReLU activation function applied in-place.
///
/// Sets all negative values to 0.0, keeps positive values unchanged.
pub fn relu_inplace(data: &mut [f32]) {
    for value in data.iter_mut() {
        if *value < 0.0 {
            *value = 0.0;
        }
    }
}

/// Softmax applied row-wise.
///
/// Uses the max-subtraction trick for numerical stability.
///
/// # Arguments
/// * `outputs` - Flat array containing row-major matrix data
/// * `rows` - Number of rows in the matrix
/// * `cols` - Number of columns in the matrix
pub fn softmax_rows(outputs: &mut [f32], rows: usize, cols: usize) {
    if cols == 0 {
        return;
    }

    for row in outputs.chunks_exact_mut(cols).take(rows) {
        let max_value = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        let mut sum = 0.0f32;
        for value in row.iter_mut() {
            *value = (*value - max_value).exp();
            sum += *value;
        }

        let inv_sum = 1.0f32 / sum;
        for value in row.iter_mut() {
            *value *= inv_sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_sigmoid_zero() {
        assert!((sigmoid(0.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_relu_mixed() {
        let mut data = vec![-2.0, -1.0, 0.0, 1.0, 2.0];
        relu_inplace(&mut data);
        assert_eq!(data, vec![0.0, 0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_softmax_numerical_stability() {
        let mut data = vec![1000.0, 1001.0, 1002.0];
        softmax_rows(&mut data, 1, 3);
        let sum: f32 = data.iter().sum();
        assert!((sum - 1.0).abs() < EPSILON);
        assert!(!data.iter().any(|&x| x.is_nan() || x.is_infinite()));
    }

    #[test]
    fn test_softmax_per_row() {
        let mut data = vec![1.0, 1.0, 0.0, 5.0];
        softmax_rows(&mut data, 2, 2);
        assert!((data[0] - 0.5).abs() < EPSILON);
        assert!((data[2] + data[3] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_parse_activation() {
        assert_eq!(Activation::parse("ReLU").unwrap(), Activation::Relu);
        assert_eq!(Activation::parse("tanh").unwrap(), Activation::Tanh);
        assert!(Activation::parse("swish").is_err());
    }

    #[test]
    fn test_apply_tanh() {
        let mut data = vec![0.0, 100.0];
        Activation::Tanh.apply(&mut data, 1, 2);
        assert_eq!(data[0], 0.0);
        assert!((data[1] - 1.0).abs() < EPSILON);
    }
}
