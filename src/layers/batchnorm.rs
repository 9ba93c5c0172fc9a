//! Batch normalization layer (inference mode)
//!
//! Normalises each feature with its running statistics:
//! y = gamma * (x - mean) / sqrt(var + epsilon) + beta
//!
//! A freshly built layer uses mean 0, variance 1, gamma 1 and beta 0.

use super::{Layer, LayerKind};

pub struct BatchNormLayer {
    size: usize,
    epsilon: f32,
    gamma: Vec<f32>,
    beta: Vec<f32>,
    running_mean: Vec<f32>,
    running_var: Vec<f32>,
}

impl BatchNormLayer {
    pub fn new(size: usize, epsilon: f32) -> Self {
        Self {
            size,
            epsilon,
            gamma: vec![1.0; size],
            beta: vec![0.0; size],
            running_mean: vec![0.0; size],
            running_var: vec![1.0; size],
        }
    }
}

impl Layer for BatchNormLayer {
    fn forward(&self, input: &[f32], output: &mut [f32], batch_size: usize) {
        assert_eq!(input.len(), batch_size * self.size, "batchnorm input size mismatch");

        for (x, y) in input
            .chunks_exact(self.size.max(1))
            .zip(output.chunks_exact_mut(self.size.max(1)))
        {
            for j in 0..self.size {
                let inv_std = 1.0 / (self.running_var[j] + self.epsilon).sqrt();
                y[j] = self.gamma[j] * (x[j] - self.running_mean[j]) * inv_std + self.beta[j];
            }
        }
    }

    fn input_size(&self) -> usize {
        self.size
    }

    fn output_size(&self) -> usize {
        self.size
    }

    /// gamma and beta per feature
    fn parameter_count(&self) -> usize {
        2 * self.size
    }

    fn kind(&self) -> LayerKind {
        LayerKind::BatchNorm
    }
}
