//! Dense (fully connected) layer implementation
//!
//! This module provides a DenseLayer that performs the transformation:
//! output = activation(input × weights + biases)

use super::{Layer, LayerKind};
use crate::error::{Result, TopologyError};
use crate::utils::{Activation, SimpleRng};
use serde::{Deserialize, Serialize};

/// Weight initialisation scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initializer {
    /// Uniform in [-limit, limit] with limit = sqrt(6 / (fan_in + fan_out)).
    #[default]
    Xavier,
    /// Normal with standard deviation sqrt(2 / fan_in).
    HeNormal,
}

/// Dense (fully connected) layer with weights and optional biases.
///
/// Performs y = f(xW + b)
/// where x is the input (batch_size × input_size),
/// W is the weight matrix (input_size × output_size),
/// and b is the bias vector (output_size).
///
/// # Example
///
/// ```
/// use neural_topology::layers::{DenseLayer, Initializer, Layer};
/// use neural_topology::utils::{Activation, SimpleRng};
///
/// let mut rng = SimpleRng::new(42);
/// let layer = DenseLayer::new(10, 8, false, Activation::Relu, Initializer::HeNormal, &mut rng);
/// assert_eq!(layer.input_size(), 10);
/// assert_eq!(layer.parameter_count(), 80);
/// ```
#[derive(Debug, Clone)]
pub struct DenseLayer {
    input_size: usize,
    output_size: usize,
    weights: Vec<f32>,
    biases: Option<Vec<f32>>,
    activation: Activation,
}

impl DenseLayer {
    /// Create a new DenseLayer with randomly initialised weights.
    ///
    /// Biases, when used, start at zero.
    pub fn new(
        input_size: usize,
        output_size: usize,
        use_bias: bool,
        activation: Activation,
        initializer: Initializer,
        rng: &mut SimpleRng,
    ) -> Self {
        let mut weights = vec![0.0f32; input_size * output_size];
        match initializer {
            Initializer::Xavier => {
                let limit = (6.0f32 / (input_size + output_size) as f32).sqrt();
                for value in &mut weights {
                    *value = rng.gen_range_f32(-limit, limit);
                }
            }
            Initializer::HeNormal => {
                let std_dev = (2.0f32 / input_size as f32).sqrt();
                for value in &mut weights {
                    *value = rng.next_normal() * std_dev;
                }
            }
        }

        Self {
            input_size,
            output_size,
            weights,
            biases: use_bias.then(|| vec![0.0f32; output_size]),
            activation,
        }
    }

    /// Create a DenseLayer from known parameters.
    ///
    /// # Errors
    ///
    /// Fails if `weights` is not `input_size × output_size` long or `biases`
    /// is not `output_size` long.
    pub fn from_parameters(
        input_size: usize,
        output_size: usize,
        weights: Vec<f32>,
        biases: Option<Vec<f32>>,
        activation: Activation,
    ) -> Result<Self> {
        if weights.len() != input_size * output_size {
            return Err(TopologyError::architecture(format!(
                "Dense layer expects {} weights ({} × {}), got {}",
                input_size * output_size,
                input_size,
                output_size,
                weights.len()
            )));
        }
        if let Some(ref b) = biases {
            if b.len() != output_size {
                return Err(TopologyError::architecture(format!(
                    "Dense layer expects {} biases, got {}",
                    output_size,
                    b.len()
                )));
            }
        }

        Ok(Self {
            input_size,
            output_size,
            weights,
            biases,
            activation,
        })
    }

    /// Weight matrix, row-major input_size × output_size.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight of the connection from input `from` to output `to`.
    pub fn weight(&self, from: usize, to: usize) -> Option<f32> {
        if from < self.input_size && to < self.output_size {
            Some(self.weights[from * self.output_size + to])
        } else {
            None
        }
    }

    pub fn biases(&self) -> Option<&[f32]> {
        self.biases.as_deref()
    }

    pub fn uses_bias(&self) -> bool {
        self.biases.is_some()
    }
}

impl Layer for DenseLayer {
    fn forward(&self, input: &[f32], output: &mut [f32], batch_size: usize) {
        assert_eq!(input.len(), batch_size * self.input_size, "dense input size mismatch");
        assert_eq!(output.len(), batch_size * self.output_size, "dense output size mismatch");

        for (x, y) in input
            .chunks_exact(self.input_size.max(1))
            .zip(output.chunks_exact_mut(self.output_size.max(1)))
            .take(batch_size)
        {
            match &self.biases {
                Some(b) => y.copy_from_slice(b),
                None => y.fill(0.0),
            }
            for (i, &xi) in x.iter().enumerate() {
                let row = &self.weights[i * self.output_size..(i + 1) * self.output_size];
                for (yj, &w) in y.iter_mut().zip(row) {
                    *yj += xi * w;
                }
            }
        }

        self.activation.apply(output, batch_size, self.output_size);
    }

    fn input_size(&self) -> usize {
        self.input_size
    }

    fn output_size(&self) -> usize {
        self.output_size
    }

    /// input_size × output_size weights plus output_size biases when used.
    fn parameter_count(&self) -> usize {
        self.weights.len() + self.biases.as_ref().map_or(0, Vec::len)
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Dense
    }

    fn as_dense(&self) -> Option<&DenseLayer> {
        Some(self)
    }
}
