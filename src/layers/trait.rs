//! Layer trait definition for sequential model layers
//!
//! Layers here only run inference: they turn an input batch into an output
//! batch and report their shape. The topology delegate reads shapes and
//! parameters from them, the activation trace reads their outputs.

use super::DenseLayer;

/// Kind of a layer, mirroring the `layer_type` field of architecture files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Dense,
    Dropout,
    BatchNorm,
}

/// Core trait for sequential model layers.
///
/// # Example
///
/// ```ignore
/// let mut output = vec![0.0f32; batch_size * layer.output_size()];
/// layer.forward(&input, &mut output, batch_size);
/// ```
pub trait Layer {
    /// Forward propagation through the layer.
    ///
    /// # Arguments
    ///
    /// * `input` - Input data flattened as a 1D array (batch_size × input_size)
    /// * `output` - Output buffer to store results (batch_size × output_size)
    /// * `batch_size` - Number of samples in the batch
    ///
    /// # Panics
    ///
    /// Implementations may panic if input/output dimensions don't match expected sizes.
    fn forward(&self, input: &[f32], output: &mut [f32], batch_size: usize);

    /// Number of input features per sample.
    fn input_size(&self) -> usize;

    /// Number of output features per sample.
    fn output_size(&self) -> usize;

    /// Total count of trainable parameters.
    fn parameter_count(&self) -> usize;

    fn kind(&self) -> LayerKind;

    /// Downcast used by the topology delegate to read weights.
    fn as_dense(&self) -> Option<&DenseLayer> {
        None
    }
}
