//! Dropout layer
//!
//! At inference time dropout passes its input through unchanged. The layer
//! is kept so that architecture files describing trained models load as-is;
//! the topology delegate skips it when counting displayed layers.

use super::{Layer, LayerKind};

pub struct DropoutLayer {
    size: usize,
    drop_rate: f32,
}

impl DropoutLayer {
    pub fn new(size: usize, drop_rate: f32) -> Self {
        Self { size, drop_rate }
    }

    pub fn drop_rate(&self) -> f32 {
        self.drop_rate
    }
}

impl Layer for DropoutLayer {
    fn forward(&self, input: &[f32], output: &mut [f32], batch_size: usize) {
        assert_eq!(input.len(), batch_size * self.size, "dropout input size mismatch");
        output.copy_from_slice(input);
    }

    fn input_size(&self) -> usize {
        self.size
    }

    fn output_size(&self) -> usize {
        self.size
    }

    fn parameter_count(&self) -> usize {
        0
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Dropout
    }
}
