//! Layer abstractions for sequential models
//!
//! This module provides the Layer trait and the inference-time layers an
//! architecture file can describe.

mod r#trait;
pub mod batchnorm;
pub mod dense;
pub mod dropout;

// Re-export the Layer trait for convenience
pub use batchnorm::BatchNormLayer;
pub use dense::{DenseLayer, Initializer};
pub use dropout::DropoutLayer;
pub use r#trait::{Layer, LayerKind};
