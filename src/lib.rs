//! Neural Network Topology Library
//!
//! This library lays out neural network topologies (neurons and weighted
//! connections) in 3D and describes the result as a renderer-independent
//! scene.
//!
//! # Modules
//!
//! - `topology`: Delegate trait, symmetric stratum layout and LOD switches
//! - `architecture`: JSON architecture files for sequential models
//! - `layers`: Inference-time layers (Dense, Dropout, BatchNorm)
//! - `model`: Sequential models and their topology delegate
//! - `intensity`: Activation and weight colour mapping
//! - `scene`: Camera framing, lighting, animation and JSON export
//! - `assets`: Level-of-detail mesh discovery
//! - `config`: Visualization configuration
//! - `utils`: Shared utilities (RNG, activation functions, logging)

pub mod architecture;
pub mod assets;
pub mod config;
pub mod error;
pub mod geometry;
pub mod intensity;
pub mod layers;
pub mod model;
pub mod scene;
pub mod topology;
pub mod utils;

pub use error::{Result, TopologyError};
