//! Shared utilities
//!
//! Random number generation for weight initialisation, activation functions
//! used at inference time, and logging setup for the executables.

pub mod activations;
pub mod logger;
pub mod rng;

pub use activations::Activation;
pub use rng::SimpleRng;
