//! Sequential models and their topology
//!
//! A [`SequentialModel`] is the ordered layer stack built from an
//! architecture file. [`SequentialModelDelegate`] exposes it to the stratum
//! builder: one displayed layer per dense layer input plus the final output.

pub mod delegate;

pub use delegate::SequentialModelDelegate;

use crate::architecture::{build_layers, load_architecture, ArchitectureConfig};
use crate::error::{Result, TopologyError};
use crate::layers::{DenseLayer, Layer};
use crate::utils::SimpleRng;
use std::path::Path;
use tracing::info;

pub struct SequentialModel {
    name: Option<String>,
    layers: Vec<Box<dyn Layer>>,
}

impl SequentialModel {
    pub fn from_config(config: &ArchitectureConfig, rng: &mut SimpleRng) -> Result<Self> {
        let layers = build_layers(config, rng)?;
        let model = Self {
            name: config.name.clone(),
            layers,
        };
        info!(
            name = model.name.as_deref().unwrap_or("unnamed"),
            layers = model.layers.len(),
            parameters = model.parameter_count(),
            "Built sequential model"
        );
        Ok(model)
    }

    /// Loads an architecture file and builds it with a seeded RNG.
    pub fn load(path: impl AsRef<Path>, seed: u64) -> Result<Self> {
        let config = load_architecture(path)?;
        let mut rng = SimpleRng::new(seed);
        Self::from_config(&config, &mut rng)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Dense layers in model order.
    pub fn dense_layers(&self) -> Vec<&DenseLayer> {
        self.layers.iter().filter_map(|layer| layer.as_dense()).collect()
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |layer| layer.input_size())
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.parameter_count()).sum()
    }

    /// Runs one sample through the model.
    pub fn predict(&self, input: &[f32]) -> Result<Vec<f32>> {
        let mut trace = self.forward_trace(input)?;
        Ok(trace.pop().unwrap_or_default())
    }

    /// Runs one sample and records the values entering every dense layer,
    /// followed by the model output.
    ///
    /// The result has one entry per displayed topology layer, in the same
    /// order [`SequentialModelDelegate`] lays them out.
    pub fn forward_trace(&self, input: &[f32]) -> Result<Vec<Vec<f32>>> {
        if input.len() != self.input_size() {
            return Err(TopologyError::dimension(format!(
                "Model expects {} inputs, got {}",
                self.input_size(),
                input.len()
            )));
        }

        let mut trace = Vec::new();
        let mut current = input.to_vec();
        for layer in &self.layers {
            if layer.as_dense().is_some() {
                trace.push(current.clone());
            }
            let mut output = vec![0.0f32; layer.output_size()];
            layer.forward(&current, &mut output, 1);
            current = output;
        }
        trace.push(current);

        Ok(trace)
    }
}
