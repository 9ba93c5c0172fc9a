//! Architecture configuration structures
//!
//! Sequential models are described by JSON architecture files. A file lists
//! layers in order; dense layers may carry their trained parameters, and
//! layers without parameters are initialised from a seeded RNG so the same
//! file always yields the same topology colours.

use crate::error::{Result, TopologyError};
use crate::layers::{BatchNormLayer, DenseLayer, DropoutLayer, Initializer, Layer};
use crate::utils::{Activation, SimpleRng};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Configuration for a single layer of a sequential model.
///
/// Different layer types require different fields:
///
/// - **Dense**: Requires `input_size` and `output_size`; optional `use_bias`
///   (default true), `activation` (default "linear"), `initializer`
///   (default "xavier"), `weights` (row-major input_size × output_size) and
///   `biases`
/// - **Dropout**: Requires `size` and `drop_rate` (range [0.0, 1.0))
/// - **BatchNorm**: Requires `size`, and optional `epsilon` (default 1e-3)
///
/// # Examples
///
/// ```json
/// {
///   "layer_type": "dense",
///   "input_size": 10,
///   "output_size": 8,
///   "use_bias": false,
///   "activation": "relu"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayerConfig {
    /// Type of layer: "dense", "dropout" or "batchnorm"
    pub layer_type: String,

    // Dense layer parameters
    pub input_size: Option<usize>,
    pub output_size: Option<usize>,
    pub use_bias: Option<bool>,
    pub activation: Option<String>,
    pub initializer: Option<Initializer>,
    pub weights: Option<Vec<f32>>,
    pub biases: Option<Vec<f32>>,

    // Dropout and BatchNorm parameters
    /// Number of features for Dropout and BatchNorm layers
    pub size: Option<usize>,
    /// Probability of dropping units
    pub drop_rate: Option<f32>,
    /// Epsilon for BatchNorm layer
    pub epsilon: Option<f32>,
}

/// Configuration for an entire sequential model.
///
/// # Example
///
/// ```json
/// {
///   "name": "binary_counter",
///   "layers": [
///     { "layer_type": "dense", "input_size": 10, "output_size": 8, "use_bias": false },
///     { "layer_type": "dropout", "size": 8, "drop_rate": 0.01 },
///     { "layer_type": "dense", "input_size": 8, "output_size": 4 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchitectureConfig {
    pub name: Option<String>,
    /// Sequence of layer configurations defining the network structure
    pub layers: Vec<LayerConfig>,
}

/// Default epsilon for batch normalization, as used by Keras.
pub const DEFAULT_BATCHNORM_EPSILON: f32 = 1e-3;

/// Loads an architecture configuration from a JSON file and validates it.
///
/// # Examples
///
/// ```no_run
/// use neural_topology::architecture::load_architecture;
///
/// let arch = load_architecture("config/architectures/binary_counter.json").unwrap();
/// assert!(!arch.layers.is_empty());
/// ```
pub fn load_architecture(path: impl AsRef<Path>) -> Result<ArchitectureConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_architecture(&contents)
}

/// Parses and validates an architecture from a JSON string.
pub fn parse_architecture(contents: &str) -> Result<ArchitectureConfig> {
    let config: ArchitectureConfig = serde_json::from_str(contents)?;
    validate_architecture(&config)?;
    Ok(config)
}

fn missing(index: usize, kind: &str, field: &str) -> TopologyError {
    TopologyError::architecture(format!(
        "Layer {}: {} layer requires '{}'",
        index, kind, field
    ))
}

fn layer_input_size(layer: &LayerConfig, index: usize) -> Result<usize> {
    match layer.layer_type.to_lowercase().as_str() {
        "dense" => layer.input_size.ok_or_else(|| missing(index, "Dense", "input_size")),
        "dropout" | "batchnorm" => layer
            .size
            .ok_or_else(|| missing(index, &layer.layer_type, "size")),
        _ => Err(invalid_type(layer, index)),
    }
}

fn layer_output_size(layer: &LayerConfig, index: usize) -> Result<usize> {
    match layer.layer_type.to_lowercase().as_str() {
        "dense" => layer.output_size.ok_or_else(|| missing(index, "Dense", "output_size")),
        // Dropout and BatchNorm don't change the size
        "dropout" | "batchnorm" => layer
            .size
            .ok_or_else(|| missing(index, &layer.layer_type, "size")),
        _ => Err(invalid_type(layer, index)),
    }
}

fn invalid_type(layer: &LayerConfig, index: usize) -> TopologyError {
    TopologyError::architecture(format!(
        "Layer {}: Invalid layer type '{}'. Must be one of: dense, dropout, batchnorm",
        index, layer.layer_type
    ))
}

/// Validates an architecture configuration.
///
/// Checks that:
/// - Architecture has at least one dense layer
/// - Each layer has the required fields for its type
/// - Parameter values are within valid ranges
/// - Layer connections are valid (output size of layer i matches input size of layer i+1)
fn validate_architecture(config: &ArchitectureConfig) -> Result<()> {
    for (i, layer) in config.layers.iter().enumerate() {
        validate_layer(layer, i)?;
    }

    if !config
        .layers
        .iter()
        .any(|layer| layer.layer_type.eq_ignore_ascii_case("dense"))
    {
        return Err(TopologyError::architecture(
            "Architecture must have at least one dense layer",
        ));
    }

    for (i, pair) in config.layers.windows(2).enumerate() {
        let current_output = layer_output_size(&pair[0], i)?;
        let next_input = layer_input_size(&pair[1], i + 1)?;

        if current_output != next_input {
            return Err(TopologyError::architecture(format!(
                "Layer connection mismatch: Layer {} output size ({}) does not match Layer {} input size ({})",
                i, current_output, i + 1, next_input
            )));
        }
    }

    Ok(())
}

/// Validates a single layer configuration.
fn validate_layer(layer: &LayerConfig, index: usize) -> Result<()> {
    let positive = |value: Option<usize>, field: &str| -> Result<()> {
        match value {
            Some(0) => Err(TopologyError::architecture(format!(
                "Layer {}: {} must be greater than 0",
                index, field
            ))),
            _ => Ok(()),
        }
    };

    match layer.layer_type.to_lowercase().as_str() {
        "dense" => {
            let input_size = layer.input_size.ok_or_else(|| missing(index, "Dense", "input_size"))?;
            let output_size = layer
                .output_size
                .ok_or_else(|| missing(index, "Dense", "output_size"))?;
            positive(Some(input_size), "input_size")?;
            positive(Some(output_size), "output_size")?;

            if let Some(ref activation) = layer.activation {
                Activation::parse(activation).map_err(|e| {
                    TopologyError::architecture(format!("Layer {}: {}", index, strip_prefix(&e)))
                })?;
            }

            if let Some(ref weights) = layer.weights {
                if weights.len() != input_size * output_size {
                    return Err(TopologyError::architecture(format!(
                        "Layer {}: expected {} weights ({} × {}), got {}",
                        index,
                        input_size * output_size,
                        input_size,
                        output_size,
                        weights.len()
                    )));
                }
            }
            if let Some(ref biases) = layer.biases {
                if !layer.use_bias.unwrap_or(true) {
                    return Err(TopologyError::architecture(format!(
                        "Layer {}: biases given but use_bias is false",
                        index
                    )));
                }
                if biases.len() != output_size {
                    return Err(TopologyError::architecture(format!(
                        "Layer {}: expected {} biases, got {}",
                        index,
                        output_size,
                        biases.len()
                    )));
                }
            }
        }
        "dropout" => {
            positive(Some(layer.size.ok_or_else(|| missing(index, "Dropout", "size"))?), "size")?;
            let drop_rate = layer
                .drop_rate
                .ok_or_else(|| missing(index, "Dropout", "drop_rate"))?;
            if !(0.0..1.0).contains(&drop_rate) {
                return Err(TopologyError::architecture(format!(
                    "Layer {}: drop_rate must be in range [0.0, 1.0)",
                    index
                )));
            }
        }
        "batchnorm" => {
            positive(Some(layer.size.ok_or_else(|| missing(index, "BatchNorm", "size"))?), "size")?;
            if let Some(epsilon) = layer.epsilon {
                if epsilon <= 0.0 {
                    return Err(TopologyError::architecture(format!(
                        "Layer {}: epsilon must be positive",
                        index
                    )));
                }
            }
        }
        _ => return Err(invalid_type(layer, index)),
    }

    Ok(())
}

fn strip_prefix(error: &TopologyError) -> String {
    match error {
        TopologyError::Architecture { message } => message.clone(),
        other => other.to_string(),
    }
}

/// Builds the layers described by a validated architecture.
///
/// Dense layers use the parameters from the file when present and are
/// otherwise initialised from `rng`.
///
/// # Examples
///
/// ```no_run
/// use neural_topology::architecture::{build_layers, load_architecture};
/// use neural_topology::utils::SimpleRng;
///
/// let config = load_architecture("config/architectures/binary_counter.json").unwrap();
/// let mut rng = SimpleRng::new(420);
/// let layers = build_layers(&config, &mut rng).unwrap();
/// assert_eq!(layers.len(), config.layers.len());
/// ```
pub fn build_layers(config: &ArchitectureConfig, rng: &mut SimpleRng) -> Result<Vec<Box<dyn Layer>>> {
    let mut layers: Vec<Box<dyn Layer>> = Vec::with_capacity(config.layers.len());

    for (i, layer_config) in config.layers.iter().enumerate() {
        validate_layer(layer_config, i)?;

        match layer_config.layer_type.to_lowercase().as_str() {
            "dense" => layers.push(Box::new(build_dense(layer_config, i, rng)?)),
            "dropout" => {
                let size = layer_input_size(layer_config, i)?;
                let drop_rate = layer_config.drop_rate.unwrap_or(0.0);
                layers.push(Box::new(DropoutLayer::new(size, drop_rate)));
            }
            "batchnorm" => {
                let size = layer_input_size(layer_config, i)?;
                let epsilon = layer_config.epsilon.unwrap_or(DEFAULT_BATCHNORM_EPSILON);
                layers.push(Box::new(BatchNormLayer::new(size, epsilon)));
            }
            _ => return Err(invalid_type(layer_config, i)),
        }
        if let Some(layer) = layers.last() {
            debug!(
                layer = i,
                kind = ?layer.kind(),
                inputs = layer.input_size(),
                outputs = layer.output_size(),
                "Built layer"
            );
        }
    }

    Ok(layers)
}

fn build_dense(config: &LayerConfig, index: usize, rng: &mut SimpleRng) -> Result<DenseLayer> {
    let input_size = layer_input_size(config, index)?;
    let output_size = layer_output_size(config, index)?;
    let use_bias = config.use_bias.unwrap_or(true);
    let activation = match config.activation {
        Some(ref name) => Activation::parse(name)?,
        None => Activation::Linear,
    };

    match config.weights {
        Some(ref weights) => {
            let biases = use_bias.then(|| {
                config
                    .biases
                    .clone()
                    .unwrap_or_else(|| vec![0.0; output_size])
            });
            DenseLayer::from_parameters(input_size, output_size, weights.clone(), biases, activation)
        }
        None => {
            let mut layer = DenseLayer::new(
                input_size,
                output_size,
                use_bias,
                activation,
                config.initializer.unwrap_or_default(),
                rng,
            );
            if let Some(ref biases) = config.biases {
                layer = DenseLayer::from_parameters(
                    input_size,
                    output_size,
                    layer.weights().to_vec(),
                    Some(biases.clone()),
                    activation,
                )?;
            }
            Ok(layer)
        }
    }
}
