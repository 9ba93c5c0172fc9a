//! Error type shared by the layout, model and scene modules.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid mesh pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Architecture error: {message}")]
    Architecture { message: String },

    #[error("Dimension error: {message}")]
    Dimension { message: String },

    #[error("Unknown neuron: layer {layer}, neuron {neuron}")]
    UnknownNeuron { layer: usize, neuron: usize },
}

impl TopologyError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn architecture(message: impl Into<String>) -> Self {
        Self::Architecture {
            message: message.into(),
        }
    }

    pub fn dimension(message: impl Into<String>) -> Self {
        Self::Dimension {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TopologyError>;
