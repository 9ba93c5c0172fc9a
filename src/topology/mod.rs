//! Topology description and layout
//!
//! A [`SymmetricTopologyDelegate`] answers questions about a network (how many
//! layers, how many neurons per layer, which neurons connect) and a
//! [`SymmetricStratum`] turns those answers into positioned neuron and edge
//! nodes.

pub mod delegate;
pub mod lod;
pub mod stratum;

pub use delegate::{FullyConnectedDelegate, LayoutSettings, SymmetricTopologyDelegate};
pub use lod::{lod_switches, LodGroup, LodLevel, LodSettings, LodSwitch};
pub use stratum::{EdgeNode, NeuronNode, NodeRef, SymmetricStratum};

use crate::error::{Result, TopologyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How layers holding fewer neurons than the widest layer are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopologyAlignment {
    /// Narrow layers keep the neuron spacing and are centred on the widest one.
    #[default]
    Center,
    /// Narrow layers are stretched to span the widest one.
    Justified,
}

impl TopologyAlignment {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "center" => Ok(Self::Center),
            "justified" => Ok(Self::Justified),
            _ => Err(TopologyError::config(format!(
                "Invalid layer alignment '{}'. Must be one of: center, justified",
                value
            ))),
        }
    }
}

/// Kind of mesh placed in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyObject {
    Neuron,
    Edge,
}

impl TopologyObject {
    /// File name prefix of the level-of-detail meshes for this object.
    pub fn mesh_prefix(self) -> &'static str {
        match self {
            Self::Neuron => "neuron",
            Self::Edge => "cylinder",
        }
    }
}

/// Extents of the largest neuron model.
///
/// `width` runs along X (between layers), `height` along Z (within a layer)
/// and `depth` along Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeuronDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl NeuronDimensions {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

impl Default for NeuronDimensions {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Position of a neuron in the network: layer index and index within the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NeuronId {
    pub layer: usize,
    pub neuron: usize,
}

impl NeuronId {
    pub fn new(layer: usize, neuron: usize) -> Self {
        Self { layer, neuron }
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.layer, self.neuron)
    }
}

/// Reference to a mesh file the renderer loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelRef(pub PathBuf);

impl ModelRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}
