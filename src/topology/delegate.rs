//! Delegate trait describing a network to the stratum builder

use super::{ModelRef, NeuronDimensions, NeuronId, TopologyAlignment};
use serde::{Deserialize, Serialize};

/// Default edge cross-section relative to the edge mesh.
pub const DEFAULT_EDGE_DIAMETER: f32 = 0.05;

/// Architecture parameters queried while a stratum is built.
///
/// Implementors describe the network (layers, neurons, connections) and the
/// look of the layout (spacing, alignment, meshes). The builder calls these
/// methods in layer order and never caches their results across builds.
pub trait SymmetricTopologyDelegate {
    /// Dimensions of the largest neuron model.
    fn neuron_dimensions(&self) -> NeuronDimensions;

    /// Neuron meshes from greatest to least level of detail.
    ///
    /// The greatest level of detail is the mesh with the most triangles.
    fn level_of_detail_neuron_models(&self) -> Vec<ModelRef>;

    /// Edge meshes from greatest to least level of detail.
    fn level_of_detail_edge_models(&self) -> Vec<ModelRef>;

    /// Number of network layers.
    fn number_of_layers(&self) -> usize;

    /// Number of neurons displayed for `layer`.
    fn number_of_neurons(&self, layer: usize) -> usize;

    /// Spacing between neighbouring neurons of a layer.
    fn neuron_spacing(&self) -> f32;

    /// Spacing between neighbouring layers.
    fn layer_spacing(&self) -> f32;

    /// Alignment of layers holding different numbers of neurons.
    fn layer_alignment(&self) -> TopologyAlignment;

    /// Neurons that the neuron `neuron` of `layer` connects to.
    fn connecting_neurons(&self, layer: usize, neuron: usize) -> Vec<NeuronId>;

    /// Cross-section scale applied to every edge mesh.
    fn edge_diameter(&self) -> f32 {
        DEFAULT_EDGE_DIAMETER
    }

    /// Whether `id` is a bias node rather than a regular neuron.
    fn is_bias(&self, _id: NeuronId) -> bool {
        false
    }

    /// Weight carried by the connection `source -> target`, when known.
    fn connection_weight(&self, _source: NeuronId, _target: NeuronId) -> Option<f32> {
        None
    }
}

/// Spacing, alignment and sizing of a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub neuron_spacing: f32,
    pub layer_spacing: f32,
    pub alignment: TopologyAlignment,
    pub neuron_dimensions: NeuronDimensions,
    pub edge_diameter: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            neuron_spacing: 6.0,
            layer_spacing: 45.0,
            alignment: TopologyAlignment::Center,
            neuron_dimensions: NeuronDimensions::default(),
            edge_diameter: DEFAULT_EDGE_DIAMETER,
        }
    }
}

impl LayoutSettings {
    /// Tighter spacing suited to small hand-written topologies.
    pub fn compact() -> Self {
        Self {
            neuron_spacing: 2.5,
            layer_spacing: 16.0,
            ..Self::default()
        }
    }
}

/// Delegate for a plain layered network where every neuron of a layer
/// connects to every neuron of the next layer.
///
/// # Example
///
/// ```
/// use neural_topology::topology::{FullyConnectedDelegate, SymmetricStratum};
/// use neural_topology::topology::delegate::LayoutSettings;
///
/// let delegate = FullyConnectedDelegate::new(vec![8, 16, 4, 8, 4], LayoutSettings::compact());
/// let stratum = SymmetricStratum::build(&delegate).unwrap();
/// assert_eq!(stratum.neurons().len(), 40);
/// assert_eq!(stratum.edges().len(), 8 * 16 + 16 * 4 + 4 * 8 + 8 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct FullyConnectedDelegate {
    neurons_per_layer: Vec<usize>,
    layout: LayoutSettings,
    neuron_models: Vec<ModelRef>,
    edge_models: Vec<ModelRef>,
}

impl FullyConnectedDelegate {
    pub fn new(neurons_per_layer: Vec<usize>, layout: LayoutSettings) -> Self {
        Self {
            neurons_per_layer,
            layout,
            neuron_models: Vec::new(),
            edge_models: Vec::new(),
        }
    }

    /// Sets the LOD meshes, each list ordered from most to least detailed.
    pub fn with_models(mut self, neuron_models: Vec<ModelRef>, edge_models: Vec<ModelRef>) -> Self {
        self.neuron_models = neuron_models;
        self.edge_models = edge_models;
        self
    }
}

impl SymmetricTopologyDelegate for FullyConnectedDelegate {
    fn neuron_dimensions(&self) -> NeuronDimensions {
        self.layout.neuron_dimensions
    }

    fn level_of_detail_neuron_models(&self) -> Vec<ModelRef> {
        self.neuron_models.clone()
    }

    fn level_of_detail_edge_models(&self) -> Vec<ModelRef> {
        self.edge_models.clone()
    }

    fn number_of_layers(&self) -> usize {
        self.neurons_per_layer.len()
    }

    fn number_of_neurons(&self, layer: usize) -> usize {
        self.neurons_per_layer.get(layer).copied().unwrap_or(0)
    }

    fn neuron_spacing(&self) -> f32 {
        self.layout.neuron_spacing
    }

    fn layer_spacing(&self) -> f32 {
        self.layout.layer_spacing
    }

    fn layer_alignment(&self) -> TopologyAlignment {
        self.layout.alignment
    }

    fn connecting_neurons(&self, layer: usize, _neuron: usize) -> Vec<NeuronId> {
        let next = layer + 1;
        (0..self.number_of_neurons(next))
            .map(|neuron| NeuronId::new(next, neuron))
            .collect()
    }

    fn edge_diameter(&self) -> f32 {
        self.layout.edge_diameter
    }
}
