//! Symmetric stratum: neurons laid out layer by layer on the XZ plane
//!
//! Layer `i` sits at `x = i * (neuron width + layer spacing)`. Within a layer
//! neurons stack along +Z, and the layer alignment decides how layers with
//! fewer neurons than the widest layer are placed. Every connection becomes
//! an edge node centred between its two neurons, stretched along its local
//! +Y axis and rotated so that axis points at the target neuron.

use super::{
    LodGroup, LodSettings, NeuronDimensions, NeuronId, SymmetricTopologyDelegate,
    TopologyAlignment,
};
use crate::error::{Result, TopologyError};
use crate::geometry::{BoundingBox, Orientation, Vec3};
use crate::intensity::Rgba;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// A neuron placed in the stratum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeuronNode {
    pub id: NeuronId,
    pub tag: String,
    pub position: Vec3,
    pub bias: bool,
    pub lod: LodGroup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
}

/// A connection between two neurons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeNode {
    pub source: NeuronId,
    pub target: NeuronId,
    pub tag: String,
    /// Midpoint between source and target.
    pub position: Vec3,
    /// Cross-section on X and Z, half the edge length on Y.
    pub scale: Vec3,
    pub orientation: Orientation,
    pub length: f32,
    pub lod: LodGroup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeIndex {
    Neuron(usize),
    Edge(usize),
}

/// Either kind of node, as returned by [`SymmetricStratum::find_by_tag`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Neuron(&'a NeuronNode),
    Edge(&'a EdgeNode),
}

/// Laid-out neurons and edges of a network.
#[derive(Debug, Clone, Serialize)]
pub struct SymmetricStratum {
    layer_sizes: Vec<usize>,
    neuron_dimensions: NeuronDimensions,
    neurons: Vec<NeuronNode>,
    edges: Vec<EdgeNode>,
    #[serde(skip)]
    neuron_index: HashMap<NeuronId, usize>,
    #[serde(skip)]
    tag_index: HashMap<String, NodeIndex>,
}

impl SymmetricStratum {
    /// Tag naming the neuron node `neuron` of `layer`.
    pub fn neuron_tag(layer: usize, neuron: usize) -> String {
        format!("(Neuron): Layer_id={}, Neuron_id={}", layer, neuron)
    }

    /// Tag naming the edge node between two neurons.
    pub fn edge_tag(source: NeuronId, target: NeuronId) -> String {
        format!(
            "(Edge): SourceLayer_id={}, SourceNeuron_id={}, TargetLayer_id={}, TargetNeuron_id={}",
            source.layer, source.neuron, target.layer, target.neuron
        )
    }

    /// Builds the stratum with the default LOD switch distances.
    pub fn build<D: SymmetricTopologyDelegate + ?Sized>(delegate: &D) -> Result<Self> {
        Self::build_with(delegate, &LodSettings::default())
    }

    /// Builds the stratum described by `delegate`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::Dimension`] for negative or non-finite spacing
    /// and dimensions or a connection listed twice, and
    /// [`TopologyError::UnknownNeuron`] when the delegate connects to a
    /// neuron that is not part of the layout.
    pub fn build_with<D: SymmetricTopologyDelegate + ?Sized>(
        delegate: &D,
        lod: &LodSettings,
    ) -> Result<Self> {
        let dimensions = delegate.neuron_dimensions();
        validate_layout(delegate, &dimensions, lod)?;

        let (max_neurons, layer_sizes) = max_and_neurons_per_layer(delegate);
        let mut stratum = Self {
            layer_sizes,
            neuron_dimensions: dimensions,
            neurons: Vec::new(),
            edges: Vec::new(),
            neuron_index: HashMap::new(),
            tag_index: HashMap::new(),
        };

        stratum.layout_neurons(delegate, max_neurons, lod);
        stratum.layout_edges(delegate, lod)?;

        info!(
            layers = stratum.layer_sizes.len(),
            neurons = stratum.neurons.len(),
            edges = stratum.edges.len(),
            "Built symmetric stratum"
        );
        Ok(stratum)
    }

    fn layout_neurons<D: SymmetricTopologyDelegate + ?Sized>(
        &mut self,
        delegate: &D,
        max_neurons: usize,
        lod: &LodSettings,
    ) {
        let positions = neuron_positions_on_xz_plane(
            &self.layer_sizes,
            max_neurons,
            &self.neuron_dimensions,
            delegate.neuron_spacing(),
            delegate.layer_spacing(),
            delegate.layer_alignment(),
        );

        let models = delegate.level_of_detail_neuron_models();
        if models.is_empty() && !positions.is_empty() {
            warn!("Delegate supplied no neuron models; neurons will have no meshes");
        }
        let group = LodGroup::new(&models, lod.first_switch, lod.switch_ratio);

        for (layer, layer_positions) in positions.into_iter().enumerate() {
            for (neuron, position) in layer_positions.into_iter().enumerate() {
                let id = NeuronId::new(layer, neuron);
                let tag = Self::neuron_tag(layer, neuron);
                let idx = self.neurons.len();
                self.neuron_index.insert(id, idx);
                self.tag_index.insert(tag.clone(), NodeIndex::Neuron(idx));
                self.neurons.push(NeuronNode {
                    id,
                    tag,
                    position,
                    bias: delegate.is_bias(id),
                    lod: group.clone(),
                    intensity: None,
                    color: None,
                });
            }
        }
    }

    fn layout_edges<D: SymmetricTopologyDelegate + ?Sized>(
        &mut self,
        delegate: &D,
        lod: &LodSettings,
    ) -> Result<()> {
        let models = delegate.level_of_detail_edge_models();
        let group = LodGroup::new(&models, lod.first_switch, lod.switch_ratio);
        let diameter = delegate.edge_diameter();
        let mut warned = false;

        for source_layer in 0..self.layer_sizes.len().saturating_sub(1) {
            for source_neuron in 0..self.layer_sizes[source_layer] {
                let source = NeuronId::new(source_layer, source_neuron);
                let source_pos = self.position_of(source)?;

                let targets = delegate.connecting_neurons(source_layer, source_neuron);
                debug!(%source, targets = targets.len(), "Laying out edges");

                for target in targets {
                    let target_pos = self.position_of(target)?;
                    if models.is_empty() && !warned {
                        warn!("Delegate supplied no edge models; edges will have no meshes");
                        warned = true;
                    }

                    let tag = Self::edge_tag(source, target);
                    if self.tag_index.contains_key(&tag) {
                        return Err(TopologyError::dimension(format!(
                            "duplicate connection {} -> {}",
                            source, target
                        )));
                    }

                    let length = source_pos.distance(target_pos);
                    let idx = self.edges.len();
                    self.tag_index.insert(tag.clone(), NodeIndex::Edge(idx));
                    self.edges.push(EdgeNode {
                        source,
                        target,
                        tag,
                        position: source_pos.midpoint(target_pos),
                        // edge meshes span [-1, 1] on Y, so half the length reaches both ends
                        scale: Vec3::new(diameter, length / 2.0, diameter),
                        orientation: Orientation::look_at(source_pos, target_pos),
                        length,
                        lod: group.clone(),
                        weight: delegate.connection_weight(source, target),
                        intensity: None,
                        color: None,
                    });
                }
            }
        }

        Ok(())
    }

    fn position_of(&self, id: NeuronId) -> Result<Vec3> {
        self.find_neuron(id)
            .map(|node| node.position)
            .ok_or(TopologyError::UnknownNeuron {
                layer: id.layer,
                neuron: id.neuron,
            })
    }

    pub fn find_neuron(&self, id: NeuronId) -> Option<&NeuronNode> {
        self.neuron_index.get(&id).map(|&idx| &self.neurons[idx])
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<NodeRef<'_>> {
        self.tag_index.get(tag).map(|index| match *index {
            NodeIndex::Neuron(idx) => NodeRef::Neuron(&self.neurons[idx]),
            NodeIndex::Edge(idx) => NodeRef::Edge(&self.edges[idx]),
        })
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn neuron_dimensions(&self) -> NeuronDimensions {
        self.neuron_dimensions
    }

    pub fn neurons(&self) -> &[NeuronNode] {
        &self.neurons
    }

    pub fn neurons_mut(&mut self) -> &mut [NeuronNode] {
        &mut self.neurons
    }

    pub fn edges(&self) -> &[EdgeNode] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut [EdgeNode] {
        &mut self.edges
    }

    /// Neurons of one layer, in neuron order.
    pub fn layer(&self, layer: usize) -> impl Iterator<Item = &NeuronNode> {
        self.neurons.iter().filter(move |node| node.id.layer == layer)
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// Smallest box enclosing every neuron model; `None` when empty.
    pub fn tight_bounds(&self) -> Option<BoundingBox> {
        let d = self.neuron_dimensions;
        let extents = Vec3::new(d.width, d.depth, d.height);
        self.neurons
            .iter()
            .map(|node| BoundingBox::around(node.position, extents))
            .reduce(BoundingBox::union)
    }
}

fn validate_layout<D: SymmetricTopologyDelegate + ?Sized>(
    delegate: &D,
    dimensions: &NeuronDimensions,
    lod: &LodSettings,
) -> Result<()> {
    let checks = [
        ("neuron width", dimensions.width),
        ("neuron height", dimensions.height),
        ("neuron depth", dimensions.depth),
        ("neuron spacing", delegate.neuron_spacing()),
        ("layer spacing", delegate.layer_spacing()),
        ("edge diameter", delegate.edge_diameter()),
    ];
    for (name, value) in checks {
        if !value.is_finite() || value < 0.0 {
            return Err(TopologyError::dimension(format!(
                "{} must be a non-negative finite number, got {}",
                name, value
            )));
        }
    }

    if !lod.first_switch.is_finite() || lod.first_switch <= 0.0 {
        return Err(TopologyError::dimension(
            "LOD first switch distance must be positive",
        ));
    }
    if !lod.switch_ratio.is_finite() || lod.switch_ratio <= 1.0 {
        return Err(TopologyError::dimension(
            "LOD switch ratio must be greater than 1",
        ));
    }

    Ok(())
}

/// Neuron count of every layer and the largest of them.
fn max_and_neurons_per_layer<D: SymmetricTopologyDelegate + ?Sized>(
    delegate: &D,
) -> (usize, Vec<usize>) {
    let layer_sizes: Vec<usize> = (0..delegate.number_of_layers())
        .map(|layer| delegate.number_of_neurons(layer))
        .collect();
    let max_neurons = layer_sizes.iter().copied().max().unwrap_or(0);
    (max_neurons, layer_sizes)
}

/// Neuron centres per layer.
///
/// The network width is the distance between the centres of the outermost
/// neurons of the widest layer.
pub fn neuron_positions_on_xz_plane(
    layer_sizes: &[usize],
    max_neurons: usize,
    dimensions: &NeuronDimensions,
    neuron_spacing: f32,
    layer_spacing: f32,
    alignment: TopologyAlignment,
) -> Vec<Vec<Vec3>> {
    let base_offset = dimensions.height + neuron_spacing;
    let layer_offset = dimensions.width + layer_spacing;
    let largest_width = span(max_neurons, base_offset);

    layer_sizes
        .iter()
        .enumerate()
        .map(|(layer, &neurons)| {
            let mut neuron_offset = base_offset;
            let current_width = span(neurons, neuron_offset);

            let centering = match alignment {
                TopologyAlignment::Center => (largest_width - current_width) / 2.0,
                TopologyAlignment::Justified => {
                    if neurons == 1 {
                        largest_width / 2.0
                    } else {
                        if neurons > 1 && current_width < largest_width {
                            neuron_offset = largest_width / (neurons - 1) as f32;
                        }
                        0.0
                    }
                }
            };

            (0..neurons)
                .map(|neuron| {
                    Vec3::new(
                        layer as f32 * layer_offset,
                        0.0,
                        neuron as f32 * neuron_offset + centering,
                    )
                })
                .collect()
        })
        .collect()
}

fn span(neurons: usize, offset: f32) -> f32 {
    neurons.saturating_sub(1) as f32 * offset
}
