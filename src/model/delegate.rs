//! Topology delegate for sequential models
//!
//! Displayed layer `l` holds the inputs of the `l`-th dense layer plus one
//! bias node when that layer uses a bias. The last displayed layer is the
//! output of the final dense layer and has no bias node. Layers without
//! weights (dropout, batchnorm) are not displayed.

use super::SequentialModel;
use crate::layers::{DenseLayer, Layer};
use crate::topology::{
    LayoutSettings, ModelRef, NeuronDimensions, NeuronId, SymmetricTopologyDelegate,
    TopologyAlignment,
};

pub struct SequentialModelDelegate<'a> {
    dense: Vec<&'a DenseLayer>,
    neurons_in_layer: Vec<usize>,
    bias_in_layer: Vec<usize>,
    layout: LayoutSettings,
    neuron_models: Vec<ModelRef>,
    edge_models: Vec<ModelRef>,
}

impl<'a> SequentialModelDelegate<'a> {
    pub fn new(model: &'a SequentialModel, layout: LayoutSettings) -> Self {
        let dense = model.dense_layers();
        let (neurons_in_layer, bias_in_layer) = compute_neuron_counts(&dense);
        Self {
            dense,
            neurons_in_layer,
            bias_in_layer,
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

    /// Regular (non-bias) neurons per displayed layer.
    pub fn neurons_in_layer(&self) -> &[usize] {
        &self.neurons_in_layer
    }

    /// Bias nodes (0 or 1) per displayed layer.
    pub fn bias_in_layer(&self) -> &[usize] {
        &self.bias_in_layer
    }
}

/// Neuron and bias node counts to display per layer.
fn compute_neuron_counts(dense: &[&DenseLayer]) -> (Vec<usize>, Vec<usize>) {
    let mut neurons: Vec<usize> = dense.iter().map(|layer| layer.input_size()).collect();
    let mut biases: Vec<usize> = dense.iter().map(|layer| usize::from(layer.uses_bias())).collect();

    if let Some(last) = dense.last() {
        neurons.push(last.output_size());
        biases.push(0);
    }

    (neurons, biases)
}

impl SymmetricTopologyDelegate for SequentialModelDelegate<'_> {
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
        self.neurons_in_layer.len()
    }

    fn number_of_neurons(&self, layer: usize) -> usize {
        self.neurons_in_layer.get(layer).copied().unwrap_or(0)
            + self.bias_in_layer.get(layer).copied().unwrap_or(0)
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

    /// Every regular neuron of the next layer; bias nodes receive no input.
    fn connecting_neurons(&self, layer: usize, _neuron: usize) -> Vec<NeuronId> {
        let next = layer + 1;
        let count = self.neurons_in_layer.get(next).copied().unwrap_or(0);
        (0..count).map(|neuron| NeuronId::new(next, neuron)).collect()
    }

    fn edge_diameter(&self) -> f32 {
        self.layout.edge_diameter
    }

    fn is_bias(&self, id: NeuronId) -> bool {
        self.bias_in_layer.get(id.layer) == Some(&1)
            && self.neurons_in_layer.get(id.layer) == Some(&id.neuron)
    }

    fn connection_weight(&self, source: NeuronId, target: NeuronId) -> Option<f32> {
        if target.layer != source.layer + 1 {
            return None;
        }
        let dense = self.dense.get(source.layer)?;
        if self.is_bias(source) {
            dense.biases()?.get(target.neuron).copied()
        } else {
            dense.weight(source.neuron, target.neuron)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::architecture::parse_architecture;
    use crate::utils::SimpleRng;

    fn model(json: &str) -> SequentialModel {
        let config = parse_architecture(json).unwrap();
        SequentialModel::from_config(&config, &mut SimpleRng::new(7)).unwrap()
    }

    #[test]
    fn test_counts_with_bias() {
        let model = model(
            r#"{ "layers": [
                { "layer_type": "dense", "input_size": 3, "output_size": 2 },
                { "layer_type": "dense", "input_size": 2, "output_size": 1, "use_bias": false }
            ] }"#,
        );
        let delegate = SequentialModelDelegate::new(&model, LayoutSettings::default());

        assert_eq!(delegate.neurons_in_layer(), &[3, 2, 1]);
        assert_eq!(delegate.bias_in_layer(), &[1, 0, 0]);
        assert_eq!(delegate.number_of_neurons(0), 4);
        assert!(delegate.is_bias(NeuronId::new(0, 3)));
        assert!(!delegate.is_bias(NeuronId::new(1, 2)));
    }

    #[test]
    fn test_bias_node_weight_is_dense_bias() {
        let model = model(
            r#"{ "layers": [
                { "layer_type": "dense", "input_size": 1, "output_size": 2,
                  "weights": [0.25, -0.75], "biases": [0.5, 1.5] }
            ] }"#,
        );
        let delegate = SequentialModelDelegate::new(&model, LayoutSettings::default());

        let w = |s: (usize, usize), t: (usize, usize)| {
            delegate.connection_weight(NeuronId::new(s.0, s.1), NeuronId::new(t.0, t.1))
        };
        assert_eq!(w((0, 0), (1, 1)), Some(-0.75));
        assert_eq!(w((0, 1), (1, 0)), Some(0.5));
        assert_eq!(w((0, 1), (1, 1)), Some(1.5));
        assert_eq!(w((0, 0), (0, 1)), None);
    }
}
