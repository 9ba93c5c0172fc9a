//! Colour mapping of activation and weight intensity
//!
//! Intensities are normalised to `[0, 1]` and mapped through a two-stop
//! linear gradient. Neuron intensity is normalised per layer, edge intensity
//! over the whole stratum.

use crate::error::{Result, TopologyError};
use crate::topology::SymmetricStratum;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub f32, pub f32, pub f32, pub f32);

impl Rgba {
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Rgba(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
            mix(self.3, other.3),
        )
    }
}

/// Linear gradient from `low` (intensity 0) to `high` (intensity 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorMap {
    pub low: Rgba,
    pub high: Rgba,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self {
            low: Rgba(0.1, 0.1, 0.3, 1.0),
            high: Rgba(1.0, 0.85, 0.2, 1.0),
        }
    }
}

impl ColorMap {
    /// Colour for `intensity`, clamped to `[0, 1]`. NaN maps to `low`.
    pub fn color(&self, intensity: f32) -> Rgba {
        let t = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        self.low.lerp(self.high, t)
    }
}

/// Colours neurons from a per-layer trace of values.
///
/// `trace[l]` holds the values of the regular (non-bias) neurons of layer
/// `l`. Each layer is normalised by its largest absolute value, so an
/// all-zero layer stays at intensity 0. Bias nodes always carry 1.
pub fn apply_activations(
    stratum: &mut SymmetricStratum,
    trace: &[Vec<f32>],
    map: &ColorMap,
) -> Result<()> {
    if trace.len() != stratum.layer_sizes().len() {
        return Err(TopologyError::dimension(format!(
            "Activation trace has {} layers but the stratum has {}",
            trace.len(),
            stratum.layer_sizes().len()
        )));
    }

    for (layer, values) in trace.iter().enumerate() {
        let regular = stratum.layer(layer).filter(|node| !node.bias).count();
        if values.len() != regular {
            return Err(TopologyError::dimension(format!(
                "Layer {}: activation trace has {} values but the layer has {} neurons",
                layer,
                values.len(),
                regular
            )));
        }
    }

    let scales: Vec<f32> = trace.iter().map(|values| max_abs(values)).collect();

    for node in stratum.neurons_mut() {
        let intensity = if node.bias {
            1.0
        } else {
            let value = trace[node.id.layer][node.id.neuron];
            normalise(value, scales[node.id.layer])
        };
        node.intensity = Some(intensity);
        node.color = Some(map.color(intensity));
    }

    debug!(layers = trace.len(), "Applied activation intensity");
    Ok(())
}

/// Colours edges by the magnitude of their weight relative to the largest
/// weight in the stratum. Edges without a weight are left untouched.
pub fn apply_weights(stratum: &mut SymmetricStratum, map: &ColorMap) -> usize {
    let scale = stratum
        .edges()
        .iter()
        .filter_map(|edge| edge.weight)
        .fold(0.0f32, |acc, w| acc.max(w.abs()));

    let mut colored = 0;
    for edge in stratum.edges_mut() {
        if let Some(weight) = edge.weight {
            let intensity = normalise(weight, scale);
            edge.intensity = Some(intensity);
            edge.color = Some(map.color(intensity));
            colored += 1;
        }
    }

    debug!(edges = colored, "Applied weight intensity");
    colored
}

fn max_abs(values: &[f32]) -> f32 {
    values.iter().fold(0.0f32, |acc, v| acc.max(v.abs()))
}

fn normalise(value: f32, scale: f32) -> f32 {
    if scale > 0.0 {
        value.abs() / scale
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_map_endpoints() {
        let map = ColorMap {
            low: Rgba(0.0, 0.0, 0.0, 1.0),
            high: Rgba(1.0, 0.5, 0.0, 1.0),
        };
        assert_eq!(map.color(0.0), map.low);
        assert_eq!(map.color(1.0), map.high);
        assert_eq!(map.color(0.5), Rgba(0.5, 0.25, 0.0, 1.0));
    }

    #[test]
    fn test_color_map_clamps() {
        let map = ColorMap::default();
        assert_eq!(map.color(-3.0), map.low);
        assert_eq!(map.color(7.0), map.high);
        assert_eq!(map.color(f32::NAN), map.low);
    }

    #[test]
    fn test_normalise_zero_scale() {
        assert_eq!(normalise(0.0, 0.0), 0.0);
        assert_eq!(normalise(-2.0, 4.0), 0.5);
    }
}
