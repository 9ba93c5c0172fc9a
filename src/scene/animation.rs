//! Pivot rotation and signal propagation
//!
//! The animated scene hangs the stratum under a pivot node at the origin.
//! The stratum is offset so its centre sits on the pivot; the pivot spins
//! about Z and sways along Y. Signal propagation is a brightness pulse that
//! travels from the input layer to the output layer and repeats.

use crate::geometry::Vec3;
use serde::{Deserialize, Serialize};

/// Parameters of the animated scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub enabled: bool,
    pub degrees_per_second: f32,
    pub sway_amplitude: f32,
    pub sway_frequency: f32,
    pub sway_offset: f32,
    /// Seconds between successive layers lighting up.
    pub propagation_interval: f32,
    pub duration: f32,
    pub fps: u32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            degrees_per_second: 20.0,
            sway_amplitude: 45.0,
            sway_frequency: 0.5,
            sway_offset: -25.0,
            propagation_interval: 0.5,
            duration: 10.0,
            fps: 30,
        }
    }
}

/// Transform of the pivot node at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PivotPose {
    pub heading: f32,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotAnimation {
    degrees_per_second: f32,
    sway_amplitude: f32,
    sway_frequency: f32,
    sway_offset: f32,
}

impl PivotAnimation {
    pub fn new(settings: &AnimationSettings) -> Self {
        Self {
            degrees_per_second: settings.degrees_per_second,
            sway_amplitude: settings.sway_amplitude,
            sway_frequency: settings.sway_frequency,
            sway_offset: settings.sway_offset,
        }
    }

    /// Pivot pose `t` seconds into the animation.
    pub fn pose(&self, t: f32) -> PivotPose {
        PivotPose {
            heading: (t * self.degrees_per_second).rem_euclid(360.0),
            position: Vec3::new(
                0.0,
                (t * self.sway_frequency).sin() * self.sway_amplitude + self.sway_offset,
                0.0,
            ),
        }
    }
}

/// Brightness pulse moving through the layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalPropagation {
    layers: usize,
    interval: f32,
}

impl SignalPropagation {
    pub fn new(layers: usize, interval: f32) -> Self {
        Self { layers, interval }
    }

    /// Length of one sweep including a rest of one interval after the output layer.
    pub fn period(&self) -> f32 {
        (self.layers + 1) as f32 * self.interval
    }

    /// Brightness in `[0, 1]` of `layer` at time `t`.
    ///
    /// Each layer peaks `layer * interval` seconds into the sweep and fades
    /// linearly over one interval on either side.
    pub fn layer_brightness(&self, t: f32, layer: usize) -> f32 {
        if self.interval <= 0.0 || layer >= self.layers {
            return 0.0;
        }
        let phase = t.rem_euclid(self.period());
        let peak = layer as f32 * self.interval;
        (1.0 - (phase - peak).abs() / self.interval).max(0.0)
    }

    pub fn brightness(&self, t: f32) -> Vec<f32> {
        (0..self.layers)
            .map(|layer| self.layer_brightness(t, layer))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pivot_pose() {
        let animation = PivotAnimation::new(&AnimationSettings::default());

        let start = animation.pose(0.0);
        assert_eq!(start.heading, 0.0);
        assert!((start.position.y + 25.0).abs() < 1e-5);

        // quarter of the sway period: sin(pi / 2) = 1
        let t = std::f32::consts::PI;
        let pose = animation.pose(t);
        assert!((pose.position.y - 20.0).abs() < 1e-3);
        assert!((pose.heading - t * 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_heading_wraps() {
        let animation = PivotAnimation::new(&AnimationSettings::default());
        assert!((animation.pose(19.0).heading - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_propagation_pulse() {
        let wave = SignalPropagation::new(3, 0.5);
        assert_eq!(wave.period(), 2.0);
        assert_eq!(wave.brightness(0.0), vec![1.0, 0.0, 0.0]);
        assert_eq!(wave.brightness(0.25), vec![0.5, 0.5, 0.0]);
        assert_eq!(wave.brightness(1.0), vec![0.0, 0.0, 1.0]);
        // repeats after one period
        assert_eq!(wave.brightness(2.5), wave.brightness(0.5));
    }

    #[test]
    fn test_propagation_degenerate() {
        assert_eq!(SignalPropagation::new(2, 0.0).brightness(1.0), vec![0.0, 0.0]);
        assert!(SignalPropagation::new(0, 0.5).brightness(0.3).is_empty());
    }
}
