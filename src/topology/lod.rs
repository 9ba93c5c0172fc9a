//! Level-of-detail switch ranges
//!
//! Each neuron and edge is a LOD node holding several meshes ordered from the
//! most triangles to the fewest. The most detailed mesh is shown close to the
//! camera and every following mesh takes over at a distance `ratio` times
//! further out. The last mesh stays visible out to infinity.

use super::ModelRef;
use serde::{Deserialize, Serialize};

/// Distance at which the most detailed mesh is switched out.
pub const DEFAULT_FIRST_SWITCH: f32 = 23.0;

/// Ratio between successive switch distances.
pub const DEFAULT_SWITCH_RATIO: f32 = 1.8;

/// Switch distances shared by every LOD node of a stratum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodSettings {
    pub first_switch: f32,
    pub switch_ratio: f32,
}

impl Default for LodSettings {
    fn default() -> Self {
        Self {
            first_switch: DEFAULT_FIRST_SWITCH,
            switch_ratio: DEFAULT_SWITCH_RATIO,
        }
    }
}

/// Camera-distance range `[near, far)` over which a mesh is visible.
///
/// `far` is `None` for the last level, which never switches out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LodSwitch {
    pub far: Option<f32>,
    pub near: f32,
}

impl LodSwitch {
    pub fn contains(&self, distance: f32) -> bool {
        distance >= self.near && self.far.map_or(true, |far| distance < far)
    }
}

/// Computes `count` consecutive switch ranges.
pub fn lod_switches(count: usize, first_switch: f32, ratio: f32) -> Vec<LodSwitch> {
    let mut switches = Vec::with_capacity(count);
    let (mut far, mut near) = (first_switch, 0.0f32);

    for idx in 0..count {
        let is_last = idx + 1 == count;
        switches.push(LodSwitch {
            far: if is_last { None } else { Some(far) },
            near,
        });
        near = far;
        far *= ratio;
    }

    switches
}

/// One mesh of a LOD node together with its visibility range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodLevel {
    pub model: ModelRef,
    pub switch: LodSwitch,
}

/// Meshes of a single LOD node, most detailed first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LodGroup {
    pub levels: Vec<LodLevel>,
}

impl LodGroup {
    pub fn new(models: &[ModelRef], first_switch: f32, ratio: f32) -> Self {
        let levels = models
            .iter()
            .cloned()
            .zip(lod_switches(models.len(), first_switch, ratio))
            .map(|(model, switch)| LodLevel { model, switch })
            .collect();
        Self { levels }
    }

    /// Mesh visible at the given camera distance, if any.
    pub fn visible_at(&self, distance: f32) -> Option<&ModelRef> {
        self.levels
            .iter()
            .find(|level| level.switch.contains(distance))
            .map(|level| &level.model)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
