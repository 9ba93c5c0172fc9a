//! Renderer-independent scene description
//!
//! A scene bundles a laid-out stratum with everything a renderer needs to
//! show it: window, camera, lights and, for animated scenes, pivot keyframes
//! with per-layer signal brightness. It serialises to JSON.

pub mod animation;
pub mod camera;
pub mod lighting;

pub use animation::{AnimationSettings, PivotAnimation, PivotPose, SignalPropagation};
pub use camera::{frame_camera, CameraPlacement, Lens};
pub use lighting::{LightingPreset, LightingRig, PointLight};

use crate::config::{VisualizationConfig, WindowConfig, MAX_KEYFRAMES};
use crate::error::Result;
use crate::geometry::{BoundingBox, Vec3};
use crate::topology::SymmetricStratum;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct Keyframe {
    pub time: f32,
    pub pivot: PivotPose,
    pub layer_brightness: Vec<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnimationTrack {
    pub fps: u32,
    pub duration: f32,
    pub keyframes: Vec<Keyframe>,
}

impl AnimationTrack {
    /// Samples `duration * fps` frames starting at `t = 0`, at most
    /// [`MAX_KEYFRAMES`].
    pub fn sample(settings: &AnimationSettings, layers: usize) -> Self {
        let pivot = PivotAnimation::new(settings);
        let wave = SignalPropagation::new(layers, settings.propagation_interval);
        let frames = f64::from(settings.duration) * f64::from(settings.fps);
        let frames = if frames.is_finite() && frames > 0.0 {
            frames.round().min(MAX_KEYFRAMES as f64) as usize
        } else {
            0
        };

        let keyframes = (0..frames)
            .map(|frame| {
                let time = frame as f32 / settings.fps as f32;
                Keyframe {
                    time,
                    pivot: pivot.pose(time),
                    layer_brightness: wave.brightness(time),
                }
            })
            .collect();

        Self {
            fps: settings.fps,
            duration: settings.duration,
            keyframes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneDescription {
    pub window: WindowConfig,
    pub stratum: SymmetricStratum,
    /// Translation of the stratum relative to its parent (the pivot when animated).
    pub stratum_offset: Vec3,
    /// Bounds of the stratum after `stratum_offset` is applied.
    pub bounds: Option<BoundingBox>,
    pub camera: Option<CameraPlacement>,
    pub lighting: Option<LightingRig>,
    pub animation: Option<AnimationTrack>,
}

impl SceneDescription {
    pub fn assemble(stratum: SymmetricStratum, config: &VisualizationConfig) -> Self {
        let animated = config.animation.enabled;
        let raw_bounds = stratum.tight_bounds();

        // animated scenes rotate about the stratum centre
        let stratum_offset = match raw_bounds {
            Some(bounds) if animated => -bounds.center(),
            _ => Vec3::ZERO,
        };
        let bounds = raw_bounds.map(|b| b.translated(stratum_offset));

        let camera = bounds.map(|b| {
            frame_camera(&b, config.camera.lens(), config.camera.distance_offset)
        });
        let animation = animated
            .then(|| AnimationTrack::sample(&config.animation, stratum.layer_sizes().len()));

        info!(
            neurons = stratum.neurons().len(),
            edges = stratum.edges().len(),
            animated,
            "Assembled scene"
        );

        Self {
            window: config.window.clone(),
            stratum,
            stratum_offset,
            bounds,
            camera,
            lighting: LightingRig::from_preset(config.lighting.preset),
            animation,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        info!(path = %path.as_ref().display(), "Wrote scene description");
        Ok(())
    }
}
