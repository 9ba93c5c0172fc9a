//! Visualization configuration
//!
//! Settings are read from a TOML file and layered over a base
//! configuration. Every section and field is optional: whatever the file
//! leaves out keeps the base value, so an empty file is a valid
//! configuration and each executable can supply its own base.
//!
//! # Example
//!
//! ```toml
//! [window]
//! title = "3D TensorFlow Visualization"
//!
//! [layout]
//! neuron_spacing = 6.0
//! layer_spacing = 45.0
//! alignment = "justified"
//!
//! [assets]
//! neuron_dir = "assets_tensorflow"
//! edge_dir = "assets_tensorflow"
//!
//! [lighting]
//! preset = "warm"
//!
//! [camera]
//! distance_offset = 103.0
//! ```

use crate::assets::lod_mesh_filenames;
use crate::error::{Result, TopologyError};
use crate::intensity::{ColorMap, Rgba};
use crate::scene::{AnimationSettings, Lens, LightingPreset};
use crate::topology::{LayoutSettings, LodSettings, ModelRef, TopologyObject};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Upper bound on the keyframes an animated scene may sample.
pub const MAX_KEYFRAMES: usize = 100_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    pub window: WindowConfig,
    pub layout: LayoutSettings,
    pub lod: LodSettings,
    pub assets: AssetConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub animation: AnimationSettings,
    pub intensity: IntensityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 550,
            title: "3D Neural Network Visualization".to_string(),
        }
    }
}

/// Where LOD meshes come from.
///
/// A directory is scanned for `<prefix>_<triangles>T.obj` files; without a
/// directory, when the directory does not exist, or when the scan finds
/// nothing, the explicit model lists are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neuron_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_dir: Option<PathBuf>,
    pub neuron_models: Vec<PathBuf>,
    pub edge_models: Vec<PathBuf>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            neuron_dir: None,
            edge_dir: None,
            neuron_models: vec![PathBuf::from("assets/neuron_1280T.obj")],
            edge_models: vec![PathBuf::from("assets/cylinder_172T.obj")],
        }
    }
}

impl AssetConfig {
    /// Neuron and edge meshes, most detailed first.
    pub fn resolve(&self) -> Result<(Vec<ModelRef>, Vec<ModelRef>)> {
        let neurons = resolve_models(
            self.neuron_dir.as_deref(),
            &self.neuron_models,
            TopologyObject::Neuron,
        )?;
        let edges = resolve_models(
            self.edge_dir.as_deref(),
            &self.edge_models,
            TopologyObject::Edge,
        )?;
        Ok((neurons, edges))
    }
}

fn resolve_models(
    dir: Option<&Path>,
    fallback: &[PathBuf],
    object: TopologyObject,
) -> Result<Vec<ModelRef>> {
    if let Some(dir) = dir {
        if !dir.is_dir() {
            warn!(
                dir = %dir.display(),
                "Asset directory does not exist; falling back to configured models"
            );
            return Ok(fallback.iter().cloned().map(ModelRef).collect());
        }
        let found = lod_mesh_filenames(dir, object)?;
        if !found.is_empty() {
            debug!(dir = %dir.display(), meshes = found.len(), "Using LOD meshes from directory");
            return Ok(found);
        }
        warn!(
            dir = %dir.display(),
            prefix = object.mesh_prefix(),
            "No LOD meshes found; falling back to configured models"
        );
    }
    Ok(fallback.iter().cloned().map(ModelRef).collect())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_horizontal: f32,
    pub fov_vertical: f32,
    pub distance_offset: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let lens = Lens::default();
        Self {
            fov_horizontal: lens.fov_horizontal,
            fov_vertical: lens.fov_vertical,
            distance_offset: 0.0,
        }
    }
}

impl CameraConfig {
    pub fn lens(&self) -> Lens {
        Lens {
            fov_horizontal: self.fov_horizontal,
            fov_vertical: self.fov_vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub preset: LightingPreset,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct IntensityConfig {
    pub enabled: bool,
    pub low: Rgba,
    pub high: Rgba,
}

impl Default for IntensityConfig {
    fn default() -> Self {
        let map = ColorMap::default();
        Self {
            enabled: true,
            low: map.low,
            high: map.high,
        }
    }
}

impl IntensityConfig {
    pub fn color_map(&self) -> ColorMap {
        ColorMap {
            low: self.low,
            high: self.high,
        }
    }
}

/// Loads a visualization configuration from a TOML file over the defaults.
///
/// # Examples
///
/// ```no_run
/// use neural_topology::config::load_config;
///
/// let cfg = load_config("config/visualization.toml").unwrap();
/// assert!(cfg.window.width > 0);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VisualizationConfig> {
    load_config_over(path, &VisualizationConfig::default())
}

/// Loads a TOML file and layers it over `base`.
pub fn load_config_over(
    path: impl AsRef<Path>,
    base: &VisualizationConfig,
) -> Result<VisualizationConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_config_over(&contents, base)
}

/// Parses and validates a configuration from a TOML string over the defaults.
pub fn parse_config(contents: &str) -> Result<VisualizationConfig> {
    parse_config_over(contents, &VisualizationConfig::default())
}

/// Parses a TOML string, layers it over `base` and validates the result.
///
/// Tables merge key by key; any other value in the file replaces the base
/// value.
pub fn parse_config_over(contents: &str, base: &VisualizationConfig) -> Result<VisualizationConfig> {
    let overlay: toml::Table = toml::from_str(contents)?;
    let mut merged = match toml::Value::try_from(base)? {
        toml::Value::Table(table) => table,
        _ => return Err(TopologyError::config("base configuration is not a table")),
    };
    merge_tables(&mut merged, overlay);

    let config: VisualizationConfig = toml::Value::Table(merged).try_into()?;
    validate_config(&config)?;
    Ok(config)
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(nested)) => {
                merge_tables(existing, nested);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TopologyError::config(format!("{} must be a finite number", name)))
    }
}

fn validate_config(config: &VisualizationConfig) -> Result<()> {
    if config.window.width == 0 || config.window.height == 0 {
        return Err(TopologyError::config("window width and height must be positive"));
    }

    let layout = &config.layout;
    let values = [
        ("neuron_spacing", layout.neuron_spacing),
        ("layer_spacing", layout.layer_spacing),
        ("edge_diameter", layout.edge_diameter),
        ("neuron_dimensions.width", layout.neuron_dimensions.width),
        ("neuron_dimensions.height", layout.neuron_dimensions.height),
        ("neuron_dimensions.depth", layout.neuron_dimensions.depth),
    ];
    for (name, value) in values {
        if !value.is_finite() || value < 0.0 {
            return Err(TopologyError::config(format!(
                "layout.{} must be non-negative",
                name
            )));
        }
    }

    finite("lod.first_switch", config.lod.first_switch)?;
    finite("lod.switch_ratio", config.lod.switch_ratio)?;
    if config.lod.first_switch <= 0.0 {
        return Err(TopologyError::config("lod.first_switch must be positive"));
    }
    if config.lod.switch_ratio <= 1.0 {
        return Err(TopologyError::config("lod.switch_ratio must be greater than 1"));
    }

    for (name, fov) in [
        ("fov_horizontal", config.camera.fov_horizontal),
        ("fov_vertical", config.camera.fov_vertical),
    ] {
        if !(fov > 0.0 && fov < 180.0) {
            return Err(TopologyError::config(format!(
                "camera.{} must be in range (0, 180)",
                name
            )));
        }
    }
    finite("camera.distance_offset", config.camera.distance_offset)?;

    let animation = &config.animation;
    for (name, value) in [
        ("animation.degrees_per_second", animation.degrees_per_second),
        ("animation.sway_amplitude", animation.sway_amplitude),
        ("animation.sway_frequency", animation.sway_frequency),
        ("animation.sway_offset", animation.sway_offset),
        ("animation.propagation_interval", animation.propagation_interval),
        ("animation.duration", animation.duration),
    ] {
        finite(name, value)?;
    }
    if animation.fps == 0 {
        return Err(TopologyError::config("animation.fps must be positive"));
    }
    if animation.duration < 0.0 {
        return Err(TopologyError::config("animation.duration must be non-negative"));
    }
    if animation.propagation_interval <= 0.0 {
        return Err(TopologyError::config(
            "animation.propagation_interval must be positive",
        ));
    }
    let frames = f64::from(animation.duration) * f64::from(animation.fps);
    if frames > MAX_KEYFRAMES as f64 {
        return Err(TopologyError::config(format!(
            "animation.duration * animation.fps must not exceed {} frames",
            MAX_KEYFRAMES
        )));
    }

    let intensity = &config.intensity;
    for color in [intensity.low, intensity.high] {
        let Rgba(r, g, b, a) = color;
        if [r, g, b, a].iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(TopologyError::config(
                "intensity colors must have components in range [0, 1]",
            ));
        }
    }

    Ok(())
}
