//! Tests for visualization configuration and asset discovery
//!
//! This file tests:
//! - Loading the shipped configuration file
//! - Partial tables falling back to defaults
//! - Layering a file over an executable's base configuration
//! - Rejection of invalid and non-finite values
//! - LOD mesh discovery and the explicit model fallback

use neural_topology::assets::lod_mesh_filenames;
use neural_topology::config::{
    load_config, load_config_over, parse_config, parse_config_over, AssetConfig,
    VisualizationConfig,
};
use neural_topology::intensity::Rgba;
use neural_topology::scene::LightingPreset;
use neural_topology::topology::{LayoutSettings, ModelRef, TopologyAlignment, TopologyObject};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn touch(dir: &std::path::Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), "").unwrap();
    }
}

// ============================================================================
// Valid Config Tests
// ============================================================================

mod valid_config_tests {
    use super::*;

    #[test]
    fn test_load_shipped_config() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/visualization.toml");
        let config = load_config(path).unwrap();

        assert_eq!(config.window.title, "3D TensorFlow Visualization");
        assert_eq!(config.lighting.preset, LightingPreset::Warm);
        assert_eq!(config.camera.distance_offset, 103.0);
        let layout = config.layout;
        assert_eq!(layout.neuron_spacing, 6.0);
        assert_eq!(layout.alignment, TopologyAlignment::Center);
    }

    #[test]
    fn test_partial_tables() {
        let config = parse_config(
            r#"
[layout]
alignment = "justified"

[layout.neuron_dimensions]
height = 2.0

[animation]
enabled = true
"#,
        )
        .unwrap();

        let layout = config.layout;
        assert_eq!(layout.alignment, TopologyAlignment::Justified);
        assert_eq!(layout.layer_spacing, 45.0);
        assert_eq!(layout.neuron_dimensions.height, 2.0);
        assert_eq!(layout.neuron_dimensions.width, 1.0);
        assert!(config.animation.enabled);
        assert_eq!(config.animation.fps, 30);
    }

    #[test]
    fn test_intensity_colors() {
        let config = parse_config(
            r#"
[intensity]
enabled = false
low = [0.0, 0.0, 0.0, 1.0]
high = [1.0, 1.0, 1.0, 1.0]
"#,
        )
        .unwrap();

        assert!(!config.intensity.enabled);
        let map = config.intensity.color_map();
        assert_eq!(map.color(0.5), Rgba(0.5, 0.5, 0.5, 1.0));
    }
}

// ============================================================================
// Layered Config Tests
// ============================================================================

mod layered_config_tests {
    use super::*;

    fn compact_base() -> VisualizationConfig {
        VisualizationConfig {
            layout: LayoutSettings::compact(),
            ..VisualizationConfig::default()
        }
    }

    #[test]
    fn test_partial_layout_keeps_base_spacing() {
        let config = parse_config_over("[layout]\nalignment = \"justified\"\n", &compact_base()).unwrap();

        assert_eq!(config.layout.alignment, TopologyAlignment::Justified);
        assert_eq!(config.layout.neuron_spacing, 2.5);
        assert_eq!(config.layout.layer_spacing, 16.0);
    }

    #[test]
    fn test_sections_missing_from_file_keep_base() {
        let mut base = VisualizationConfig::default();
        base.lighting.preset = LightingPreset::Warm;
        base.camera.distance_offset = 103.0;
        base.window.title = "Base".to_string();

        let config = parse_config_over("[window]\nwidth = 640\n", &base).unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 550);
        assert_eq!(config.window.title, "Base");
        assert_eq!(config.lighting.preset, LightingPreset::Warm);
        assert_eq!(config.camera.distance_offset, 103.0);
    }

    #[test]
    fn test_file_overrides_base() {
        let mut base = VisualizationConfig::default();
        base.lighting.preset = LightingPreset::Warm;
        base.assets.neuron_dir = Some(PathBuf::from("assets_tensorflow"));

        let config = parse_config_over(
            "[lighting]\npreset = \"none\"\n[assets]\nneuron_dir = \"meshes\"\n",
            &base,
        )
        .unwrap();
        assert_eq!(config.lighting.preset, LightingPreset::None);
        assert_eq!(config.assets.neuron_dir, Some(PathBuf::from("meshes")));
    }

    #[test]
    fn test_load_shipped_config_over_base() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/visualization.toml");
        let config = load_config_over(path, &compact_base()).unwrap();
        // the shipped file sets its own layout
        assert_eq!(config.layout.neuron_spacing, 6.0);
    }

    #[test]
    fn test_empty_file_is_base() {
        let config = parse_config_over("", &compact_base()).unwrap();
        assert_eq!(config.layout, LayoutSettings::compact());
    }
}

// ============================================================================
// Invalid Config Tests
// ============================================================================

mod invalid_config_tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        assert!(load_config("does/not/exist.toml").is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(parse_config("[window\nwidth = 3").is_err());
    }

    #[test]
    fn test_unknown_alignment() {
        assert!(parse_config("[layout]\nalignment = \"diagonal\"\n").is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        for contents in [
            "[animation]\nenabled = true\nduration = inf\n",
            "[animation]\nduration = nan\n",
            "[animation]\ndegrees_per_second = inf\n",
            "[animation]\nsway_amplitude = nan\n",
            "[animation]\nsway_frequency = -inf\n",
            "[animation]\nsway_offset = nan\n",
            "[animation]\npropagation_interval = inf\n",
            "[lod]\nfirst_switch = nan\n",
            "[lod]\nswitch_ratio = nan\n",
            "[lod]\nfirst_switch = inf\n",
        ] {
            assert!(parse_config(contents).is_err(), "{:?} was accepted", contents);
        }
    }

    #[test]
    fn test_oversized_animation_rejected() {
        assert!(parse_config("[animation]\nduration = 1.0e30\n").is_err());
        assert!(parse_config("[animation]\nduration = 10000.0\nfps = 60\n").is_err());
        assert!(parse_config("[animation]\nduration = 60.0\nfps = 60\n").is_ok());
    }

    #[test]
    fn test_invalid_values() {
        for contents in [
            "[window]\nwidth = 0\n",
            "[layout]\nlayer_spacing = -3.0\n",
            "[lod]\nfirst_switch = 0.0\n",
            "[camera]\nfov_vertical = 180.0\n",
            "[animation]\npropagation_interval = 0.0\n",
            "[intensity]\nhigh = [2.0, 0.0, 0.0, 1.0]\n",
            "[camera]\ndistance_offset = inf\n",
        ] {
            let err = parse_config(contents).unwrap_err();
            assert!(
                err.to_string().to_lowercase().contains("config"),
                "{:?} gave {}",
                contents,
                err
            );
        }
    }
}

// ============================================================================
// Asset Discovery Tests
// ============================================================================

mod asset_discovery_tests {
    use super::*;

    #[test]
    fn test_discovers_both_prefixes() {
        let dir = tempdir().unwrap();
        touch(
            dir.path(),
            &[
                "neuron_80T.obj",
                "neuron_1280T.obj",
                "cylinder_24T.obj",
                "cylinder_172T.obj",
                "neuron_1280T.obj.bak",
                "Neuron_500T.obj",
            ],
        );

        let neurons = lod_mesh_filenames(dir.path(), TopologyObject::Neuron).unwrap();
        assert_eq!(
            neurons,
            vec![
                ModelRef::new(dir.path().join("neuron_1280T.obj")),
                ModelRef::new(dir.path().join("neuron_80T.obj")),
            ]
        );

        let edges = lod_mesh_filenames(dir.path(), TopologyObject::Edge).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], ModelRef::new(dir.path().join("cylinder_172T.obj")));
    }

    #[test]
    fn test_asset_dir_overrides_models() {
        let dir = tempdir().unwrap();
        touch(dir.path(), &["neuron_320T.obj", "cylinder_172T.obj"]);

        let assets = AssetConfig {
            neuron_dir: Some(dir.path().to_path_buf()),
            edge_dir: Some(dir.path().to_path_buf()),
            ..AssetConfig::default()
        };
        let (neurons, edges) = assets.resolve().unwrap();
        assert_eq!(neurons, vec![ModelRef::new(dir.path().join("neuron_320T.obj"))]);
        assert_eq!(edges, vec![ModelRef::new(dir.path().join("cylinder_172T.obj"))]);
    }

    #[test]
    fn test_empty_dir_falls_back_to_models() {
        let dir = tempdir().unwrap();
        let assets = AssetConfig {
            neuron_dir: Some(dir.path().to_path_buf()),
            neuron_models: vec![PathBuf::from("meshes/ball.obj")],
            ..AssetConfig::default()
        };
        let (neurons, _) = assets.resolve().unwrap();
        assert_eq!(neurons, vec![ModelRef::new("meshes/ball.obj")]);
    }

    #[test]
    fn test_missing_asset_dir_falls_back_to_models() {
        let dir = tempdir().unwrap();
        let assets = AssetConfig {
            edge_dir: Some(dir.path().join("absent")),
            ..AssetConfig::default()
        };
        let (_, edges) = assets.resolve().unwrap();
        assert_eq!(edges, vec![ModelRef::new("assets/cylinder_172T.obj")]);
    }

    #[test]
    fn test_asset_path_that_is_a_file_falls_back() {
        let dir = tempdir().unwrap();
        touch(dir.path(), &["not_a_dir"]);
        let assets = AssetConfig {
            neuron_dir: Some(dir.path().join("not_a_dir")),
            ..AssetConfig::default()
        };
        let (neurons, _) = assets.resolve().unwrap();
        assert_eq!(neurons, vec![ModelRef::new("assets/neuron_1280T.obj")]);
    }
}
