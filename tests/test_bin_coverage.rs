//! Tests for the command-line programs
//!
//! Both binaries are included as modules so their argument parsing and
//! scene building run without spawning a process.

use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp config");
    file
}

fn path_arg(file: &NamedTempFile) -> String {
    file.path().to_str().unwrap().to_string()
}

#[allow(dead_code)]
mod stratum_basic_bin {
    include!("../stratum_basic.rs");

    #[cfg(test)]
    mod coverage_tests {
        use super::*;
        use neural_topology::scene::{LightingPreset, LightingRig};
        use neural_topology::topology::NeuronId;

        #[test]
        fn test_default_layers() {
            let args = Args::parse_from(["stratum_basic"]);
            assert_eq!(args.layers, vec![8, 16, 4, 8, 4]);

            let scene = build_scene(&args).unwrap();
            assert_eq!(scene.stratum.neurons().len(), 40);
            assert_eq!(scene.stratum.edges().len(), 8 * 16 + 16 * 4 + 4 * 8 + 8 * 4);
            assert!(scene.animation.is_none());
            assert_eq!(scene.lighting, LightingRig::from_preset(LightingPreset::Cool));
        }

        #[test]
        fn test_compact_spacing_without_config() {
            let args = Args::parse_from(["stratum_basic", "--layers", "2,2"]);
            let scene = build_scene(&args).unwrap();

            let node = scene.stratum.find_neuron(NeuronId::new(1, 1)).unwrap();
            assert_eq!(node.position.x, 17.0);
            assert_eq!(node.position.z, 3.5);
        }

        #[test]
        fn test_animate_flag() {
            let args = Args::parse_from(["stratum_basic", "--layers", "3,2", "--animate"]);
            let scene = build_scene(&args).unwrap();

            let track = scene.animation.unwrap();
            assert_eq!(track.fps, 30);
            assert!(!track.keyframes.is_empty());
        }

        #[test]
        fn test_partial_layout_keeps_compact_spacing() {
            let config = crate::write_temp_config("[layout]\nalignment = \"justified\"\n");
            let path = crate::path_arg(&config);
            let args = Args::parse_from(["stratum_basic", "--layers", "3,2", "-c", path.as_str()]);
            let scene = build_scene(&args).unwrap();

            let node = scene.stratum.find_neuron(NeuronId::new(1, 1)).unwrap();
            assert_eq!(node.position.x, 17.0);
            // two neurons stretched across the three-neuron width
            assert_eq!(node.position.z, 7.0);
        }

        #[test]
        fn test_unbounded_animation_rejected() {
            let config = crate::write_temp_config("[animation]\nduration = inf\n");
            let path = crate::path_arg(&config);
            let args = Args::parse_from(["stratum_basic", "--animate", "-c", path.as_str()]);
            assert!(build_scene(&args).is_err());
        }

        #[test]
        fn test_missing_config_file() {
            let args = Args::parse_from(["stratum_basic", "-c", "does/not/exist.toml"]);
            assert!(build_scene(&args).is_err());
        }
    }
}

#[allow(dead_code)]
mod sequential_model_bin {
    include!("../sequential_model.rs");

    #[cfg(test)]
    mod coverage_tests {
        use super::*;
        use approx::assert_relative_eq;
        use neural_topology::scene::LightingRig;
        use neural_topology::topology::NeuronId;

        fn xor_path() -> String {
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("config/architectures/xor_biased.json")
                .to_str()
                .unwrap()
                .to_string()
        }

        fn intensity(scene: &SceneDescription, layer: usize, neuron: usize) -> f32 {
            scene
                .stratum
                .find_neuron(NeuronId::new(layer, neuron))
                .unwrap()
                .intensity
                .unwrap()
        }

        #[test]
        fn test_defaults_without_config() {
            let xor = xor_path();
            let args = Args::parse_from(["sequential_model", xor.as_str()]);
            assert_eq!(args.seed, 420);

            let scene = build_scene(&args).unwrap();
            assert_eq!(scene.window.title, "3D TensorFlow Visualization");
            assert_eq!(scene.lighting, Some(LightingRig::warm()));
            assert_eq!(scene.stratum.neurons().len(), 3 + 3 + 1);
            // weights coloured, neurons untouched without an input sample
            assert!(scene.stratum.edges().iter().all(|edge| edge.color.is_some()));
            assert!(scene.stratum.neurons().iter().all(|node| node.color.is_none()));
        }

        #[test]
        fn test_negative_input_values() {
            let xor = xor_path();
            for args in [
                Args::parse_from(["sequential_model", xor.as_str(), "--input=-1,0.5"]),
                Args::parse_from(["sequential_model", xor.as_str(), "--input", "-1,0.5"]),
            ] {
                assert_eq!(args.input, Some(vec![-1.0, 0.5]));

                let scene = build_scene(&args).unwrap();
                assert!(scene.stratum.neurons().iter().all(|node| node.color.is_some()));
                assert_relative_eq!(intensity(&scene, 0, 0), 1.0);
                assert_relative_eq!(intensity(&scene, 0, 1), 0.5);
            }
        }

        #[test]
        fn test_input_width_mismatch() {
            let xor = xor_path();
            let args = Args::parse_from(["sequential_model", xor.as_str(), "--input", "1,0,1"]);
            assert!(build_scene(&args).is_err());
        }

        #[test]
        fn test_config_file_layers_over_model_defaults() {
            let xor = xor_path();
            let config = crate::write_temp_config("[window]\nwidth = 640\n");
            let path = crate::path_arg(&config);
            let args = Args::parse_from(["sequential_model", xor.as_str(), "-c", path.as_str()]);

            let scene = build_scene(&args).unwrap();
            assert_eq!(scene.window.width, 640);
            assert_eq!(scene.window.title, "3D TensorFlow Visualization");
            assert_eq!(scene.lighting, Some(LightingRig::warm()));
        }

        #[test]
        fn test_camera_offset_default() {
            let xor = xor_path();
            let pulled_in = build_scene(&Args::parse_from(["sequential_model", xor.as_str()])).unwrap();

            let config = crate::write_temp_config("[camera]\ndistance_offset = 0.0\n");
            let path = crate::path_arg(&config);
            let framed = build_scene(&Args::parse_from([
                "sequential_model",
                xor.as_str(),
                "-c",
                path.as_str(),
            ]))
            .unwrap();

            let near = pulled_in.camera.unwrap().position.y;
            let far = framed.camera.unwrap().position.y;
            assert_relative_eq!(near - far, CAMERA_OFFSET, epsilon = 1e-3);
        }

        #[test]
        fn test_temp_architecture() {
            let architecture = crate::write_temp_config(
                r#"{ "layers": [
                    { "layer_type": "dense", "input_size": 3, "output_size": 2, "use_bias": false },
                    { "layer_type": "dropout", "size": 2, "drop_rate": 0.5 }
                ] }"#,
            );
            let path = crate::path_arg(&architecture);
            let args = Args::parse_from(["sequential_model", path.as_str(), "--seed", "7"]);

            let scene = build_scene(&args).unwrap();
            assert_eq!(scene.stratum.neurons().len(), 5);
            assert_eq!(scene.stratum.edges().len(), 6);
        }
    }
}
