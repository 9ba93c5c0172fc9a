use clap::Parser;
use neural_topology::config::{load_config_over, VisualizationConfig};
use neural_topology::intensity::{apply_activations, apply_weights};
use neural_topology::model::{SequentialModel, SequentialModelDelegate};
use neural_topology::scene::{LightingPreset, SceneDescription};
use neural_topology::topology::SymmetricStratum;
use neural_topology::utils::logger;
use neural_topology::Result;
use std::path::PathBuf;

// Lays out a sequential model read from an architecture file, colouring
// edges by weight and, given an input sample, neurons by activation.
#[derive(Parser, Debug)]
#[command(name = "sequential_model", about = "Lay out a sequential model's topology in 3D")]
struct Args {
    /// Architecture file (JSON).
    architecture: PathBuf,

    /// Input sample, comma separated; colours neurons by activation.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    input: Option<Vec<f32>>,

    /// Seed for weights the architecture file does not provide.
    #[arg(long, default_value_t = 420)]
    seed: u64,

    /// Visualization config (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the scene here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

// meshes shipped for model scenes; camera pulled in to fit their scale
const ASSET_DIR: &str = "assets_tensorflow";
const CAMERA_OFFSET: f32 = 103.0;

fn base_config() -> VisualizationConfig {
    let mut config = VisualizationConfig::default();
    config.window.title = "3D TensorFlow Visualization".to_string();
    config.lighting.preset = LightingPreset::Warm;
    config.camera.distance_offset = CAMERA_OFFSET;
    config.assets.neuron_dir = Some(PathBuf::from(ASSET_DIR));
    config.assets.edge_dir = Some(PathBuf::from(ASSET_DIR));
    config
}

fn build_scene(args: &Args) -> Result<SceneDescription> {
    let base = base_config();
    let config = match args.config {
        Some(ref path) => load_config_over(path, &base)?,
        None => base,
    };

    let model = SequentialModel::load(&args.architecture, args.seed)?;
    let (neuron_models, edge_models) = config.assets.resolve()?;
    let delegate = SequentialModelDelegate::new(&model, config.layout.clone())
        .with_models(neuron_models, edge_models);

    let mut stratum = SymmetricStratum::build_with(&delegate, &config.lod)?;

    let map = config.intensity.color_map();
    if config.intensity.enabled {
        apply_weights(&mut stratum, &map);
    }
    if let Some(ref input) = args.input {
        let trace = model.forward_trace(input)?;
        apply_activations(&mut stratum, &trace, &map)?;
    }

    Ok(SceneDescription::assemble(stratum, &config))
}

fn run(args: &Args) -> Result<()> {
    let scene = build_scene(args)?;
    match args.output {
        Some(ref path) => scene.write_json(path),
        None => {
            println!("{}", scene.to_json()?);
            Ok(())
        }
    }
}

fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);
    tracing::debug!(?args, "Starting sequential_model");

    if let Err(e) = run(&args) {
        tracing::error!("Layout failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
