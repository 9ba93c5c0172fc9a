use clap::Parser;
use neural_topology::config::{load_config_over, VisualizationConfig};
use neural_topology::scene::SceneDescription;
use neural_topology::topology::{FullyConnectedDelegate, LayoutSettings, SymmetricStratum};
use neural_topology::utils::logger;
use neural_topology::Result;
use std::path::PathBuf;

// Lays out a hand-written layered network and prints the scene as JSON.
#[derive(Parser, Debug)]
#[command(name = "stratum_basic", about = "Lay out a fully connected layered network in 3D")]
struct Args {
    /// Neurons per layer, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "8,16,4,8,4")]
    layers: Vec<usize>,

    /// Visualization config (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Spin the network about its centre and emit animation keyframes.
    #[arg(long)]
    animate: bool,

    /// Write the scene here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn base_config() -> VisualizationConfig {
    VisualizationConfig {
        layout: LayoutSettings::compact(),
        ..VisualizationConfig::default()
    }
}

fn build_scene(args: &Args) -> Result<SceneDescription> {
    let base = base_config();
    let mut config = match args.config {
        Some(ref path) => load_config_over(path, &base)?,
        None => base,
    };
    if args.animate {
        config.animation.enabled = true;
    }

    let (neuron_models, edge_models) = config.assets.resolve()?;
    let delegate = FullyConnectedDelegate::new(args.layers.clone(), config.layout.clone())
        .with_models(neuron_models, edge_models);

    let stratum = SymmetricStratum::build_with(&delegate, &config.lod)?;
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
    tracing::debug!(?args, "Starting stratum_basic");

    if let Err(e) = run(&args) {
        tracing::error!("Layout failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
