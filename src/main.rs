//! graphnet command-line trainer.
//!
//! Trains a network on a two-input truth table and prints its predictions:
//!
//!   cargo run --release -- --gate xor --layers 2,4,1 --epochs 50000 --learning-rate 0.5
//!   cargo run --release -- --config net.json --heatmap xor.png

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use graphnet::{
    render_heatmap, save_heatmap, train_loop, Gate, HeatmapConfig, Network, NetworkConfig, Result,
    TrainConfig,
};

#[derive(Parser, Debug)]
#[command(name = "graphnet", about = "Train a graph-based feedforward network on a truth table")]
struct Cli {
    /// Truth table to learn
    #[arg(long, value_enum, default_value = "xor")]
    gate: Gate,

    /// Layer widths, input first (ignored with --config)
    #[arg(long, value_delimiter = ',', default_values_t = vec![2usize, 4, 1])]
    layers: Vec<usize>,

    /// Network configuration file (JSON)
    #[arg(long)]
    config: Option<String>,

    #[arg(long, default_value_t = 50_000)]
    epochs: usize,

    /// Overrides the configured learning rate
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Seed for the initial weights
    #[arg(long)]
    seed: Option<u64>,

    /// Log the mean loss every N epochs
    #[arg(long, default_value_t = 5_000)]
    log_every: usize,

    /// Write a gray-scale PNG of the learned decision surface
    #[arg(long)]
    heatmap: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to install log subscriber");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => NetworkConfig::load_json(path)?,
        None => NetworkConfig::new(&cli.layers).learning_rate(0.5),
    };
    if let Some(rate) = cli.learning_rate {
        config.learning_rate = rate;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let mut network = Network::from_config(&config)?;
    let dataset = cli.gate.dataset();
    info!(
        gate = ?cli.gate,
        widths = ?config.layer_widths,
        learning_rate = config.learning_rate,
        epochs = cli.epochs,
        "training"
    );

    let train_config = TrainConfig::new(cli.epochs).log_every(cli.log_every);
    train_loop(&mut network, &dataset, &train_config)?;

    for sample in &dataset {
        let output = network.predict(&sample.input)?;
        println!("Input: {:?} -> Output: {:.4} (target {})", sample.input, output[0], sample.target[0]);
    }

    if let Some(path) = &cli.heatmap {
        let image = render_heatmap(&mut network, &HeatmapConfig::default())?;
        save_heatmap(&image, path)?;
        info!(path = %path, "heat map written");
    }

    Ok(())
}
