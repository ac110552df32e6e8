//! Trains XOR while an observer thread renders heat maps from snapshots.
//!
//!   cargo run --example heatmap --release
//! writes heatmap-<epoch>.png files into the working directory.

use std::sync::mpsc;
use std::thread;

use graphnet::data::xor_gate;
use graphnet::{render_heatmap, save_heatmap, HeatmapConfig, Network, NetworkConfig, TrainConfig};
use tracing::{info, warn};

fn main() -> graphnet::Result<()> {
    tracing_subscriber::fmt::init();

    let mut network = Network::from_config(&NetworkConfig::new(&[2, 4, 1]).learning_rate(0.5))?;
    let epochs = 50_000;
    let every = 10_000;

    let (tx, rx) = mpsc::channel::<Network>();

    // The observer owns each snapshot outright; the training network is
    // never shared.
    let observer = thread::spawn(move || {
        let config = HeatmapConfig::default();
        for (i, mut snapshot) in rx.into_iter().enumerate() {
            let path = format!("heatmap-{}.png", (i + 1) * every);
            match render_heatmap(&mut snapshot, &config).and_then(|img| save_heatmap(&img, &path)) {
                Ok(()) => info!(%path, "heat map written"),
                Err(e) => warn!("heat map failed: {e}"),
            }
        }
    });

    let config = TrainConfig::new(epochs).log_every(every).snapshots(every, tx);
    graphnet::train_loop(&mut network, &xor_gate(), &config)?;
    drop(config);

    if observer.join().is_err() {
        warn!("observer thread panicked");
    }
    Ok(())
}
