use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::data::Dataset;
use crate::error::{NetworkError, Result};
use crate::loss::MseLoss;
use crate::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_sample;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs and returns the outputs of the
/// last sample processed, computed just before its weight update.
///
/// Every sample is checked against the network's widths before the first
/// update, so a rejected call leaves the network unchanged.
///
/// # Errors
/// - `InvalidConfiguration` if `config.epochs == 0` or `dataset` is empty
/// - `DimensionMismatch` if any sample's input or target width is wrong
pub fn train_loop(network: &mut Network, dataset: &Dataset, config: &TrainConfig) -> Result<Vec<f64>> {
    if config.epochs == 0 {
        return Err(NetworkError::invalid("epochs must be at least 1"));
    }
    if dataset.is_empty() {
        return Err(NetworkError::invalid("dataset is empty"));
    }
    dataset.validate(network.graph.input_width(), network.graph.output_width())?;

    let mut order: Vec<usize> = (0..dataset.len()).collect();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut last_output = Vec::new();

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        if config.shuffle {
            order.shuffle(&mut rng);
        }

        // ── One full pass over the dataset ─────────────────────────────────
        let mut total_loss = 0.0;
        for &idx in &order {
            let sample = &dataset.samples()[idx];
            last_output = train_sample(network, &sample.input, &sample.target)?;
            total_loss += MseLoss::loss(&last_output, &sample.target);
        }
        let train_loss = total_loss / dataset.len() as f64;

        if config.log_every > 0 && (epoch % config.log_every == 0 || epoch == config.epochs) {
            info!("Epoch {}/{}: loss={:.6}", epoch, config.epochs, train_loss);
        }

        // ── Emit progress ─────────────────────────────────────────────────
        if let Some(ref tx) = config.progress_tx {
            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                train_loss,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };
            // A vanished receiver only means nobody is listening any more.
            let _ = tx.send(stats);
        }

        if let Some(ref tx) = config.snapshot_tx {
            if config.snapshot_every > 0 && epoch % config.snapshot_every == 0 {
                let _ = tx.send(network.snapshot());
            }
        }
    }

    Ok(last_output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{and_gate, xor_gate};
    use crate::network::NetworkConfig;
    use std::sync::mpsc;

    fn network(widths: &[usize], seed: u64) -> Network {
        Network::from_config(&NetworkConfig::new(widths).seed(seed).learning_rate(0.5)).unwrap()
    }

    #[test]
    fn returns_last_sample_output() {
        let mut net = network(&[2, 2, 1], 1);
        let mut twin = net.clone();
        let data = and_gate();

        let out = train_loop(&mut net, &data, &TrainConfig::new(3)).unwrap();

        for _ in 0..2 {
            for s in &data {
                train_sample(&mut twin, &s.input, &s.target).unwrap();
            }
        }
        let samples = data.samples();
        for s in &samples[..3] {
            train_sample(&mut twin, &s.input, &s.target).unwrap();
        }
        let expected = twin.predict(&samples[3].input).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn progress_reports_every_epoch() {
        let mut net = network(&[2, 3, 1], 2);
        let (tx, rx) = mpsc::channel();
        train_loop(&mut net, &and_gate(), &TrainConfig::new(200).progress(tx)).unwrap();

        let stats: Vec<EpochStats> = rx.try_iter().collect();
        assert_eq!(stats.len(), 200);
        assert_eq!(stats[0].epoch, 1);
        assert!(stats.iter().all(|s| s.total_epochs == 200));
        assert!(stats[199].train_loss < stats[0].train_loss);
    }

    #[test]
    fn dropped_receiver_does_not_stop_training() {
        let mut net = network(&[2, 1], 3);
        let mut twin = net.clone();
        let (tx, rx) = mpsc::channel();
        drop(rx);
        train_loop(&mut net, &and_gate(), &TrainConfig::new(50).progress(tx)).unwrap();
        train_loop(&mut twin, &and_gate(), &TrainConfig::new(50)).unwrap();
        assert_eq!(net.graph().edges(), twin.graph().edges());
    }

    #[test]
    fn snapshots_arrive_at_interval() {
        let mut net = network(&[2, 2, 1], 4);
        let (tx, rx) = mpsc::channel();
        train_loop(&mut net, &and_gate(), &TrainConfig::new(30).snapshots(10, tx)).unwrap();
        let snapshots: Vec<Network> = rx.try_iter().collect();
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[2].graph().edges(), net.graph().edges());
        assert_ne!(snapshots[0].graph().edges(), net.graph().edges());
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut a = network(&[2, 2, 1], 5);
        let mut b = a.clone();
        let mut ordered = a.clone();
        train_loop(&mut a, &xor_gate(), &TrainConfig::new(20).shuffled(99)).unwrap();
        train_loop(&mut b, &xor_gate(), &TrainConfig::new(20).shuffled(99)).unwrap();
        train_loop(&mut ordered, &xor_gate(), &TrainConfig::new(20)).unwrap();
        assert_eq!(a.graph().edges(), b.graph().edges());
        assert_ne!(a.graph().edges(), ordered.graph().edges());
    }

    #[test]
    fn invalid_runs_change_nothing() {
        let mut net = network(&[2, 2, 1], 6);
        let before = net.graph().edges().to_vec();

        assert!(matches!(
            train_loop(&mut net, &and_gate(), &TrainConfig::new(0)),
            Err(NetworkError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            train_loop(&mut net, &Dataset::new(), &TrainConfig::new(5)),
            Err(NetworkError::InvalidConfiguration(_))
        ));

        // last sample is malformed: nothing may be applied, not even the
        // valid samples before it
        let mut data = and_gate();
        data.push(vec![1.0, 1.0, 1.0], vec![1.0]);
        assert!(matches!(
            net.train(&data, 10),
            Err(NetworkError::DimensionMismatch { what: "input", expected: 2, actual: 3 })
        ));
        assert_eq!(net.graph().edges(), &before[..]);
    }
}
