use std::sync::mpsc;

use crate::network::Network;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        : total number of full passes over the dataset
/// - `shuffle`       : permute sample order every epoch; insertion order otherwise
/// - `seed`          : seed for the shuffle, so shuffled runs stay reproducible
/// - `log_every`     : emit an `info!` line every this many epochs (0 disables)
/// - `progress_tx`   : optional sender receiving one `EpochStats` per epoch
/// - `snapshot_tx`   : optional sender receiving a detached copy of the
///                      network every `snapshot_every` epochs, for observers
///                      on other threads
///
/// A dropped receiver does not stop training; the run always completes.
pub struct TrainConfig {
    pub epochs: usize,
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub log_every: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub snapshot_tx: Option<mpsc::Sender<Network>>,
    pub snapshot_every: usize,
}

impl TrainConfig {
    /// Ordered, unlogged training with no channels attached.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            shuffle: false,
            seed: None,
            log_every: 0,
            progress_tx: None,
            snapshot_tx: None,
            snapshot_every: 0,
        }
    }

    pub fn shuffled(mut self, seed: u64) -> Self {
        self.shuffle = true;
        self.seed = Some(seed);
        self
    }

    pub fn log_every(mut self, epochs: usize) -> Self {
        self.log_every = epochs;
        self
    }

    pub fn progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn snapshots(mut self, every: usize, tx: mpsc::Sender<Network>) -> Self {
        self.snapshot_every = every;
        self.snapshot_tx = Some(tx);
        self
    }
}
