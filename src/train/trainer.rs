use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::NnError;
use crate::network::annotation::Annotation;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Trains `network` with mini-batch gradient descent and returns the
/// per-epoch cost/accuracy history.
///
/// Each epoch: fully reshuffle the training order, partition it into
/// `floor(N / batch_size)` contiguous batches (the remainder is
/// skipped for that epoch), apply one batch update per batch in
/// sequence, then evaluate cost and accuracy on both sets.
///
/// The datasets themselves are never reordered; shuffling happens on an
/// index vector. `rng` drives the shuffle, so a seeded generator makes
/// the whole run reproducible.
///
/// The first error — a malformed batch, a dimension mismatch — aborts
/// the run; there is no retry or skip.
pub fn train<R: Rng>(
    network: &mut Network,
    training: &[Annotation],
    validation: &[Annotation],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Vec<EpochStats>, NnError> {
    if training.is_empty() || validation.is_empty() {
        return Err(NnError::EmptyDataset);
    }
    if config.batch_size == 0 {
        return Err(NnError::InvalidBatchSize);
    }

    let n = training.len();
    let batches = n / config.batch_size;
    let mut indices: Vec<usize> = (0..n).collect();
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        indices.shuffle(rng);

        for j in 0..batches {
            let start = j * config.batch_size;
            let batch = indices[start..start + config.batch_size]
                .iter()
                .map(|&idx| &training[idx]);
            network.update_with_batch(batch, config.learning_rate, config.lambda, n)?;
        }

        let train_cost = network.evaluate_cost(training, config.lambda)?;
        let val_cost = network.evaluate_cost(validation, config.lambda)?;
        let train_accuracy = network.evaluate_accuracy(training)?;
        let val_accuracy = network.evaluate_accuracy(validation)?;

        log::info!(
            "epoch {}/{} - train: cost {:.5} acc {:.5} - validation: cost {:.5} acc {:.5}",
            epoch,
            config.epochs,
            train_cost,
            train_accuracy,
            val_cost,
            val_accuracy
        );

        history.push(EpochStats {
            epoch,
            train_cost,
            val_cost,
            train_accuracy,
            val_accuracy,
        });
    }

    Ok(history)
}
