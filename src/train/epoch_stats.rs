use serde::{Deserialize, Serialize};

/// Per-epoch training statistics, one record per completed epoch.
///
/// The trainer returns the full history so a reporting consumer can
/// chart cost and accuracy curves; the network itself does no
/// formatting or display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Regularized mean cost over the training set.
    pub train_cost: f64,
    /// Regularized mean cost over the validation set.
    pub val_cost: f64,
    /// Training accuracy as a fraction in [0, 1].
    pub train_accuracy: f64,
    /// Validation accuracy as a fraction in [0, 1].
    pub val_accuracy: f64,
}
