/// Hyperparameters for a [`train`](crate::train::trainer::train) run.
///
/// # Fields
/// - `epochs`        — full passes over the reshuffled training data
/// - `batch_size`    — examples per mini-batch; the `N mod batch_size`
///                     leftover examples of each epoch are skipped (the
///                     next epoch reshuffles, so nothing is starved)
/// - `learning_rate` — gradient-descent step size α
/// - `lambda`        — L2 regularization strength λ
#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub lambda: f64,
}

impl TrainConfig {
    pub fn new(epochs: usize, batch_size: usize, learning_rate: f64, lambda: f64) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            learning_rate,
            lambda,
        }
    }
}
