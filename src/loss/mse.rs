use crate::error::NnError;
use crate::math::matrix::Matrix;

/// Mean-squared-error cost, kept as a standalone metric. Training and
/// `evaluate_cost` use [`CrossEntropyLoss`](super::CrossEntropyLoss);
/// see that module for the pairing rationale.
pub struct MseLoss;

impl MseLoss {
    /// Scalar cost for a single prediction: 0.5 * Σ (ŷ - y)²
    pub fn loss(y_hat: &Matrix, y: &Matrix) -> Result<f64, NnError> {
        let error = y_hat.sub(y)?;
        let squared = error.hadamard(&error)?;
        Ok(0.5 * squared.sum())
    }
}
