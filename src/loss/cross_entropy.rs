use crate::error::NnError;
use crate::math::matrix::Matrix;

/// Binary cross-entropy summed over the output vector, paired with the
/// sigmoid output layer.
///
/// This is the cost the engine both trains against and reports: when
/// sigmoid and cross-entropy are composed, the output-layer delta
/// simplifies to `ŷ - y` with no σ'(z) factor, so [`output_delta`]
/// and [`loss`] describe the same objective.
///
/// [`output_delta`]: CrossEntropyLoss::output_delta
/// [`loss`]: CrossEntropyLoss::loss
pub struct CrossEntropyLoss;

/// Small epsilon added inside log() to prevent log(0) = -inf.
/// A prediction saturated at exactly 0 or 1 therefore yields a large
/// finite cost rather than a non-finite one.
const EPS: f64 = 1e-12;

impl CrossEntropyLoss {
    /// Scalar cost for a single prediction:
    ///   L = -Σ y·log(ŷ + ε) + (1 - y)·log(1 - ŷ + ε)
    pub fn loss(y_hat: &Matrix, y: &Matrix) -> Result<f64, NnError> {
        if y_hat.rows() != y.rows() || y_hat.cols() != y.cols() {
            return Err(NnError::DimensionMismatch {
                op: "cross_entropy",
                lhs: (y_hat.rows(), y_hat.cols()),
                rhs: (y.rows(), y.cols()),
            });
        }
        let mut cost = 0.0;
        for i in 0..y.rows() {
            for j in 0..y.cols() {
                let p = y_hat.get(i, j);
                let t = y.get(i, j);
                cost -= t * (p + EPS).ln() + (1.0 - t) * (1.0 - p + EPS).ln();
            }
        }
        Ok(cost)
    }

    /// Gradient of the combined sigmoid + cross-entropy cost w.r.t. the
    /// output pre-activations: `ŷ - y`, elementwise. This is the initial
    /// delta of the backward pass.
    pub fn output_delta(y_hat: &Matrix, y: &Matrix) -> Result<Matrix, NnError> {
        y_hat.sub(y)
    }
}
