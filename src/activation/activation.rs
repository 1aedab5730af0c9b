//! The sigmoid activation and its derivative. The whole engine runs on
//! this one activation; pre-activation variance is kept in check by the
//! layer initializer instead of a zoo of alternatives.

/// σ(x) = 1 / (1 + e^-x)
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// σ'(x) = σ(x)(1 - σ(x))
pub fn sigmoid_prime(x: f64) -> f64 {
    let s = sigmoid(x);
    s * (1.0 - s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_midpoint_and_limits() {
        assert_relative_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(20.0) > 0.999);
        assert!(sigmoid(-20.0) < 0.001);
    }

    #[test]
    fn sigmoid_prime_peaks_at_zero() {
        assert_relative_eq!(sigmoid_prime(0.0), 0.25);
        assert!(sigmoid_prime(3.0) < sigmoid_prime(0.0));
        assert_relative_eq!(sigmoid_prime(2.5), sigmoid_prime(-2.5), epsilon = 1e-12);
    }
}
