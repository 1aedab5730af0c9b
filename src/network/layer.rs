use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::math::matrix::Matrix;

/// One network layer's learnable parameters: a weight matrix of shape
/// (outputs x inputs) and a bias column of shape (outputs x 1). Both
/// are private; the batch-update step is the only writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    weights: Matrix,
    bias: Matrix,
}

impl Layer {
    /// Initializes weights and bias from N(0, 1/√inputs), keeping the
    /// pre-activation variance bounded as the fan-in grows.
    pub fn new<R: Rng>(inputs: usize, outputs: usize, rng: &mut R) -> Layer {
        Layer {
            weights: Matrix::xavier(outputs, inputs, rng),
            bias: Matrix::xavier(outputs, 1, rng),
        }
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    /// Fan-in: node count of the previous layer.
    pub fn inputs(&self) -> usize {
        self.weights.cols()
    }

    /// Node count of this layer.
    pub fn outputs(&self) -> usize {
        self.weights.rows()
    }

    /// Replaces both parameter matrices with freshly computed values.
    pub(crate) fn apply_update(&mut self, weights: Matrix, bias: Matrix) {
        self.weights = weights;
        self.bias = bias;
    }

    /// Rebuilds a layer from persisted parameters. Shape validation is
    /// the caller's job (`Network::from_layers`).
    pub(crate) fn from_parts(weights: Matrix, bias: Matrix) -> Layer {
        Layer { weights, bias }
    }
}
