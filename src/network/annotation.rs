use crate::math::matrix::Matrix;

/// One training example: a feature column vector paired with its
/// one-hot label column vector. Owned by the caller's dataset; the
/// network only ever reads it.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub features: Matrix,
    pub label: Matrix,
}

impl Annotation {
    pub fn new(features: Matrix, label: Matrix) -> Annotation {
        Annotation { features, label }
    }
}
