use std::fmt;
use std::io;

/// Errors produced by the matrix engine, network construction,
/// training, and model persistence.
#[derive(Debug)]
pub enum NnError {
    /// Operand shapes are incompatible for the named operation.
    DimensionMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    /// A construction grid has rows of unequal length.
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A reshape that does not conserve the element count.
    InvalidReshape {
        from: (usize, usize),
        to: (usize, usize),
    },
    /// A layer was configured with fewer than one node.
    InvalidTopology { layer: usize, size: usize },
    /// A network needs at least one non-input layer.
    EmptyTopology,
    /// An operation that divides by the dataset size received no data.
    EmptyDataset,
    /// Mini-batch size of zero.
    InvalidBatchSize,
    /// A forward-pass context that was not produced by this network.
    MismatchedForwardPass { expected: usize, found: usize },
    /// Filesystem failure while saving or loading a model.
    Io(io::Error),
    /// A model blob that is truncated, corrupt, or internally
    /// inconsistent (e.g. a broken layer shape chain).
    InvalidModel(String),
}

impl fmt::Display for NnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NnError::DimensionMismatch { op, lhs, rhs } => write!(
                f,
                "{op}: operand shapes {}x{} and {}x{} are incompatible",
                lhs.0, lhs.1, rhs.0, rhs.1
            ),
            NnError::RaggedGrid {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} elements, expected {expected}"
            ),
            NnError::InvalidReshape { from, to } => write!(
                f,
                "cannot reshape {}x{} into {}x{}: element counts differ",
                from.0, from.1, to.0, to.1
            ),
            NnError::InvalidTopology { layer, size } => write!(
                f,
                "layer {layer} has {size} nodes, every layer needs at least one"
            ),
            NnError::EmptyTopology => {
                write!(f, "a network needs at least one non-input layer")
            }
            NnError::EmptyDataset => write!(f, "dataset is empty"),
            NnError::InvalidBatchSize => write!(f, "batch size must be at least 1"),
            NnError::MismatchedForwardPass { expected, found } => write!(
                f,
                "forward pass covers {found} layers, this network has {expected}"
            ),
            NnError::Io(e) => write!(f, "model i/o failed: {e}"),
            NnError::InvalidModel(msg) => write!(f, "invalid model blob: {msg}"),
        }
    }
}

impl std::error::Error for NnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NnError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for NnError {
    fn from(e: io::Error) -> Self {
        NnError::Io(e)
    }
}
