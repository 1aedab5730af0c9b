pub mod annotation;
pub mod layer;
pub mod network;

pub use annotation::Annotation;
pub use layer::Layer;
pub use network::{ForwardPass, LayerGradients, Network, Prediction};
