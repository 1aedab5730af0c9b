pub mod activation;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use error::NnError;
pub use loss::{CrossEntropyLoss, MseLoss};
pub use math::matrix::Matrix;
pub use network::annotation::Annotation;
pub use network::layer::Layer;
pub use network::network::{ForwardPass, Network, Prediction};
pub use train::epoch_stats::EpochStats;
pub use train::train_config::TrainConfig;
pub use train::trainer::train;
