mod adaptive;
mod builder;
mod estimator;

pub use adaptive::AdaptiveScale;
pub use builder::KernelBuilder;
pub use estimator::{Estimator, Snapshot};
