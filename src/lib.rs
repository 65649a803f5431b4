//! An online parameter-estimation kernel.
//!
//! `SgdKernel` is an actix actor that fits a parameter vector to a stream of labeled
//! observations with stochastic gradient descent. Callers talk to it through a
//! `KernelHandle`: observations and configuration changes go in, consistent snapshots
//! of the estimate come out, all serialized by the actor's mailbox.

pub mod config;
pub mod error;
pub mod estimator;
pub mod generator;
pub mod kernel;
pub mod strategy;

pub use config::{GeneratorConfig, HyperParameters, KernelConfig};
pub use error::{KernelError, Result};
pub use estimator::{AdaptiveScale, Estimator, KernelBuilder, Snapshot};
pub use generator::{Family, GlmGenerator, Observation};
pub use kernel::{KernelHandle, SgdKernel};
pub use strategy::{Gradient, Link, Loss, Penalty, Regularizer, Schedule, StepSize};
