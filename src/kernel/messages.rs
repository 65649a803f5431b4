use actix::prelude::*;

use crate::{config::HyperParameters, error::KernelError, estimator::Snapshot};

/// Applies one observation, rejected when `x` doesn't match the kernel's dimension.
#[derive(Debug, Clone, Message)]
#[rtype(result = "Result<(), KernelError>")]
pub struct Observe {
    pub x: Vec<f64>,
    pub y: f64,
}

/// Replaces the hyperparameters for every following observation.
#[derive(Debug, Clone, Copy, Message)]
#[rtype(result = "Result<(), KernelError>")]
pub struct Configure(pub HyperParameters);

/// Asks for a copy of the current estimate.
#[derive(Debug, Clone, Copy, Message)]
#[rtype(result = "Snapshot")]
pub struct TakeSnapshot;

/// Stops the kernel's processing loop.
#[derive(Debug, Clone, Copy, Message)]
#[rtype(result = "()")]
pub struct Shutdown;
