use std::time::Duration;

use actix::prelude::*;

use super::{Configure, Observe, SgdKernel, Shutdown, TakeSnapshot};
use crate::{
    config::HyperParameters,
    error::Result,
    estimator::{KernelBuilder, Snapshot},
};

/// The caller-facing interface to a running `SgdKernel`.
///
/// Cheap to clone and shareable across threads; every clone feeds the same mailbox.
/// Requests from one handle are processed in the order they were sent.
#[derive(Clone)]
pub struct KernelHandle {
    addr: Addr<SgdKernel>,
}

impl KernelHandle {
    /// Creates a new `KernelHandle`
    ///
    /// # Arguments
    /// * `addr` - The address of a started kernel.
    pub fn new(addr: Addr<SgdKernel>) -> Self {
        Self { addr }
    }

    pub fn addr(&self) -> &Addr<SgdKernel> {
        &self.addr
    }

    /// Whether the kernel is still accepting messages.
    pub fn is_running(&self) -> bool {
        self.addr.connected()
    }

    /// Sends an observation and waits until it has been applied or rejected.
    ///
    /// # Returns
    /// A `DimensionMismatch` error if `x` doesn't match the kernel's dimension,
    /// or `Terminated` if the kernel is gone.
    pub async fn observe(&self, x: Vec<f64>, y: f64) -> Result<()> {
        self.addr.send(Observe { x, y }).await?
    }

    /// Replaces the kernel's hyperparameters.
    ///
    /// # Returns
    /// An `InvalidHyperparameter` error if the kernel rejected them (it keeps the
    /// previous ones), or `Terminated` if the kernel is gone.
    pub async fn configure(&self, hyper: HyperParameters) -> Result<()> {
        self.addr.send(Configure(hyper)).await?
    }

    /// Waits for a copy of the current estimate.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.addr.send(TakeSnapshot).await?)
    }

    /// Same as `snapshot`, giving up after `timeout`.
    ///
    /// # Returns
    /// A `Timeout` error if the kernel didn't reply in time.
    pub async fn snapshot_timeout(&self, timeout: Duration) -> Result<Snapshot> {
        Ok(self.addr.send(TakeSnapshot).timeout(timeout).await?)
    }

    /// Stops the kernel.
    ///
    /// Messages racing with the shutdown may or may not be processed.
    ///
    /// # Returns
    /// `Terminated` if the kernel had already stopped.
    pub async fn shutdown(&self) -> Result<()> {
        Ok(self.addr.send(Shutdown).await?)
    }
}

impl KernelBuilder {
    /// Builds the estimator and starts a kernel around it on the current arbiter.
    ///
    /// Must be called from within a running actix system.
    ///
    /// # Returns
    /// The handle to the new kernel, or the error returned by `build`.
    pub fn spawn(self) -> Result<KernelHandle> {
        let estimator = self.build()?;
        let addr = SgdKernel::new(estimator).start();
        Ok(KernelHandle::new(addr))
    }
}
