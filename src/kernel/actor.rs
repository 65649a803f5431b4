use actix::prelude::*;
use log::{debug, info, warn};

use super::{Configure, Observe, Shutdown, TakeSnapshot};
use crate::{error::KernelError, estimator::Estimator};

/* -------------------------------------------------------------------------- */
/*                                  SGD kernel                                */
/* -------------------------------------------------------------------------- */

/// The online estimation actor.
///
/// The mailbox hands it one message at a time, so the `Estimator` it owns never sees
/// concurrent access and every snapshot reflects fully applied updates.
pub struct SgdKernel {
    estimator: Estimator,
}

impl SgdKernel {
    /// Creates a new `SgdKernel`.
    ///
    /// # Arguments
    /// * `estimator` - The numerical core the actor takes ownership of.
    pub fn new(estimator: Estimator) -> Self {
        Self { estimator }
    }
}

impl Actor for SgdKernel {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!(dim = self.estimator.dim(); "sgd kernel started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(
            step = self.estimator.step(),
            diverged = self.estimator.diverged();
            "sgd kernel stopped"
        );
    }
}

impl Handler<Observe> for SgdKernel {
    type Result = Result<(), KernelError>;

    fn handle(&mut self, msg: Observe, _ctx: &mut Self::Context) -> Self::Result {
        self.estimator
            .observe(&msg.x, msg.y)
            .inspect_err(|e| debug!("observation rejected: {e}"))
    }
}

impl Handler<Configure> for SgdKernel {
    type Result = Result<(), KernelError>;

    fn handle(&mut self, msg: Configure, _ctx: &mut Self::Context) -> Self::Result {
        self.estimator
            .configure(msg.0)
            .inspect_err(|e| warn!("configure rejected: {e}"))
    }
}

impl Handler<TakeSnapshot> for SgdKernel {
    type Result = MessageResult<TakeSnapshot>;

    fn handle(&mut self, _msg: TakeSnapshot, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.estimator.snapshot())
    }
}

impl Handler<Shutdown> for SgdKernel {
    type Result = ();

    fn handle(&mut self, _msg: Shutdown, ctx: &mut Self::Context) {
        debug!(step = self.estimator.step(); "shutdown requested");
        ctx.stop();
    }
}
