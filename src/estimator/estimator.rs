use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::AdaptiveScale;
use crate::{
    config::HyperParameters,
    error::{KernelError, Result},
    strategy::{Gradient, Regularizer, StepSize},
};

/// A consistent, point-in-time copy of the estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub params: Vec<f64>,
    /// Set once any parameter or gradient coordinate went non-finite, never cleared.
    pub diverged: bool,
    /// The amount of observations applied so far.
    pub step: u64,
}

/// The synchronous numerical core of the kernel.
///
/// Owns the parameters, the adaptive scale and the step counter. The `SgdKernel` actor
/// is its only owner at runtime, which is what serializes every mutation.
pub struct Estimator {
    params: Vec<f64>,
    grad: Box<[f64]>,
    scale: Option<AdaptiveScale>,
    step: u64,
    hyper: HyperParameters,
    diverged: bool,
    min_denominator: f64,
    gradient: Box<dyn Gradient>,
    schedule: Box<dyn StepSize>,
    regularizer: Box<dyn Regularizer>,
}

impl Estimator {
    /// Creates a new `Estimator` with zeroed hyperparameters.
    ///
    /// Validation of the construction values is left to `KernelBuilder`.
    pub(super) fn new(
        initial: Vec<f64>,
        adaptive: bool,
        min_denominator: f64,
        gradient: Box<dyn Gradient>,
        schedule: Box<dyn StepSize>,
        regularizer: Box<dyn Regularizer>,
    ) -> Self {
        let len = initial.len();

        Self {
            params: initial,
            grad: vec![0.; len].into_boxed_slice(),
            scale: adaptive.then(|| AdaptiveScale::new(len)),
            step: 0,
            hyper: HyperParameters::default(),
            diverged: false,
            min_denominator,
            gradient,
            schedule,
            regularizer,
        }
    }

    /// Returns the dimension of the parameter vector.
    pub fn dim(&self) -> usize {
        self.params.len()
    }

    /// Returns the amount of observations applied so far.
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn diverged(&self) -> bool {
        self.diverged
    }

    pub fn hyperparameters(&self) -> HyperParameters {
        self.hyper
    }

    /// Returns the adaptive accumulators, `None` if adaptive scaling is disabled.
    pub fn scale(&self) -> Option<&[f64]> {
        self.scale.as_ref().map(AdaptiveScale::as_slice)
    }

    /// Replaces the hyperparameters, effective from the next observation.
    ///
    /// # Arguments
    /// * `hyper` - The new hyperparameters.
    ///
    /// # Returns
    /// An `InvalidHyperparameter` error if any value is degenerate or the schedule
    /// wouldn't yield a usable step size for the next step; the previous values are kept.
    pub fn configure(&mut self, hyper: HyperParameters) -> Result<()> {
        hyper.validate()?;

        let eta = self
            .schedule
            .step_size(self.step + 1, hyper.tau, hyper.kappa)?;

        if !(eta.is_finite() && eta > 0.) {
            return Err(KernelError::InvalidHyperparameter {
                name: "eta",
                value: eta,
                reason: "schedule yields a degenerate step size",
            });
        }

        debug!(
            tau = hyper.tau,
            kappa = hyper.kappa,
            lambda1 = hyper.lambda1,
            lambda2 = hyper.lambda2;
            "hyperparameters replaced"
        );

        self.hyper = hyper;
        Ok(())
    }

    /// Applies a single observation to the estimate.
    ///
    /// # Arguments
    /// * `x` - The features, must have the same length as the parameters.
    /// * `y` - The label.
    ///
    /// # Returns
    /// A `DimensionMismatch` error if `x` has the wrong length, or an
    /// `InvalidHyperparameter` error if the schedule is undefined at the next step.
    /// In both cases the state is left untouched.
    pub fn observe(&mut self, x: &[f64], y: f64) -> Result<()> {
        if x.len() != self.params.len() {
            return Err(KernelError::DimensionMismatch {
                expected: self.params.len(),
                got: x.len(),
            });
        }

        let HyperParameters {
            tau,
            kappa,
            lambda1,
            lambda2,
        } = self.hyper;

        let n = self.step + 1;
        let eta = self.schedule.step_size(n, tau, kappa)?;

        let Self {
            params,
            grad,
            scale,
            min_denominator,
            gradient,
            regularizer,
            ..
        } = self;

        gradient.gradient(x, y, params, grad);

        if let Some(scale) = scale.as_mut() {
            scale.accumulate(grad);
        }

        for (i, (p, g)) in params.iter_mut().zip(grad.iter()).enumerate() {
            let r = regularizer.correction(*p, lambda1, lambda2);
            let denom = scale
                .as_ref()
                .map_or(1., |scale| scale.denominator(i, tau, *min_denominator));

            *p += eta * (g - r) / denom;
        }

        self.step = n;
        trace!(step = n, eta = eta; "observation applied");

        if !self.diverged && !self.is_finite() {
            warn!(step = n; "estimate diverged, a coordinate is no longer finite");
            self.diverged = true;
        }

        Ok(())
    }

    /// Copies the current estimate.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            params: self.params.clone(),
            diverged: self.diverged,
            step: self.step,
        }
    }

    fn is_finite(&self) -> bool {
        self.params.iter().chain(self.grad.iter()).all(|v| v.is_finite())
    }
}
