use super::Estimator;
use crate::{
    config::{DEFAULT_MIN_DENOMINATOR, HyperParameters, KernelConfig},
    error::{KernelError, Result},
    strategy::{Gradient, Loss, Penalty, Regularizer, Schedule, StepSize},
};

/// Assembles an `Estimator` from explicit strategy objects or from a `KernelConfig`.
///
/// Defaults to a linear loss, the inverse count schedule, no penalty and no
/// adaptive scaling.
pub struct KernelBuilder {
    initial: Vec<f64>,
    gradient: Box<dyn Gradient>,
    schedule: Box<dyn StepSize>,
    regularizer: Box<dyn Regularizer>,
    adaptive: bool,
    min_denominator: f64,
    hyperparameters: HyperParameters,
}

impl KernelBuilder {
    /// Creates a new `KernelBuilder`.
    ///
    /// # Arguments
    /// * `initial` - The initial parameters, their length fixes the kernel's dimension.
    pub fn new(initial: Vec<f64>) -> Self {
        Self {
            initial,
            gradient: Box::new(Loss::Linear),
            schedule: Box::new(Schedule::InverseCount),
            regularizer: Box::new(Penalty::None),
            adaptive: false,
            min_denominator: DEFAULT_MIN_DENOMINATOR,
            hyperparameters: HyperParameters::default(),
        }
    }

    /// Creates a new `KernelBuilder` following a config.
    ///
    /// # Returns
    /// An `InvalidHyperparameter` error if the configured schedule is invalid.
    pub fn from_config(config: &KernelConfig) -> Result<Self> {
        config.schedule.validate()?;

        Ok(Self::new(config.initial.clone())
            .gradient(config.loss)
            .schedule(config.schedule)
            .regularizer(config.penalty)
            .adaptive(config.adaptive)
            .min_denominator(config.min_denominator)
            .hyperparameters(config.hyperparameters))
    }

    pub fn gradient<G: Gradient + 'static>(mut self, gradient: G) -> Self {
        self.gradient = Box::new(gradient);
        self
    }

    pub fn schedule<S: StepSize + 'static>(mut self, schedule: S) -> Self {
        self.schedule = Box::new(schedule);
        self
    }

    pub fn regularizer<R: Regularizer + 'static>(mut self, regularizer: R) -> Self {
        self.regularizer = Box::new(regularizer);
        self
    }

    /// Enables or disables AdaGrad-style per-coordinate scaling.
    pub fn adaptive(mut self, enabled: bool) -> Self {
        self.adaptive = enabled;
        self
    }

    /// Sets the floor for the adaptive denominator.
    pub fn min_denominator(mut self, min_denominator: f64) -> Self {
        self.min_denominator = min_denominator;
        self
    }

    /// Sets the hyperparameters the estimator starts with.
    pub fn hyperparameters(mut self, hyperparameters: HyperParameters) -> Self {
        self.hyperparameters = hyperparameters;
        self
    }

    /// Builds the `Estimator`.
    ///
    /// # Returns
    /// An `InvalidConfig` error if the initial parameters are empty or non-finite or the
    /// denominator floor isn't positive, or an `InvalidHyperparameter` error if the
    /// initial hyperparameters are rejected.
    pub fn build(self) -> Result<Estimator> {
        if self.initial.is_empty() {
            return Err(KernelError::InvalidConfig(
                "initial parameters must not be empty".into(),
            ));
        }

        if let Some(i) = self.initial.iter().position(|p| !p.is_finite()) {
            return Err(KernelError::InvalidConfig(format!(
                "initial parameter {i} is not finite"
            )));
        }

        if !(self.min_denominator.is_finite() && self.min_denominator > 0.) {
            return Err(KernelError::InvalidConfig(format!(
                "min_denominator must be finite and positive, got {}",
                self.min_denominator
            )));
        }

        let mut estimator = Estimator::new(
            self.initial,
            self.adaptive,
            self.min_denominator,
            self.gradient,
            self.schedule,
            self.regularizer,
        );

        estimator.configure(self.hyperparameters)?;
        Ok(estimator)
    }
}
