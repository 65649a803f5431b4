use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{KernelError, Result},
    strategy::Link,
};

/// A labeled observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub x: Vec<f64>,
    pub y: f64,
}

/// The response family of a `GlmGenerator`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// `y = β·x + ε`, `ε ~ N(0, noise²)`.
    Linear { noise: f64 },
    /// `y ~ Bernoulli(σ(β·x))`.
    Logistic,
}

/// A synthetic source of observations drawn from a generalized linear model.
///
/// Feature `j` is drawn from `N(0, (j + 1)²)`, so later coordinates carry more signal.
pub struct GlmGenerator<R: Rng> {
    betas: Vec<f64>,
    family: Family,
    rng: R,
}

impl GlmGenerator<StdRng> {
    /// Creates a new `GlmGenerator` backed by a `StdRng`.
    ///
    /// # Arguments
    /// * `family` - The response family.
    /// * `betas` - The true parameters.
    /// * `seed` - An optional seed, OS entropy is used when missing.
    pub fn seeded(family: Family, betas: Vec<f64>, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::new(family, betas, rng)
    }
}

impl<R: Rng> GlmGenerator<R> {
    /// Creates a new `GlmGenerator`.
    ///
    /// # Returns
    /// An `InvalidConfig` error if `betas` is empty or the noise isn't a finite,
    /// non-negative number.
    pub fn new(family: Family, betas: Vec<f64>, rng: R) -> Result<Self> {
        if betas.is_empty() {
            return Err(KernelError::InvalidConfig(
                "generator betas must not be empty".into(),
            ));
        }

        if let Family::Linear { noise } = family {
            if !(noise.is_finite() && noise >= 0.) {
                return Err(KernelError::InvalidConfig(format!(
                    "generator noise must be finite and non-negative, got {noise}"
                )));
            }
        }

        Ok(Self { betas, family, rng })
    }

    pub fn dim(&self) -> usize {
        self.betas.len()
    }

    /// Draws the next observation.
    pub fn sample(&mut self) -> Observation {
        let x: Vec<f64> = (0..self.betas.len())
            .map(|j| {
                let z: f64 = self.rng.sample(StandardNormal);
                z * (j + 1) as f64
            })
            .collect();

        let mu: f64 = self.betas.iter().zip(&x).map(|(b, x)| b * x).sum();

        let y = match self.family {
            Family::Linear { noise } => {
                let eps: f64 = self.rng.sample(StandardNormal);
                mu + eps * noise
            }
            Family::Logistic => {
                let p = Link::Logit.apply(mu);
                if self.rng.random::<f64>() <= p { 1. } else { 0. }
            }
        };

        Observation { x, y }
    }
}

impl<R: Rng> Iterator for GlmGenerator<R> {
    type Item = Observation;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.sample())
    }
}
