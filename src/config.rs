use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{KernelError, Result},
    generator::Family,
    strategy::{Loss, Penalty, Schedule},
};

/// Floor applied to the adaptive denominator when `tau + sqrt(s_i)` collapses to zero.
pub const DEFAULT_MIN_DENOMINATOR: f64 = 1e-8;

/// Schedule shape and regularization strengths.
///
/// The kernel keeps its own copy; replacing them only affects observations
/// processed afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperParameters {
    /// Schedule offset, also added to the adaptive denominator.
    pub tau: f64,
    /// Schedule decay exponent.
    pub kappa: f64,
    /// L1 strength.
    pub lambda1: f64,
    /// L2 strength.
    pub lambda2: f64,
}

impl HyperParameters {
    pub fn new(tau: f64, kappa: f64, lambda1: f64, lambda2: f64) -> Self {
        Self {
            tau,
            kappa,
            lambda1,
            lambda2,
        }
    }

    /// Checks the values that are degenerate regardless of the installed schedule.
    ///
    /// # Returns
    /// An `InvalidHyperparameter` error naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("tau", self.tau),
            ("kappa", self.kappa),
            ("lambda1", self.lambda1),
            ("lambda2", self.lambda2),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(KernelError::InvalidHyperparameter {
                    name,
                    value,
                    reason: "must be finite",
                });
            }

            if value < 0. {
                return Err(KernelError::InvalidHyperparameter {
                    name,
                    value,
                    reason: "must be non-negative",
                });
            }
        }

        Ok(())
    }
}

/// The specification for an observation source fed by the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub family: Family,
    pub betas: Vec<f64>,
    pub seed: Option<u64>,
    pub observations: usize,
    #[serde(default = "default_report_every")]
    pub report_every: usize,
}

/// The specification for a kernel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelConfig {
    pub initial: Vec<f64>,
    pub loss: Loss,
    pub schedule: Schedule,
    #[serde(default)]
    pub penalty: Penalty,
    #[serde(default)]
    pub adaptive: bool,
    #[serde(default = "default_min_denominator")]
    pub min_denominator: f64,
    #[serde(default)]
    pub hyperparameters: HyperParameters,
    #[serde(default)]
    pub generator: Option<GeneratorConfig>,
}

impl KernelConfig {
    /// Parses a `KernelConfig` from a JSON document.
    ///
    /// Unknown strategy names are rejected by the deserializer.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a `KernelConfig` from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

fn default_min_denominator() -> f64 {
    DEFAULT_MIN_DENOMINATOR
}

fn default_report_every() -> usize {
    1000
}
