use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};

/// Computes the learning rate applied at a given step.
pub trait StepSize: Send {
    /// Returns the step size for the `n`-th processed observation.
    ///
    /// # Arguments
    /// * `n` - The step count, starting at 1.
    /// * `tau` - The schedule offset.
    /// * `kappa` - The schedule decay exponent.
    ///
    /// # Returns
    /// An `InvalidHyperparameter` error if the schedule is undefined at `n`.
    fn step_size(&self, n: u64, tau: f64, kappa: f64) -> Result<f64>;
}

/// The built-in step-size schedules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// `η = eta`.
    Constant { eta: f64 },
    /// `η = 1 / n`.
    InverseCount,
    /// `η = (τ + n)^(-κ)`.
    PowerLaw,
}

impl Schedule {
    /// Checks the values fixed at construction time.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Schedule::Constant { eta } if !(eta.is_finite() && eta > 0.) => {
                Err(KernelError::InvalidHyperparameter {
                    name: "eta",
                    value: eta,
                    reason: "constant step size must be finite and positive",
                })
            }
            _ => Ok(()),
        }
    }
}

impl StepSize for Schedule {
    fn step_size(&self, n: u64, tau: f64, kappa: f64) -> Result<f64> {
        match *self {
            Schedule::Constant { eta } => Ok(eta),
            Schedule::InverseCount => {
                if n == 0 {
                    return Err(KernelError::InvalidHyperparameter {
                        name: "n",
                        value: 0.,
                        reason: "inverse count schedule is undefined at step 0",
                    });
                }

                Ok(1. / n as f64)
            }
            Schedule::PowerLaw => {
                let base = tau + n as f64;
                if base <= 0. {
                    return Err(KernelError::InvalidHyperparameter {
                        name: "tau",
                        value: tau,
                        reason: "power law schedule requires tau + n > 0",
                    });
                }

                Ok(base.powf(-kappa))
            }
        }
    }
}

impl FromStr for Schedule {
    type Err = KernelError;

    /// Parses `inverse_count`, `power_law` or `constant:<eta>`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let unknown = || KernelError::UnknownStrategy {
            kind: "schedule",
            name: s.to_string(),
        };

        match s.split_once(':') {
            Some(("constant", eta)) => {
                let eta = eta.parse().map_err(|_| unknown())?;
                let schedule = Schedule::Constant { eta };
                schedule.validate()?;
                Ok(schedule)
            }
            Some(_) => Err(unknown()),
            None => match s {
                "inverse_count" => Ok(Schedule::InverseCount),
                "power_law" => Ok(Schedule::PowerLaw),
                _ => Err(unknown()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_ignores_the_step_count() {
        let schedule = Schedule::Constant { eta: 0.1 };
        assert_eq!(schedule.step_size(1, 0., 0.).unwrap(), 0.1);
        assert_eq!(schedule.step_size(1000, 5., 2.).unwrap(), 0.1);
    }

    #[test]
    fn constant_must_be_positive() {
        assert!(Schedule::Constant { eta: 0. }.validate().is_err());
        assert!(Schedule::Constant { eta: f64::INFINITY }.validate().is_err());
        assert!(Schedule::Constant { eta: 0.5 }.validate().is_ok());
    }

    #[test]
    fn inverse_count_decays_harmonically() {
        let schedule = Schedule::InverseCount;
        assert_eq!(schedule.step_size(1, 0., 0.).unwrap(), 1.);
        assert_eq!(schedule.step_size(4, 0., 0.).unwrap(), 0.25);
        assert!(schedule.step_size(0, 0., 0.).is_err());
    }

    #[test]
    fn power_law_uses_offset_and_exponent() {
        let schedule = Schedule::PowerLaw;
        let eta = schedule.step_size(6, 10., 0.5).unwrap();
        assert!((eta - 0.25).abs() < 1e-12);
        assert_eq!(schedule.step_size(3, 0., 0.).unwrap(), 1.);
    }

    #[test]
    fn power_law_rejects_non_positive_base() {
        let schedule = Schedule::PowerLaw;
        assert!(matches!(
            schedule.step_size(1, -1., 1.),
            Err(KernelError::InvalidHyperparameter { name: "tau", .. })
        ));
        assert!(schedule.step_size(3, -5., 1.).is_err());
    }

    #[test]
    fn power_law_is_monotonically_non_increasing() {
        let schedule = Schedule::PowerLaw;

        for (tau, kappa) in [(0., 0.5), (10., 0.6), (1., 1.), (100., 2.)] {
            let mut prev = schedule.step_size(1, tau, kappa).unwrap();
            for n in 2..5000 {
                let eta = schedule.step_size(n, tau, kappa).unwrap();
                assert!(eta <= prev, "eta increased at n={n} for tau={tau}, kappa={kappa}");
                prev = eta;
            }
        }
    }

    #[test]
    fn parse_schedule_names() {
        assert_eq!("power_law".parse::<Schedule>().unwrap(), Schedule::PowerLaw);
        assert_eq!(
            "inverse_count".parse::<Schedule>().unwrap(),
            Schedule::InverseCount
        );
        assert_eq!(
            "constant:0.25".parse::<Schedule>().unwrap(),
            Schedule::Constant { eta: 0.25 }
        );
        assert!("constant:abc".parse::<Schedule>().is_err());
        assert!("constant:-1".parse::<Schedule>().is_err());
        assert!(matches!(
            "bottou".parse::<Schedule>(),
            Err(KernelError::UnknownStrategy { kind: "schedule", .. })
        ));
    }
}
