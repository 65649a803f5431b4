use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KernelError;

/// Computes the per-coordinate correction subtracted from the gradient.
pub trait Regularizer: Send {
    /// Returns the correction for a single parameter.
    ///
    /// # Arguments
    /// * `theta` - The current value of the parameter.
    /// * `lambda1` - The L1 strength.
    /// * `lambda2` - The L2 strength.
    fn correction(&self, theta: f64, lambda1: f64, lambda2: f64) -> f64;
}

/// The built-in penalties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Penalty {
    #[default]
    None,
    /// Lasso, `λ1 · sign(θ)`.
    L1,
    /// Ridge, `2 · λ2 · θ`.
    L2,
    /// Both of the above.
    Elastic,
}

// `f64::signum` maps 0 to 1, an untouched coordinate must not be pushed.
fn sign(x: f64) -> f64 {
    if x == 0. { 0. } else { x.signum() }
}

impl Regularizer for Penalty {
    fn correction(&self, theta: f64, lambda1: f64, lambda2: f64) -> f64 {
        match self {
            Penalty::None => 0.,
            Penalty::L1 => lambda1 * sign(theta),
            Penalty::L2 => 2. * lambda2 * theta,
            Penalty::Elastic => lambda1 * sign(theta) + 2. * lambda2 * theta,
        }
    }
}

impl FromStr for Penalty {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Penalty::None),
            "l1" | "lasso" => Ok(Penalty::L1),
            "l2" | "ridge" => Ok(Penalty::L2),
            "elastic" => Ok(Penalty::Elastic),
            other => Err(KernelError::UnknownStrategy {
                kind: "penalty",
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_never_corrects() {
        assert_eq!(Penalty::None.correction(3., 1., 1.), 0.);
    }

    #[test]
    fn l1_follows_the_sign() {
        assert_eq!(Penalty::L1.correction(3., 0.5, 9.), 0.5);
        assert_eq!(Penalty::L1.correction(-3., 0.5, 9.), -0.5);
        assert_eq!(Penalty::L1.correction(0., 0.5, 9.), 0.);
    }

    #[test]
    fn l2_is_proportional_to_the_parameter() {
        assert_eq!(Penalty::L2.correction(3., 9., 0.5), 3.);
        assert_eq!(Penalty::L2.correction(-2., 9., 0.25), -1.);
    }

    #[test]
    fn elastic_adds_both_terms() {
        let theta = -2.;
        let expected =
            Penalty::L1.correction(theta, 0.5, 0.25) + Penalty::L2.correction(theta, 0.5, 0.25);
        assert_eq!(Penalty::Elastic.correction(theta, 0.5, 0.25), expected);
        assert_eq!(expected, -1.5);
    }

    #[test]
    fn parse_penalty_names() {
        assert_eq!("ridge".parse::<Penalty>().unwrap(), Penalty::L2);
        assert_eq!("l1".parse::<Penalty>().unwrap(), Penalty::L1);
        assert!(matches!(
            "dropout".parse::<Penalty>(),
            Err(KernelError::UnknownStrategy { kind: "penalty", .. })
        ));
    }
}
