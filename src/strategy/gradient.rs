use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KernelError;

/// Bound on the exponent fed to `exp` by the logistic link.
const LOGIT_CLAMP: f64 = 30.;

/// Computes the loss gradient for a single observation.
///
/// The gradient is expressed in ascent form, `(y - ŷ) * x`, so the kernel adds it to
/// the parameters.
pub trait Gradient: Send {
    /// Writes the gradient for `(x, y)` at `theta` into `out`.
    ///
    /// # Arguments
    /// * `x` - The observation's features, same length as `theta`.
    /// * `y` - The observation's label.
    /// * `theta` - The current parameters.
    /// * `out` - The gradient buffer, same length as `theta`.
    fn gradient(&self, x: &[f64], y: f64, theta: &[f64], out: &mut [f64]);
}

/// Inverse link functions of the supported GLM families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Link {
    Identity,
    Logit,
}

impl Link {
    /// Maps a linear predictor to the mean of the response.
    pub fn apply(self, z: f64) -> f64 {
        match self {
            Link::Identity => z,
            Link::Logit => 1. / (1. + (-z.clamp(-LOGIT_CLAMP, LOGIT_CLAMP)).exp()),
        }
    }
}

/// The built-in loss gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Loss {
    /// Squared error, `ŷ = θ·x`.
    Linear,
    /// Log loss, `ŷ = σ(θ·x)`.
    Logistic,
}

impl Loss {
    fn link(self) -> Link {
        match self {
            Loss::Linear => Link::Identity,
            Loss::Logistic => Link::Logit,
        }
    }
}

impl Gradient for Loss {
    fn gradient(&self, x: &[f64], y: f64, theta: &[f64], out: &mut [f64]) {
        let z: f64 = theta.iter().zip(x).map(|(t, x)| t * x).sum();
        let err = y - self.link().apply(z);

        for (g, x) in out.iter_mut().zip(x) {
            *g = err * x;
        }
    }
}

impl FromStr for Loss {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Loss::Linear),
            "logistic" => Ok(Loss::Logistic),
            other => Err(KernelError::UnknownStrategy {
                kind: "loss",
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_link_is_a_no_op() {
        assert_eq!(Link::Identity.apply(2.), 2.);
    }

    #[test]
    fn logit_link_matches_the_sigmoid() {
        let expected = 1. / (1. + (-2f64).exp());
        assert_eq!(Link::Logit.apply(2.), expected);
        assert_eq!(Link::Logit.apply(0.), 0.5);
    }

    #[test]
    fn logit_link_saturates_without_overflow() {
        let hi = Link::Logit.apply(1e6);
        let lo = Link::Logit.apply(-1e6);

        assert!(hi.is_finite() && hi > 0.999_999);
        assert!(lo.is_finite() && lo > 0. && lo < 1e-6);
    }

    #[test]
    fn linear_gradient_is_residual_times_features() {
        let mut grad = [0.; 2];
        Loss::Linear.gradient(&[1., 2.], 10., &[2., 3.], &mut grad);

        // ŷ = 2 + 6 = 8, residual = 2
        assert_eq!(grad, [2., 4.]);
    }

    #[test]
    fn logistic_gradient_at_the_decision_boundary() {
        let mut grad = [0.; 2];
        Loss::Logistic.gradient(&[1., -1.], 1., &[0., 0.], &mut grad);

        assert_eq!(grad, [0.5, -0.5]);
    }

    #[test]
    fn logistic_gradient_stays_finite_for_huge_margins() {
        let mut grad = [0.; 1];
        Loss::Logistic.gradient(&[1e200], 0., &[1e200], &mut grad);

        assert!(grad[0].is_finite());
    }

    #[test]
    fn unknown_loss_name_is_an_error() {
        assert_eq!("logistic".parse::<Loss>().unwrap(), Loss::Logistic);
        assert!(matches!(
            "hinge".parse::<Loss>(),
            Err(KernelError::UnknownStrategy { kind: "loss", .. })
        ));
    }
}
