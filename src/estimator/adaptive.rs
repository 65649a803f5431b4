/// Per-coordinate running sum of squared gradients.
///
/// Starts at zero and only grows; nothing resets it while the kernel lives.
#[derive(Debug, Clone)]
pub struct AdaptiveScale {
    sums: Box<[f64]>,
}

impl AdaptiveScale {
    /// Creates a new `AdaptiveScale`.
    ///
    /// # Arguments
    /// * `len` - The amount of coordinates to track.
    pub fn new(len: usize) -> Self {
        Self {
            sums: vec![0.; len].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Adds the square of every gradient component to its accumulator.
    ///
    /// # Arguments
    /// * `grad` - A gradient of the same length as the scale.
    pub fn accumulate(&mut self, grad: &[f64]) {
        for (s, g) in self.sums.iter_mut().zip(grad) {
            *s += g * g;
        }
    }

    /// Returns the damping denominator `tau + sqrt(s_i)` of coordinate `i`, floored at `min`.
    ///
    /// # Arguments
    /// * `i` - The coordinate.
    /// * `tau` - The schedule offset.
    /// * `min` - The smallest denominator allowed.
    pub fn denominator(&self, i: usize, tau: f64, min: f64) -> f64 {
        (tau + self.sums[i].sqrt()).max(min)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.sums
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let scale = AdaptiveScale::new(3);
        assert_eq!(scale.len(), 3);
        assert_eq!(scale.as_slice(), &[0., 0., 0.]);
    }

    #[test]
    fn accumulates_squared_gradients() {
        let mut scale = AdaptiveScale::new(2);
        scale.accumulate(&[3., -1.]);
        scale.accumulate(&[4., 2.]);

        assert_eq!(scale.as_slice(), &[25., 5.]);
        assert_eq!(scale.denominator(0, 1., 1e-8), 6.);
    }

    #[test]
    fn denominator_falls_back_to_the_floor() {
        let scale = AdaptiveScale::new(1);
        assert_eq!(scale.denominator(0, 0., 1e-3), 1e-3);
    }
}
