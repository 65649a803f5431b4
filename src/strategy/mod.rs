mod gradient;
mod regularizer;
mod schedule;

pub use gradient::{Gradient, Link, Loss};
pub use regularizer::{Penalty, Regularizer};
pub use schedule::{Schedule, StepSize};
