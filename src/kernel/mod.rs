mod actor;
mod handle;
mod messages;

pub use actor::SgdKernel;
pub use handle::KernelHandle;
pub use messages::{Configure, Observe, Shutdown, TakeSnapshot};
