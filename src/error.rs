use std::{error::Error, fmt, io};

use actix::MailboxError;

/// The crate's result type.
pub type Result<T> = std::result::Result<T, KernelError>;

/// All errors that can be reported by the kernel and its collaborators.
///
/// None of them is fatal to a running kernel: rejected requests leave its state
/// untouched and the actor keeps serving messages.
#[derive(Debug)]
pub enum KernelError {
    /// The observation's feature vector doesn't match the parameter dimension.
    DimensionMismatch { expected: usize, got: usize },
    /// A hyperparameter would make the schedule or the adaptive denominator degenerate.
    InvalidHyperparameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Invalid construction values, caught before the kernel starts.
    InvalidConfig(String),
    /// A strategy was requested by a name nobody implements.
    UnknownStrategy { kind: &'static str, name: String },
    /// The kernel has been shut down and no longer accepts messages.
    Terminated,
    /// A snapshot request outlived its caller-side timeout.
    Timeout,
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {expected} features, got {got}")
            }
            Self::InvalidHyperparameter {
                name,
                value,
                reason,
            } => write!(f, "invalid hyperparameter {name}={value}: {reason}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::UnknownStrategy { kind, name } => write!(f, "unknown {kind}: {name}"),
            Self::Terminated => f.write_str("kernel terminated"),
            Self::Timeout => f.write_str("snapshot request timed out"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

impl Error for KernelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for KernelError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for KernelError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<MailboxError> for KernelError {
    fn from(value: MailboxError) -> Self {
        match value {
            MailboxError::Closed => Self::Terminated,
            MailboxError::Timeout => Self::Timeout,
        }
    }
}
