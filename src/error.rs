//! Unified error types for the sensor panel.
//!
//! Sensor read failures are *not* errors at this layer: they travel through
//! the pipeline as `None` readings and end up on the panel as `UNKNOWN`.
//! What remains here are wiring and configuration defects, plus a
//! real-time run falling too far behind; all of them halt the run and are
//! never recovered.  All variants are `Copy` so they can be
//! handed to event sinks and returned from the coordinator without
//! allocation.

use core::fmt;
use core::time::Duration;

use crate::model::Port;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A model was driven in a way its port declaration forbids.
    Model(ModelError),
    /// Configuration is invalid.
    Config(&'static str),
    /// A real-time run fell further behind the wall clock than allowed.
    MissedDeadline { time: Duration, lag: Duration },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(e) => write!(f, "model: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::MissedDeadline { time, lag } => write!(
                f,
                "missed deadline at {}: {} ms late",
                crate::time::format_hms(*time),
                lag.as_millis()
            ),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Model errors
// ---------------------------------------------------------------------------

/// Violations of the atomic-model contract.  Each one means the network
/// was wired incorrectly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    /// External transition invoked on a model that declares no input ports.
    NoInputPorts { model: &'static str },
    /// A message arrived on a port the model does not declare.
    UndeclaredPort { model: &'static str, port: Port },
    /// More messages were produced or routed in one step than a bag holds.
    BagFull { model: &'static str },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInputPorts { model } => write!(
                f,
                "external transition called on '{model}', which has no input ports"
            ),
            Self::UndeclaredPort { model, port } => {
                write!(f, "'{model}' received a message on undeclared port {port:?}")
            }
            Self::BagFull { model } => write!(f, "message bag overflow at '{model}'"),
        }
    }
}

impl From<ModelError> for Error {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
