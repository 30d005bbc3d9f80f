#![forbid(unsafe_code)]

//! Run termination and start rejection conditions.

use std::fmt;

use sortviz_core::ParseAlgorithmError;

/// A suspend point observed that the run was stopped.
///
/// Returned by every instrumented primitive once `running` is false and
/// propagated with `?` up to [`Controller::start`](crate::Controller::start),
/// which turns it into [`RunStatus::Stopped`](crate::RunStatus::Stopped).
/// Work completed before the stop is never rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("run cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Why a run could not be started. No state changes in either case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    /// A run is already active on this controller.
    AlreadyRunning,
    /// The requested algorithm id is not recognized.
    UnknownAlgorithm(ParseAlgorithmError),
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRunning => write!(f, "a run is already active"),
            Self::UnknownAlgorithm(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AlreadyRunning => None,
            Self::UnknownAlgorithm(err) => Some(err),
        }
    }
}

impl From<ParseAlgorithmError> for StartError {
    fn from(err: ParseAlgorithmError) -> Self {
        Self::UnknownAlgorithm(err)
    }
}
