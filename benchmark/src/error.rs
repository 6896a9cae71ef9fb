//! Errors raised by the round-trip driver and the CLI front end.

use thiserror::Error;
use wirebench_core::{CodecError, ConfigError};

use crate::reporter::ReporterError;

/// Any of these ends the run with a non-zero exit status.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("invalid iteration count '{value}': {reason}")]
    ArgumentParse { value: String, reason: String },

    #[error("{adapter}'s case: deserialization failed")]
    RoundTripMismatch { adapter: String },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReporterError),

    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using HarnessError.
pub type HarnessResult<T> = Result<T, HarnessError>;
