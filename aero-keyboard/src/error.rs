//! Keyboard interface error types

use aero_transport::TransportError;
use thiserror::Error;

use crate::session::UploadStage;

/// A field value outside its allowed range or set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {value} (allowed: {allowed})")]
pub struct ValidationError {
    /// Offending field
    pub field: &'static str,
    /// The rejected value as given
    pub value: String,
    /// Human-readable description of the accepted range/set
    pub allowed: &'static str,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, value: impl ToString, allowed: &'static str) -> Self {
        Self {
            field,
            value: value.to_string(),
            allowed,
        }
    }
}

/// Errors from keyboard operations
#[derive(Error, Debug)]
pub enum KeyboardError {
    /// Transport layer error (nothing was applied)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid parameter value
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Custom image of the wrong size
    #[error("Custom image must be exactly {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    /// Transport failed after the device accepted the start of a custom upload
    #[error(
        "Custom upload aborted at {stage}: {source}. \
         The keyboard's lighting buffer may be left in an inconsistent state"
    )]
    UploadAborted {
        stage: UploadStage,
        source: TransportError,
    },

    /// The session is unusable after an aborted upload
    #[error("Session failed during an earlier upload; open a new session")]
    SessionFailed,

    /// The session was already closed
    #[error("Session is closed")]
    Closed,
}

impl KeyboardError {
    /// Whether the device may have been left partially updated
    pub fn device_state_uncertain(&self) -> bool {
        matches!(self, Self::UploadAborted { .. })
    }
}
