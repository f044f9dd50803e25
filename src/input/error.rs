//! Input Translation Error Types
//!
//! Error handling for the input translation module. Every failure is surfaced
//! synchronously to the caller; nothing is retried here.

use thiserror::Error;

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Input module error types
#[derive(Error, Debug)]
pub enum InputError {
    /// No wire sink attached (translator not bound to a session)
    #[error("Input translator is not connected to a session")]
    NotConnected,

    /// Contact id that can never be valid (zero or already live)
    #[error("Invalid touch contact id: {0}")]
    InvalidContact(i32),

    /// All contact slots are occupied
    #[error("Touch contact table full ({capacity} contacts)")]
    ContactTableFull {
        /// Table capacity
        capacity: usize,
    },

    /// No live contact with this id
    #[error("Touch contact not found: {0}")]
    ContactNotFound(i32),

    /// Native touch contact but the touch channel went away
    #[error("Touch channel unavailable for native contact {0}")]
    TouchChannelUnavailable(i32),

    /// Coordinate scaling failed
    #[error("Coordinate scaling failed: {0}")]
    ScalingFailed(String),

    /// Negative local coordinate handed to the scaler
    #[error("Negative coordinate: ({0}, {1})")]
    NegativeCoordinate(i32, i32),

    /// Scaled coordinate does not fit the wire field
    #[error("Coordinate out of range for wire field: ({0}, {1})")]
    CoordinateOutOfRange(u32, u32),

    /// Wire-send primitive failed
    #[error("Failed to send {what}: {reason}")]
    SendFailed {
        /// Kind of wire message
        what: &'static str,
        /// Transport-provided reason
        reason: String,
    },

    /// Touch channel call failed
    #[error("Touch channel error: {0}")]
    TouchChannel(String),

    /// Seat request failed
    #[error("Seat error: {0}")]
    Seat(String),
}

impl InputError {
    /// Shorthand for a failed wire send
    pub fn send_failed(what: &'static str, reason: impl Into<String>) -> Self {
        Self::SendFailed {
            what,
            reason: reason.into(),
        }
    }

    /// Classify this error
    pub fn class(&self) -> ErrorClass {
        classify_error(self)
    }

    /// Whether the session should be torn down (every downstream failure)
    pub fn is_session_fatal(&self) -> bool {
        self.class() == ErrorClass::Downstream
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Absent handle or invalid argument; nothing was emitted or mutated
    Malformed,
    /// Contact table exhausted
    Capacity,
    /// Contact id not found
    Lookup,
    /// Coordinate could not be scaled or represented
    Coordinate,
    /// Wire send or channel call failed
    Downstream,
}

/// Classify error
pub fn classify_error(error: &InputError) -> ErrorClass {
    match error {
        InputError::NotConnected | InputError::InvalidContact(_) => ErrorClass::Malformed,

        InputError::ContactTableFull { .. } => ErrorClass::Capacity,

        InputError::ContactNotFound(_) => ErrorClass::Lookup,

        InputError::ScalingFailed(_)
        | InputError::NegativeCoordinate(_, _)
        | InputError::CoordinateOutOfRange(_, _) => ErrorClass::Coordinate,

        InputError::TouchChannelUnavailable(_)
        | InputError::SendFailed { .. }
        | InputError::TouchChannel(_)
        | InputError::Seat(_) => ErrorClass::Downstream,
    }
}
