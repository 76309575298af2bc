//! Error types for the hook core.
//!
//! Every variant maps onto the host's signed status convention through
//! [`HookError::code`]: zero is success, anything negative is a failure.

use thiserror::Error;

/// Negative-errno constants used by the host status convention.
pub mod errno {
    /// I/O error.
    pub const EIO: i32 = 5;
    /// Out of memory.
    pub const ENOMEM: i32 = 12;
    /// Invalid argument / invalid state.
    pub const EINVAL: i32 = 22;
}

/// Errors raised while installing the hook or handling one of its events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HookError {
    /// The configuration handed to `install` is not a compound value.
    #[error("hook configuration must be a compound value")]
    ConfigNotCompound,

    /// A mandatory configuration key is absent.
    #[error("{0} not found in hook configuration")]
    ConfigMissingKey(&'static str),

    /// A configuration key is present but unusable as a command template.
    #[error("invalid value for '{key}': {reason}")]
    ConfigInvalidValue {
        /// Configuration key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Storing the command templates failed.
    #[error("out of memory")]
    OutOfMemory,

    /// The host delivered no stream handle.
    #[error("invalid stream handle")]
    InvalidHandle,

    /// The stream's identity query reported an error code.
    #[error("device query failed with code {0}")]
    DeviceQueryFailed(i32),

    /// The parameter description for the device could not be opened.
    #[error("parameter source unavailable at '{location}': {reason}")]
    ParameterSourceUnavailable {
        /// Location derived from the device identity.
        location: String,
        /// Underlying failure description.
        reason: String,
    },

    /// The host refused to register one of the event handlers.
    #[error("host refused hook registration with code {0}")]
    HostRegistration(i32),

    /// A dispatched command reported failure (already translated, always negative).
    #[error("command failed with status {0}")]
    CommandExecutionFailed(i32),
}

impl HookError {
    /// Signed status reported to the host for this error.
    ///
    /// `ParameterSourceUnavailable` surfaces as the generic invalid-state code;
    /// propagated codes are passed through unchanged.
    pub fn code(&self) -> i32 {
        match self {
            HookError::ConfigNotCompound
            | HookError::ConfigMissingKey(_)
            | HookError::ConfigInvalidValue { .. }
            | HookError::InvalidHandle
            | HookError::ParameterSourceUnavailable { .. } => -errno::EINVAL,
            HookError::OutOfMemory => -errno::ENOMEM,
            HookError::DeviceQueryFailed(code)
            | HookError::HostRegistration(code)
            | HookError::CommandExecutionFailed(code) => *code,
        }
    }

    /// Build a `ParameterSourceUnavailable` error from any displayable cause.
    pub fn source_unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        HookError::ParameterSourceUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience result type for hook operations.
pub type Result<T> = std::result::Result<T, HookError>;

/// Collapse a handler result into the host's integer status.
pub fn status_of(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => err.code(),
    }
}
