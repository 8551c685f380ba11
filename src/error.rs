//! Error types for the Bridget analog engine.
//!
//! Arithmetic never fails: every numeric operation saturates into the active
//! [`AnalogDomain`](crate::analog::AnalogDomain). The errors below cover
//! configuration (domain modes and ranges), command-line parsing, model
//! transpilation and I/O.

use thiserror::Error;

/// Result type alias using [`BridgetError`].
pub type Result<T> = std::result::Result<T, BridgetError>;

/// Unified error type for all Bridget operations.
#[derive(Error, Debug)]
pub enum BridgetError {
    // ============ Domain Configuration Errors ============
    /// Mode string not one of `int201`, `int2001`, `float_unit`, `float_custom`
    #[error("Unknown analog mode: {mode}")]
    UnknownMode { mode: String },

    /// Custom range with `min >= max`
    #[error("Custom analog range must have min < max (got {min} to {max})")]
    InvalidRange { min: f32, max: f32 },

    // ============ Command Errors ============
    /// A numeric argument could not be parsed
    #[error("Invalid argument for '{command}': {message}")]
    InvalidArgument { command: String, message: String },

    /// A required argument was not supplied
    #[error("Missing argument '{argument}' for '{command}'")]
    MissingArgument { command: String, argument: String },

    // ============ Transpiler Errors ============
    /// Model source had no `model <Name>` declaration
    #[error("Model source does not declare a model name")]
    MissingModelName,

    // ============ I/O Errors ============
    /// Error reading a model file
    #[error("Failed to read model file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error reading from or writing to the interactive console
    #[error("Console error: {message}")]
    ConsoleError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl BridgetError {
    /// Create an unknown mode error
    pub fn unknown_mode(mode: impl Into<String>) -> Self {
        Self::UnknownMode { mode: mode.into() }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a missing argument error
    pub fn missing_argument(command: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            command: command.into(),
            argument: argument.into(),
        }
    }

    /// Create a console error from any displayable cause
    pub fn console(message: impl std::fmt::Display) -> Self {
        Self::ConsoleError {
            message: message.to_string(),
        }
    }
}
