//! Greeting Error Types
//!
//! Two layers: [`ErrorCode`] is the closed outcome taxonomy with one fixed
//! message per code, and [`GreetingError`] is the rich error returned by
//! fallible operations. Every `GreetingError` maps onto exactly one code.

use std::path::PathBuf;
use strum_macros::EnumIter;

/// Message returned for any code outside the enumerated set
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Closed set of outcome codes
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    NullPointer = -1,
    InvalidConfig = -2,
    FileIo = -3,
    Memory = -4,
    NotInitialized = -5,
}

impl ErrorCode {
    /// Raw integer value of the code
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Look up a code by its raw integer value
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            -1 => Some(Self::NullPointer),
            -2 => Some(Self::InvalidConfig),
            -3 => Some(Self::FileIo),
            -4 => Some(Self::Memory),
            -5 => Some(Self::NotInitialized),
            _ => None,
        }
    }

    /// Fixed human-readable message for this code
    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::NullPointer => "Null pointer error",
            Self::InvalidConfig => "Invalid configuration",
            Self::FileIo => "File I/O error",
            Self::Memory => "Memory allocation error",
            Self::NotInitialized => "Greeting service not initialized",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Message for an outcome code
pub fn message_for(code: ErrorCode) -> &'static str {
    code.message()
}

/// Message for a raw integer code. Total: unknown codes get a generic message.
pub fn message_for_code(code: i32) -> &'static str {
    ErrorCode::from_code(code).map_or(UNKNOWN_ERROR_MESSAGE, ErrorCode::message)
}

#[derive(Debug, thiserror::Error)]
pub enum GreetingError {
    #[error("Greeting service is not initialized")]
    NotInitialized,

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Unknown color '{color}'")]
    UnknownColor { color: String },

    #[error("Repeat count must be zero or greater (got {count})")]
    InvalidRepeatCount { count: i64 },

    #[error("Invalid format template: {message}")]
    Format { message: String },

    #[error("File I/O failed for '{}': {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Console write failed: {source}")]
    Console {
        #[source]
        source: std::io::Error,
    },

    #[error("Memory allocation failed ({requested} bytes requested)")]
    Memory { requested: usize },
}

impl GreetingError {
    /// Outcome code this error belongs to
    pub fn code(&self) -> ErrorCode {
        match self {
            GreetingError::NotInitialized => ErrorCode::NotInitialized,
            GreetingError::InvalidConfig { .. }
            | GreetingError::UnknownColor { .. }
            | GreetingError::InvalidRepeatCount { .. }
            | GreetingError::Format { .. } => ErrorCode::InvalidConfig,
            GreetingError::FileIo { .. } | GreetingError::Console { .. } => ErrorCode::FileIo,
            GreetingError::Memory { .. } => ErrorCode::Memory,
        }
    }

    pub(crate) fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GreetingError::FileIo {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        GreetingError::InvalidConfig {
            message: message.into(),
        }
    }
}

impl crate::core::error_handling::ContextualError for GreetingError {
    fn is_user_actionable(&self) -> bool {
        match self {
            GreetingError::NotInitialized
            | GreetingError::InvalidConfig { .. }
            | GreetingError::UnknownColor { .. }
            | GreetingError::InvalidRepeatCount { .. }
            | GreetingError::Format { .. } => true,
            GreetingError::FileIo { .. }
            | GreetingError::Console { .. }
            | GreetingError::Memory { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            GreetingError::NotInitialized => {
                Some("Greeting service is not initialized; initialize it before printing")
            }
            GreetingError::InvalidConfig { message } | GreetingError::Format { message } => {
                Some(message.as_str())
            }
            GreetingError::UnknownColor { .. } => Some(
                "Unknown color name (expected one of: default, black, red, green, yellow, blue, magenta, cyan, white)",
            ),
            GreetingError::InvalidRepeatCount { .. } => {
                Some("Repeat count must be zero or greater")
            }
            _ => None,
        }
    }
}

/// Result type for greeting operations
pub type GreetingResult<T> = Result<T, GreetingError>;
