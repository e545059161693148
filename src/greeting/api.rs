//! Public API for the greeting system
//!
//! External modules should import from here rather than directly from internal modules.

// Service and configuration
pub use crate::greeting::config::{default_message, parse_bool, Configuration, DEFAULT_MESSAGE};
pub use crate::greeting::service::GreetingService;

// Output channels
pub use crate::core::styles::GreetingColor;
pub use crate::greeting::channels::{
    ColoredChannel, ConsoleChannel, FileChannel, OutputChannel, RepeatChannel,
};

// Formatting
pub use crate::greeting::format::{render, FormatArg};

// Error handling
pub use crate::greeting::error::{
    message_for, message_for_code, ErrorCode, GreetingError, GreetingResult,
    UNKNOWN_ERROR_MESSAGE,
};

/// Print the configured greeting
pub fn quick(service: &GreetingService) -> GreetingResult<()> {
    service.print(None)
}

/// Print a one-off custom greeting
pub fn custom(service: &GreetingService, message: &str) -> GreetingResult<()> {
    service.print(Some(message))
}

/// `"major.minor.patch"` API version
pub fn version() -> String {
    crate::core::version::api_version()
}
