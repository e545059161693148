//! Generic error handling utilities
//!
//! Lets the driver report any error through one path while keeping
//! user-fixable problems readable and system failures terse.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)`. When it returns `false`, `user_message()` returns `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if the error carries a message the user can act on directly
    /// (bad color name, malformed template, missing settings file). I/O
    /// failures on greeting files are system errors.
    fn is_user_actionable(&self) -> bool;

    /// The specific user message, present only for user-actionable errors
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors are logged with their own message; system errors are
/// logged with the supplied operation context. Full detail goes to debug level.
///
/// # Examples
/// ```rust,no_run
/// # use greeter::core::error_handling::log_error_with_context;
/// # use greeter::greeting::error::GreetingError;
/// let err = GreetingError::UnknownColor { color: "purple".into() };
/// log_error_with_context(&err, "Colored output");
/// // Logs: "FATAL: Unknown color name (expected one of: ...)"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
