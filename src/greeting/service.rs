//! Greeting service state machine
//!
//! The service is either uninitialized or holds exactly one active
//! [`Configuration`]. All state, including the console writer, sits behind a
//! single mutex so every operation is serialized.
//!
//! ```
//! use greeter::greeting::api::{Configuration, GreetingService};
//!
//! let service = GreetingService::with_console(Box::new(std::io::sink()));
//! assert!(service.print(None).is_err());
//!
//! service.init(Some(Configuration::create_default().with_message("Hi"))).unwrap();
//! service.set_message("Bye").unwrap();
//! service.print(None).unwrap();
//! service.cleanup().unwrap();
//! assert!(!service.is_initialized());
//! ```

use crate::greeting::channels::{
    ColoredChannel, ConsoleChannel, FileChannel, OutputChannel, RepeatChannel,
};
use crate::greeting::config::{validate_message, Configuration};
use crate::greeting::error::{GreetingError, GreetingResult};
use crate::greeting::format::{self, FormatArg};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

struct ServiceState {
    /// Present if and only if the service is initialized
    config: Option<Configuration>,
    console: Box<dyn Write + Send>,
}

impl ServiceState {
    fn active(&self) -> GreetingResult<&Configuration> {
        self.config.as_ref().ok_or(GreetingError::NotInitialized)
    }

    fn emit(&mut self, channel: &dyn OutputChannel, message: &str) -> GreetingResult<()> {
        channel.emit(self.console.as_mut(), message)?;
        let verbose = self.config.as_ref().is_some_and(|c| c.verbose);
        if verbose {
            log::info!("Emitted {} bytes via {} channel", message.len(), channel.name());
        } else {
            log::debug!("Emitted {} bytes via {} channel", message.len(), channel.name());
        }
        Ok(())
    }

    /// Console line plus the configured file mirror, if any
    fn emit_line(&mut self, message: &str) -> GreetingResult<()> {
        let mirror = self.active()?.output_file.clone().map(FileChannel::new);
        self.emit(&ConsoleChannel, message)?;
        if let Some(file) = mirror {
            self.emit(&file, message)?;
        }
        Ok(())
    }
}

pub struct GreetingService {
    state: Mutex<ServiceState>,
}

impl std::fmt::Debug for GreetingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreetingService")
            .field("config", &self.lock().config)
            .finish_non_exhaustive()
    }
}

impl Default for GreetingService {
    fn default() -> Self {
        Self::new()
    }
}

impl GreetingService {
    /// Uninitialized service writing to standard output
    pub fn new() -> Self {
        Self::with_console(Box::new(std::io::stdout()))
    }

    /// Uninitialized service writing console output to `console`
    pub fn with_console(console: Box<dyn Write + Send>) -> Self {
        Self {
            state: Mutex::new(ServiceState {
                config: None,
                console,
            }),
        }
    }

    // Every transition is a single assignment, so state behind a poisoned lock is still whole.
    fn lock(&self) -> MutexGuard<'_, ServiceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Activate `config`, or the default configuration when `None`.
    ///
    /// Re-initializing replaces (and releases) the previous configuration. An
    /// invalid configuration is rejected and the current state is kept.
    pub fn init(&self, config: Option<Configuration>) -> GreetingResult<()> {
        let config = config.unwrap_or_else(Configuration::create_default);
        config.validate()?;

        let mut state = self.lock();
        if let Some(previous) = state.config.replace(config) {
            log::debug!("Replacing active greeting configuration");
            previous.dispose();
        } else {
            log::debug!("Greeting service initialized");
        }
        Ok(())
    }

    /// Release the active configuration. Safe to call when uninitialized.
    pub fn cleanup(&self) -> GreetingResult<()> {
        match self.lock().config.take() {
            Some(config) => {
                config.dispose();
                log::debug!("Greeting service cleaned up");
            }
            None => log::trace!("Cleanup on uninitialized greeting service"),
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().config.is_some()
    }

    /// Snapshot of the active configuration
    pub fn active_config(&self) -> Option<Configuration> {
        self.lock().config.clone()
    }

    /// Print `message`, or the configured message when `None`.
    pub fn print(&self, message: Option<&str>) -> GreetingResult<()> {
        let mut state = self.lock();
        let text = match message {
            Some(text) => text.to_string(),
            None => state.active()?.message.clone(),
        };
        state.emit_line(&text)
    }

    /// Render a printf-style template and print it like [`print`](Self::print).
    ///
    /// A template error leaves the service untouched and writes nothing.
    pub fn printf(&self, template: &str, args: &[FormatArg]) -> GreetingResult<()> {
        let mut state = self.lock();
        state.active()?;
        let text = format::render(template, args)?;
        state.emit_line(&text)
    }

    /// Replace the active message. On failure the old message stays in place.
    pub fn set_message(&self, message: &str) -> GreetingResult<()> {
        let mut state = self.lock();
        state.active()?;

        validate_message(message)?;

        let mut replacement = String::new();
        replacement
            .try_reserve_exact(message.len())
            .map_err(|_| GreetingError::Memory {
                requested: message.len(),
            })?;
        replacement.push_str(message);

        if let Some(config) = state.config.as_mut() {
            config.message = replacement;
        }
        log::debug!("Greeting message replaced");
        Ok(())
    }

    /// Print `message` wrapped in the named color.
    pub fn print_colored(&self, message: &str, color_name: &str) -> GreetingResult<()> {
        let channel = ColoredChannel::from_name(color_name)?;
        self.lock().emit(&channel, message)
    }

    /// Append `message` as a line to the file at `path`.
    pub fn print_to_file(&self, message: &str, path: impl AsRef<Path>) -> GreetingResult<()> {
        let channel = FileChannel::new(path.as_ref());
        self.lock().emit(&channel, message)
    }

    /// Print `message` `count` times, one per line.
    pub fn print_repeat(&self, message: &str, count: i64) -> GreetingResult<()> {
        let channel = RepeatChannel::new(count)?;
        self.lock().emit(&channel, message)
    }

    /// `"major.minor.patch"` API version
    pub fn get_version(&self) -> String {
        crate::core::version::api_version()
    }
}
