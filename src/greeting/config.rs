//! Greeting configuration
//!
//! A [`Configuration`] describes what the service greets with and where the
//! greeting goes. It persists as a line-oriented `key=value` text file:
//!
//! ```text
//! message=Hello, World!
//! verbose=false
//! output_file=
//! use_colors=true
//! ```
//!
//! The first `=` splits key from value; the value is taken verbatim up to the
//! line terminator. Unknown keys and malformed lines are skipped.

use crate::greeting::error::{GreetingError, GreetingResult};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Greeting used whenever no message has been configured
pub const DEFAULT_MESSAGE: &str = "Hello, World!";

const KEY_MESSAGE: &str = "message";
const KEY_VERBOSE: &str = "verbose";
const KEY_OUTPUT_FILE: &str = "output_file";
const KEY_USE_COLORS: &str = "use_colors";

/// The fixed default greeting
pub fn default_message() -> &'static str {
    DEFAULT_MESSAGE
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub message: String,
    pub verbose: bool,
    pub output_file: Option<PathBuf>,
    pub use_colors: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::create_default()
    }
}

impl Configuration {
    /// Configuration with the default message, no file target and all flags off
    pub fn create_default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            verbose: false,
            output_file: None,
            use_colors: false,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// An empty path means "no file target"
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.output_file = (!path.as_os_str().is_empty()).then_some(path);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Check that the configuration can be represented in the text format.
    pub fn validate(&self) -> GreetingResult<()> {
        validate_message(&self.message)?;
        if let Some(path) = &self.output_file {
            if contains_line_break(&path.to_string_lossy()) {
                return Err(GreetingError::invalid_config(
                    "output_file must not contain line breaks",
                ));
            }
        }
        Ok(())
    }

    /// Load a configuration from a `key=value` file.
    ///
    /// Keys missing from the file keep their default values. Only failure to
    /// read the file is an error; unparseable lines are logged and skipped.
    pub fn load(path: impl AsRef<Path>) -> GreetingResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| GreetingError::file_io(path, e))?;
        let config = Self::parse(&contents);
        log::debug!("Loaded greeting configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text (best effort)
    pub fn parse(contents: &str) -> Self {
        let mut config = Self::create_default();

        for (index, raw_line) in contents.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                log::warn!("Skipping malformed config line {}: no '='", line_number);
                continue;
            };

            match key.trim() {
                KEY_MESSAGE => config.message = value.to_string(),
                KEY_OUTPUT_FILE => {
                    config.output_file = (!value.is_empty()).then(|| PathBuf::from(value))
                }
                KEY_VERBOSE => match parse_bool(value) {
                    Some(flag) => config.verbose = flag,
                    None => log::warn!(
                        "Skipping config line {}: '{}' is not a boolean",
                        line_number,
                        value
                    ),
                },
                KEY_USE_COLORS => match parse_bool(value) {
                    Some(flag) => config.use_colors = flag,
                    None => log::warn!(
                        "Skipping config line {}: '{}' is not a boolean",
                        line_number,
                        value
                    ),
                },
                other => log::debug!("Ignoring unknown config key '{}'", other),
            }
        }

        config
    }

    /// Serialize as four `key=value` lines
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        let output_file = self
            .output_file
            .as_deref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Writing into a String cannot fail
        let _ = writeln!(text, "{}={}", KEY_MESSAGE, self.message);
        let _ = writeln!(text, "{}={}", KEY_VERBOSE, self.verbose);
        let _ = writeln!(text, "{}={}", KEY_OUTPUT_FILE, output_file);
        let _ = writeln!(text, "{}={}", KEY_USE_COLORS, self.use_colors);
        text
    }

    /// Write the configuration to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> GreetingResult<()> {
        let path = path.as_ref();
        self.validate()?;
        std::fs::write(path, self.to_text()).map_err(|e| GreetingError::file_io(path, e))?;
        log::debug!("Saved greeting configuration to {}", path.display());
        Ok(())
    }

    /// Release the configuration. Ownership makes a second dispose impossible.
    pub fn dispose(self) {
        log::trace!("Disposing greeting configuration");
        drop(self);
    }
}

/// Parse a boolean token: `true/false/1/0/yes/no`, case-insensitive
pub fn parse_bool(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// A message must fit on one line of the config file
pub(crate) fn validate_message(message: &str) -> GreetingResult<()> {
    if contains_line_break(message) {
        return Err(GreetingError::invalid_config(
            "message must not contain line breaks",
        ));
    }
    Ok(())
}

fn contains_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}
