//! Output channels
//!
//! Each channel renders a message one way: plain console, colored console,
//! file append, or repeated console. Channels that take parameters validate
//! them at construction, so a channel that exists can always attempt to emit.

use crate::core::styles::GreetingColor;
use crate::greeting::error::{GreetingError, GreetingResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A strategy for delivering one message
pub trait OutputChannel {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Deliver `message`. Console channels write to `console`; others may ignore it.
    fn emit(&self, console: &mut dyn Write, message: &str) -> GreetingResult<()>;
}

/// Writes the message followed by a newline
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleChannel;

impl OutputChannel for ConsoleChannel {
    fn name(&self) -> &'static str {
        "console"
    }

    fn emit(&self, console: &mut dyn Write, message: &str) -> GreetingResult<()> {
        write_console(console, &format!("{}\n", message))
    }
}

/// Wraps the message in a color escape sequence and a reset
#[derive(Debug, Clone, Copy)]
pub struct ColoredChannel {
    color: GreetingColor,
}

impl ColoredChannel {
    pub fn new(color: GreetingColor) -> Self {
        Self { color }
    }

    /// Resolve a color name; unknown names are rejected before anything is written.
    pub fn from_name(color_name: &str) -> GreetingResult<Self> {
        color_name
            .trim()
            .parse::<GreetingColor>()
            .map(Self::new)
            .map_err(|_| {
                log::warn!("Rejected unknown color '{}'", color_name);
                GreetingError::UnknownColor {
                    color: color_name.to_string(),
                }
            })
    }

    pub fn color(&self) -> GreetingColor {
        self.color
    }
}

impl OutputChannel for ColoredChannel {
    fn name(&self) -> &'static str {
        "colored"
    }

    fn emit(&self, console: &mut dyn Write, message: &str) -> GreetingResult<()> {
        write_console(console, &format!("{}\n", self.color.paint(message)))
    }
}

/// Appends the message and a newline to a file, creating it if absent
#[derive(Debug, Clone)]
pub struct FileChannel {
    path: PathBuf,
}

impl FileChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputChannel for FileChannel {
    fn name(&self) -> &'static str {
        "file"
    }

    fn emit(&self, _console: &mut dyn Write, message: &str) -> GreetingResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| GreetingError::file_io(&self.path, e))?;
        writeln!(file, "{}", message).map_err(|e| GreetingError::file_io(&self.path, e))?;
        Ok(())
    }
}

/// Writes the message `count` times, one per line
#[derive(Debug, Clone, Copy)]
pub struct RepeatChannel {
    count: usize,
}

impl RepeatChannel {
    /// Negative counts are rejected; zero is valid and writes nothing.
    pub fn new(count: i64) -> GreetingResult<Self> {
        let count = usize::try_from(count).map_err(|_| {
            log::warn!("Rejected negative repeat count {}", count);
            GreetingError::InvalidRepeatCount { count }
        })?;
        Ok(Self { count })
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl OutputChannel for RepeatChannel {
    fn name(&self) -> &'static str {
        "repeat"
    }

    fn emit(&self, console: &mut dyn Write, message: &str) -> GreetingResult<()> {
        if self.count == 0 {
            return Ok(());
        }
        // One line at a time, never the whole output in memory
        for _ in 0..self.count {
            writeln!(console, "{}", message).map_err(|source| GreetingError::Console { source })?;
        }
        console
            .flush()
            .map_err(|source| GreetingError::Console { source })
    }
}

fn write_console(console: &mut dyn Write, text: &str) -> GreetingResult<()> {
    console
        .write_all(text.as_bytes())
        .and_then(|_| console.flush())
        .map_err(|source| GreetingError::Console { source })
}
