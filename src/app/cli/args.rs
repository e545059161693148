//! Command-line arguments
//!
//! Global flags control logging, color and where configuration is read from;
//! the subcommand picks the output channel.

use crate::app::cli::settings::Settings;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "greeter")]
#[command(about = "Print greetings through configurable output channels")]
#[command(version = crate::core::version::api_version())]
pub struct Args {
    /// Greeting configuration file (key=value lines)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Driver settings file (TOML)
    #[arg(short = 's', long = "settings", value_name = "FILE", global = true)]
    pub settings: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true, value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", global = true, value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path (logs go to stderr when omitted)
    #[arg(short = 'f', long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Force colored diagnostics
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color", global = true)]
    pub color: bool,

    /// Disable colored diagnostics
    #[arg(long = "no-color", action = ArgAction::SetTrue, global = true)]
    pub no_color: bool,

    /// More log output (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Less log output (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the configured greeting, or MESSAGE
    Say { message: Option<String> },

    /// Print a greeting wrapped in a terminal color
    Color {
        /// default, black, red, green, yellow, blue, magenta, cyan or white
        #[arg(id = "color_name", value_name = "COLOR")]
        color: String,
        message: Option<String>,
    },

    /// Append a greeting to a file
    File { path: PathBuf, message: Option<String> },

    /// Print a greeting COUNT times
    Repeat {
        #[arg(allow_negative_numbers = true)]
        count: i64,
        message: Option<String>,
    },

    /// Print a printf-style template (%s, %d, %f, ...) filled with ARGS
    Format {
        template: String,
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
    },

    /// Show the effective greeting configuration
    ConfigShow,

    /// Write the effective greeting configuration to PATH
    ConfigSave {
        path: PathBuf,

        /// Override the greeting message
        #[arg(long = "message", value_name = "TEXT")]
        message: Option<String>,

        /// Set the verbose flag (true/false/yes/no/1/0)
        #[arg(id = "set_verbose", long = "set-verbose", value_name = "BOOL", value_parser = parse_flag)]
        verbose: Option<bool>,

        /// Set the use_colors flag (true/false/yes/no/1/0)
        #[arg(id = "set_colors", long = "set-colors", value_name = "BOOL", value_parser = parse_flag)]
        use_colors: Option<bool>,

        /// Set the output file (empty to clear)
        #[arg(long = "output-file", value_name = "FILE")]
        output_file: Option<PathBuf>,
    },

    /// Print the API version
    Version,

    /// Walk through every greeting operation
    Demo {
        /// File used by the file-output step
        #[arg(long = "output", value_name = "FILE", default_value = "greeter_demo_output.txt")]
        output: PathBuf,
    },
}

fn parse_flag(value: &str) -> Result<bool, String> {
    crate::greeting::config::parse_bool(value)
        .ok_or_else(|| format!("'{}' is not a boolean (true/false/yes/no/1/0)", value))
}

/// Options after merging command-line flags over the settings file
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub log_level: String,
    pub log_format: String,
    pub log_file: Option<PathBuf>,
    /// `None` when neither flags nor settings decide
    pub color: Option<bool>,
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net verbosity: each `-v` adds one, each `-q` removes one
    pub fn verbosity(&self) -> i8 {
        (self.verbose.min(i8::MAX as u8) as i8).saturating_sub(self.quiet.min(i8::MAX as u8) as i8)
    }

    /// The subcommand, defaulting to `say`
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Say { message: None })
    }

    /// Command-line flags take precedence over the settings file
    pub fn resolve(&self, settings: &Settings) -> ResolvedOptions {
        let base_level = self
            .log_level
            .clone()
            .or_else(|| settings.log_level.clone())
            .unwrap_or_else(|| "warn".to_string());
        let log_level =
            crate::core::logging::level_for_verbosity(&base_level, self.verbosity()).to_string();

        let color = if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            settings.color
        };

        ResolvedOptions {
            log_level,
            log_format: self
                .log_format
                .clone()
                .or_else(|| settings.log_format.clone())
                .unwrap_or_else(|| "text".to_string()),
            log_file: self.log_file.clone().or_else(|| settings.log_file.clone()),
            color,
            config: self.config.clone().or_else(|| settings.config.clone()),
        }
    }
}
