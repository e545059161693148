//! Application startup
//!
//! Order matters: settings are read before logging exists, logging is installed
//! before the greeting configuration is loaded, and the service is always
//! cleaned up before the process exits.

use crate::app::cli::args::{Args, Command, ResolvedOptions};
use crate::app::cli::settings::Settings;
use crate::app::demo;
use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::core::logging;
use crate::core::styles::{palette_to_clap, StyleRole};
use crate::greeting::api::{
    message_for, Configuration, FormatArg, GreetingError, GreetingResult, GreetingService,
};
use clap::{CommandFactory, FromArgMatches};
use std::io::{IsTerminal, Write};

/// Parse arguments, run the selected command and exit
pub fn startup() {
    let matches = Args::command()
        .styles(palette_to_clap(std::io::stderr().is_terminal()))
        .get_matches();
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    let settings = match Settings::discover(args.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            let message = e.user_message().map_or_else(|| e.to_string(), str::to_string);
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    };
    let options = args.resolve(&settings);

    let log_color = options
        .color
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    let log_file = options.log_file.as_ref().map(|p| p.to_string_lossy().into_owned());
    if let Err(e) = logging::init_logging(
        Some(options.log_level.as_str()),
        Some(options.log_format.as_str()),
        log_file.as_deref(),
        log_color,
    ) {
        eprintln!("Error: failed to initialise logging: {}", e);
        std::process::exit(1);
    }
    log::debug!("greeter {} starting", crate::core::version::api_version());

    let command = args.command_or_default();
    let service = GreetingService::new();
    let mut diagnostics_color = options.color.unwrap_or(false);
    let result = load_configuration(&options).and_then(|config| {
        apply_verbose_logging(&config, &options);
        diagnostics_color = options.color.unwrap_or(config.use_colors);
        service.init(Some(config))?;
        run_command(&service, &command, &mut std::io::stdout())
    });

    if let Err(e) = &result {
        report_error(e, &command, diagnostics_color);
    }
    if let Err(e) = service.cleanup() {
        log::warn!("Cleanup failed: {}", e);
    }

    match result {
        Ok(()) => log::debug!("greeter finished"),
        Err(_) => std::process::exit(1),
    }
}

/// Greeting configuration from the resolved `--config` path, or defaults
pub fn load_configuration(options: &ResolvedOptions) -> GreetingResult<Configuration> {
    match &options.config {
        Some(path) => Configuration::load(path),
        None => Ok(Configuration::create_default()),
    }
}

/// A verbose configuration lifts logging to at least `info`
fn apply_verbose_logging(config: &Configuration, options: &ResolvedOptions) {
    let quiet_level = matches!(options.log_level.as_str(), "off" | "error" | "warn");
    if config.verbose && quiet_level {
        if let Err(e) = logging::reconfigure_logging("info") {
            log::warn!("Could not raise log level for verbose configuration: {}", e);
        }
    }
}

fn report_error(error: &GreetingError, command: &Command, color: bool) {
    log_error_with_context(error, &operation_name(command));
    eprintln!(
        "{} {} ({})",
        StyleRole::Error.paint("error:", color),
        message_for(error.code()),
        error
    );
}

fn operation_name(command: &Command) -> String {
    match command {
        Command::Say { .. } => "Printing greeting",
        Command::Color { .. } => "Printing colored greeting",
        Command::File { .. } => "Writing greeting to file",
        Command::Repeat { .. } => "Repeating greeting",
        Command::Format { .. } => "Printing formatted greeting",
        Command::ConfigShow => "Showing configuration",
        Command::ConfigSave { .. } => "Saving configuration",
        Command::Version => "Showing version",
        Command::Demo { .. } => "Running demo",
    }
    .to_string()
}

/// Explicit message, else the active configuration's message
fn message_or_configured(
    service: &GreetingService,
    message: Option<&str>,
) -> GreetingResult<String> {
    match message {
        Some(text) => Ok(text.to_string()),
        None => service
            .active_config()
            .map(|config| config.message)
            .ok_or(GreetingError::NotInitialized),
    }
}

fn write_out(out: &mut dyn Write, text: &str) -> GreetingResult<()> {
    writeln!(out, "{}", text).map_err(|source| GreetingError::Console { source })
}

/// Execute one command against an initialized service.
///
/// Greetings go through the service's own console; `out` receives driver
/// output such as `config-show` and `version`.
pub fn run_command(
    service: &GreetingService,
    command: &Command,
    out: &mut dyn Write,
) -> GreetingResult<()> {
    match command {
        Command::Say { message } => service.print(message.as_deref()),
        Command::Color { color, message } => {
            let text = message_or_configured(service, message.as_deref())?;
            service.print_colored(&text, color)
        }
        Command::File { path, message } => {
            let text = message_or_configured(service, message.as_deref())?;
            service.print_to_file(&text, path)
        }
        Command::Repeat { count, message } => {
            let text = message_or_configured(service, message.as_deref())?;
            service.print_repeat(&text, *count)
        }
        Command::Format { template, args } => {
            let args: Vec<FormatArg> = args.iter().map(|a| FormatArg::from(a.as_str())).collect();
            service.printf(template, &args)
        }
        Command::ConfigShow => {
            let config = service
                .active_config()
                .ok_or(GreetingError::NotInitialized)?;
            out.write_all(config.to_text().as_bytes())
                .map_err(|source| GreetingError::Console { source })
        }
        Command::ConfigSave {
            path,
            message,
            verbose,
            use_colors,
            output_file,
        } => {
            let mut config = service
                .active_config()
                .ok_or(GreetingError::NotInitialized)?;
            if let Some(message) = message {
                config = config.with_message(message);
            }
            if let Some(verbose) = verbose {
                config = config.with_verbose(*verbose);
            }
            if let Some(use_colors) = use_colors {
                config = config.with_colors(*use_colors);
            }
            if let Some(output_file) = output_file {
                config = config.with_output_file(output_file);
            }
            config.save(path)?;
            write_out(out, &format!("Configuration saved to {}", path.display()))
        }
        Command::Version => write_out(out, &service.get_version()),
        Command::Demo { output } => demo::run(service, out, output),
    }
}
