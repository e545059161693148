//! Guided tour of the greeting API
//!
//! Greetings go through the service console; the numbered narration goes to
//! `out`. Expected failures are reported in the narration, not returned.

use crate::greeting::api::{
    custom, default_message, message_for, quick, version, Configuration, FormatArg,
    GreetingError, GreetingResult, GreetingService,
};
use std::io::Write;
use std::path::Path;

fn say(out: &mut dyn Write, text: &str) -> GreetingResult<()> {
    writeln!(out, "{}", text).map_err(|source| GreetingError::Console { source })
}

fn outcome(out: &mut dyn Write, result: GreetingResult<()>, failed: &str) -> GreetingResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) => say(out, &format!("{}: {}", failed, message_for(e.code()))),
    }
}

/// Run every step against `service`, leaving it cleaned up.
pub fn run(service: &GreetingService, out: &mut dyn Write, file_target: &Path) -> GreetingResult<()> {
    say(out, "=== Greeting API Demo ===")?;

    say(out, "1. Basic usage with defaults:")?;
    service.init(None)?;
    service.print(None)?;

    say(out, "2. Custom message:")?;
    service.print(Some("Hello, Custom World!"))?;

    say(out, "3. Formatted output:")?;
    service.printf("Hello, %s!", &[FormatArg::from("Formatted")])?;
    service.printf(
        "Count: %d, Message: %s",
        &[FormatArg::Int(42), FormatArg::from("Hello")],
    )?;

    say(out, "4. Default message:")?;
    say(out, &format!("Default message is: \"{}\"", default_message()))?;

    say(out, "5. Setting custom message:")?;
    service.set_message("Hello, Universe!")?;
    service.print(None)?;

    say(out, "6. Configuration management:")?;
    let config = Configuration::create_default()
        .with_message("Hello from config!")
        .with_verbose(true)
        .with_colors(true);
    service.cleanup()?;
    service.init(Some(config))?;
    service.print(None)?;

    say(out, "7. Error handling:")?;
    service.cleanup()?;
    match service.print(None) {
        Ok(()) => say(out, "Print successful")?,
        Err(e) => say(out, &format!("Error occurred: {}", message_for(e.code())))?,
    }
    service.init(None)?;

    say(out, "8. Version information:")?;
    say(out, &format!("API Version: {}", service.get_version()))?;
    let status = if service.is_initialized() {
        "Initialized"
    } else {
        "Not initialized"
    };
    say(out, &format!("Initialization status: {}", status))?;

    say(out, "9. Advanced features:")?;
    outcome(
        out,
        service.print_colored("Hello", "red"),
        "Color output failed",
    )?;
    match service.print_to_file("Hello, File!", file_target) {
        Ok(()) => say(
            out,
            &format!("Message written to {}", file_target.display()),
        )?,
        Err(e) => say(out, &format!("File output failed: {}", message_for(e.code())))?,
    }
    outcome(out, service.print_repeat("Repeat", 3), "Repeat failed")?;

    say(out, "10. Convenience wrappers:")?;
    quick(service)?;
    custom(service, "Wrapper message")?;
    say(out, &format!("Version via wrapper: {}", version()))?;

    say(out, "11. Cleanup:")?;
    match service.cleanup() {
        Ok(()) => say(out, "Cleanup successful")?,
        Err(e) => say(out, &format!("Cleanup failed: {}", message_for(e.code())))?,
    }

    say(out, "=== Demo completed ===")
}
