//! Core CLI argument parsing tests

use clap::Parser;
use greeter::app::cli::args::{Args, Command};
use greeter::app::cli::settings::Settings;
use std::path::PathBuf;

fn parse(argv: &[&str]) -> Args {
    let mut full = vec!["greeter"];
    full.extend_from_slice(argv);
    Args::try_parse_from(full).unwrap()
}

#[test]
fn test_no_subcommand_defaults_to_say() {
    let args = parse(&[]);
    assert!(args.command.is_none());
    assert_eq!(args.command_or_default(), Command::Say { message: None });
}

#[test]
fn test_subcommands_parse() {
    assert_eq!(
        parse(&["say", "Hi"]).command,
        Some(Command::Say {
            message: Some("Hi".to_string())
        })
    );
    assert_eq!(
        parse(&["color", "red", "Hi"]).command,
        Some(Command::Color {
            color: "red".to_string(),
            message: Some("Hi".to_string())
        })
    );
    assert_eq!(
        parse(&["repeat", "3"]).command,
        Some(Command::Repeat {
            count: 3,
            message: None
        })
    );
    assert_eq!(
        parse(&["format", "Count: %d", "42"]).command,
        Some(Command::Format {
            template: "Count: %d".to_string(),
            args: vec!["42".to_string()]
        })
    );
    assert_eq!(parse(&["version"]).command, Some(Command::Version));
    assert_eq!(parse(&["config-show"]).command, Some(Command::ConfigShow));
}

#[test]
fn test_negative_repeat_count_reaches_the_service() {
    // Rejection belongs to the repeat channel, not the parser
    assert_eq!(
        parse(&["repeat", "-1", "x"]).command,
        Some(Command::Repeat {
            count: -1,
            message: Some("x".to_string())
        })
    );
}

#[test]
fn test_config_save_flags() {
    let args = parse(&[
        "config-save",
        "out.conf",
        "--message",
        "Saved",
        "--set-verbose",
        "yes",
        "--set-colors",
        "0",
    ]);
    assert_eq!(
        args.command,
        Some(Command::ConfigSave {
            path: PathBuf::from("out.conf"),
            message: Some("Saved".to_string()),
            verbose: Some(true),
            use_colors: Some(false),
            output_file: None,
        })
    );

    let bad = Args::try_parse_from(["greeter", "config-save", "x", "--set-verbose", "maybe"]);
    assert!(bad.is_err());
}

#[test]
fn test_color_flags_conflict() {
    let both = Args::try_parse_from(["greeter", "--color", "--no-color"]);
    assert!(both.is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    assert!(Args::try_parse_from(["greeter", "--log-level", "loud"]).is_err());
    assert!(Args::try_parse_from(["greeter", "--log-format", "xml"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let args = parse(&["say", "--config", "g.conf", "-vv"]);
    assert_eq!(args.config, Some(PathBuf::from("g.conf")));
    assert_eq!(args.verbosity(), 2);
}

#[test]
fn test_resolve_prefers_cli_over_settings() {
    let settings = Settings {
        log_level: Some("error".to_string()),
        log_format: Some("json".to_string()),
        log_file: Some(PathBuf::from("settings.log")),
        color: Some(false),
        config: Some(PathBuf::from("settings.conf")),
    };

    let from_settings = parse(&[]).resolve(&settings);
    assert_eq!(from_settings.log_level, "error");
    assert_eq!(from_settings.log_format, "json");
    assert_eq!(from_settings.log_file, Some(PathBuf::from("settings.log")));
    assert_eq!(from_settings.color, Some(false));
    assert_eq!(from_settings.config, Some(PathBuf::from("settings.conf")));

    let overridden = parse(&[
        "--log-level",
        "debug",
        "--log-format",
        "ext",
        "--color",
        "--config",
        "cli.conf",
    ])
    .resolve(&settings);
    assert_eq!(overridden.log_level, "debug");
    assert_eq!(overridden.log_format, "ext");
    assert_eq!(overridden.color, Some(true));
    assert_eq!(overridden.config, Some(PathBuf::from("cli.conf")));
}

#[test]
fn test_resolve_defaults_and_verbosity() {
    let defaults = parse(&[]).resolve(&Settings::default());
    assert_eq!(defaults.log_level, "warn");
    assert_eq!(defaults.log_format, "text");
    assert_eq!(defaults.color, None);
    assert_eq!(defaults.config, None);

    assert_eq!(parse(&["-v"]).resolve(&Settings::default()).log_level, "info");
    assert_eq!(parse(&["-qq"]).resolve(&Settings::default()).log_level, "off");
    assert_eq!(
        parse(&["-vvv", "-q"]).resolve(&Settings::default()).log_level,
        "debug"
    );
}

#[test]
fn test_subcommand_fields_independent_of_global_flags() {
    let args = parse(&["--color", "-v", "color", "blue", "Hi"]);
    assert!(args.color);
    assert_eq!(args.verbosity(), 1);
    assert_eq!(
        args.command,
        Some(Command::Color {
            color: "blue".to_string(),
            message: Some("Hi".to_string())
        })
    );

    let args = parse(&["-vv", "config-save", "out.conf", "--set-verbose", "false"]);
    assert_eq!(args.verbose, 2);
    match args.command {
        Some(Command::ConfigSave { verbose, .. }) => assert_eq!(verbose, Some(false)),
        other => panic!("expected config-save, got {:?}", other),
    }
}

#[test]
fn test_version_flag_reports_api_version() {
    use clap::CommandFactory;
    let command = Args::command();
    assert_eq!(
        command.get_version(),
        Some(greeter::api_version().as_str())
    );
}
