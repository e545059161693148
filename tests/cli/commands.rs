//! Subcommand execution tests against a captured service

use crate::common::captured_service;
use greeter::app::cli::args::{Command, ResolvedOptions};
use greeter::app::startup::{load_configuration, run_command};
use greeter::greeting::api::{Configuration, ErrorCode, DEFAULT_MESSAGE};
use std::path::PathBuf;
use tempfile::TempDir;

fn options_with_config(config: Option<PathBuf>) -> ResolvedOptions {
    ResolvedOptions {
        log_level: "warn".to_string(),
        log_format: "text".to_string(),
        log_file: None,
        color: None,
        config,
    }
}

#[test]
fn test_say_uses_configured_message() {
    let (service, console) = captured_service();
    service
        .init(Some(Configuration::create_default().with_message("Configured")))
        .unwrap();
    let mut out = Vec::new();

    run_command(&service, &Command::Say { message: None }, &mut out).unwrap();
    run_command(
        &service,
        &Command::Say {
            message: Some("Explicit".to_string()),
        },
        &mut out,
    )
    .unwrap();

    assert_eq!(console.lines(), vec!["Configured", "Explicit"]);
    assert!(out.is_empty());
}

#[test]
fn test_color_and_repeat_commands() {
    let (service, console) = captured_service();
    service.init(None).unwrap();
    let mut out = Vec::new();

    run_command(
        &service,
        &Command::Color {
            color: "green".to_string(),
            message: None,
        },
        &mut out,
    )
    .unwrap();
    run_command(
        &service,
        &Command::Repeat {
            count: 2,
            message: Some("again".to_string()),
        },
        &mut out,
    )
    .unwrap();

    assert_eq!(
        console.contents(),
        format!("\x1b[32m{}\x1b[0m\nagain\nagain\n", DEFAULT_MESSAGE)
    );
}

#[test]
fn test_invalid_inputs_map_to_invalid_config() {
    let (service, console) = captured_service();
    service.init(None).unwrap();
    let mut out = Vec::new();

    let color = run_command(
        &service,
        &Command::Color {
            color: "purple".to_string(),
            message: None,
        },
        &mut out,
    )
    .unwrap_err();
    let repeat = run_command(
        &service,
        &Command::Repeat {
            count: -1,
            message: None,
        },
        &mut out,
    )
    .unwrap_err();
    let format = run_command(
        &service,
        &Command::Format {
            template: "%d".to_string(),
            args: vec!["not a number".to_string()],
        },
        &mut out,
    )
    .unwrap_err();

    assert_eq!(color.code(), ErrorCode::InvalidConfig);
    assert_eq!(repeat.code(), ErrorCode::InvalidConfig);
    assert_eq!(format.code(), ErrorCode::InvalidConfig);
    assert_eq!(console.contents(), "");
}

#[test]
fn test_format_command_coerces_arguments() {
    let (service, console) = captured_service();
    service.init(None).unwrap();

    run_command(
        &service,
        &Command::Format {
            template: "Count: %03d, Message: %s".to_string(),
            args: vec!["7".to_string(), "Hello".to_string()],
        },
        &mut Vec::new(),
    )
    .unwrap();

    assert_eq!(console.lines(), vec!["Count: 007, Message: Hello"]);
}

#[test]
fn test_file_command_appends() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("greetings.txt");
    let (service, _console) = captured_service();
    service.init(None).unwrap();

    for _ in 0..2 {
        run_command(
            &service,
            &Command::File {
                path: path.clone(),
                message: None,
            },
            &mut Vec::new(),
        )
        .unwrap();
    }

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        format!("{0}\n{0}\n", DEFAULT_MESSAGE)
    );
}

#[test]
fn test_config_show_and_save() {
    let dir = TempDir::new().unwrap();
    let saved = dir.path().join("saved.conf");
    let (service, _console) = captured_service();
    service.init(None).unwrap();

    let mut out = Vec::new();
    run_command(&service, &Command::ConfigShow, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        Configuration::create_default().to_text()
    );

    let mut out = Vec::new();
    run_command(
        &service,
        &Command::ConfigSave {
            path: saved.clone(),
            message: Some("Saved greeting".to_string()),
            verbose: Some(true),
            use_colors: None,
            output_file: None,
        },
        &mut out,
    )
    .unwrap();

    let loaded = Configuration::load(&saved).unwrap();
    assert_eq!(loaded.message, "Saved greeting");
    assert!(loaded.verbose);
    assert!(!loaded.use_colors);
    assert!(String::from_utf8(out).unwrap().contains("saved.conf"));
}

#[test]
fn test_version_command() {
    let (service, _console) = captured_service();
    service.init(None).unwrap();
    let mut out = Vec::new();
    run_command(&service, &Command::Version, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}\n", greeter::api_version())
    );
}

#[test]
fn test_commands_require_initialized_service() {
    let (service, console) = captured_service();
    let err = run_command(&service, &Command::Say { message: None }, &mut Vec::new())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotInitialized);
    let err = run_command(&service, &Command::ConfigShow, &mut Vec::new()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotInitialized);
    assert_eq!(console.contents(), "");
}

#[test]
fn test_load_configuration_from_options() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("greeting.conf");
    std::fs::write(&path, "message=From options\nuse_colors=true\n").unwrap();

    let config = load_configuration(&options_with_config(Some(path))).unwrap();
    assert_eq!(config.message, "From options");
    assert!(config.use_colors);

    let defaults = load_configuration(&options_with_config(None)).unwrap();
    assert_eq!(defaults, Configuration::create_default());

    let missing = load_configuration(&options_with_config(Some(dir.path().join("nope"))))
        .unwrap_err();
    assert_eq!(missing.code(), ErrorCode::FileIo);
}
