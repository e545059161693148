//! CLI module containing argument parsing and settings loading

pub mod args;
pub mod settings;
