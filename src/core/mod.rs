//! Core services and infrastructure

pub mod error_handling;
pub mod logging;
pub mod styles; // color lookup tables for the colored channel & CLI
pub mod version;
