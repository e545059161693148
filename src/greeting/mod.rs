//! Greeting system
//!
//! A lifecycle-managed service that holds one active [`config::Configuration`]
//! and prints greetings through a set of output channels. See [`api`] for the
//! public surface.

pub mod api;
pub mod channels;
pub mod config;
pub mod error;
pub mod format;
pub mod service;

#[cfg(test)]
mod tests;
