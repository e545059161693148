pub mod app;
pub mod core;
pub mod greeting;

pub use crate::core::version::api_version;
