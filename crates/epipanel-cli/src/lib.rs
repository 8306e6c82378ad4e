//! CLI library components for the panel builder.

pub mod commands;
pub mod config;
pub mod logging;
pub mod types;
