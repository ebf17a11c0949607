//! CLI library components for the configuration tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
