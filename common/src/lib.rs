//! Shared utilities for the SuiteCRM container tools
//!
//! This crate provides common functionality used by every tool in the workspace:
//! - Structured logging initialization
//! - Environment variable access helpers
//! - Command execution utilities
//! - PHP literal quoting

pub mod command;
pub mod config;
pub mod logging;
pub mod php;

pub use config::{EnvSource, ProcessEnv, SuiteCrmEnv};
pub use logging::init_logging;
