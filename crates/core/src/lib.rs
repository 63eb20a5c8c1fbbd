//! Hawaii Climate Core Library
//!
//! Shared utilities for the climate API server:
//! - Configuration loading (XDG-compliant)
//! - Dataset path checks

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::is_file;

/// Application name used for XDG paths
pub const APP_NAME: &str = "hawaii-climate";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// Default location of the observation dataset
pub const DEFAULT_DATABASE_PATH: &str = "./Resources/hawaii.sqlite";
