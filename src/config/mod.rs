//! Configuration module for Crowl
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a run without a config
//! file behaves exactly like one with an empty file.
//!
//! # Example
//!
//! ```no_run
//! use crowl::config::load_config_or_default;
//! use std::path::Path;
//!
//! let config = load_config_or_default(Path::new("crowl.toml")).unwrap();
//! println!("Links time out after {}ms", config.crawler.link_timeout_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{config_path_from_env, load_config, load_config_or_default};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "crowl.toml";

/// Environment variable that overrides [`DEFAULT_CONFIG_FILE`]
pub const CONFIG_PATH_ENV: &str = "CROWL_CONFIG";
