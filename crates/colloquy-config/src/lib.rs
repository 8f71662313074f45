// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Colloquy book-club service.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), environment variable overrides, and diagnostic
//! error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use colloquy_config::load_and_validate;
//!
//! let config = load_and_validate(None).expect("config errors");
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::ColloquyConfig;

/// Load configuration and validate it.
///
/// With `path = None` the loader reads `./colloquy.toml`; otherwise the given
/// file. In both cases `COLLOQUY_*` environment variables override file
/// values. On a Figment error the TOML sources are re-read so diagnostics can
/// carry source spans.
pub fn load_and_validate(path: Option<&Path>) -> Result<ColloquyConfig, Vec<ConfigError>> {
    let result = match path {
        Some(p) => loader::load_config_from_path(p),
        None => loader::load_config(),
    };
    match result {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources(path);
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<ColloquyConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources(path: Option<&Path>) -> Vec<(String, String)> {
    let mut sources = Vec::new();

    match path {
        Some(p) => {
            if let Ok(content) = std::fs::read_to_string(p) {
                sources.push((p.display().to_string(), content));
            }
        }
        None => {
            if let Ok(content) = std::fs::read_to_string(loader::CONFIG_FILE) {
                let display = std::env::current_dir()
                    .map(|d| d.join(loader::CONFIG_FILE).display().to_string())
                    .unwrap_or_else(|_| loader::CONFIG_FILE.to_string());
                sources.push((display, content));
            }
        }
    }

    sources
}
