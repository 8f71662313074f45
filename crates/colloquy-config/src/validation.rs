// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and non-zero limits.

use crate::diagnostic::ConfigError;
use crate::model::ColloquyConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ColloquyConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.anthropic.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "anthropic.model must not be empty".to_string(),
        });
    }

    if config.anthropic.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "anthropic.max_tokens must be at least 1".to_string(),
        });
    }

    if config.anthropic.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "anthropic.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.context.history_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "context.history_limit must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
