// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order: compiled defaults, then `./colloquy.toml` (or an explicit
//! path), then `COLLOQUY_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ColloquyConfig;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "colloquy.toml";

/// Load configuration from `./colloquy.toml` with env var overrides.
pub fn load_config() -> Result<ColloquyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ColloquyConfig::default()))
        .merge(Toml::file(CONFIG_FILE))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ColloquyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ColloquyConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ColloquyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ColloquyConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `COLLOQUY_ANTHROPIC_API_KEY` must map to
/// `anthropic.api_key`, not `anthropic.api.key`.
fn env_provider() -> Env {
    Env::prefixed("COLLOQUY_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped,
        // e.g. COLLOQUY_CONTEXT_HISTORY_LIMIT -> "context_history_limit".
        let mapped = key
            .as_str()
            .replacen("service_", "service.", 1)
            .replacen("server_", "server.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("context_", "context.", 1);
        mapped.into()
    })
}
