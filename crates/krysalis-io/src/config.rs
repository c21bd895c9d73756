// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The bridge configuration file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The name of the configuration file looked up next to the bridge module.
pub const CONFIG_FILE_NAME: &str = "krysalis.toml";

/// Represents the structure of the `krysalis.toml` configuration file.
///
/// Every field is optional in the file; missing fields take their default.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// The directory all asset references are resolved against.
    ///
    /// `None` means the directory containing the running module.
    pub asset_root: Option<PathBuf>,
    /// The scene document to load, relative to the asset root.
    pub scene_path: String,
    /// The log filter used when `RUST_LOG` is not set, e.g. `info` or `krysalis_lanes=debug`.
    pub log_filter: String,
}

impl Default for BridgeConfig {
    /// Provides the configuration used when no `krysalis.toml` is found.
    fn default() -> Self {
        Self {
            asset_root: None,
            scene_path: "scenes/scene.json".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse bridge configuration")
    }

    /// Loads `krysalis.toml` from `directory`.
    /// If the file does not exist, it returns the default configuration.
    pub fn load_or_default(directory: &Path) -> Result<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::info!(
                "No '{}' found. Using default configuration.",
                path.display()
            );
            return Ok(Self::default());
        }

        log::info!("Found '{}'. Loading configuration.", path.display());
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration file at '{}'", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse TOML from '{}'", path.display()))
    }
}
