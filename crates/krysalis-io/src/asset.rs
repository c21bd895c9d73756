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

//! Resolves relative asset references against a single asset root.

use crate::config::BridgeConfig;
use crate::module::module_directory;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while locating, reading or decoding an asset.
#[derive(Error, Debug)]
pub enum AssetError {
    /// No asset root was configured and the module directory could not be determined.
    #[error("Asset root is unavailable: {0}")]
    RootUnavailable(String),

    /// The reference is absolute or otherwise not a relative asset path.
    #[error("Asset reference '{0}' is not a relative path")]
    NotRelative(String),

    /// The file does not exist under the asset root.
    #[error("Asset '{}' not found at '{}'", .reference, .path.display())]
    NotFound {
        /// The reference as written in the scene.
        reference: String,
        /// The absolute location that was tried.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("Failed to read asset '{}' from '{}'", .reference, .path.display())]
    Io {
        /// The reference as written in the scene.
        reference: String,
        /// The absolute location that was tried.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes were read but could not be decoded into the expected format.
    #[error("Failed to decode asset '{reference}'")]
    Decode {
        /// The reference as written in the scene.
        reference: String,
        /// The decoder's error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Turns relative asset references into absolute paths and file contents.
///
/// The root is fixed on first use and never changes afterwards. When no root is
/// configured, it defaults to the directory containing the running module.
#[derive(Debug, Default)]
pub struct AssetResolver {
    configured: Option<PathBuf>,
    root: OnceCell<PathBuf>,
}

impl AssetResolver {
    /// Creates a resolver rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_root(Some(root.as_ref().to_path_buf()))
    }

    /// Creates a resolver that falls back to the module directory when `root` is `None`.
    pub fn with_root(root: Option<PathBuf>) -> Self {
        Self {
            configured: root,
            root: OnceCell::new(),
        }
    }

    /// Creates a resolver for the asset root named by `config`.
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::with_root(config.asset_root.clone())
    }

    /// Returns the asset root, resolving it on the first call.
    pub fn root(&self) -> Result<&Path, AssetError> {
        self.root
            .get_or_try_init(|| match &self.configured {
                Some(root) => Ok(root.clone()),
                None => module_directory(),
            })
            .map(PathBuf::as_path)
    }

    /// Returns the absolute location of a relative asset reference.
    pub fn resolve(&self, reference: &str) -> Result<PathBuf, AssetError> {
        let relative = normalize_reference(reference);
        if relative.is_empty() || Path::new(&relative).is_absolute() || relative.starts_with('/') {
            return Err(AssetError::NotRelative(reference.to_string()));
        }
        Ok(self.root()?.join(relative))
    }

    /// Reads the full contents of an asset.
    pub fn read(&self, reference: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve(reference)?;
        log::trace!("Reading asset '{}' from '{}'", reference, path.display());
        std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound {
                    reference: reference.to_string(),
                    path,
                }
            } else {
                AssetError::Io {
                    reference: reference.to_string(),
                    path,
                    source,
                }
            }
        })
    }
}

/// Rewrites a reference to forward slashes and drops any leading `./`.
pub fn normalize_reference(reference: &str) -> String {
    let mut normalized = reference.trim().replace('\\', "/");
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    normalized
}
