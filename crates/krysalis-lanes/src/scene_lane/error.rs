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

use krysalis_core::EngineError;
use krysalis_data::scene::SceneParseError;
use krysalis_io::AssetError;
use thiserror::Error;

/// Errors that abort a scene load.
///
/// Each variant names the asset or operation that failed. When one of these is
/// returned, every entity created by the load has already been rolled back.
#[derive(Error, Debug)]
pub enum SceneLoadError {
    /// The scene document could not be read.
    #[error("Failed to read scene document '{path}'")]
    SceneFile {
        /// The configured scene path.
        path: String,
        /// Why the read failed.
        #[source]
        source: AssetError,
    },

    /// The scene document is not a valid scene.
    #[error("Failed to parse scene document '{path}'")]
    Parse {
        /// The configured scene path.
        path: String,
        /// Why parsing failed.
        #[source]
        source: SceneParseError,
    },

    /// A referenced asset could not be read or decoded.
    #[error("Failed to load {kind} '{uri}'")]
    Asset {
        /// What the asset was for, e.g. `"mesh"` or `"texture"`.
        kind: &'static str,
        /// The asset reference as written in the scene.
        uri: String,
        /// Why loading failed.
        #[source]
        source: AssetError,
    },

    /// A referenced asset was read but contains no data.
    #[error("The {kind} '{uri}' is empty")]
    EmptyAsset {
        /// What the asset was for.
        kind: &'static str,
        /// The asset reference as written in the scene.
        uri: String,
    },

    /// The engine refused an operation.
    #[error("{operation}")]
    Engine {
        /// What was being attempted, including the asset or entity involved.
        operation: String,
        /// The engine's error.
        #[source]
        source: EngineError,
    },
}

impl SceneLoadError {
    pub(crate) fn asset<'a>(
        kind: &'static str,
        uri: &'a str,
    ) -> impl FnOnce(AssetError) -> Self + 'a {
        move |source| SceneLoadError::Asset {
            kind,
            uri: uri.to_string(),
            source,
        }
    }

    /// Renders the error followed by its chain of causes, separated by `: `.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        message
    }
}
