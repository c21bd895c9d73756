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

//! # Krysalis IO
//!
//! Everything that touches the filesystem on behalf of the bridge: the
//! `krysalis.toml` configuration and the [`AssetResolver`] that turns relative
//! asset references into bytes. [`module_directory`] finds the directory the
//! bridge library was loaded from.

#![warn(missing_docs)]

pub mod asset;
pub mod config;
pub mod module;

pub use asset::{AssetError, AssetResolver};
pub use config::BridgeConfig;
pub use module::module_directory;
