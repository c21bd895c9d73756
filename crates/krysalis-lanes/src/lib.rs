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

//! # Krysalis Lanes
//!
//! The working pipelines of the bridge. The `asset_lane` decodes raw bytes into
//! CPU-side images and meshes; the `scene_lane` turns a parsed scene document
//! into engine entities, registers them by identifier and verifies the result.

#![warn(missing_docs)]

pub mod asset_lane;
pub mod scene_lane;
