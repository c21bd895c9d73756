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

//! The scene construction pipeline.
//!
//! A scene document is turned into engine entities in fixed phases: build every
//! object's component, apply every transform, publish the entities to the scene
//! graph and the identifier registry, then verify what was built.

pub mod builders;
mod context;
mod error;
mod identifier_registry;
mod scene_loader_lane;
mod transform_applier;
mod verifier;

pub use context::*;
pub use error::*;
pub use identifier_registry::*;
pub use scene_loader_lane::*;
pub use transform_applier::*;
pub use verifier::*;
