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

//! # Krysalis Core
//!
//! Foundational crate containing math primitives, opaque engine handles, and the
//! interface contracts the scene bridge consumes: the [`renderer::RenderEngine`]
//! capability and the [`host::HostCallbacks`] sink.

#![warn(missing_docs)]

pub mod ecs;
pub mod host;
pub mod math;
pub mod renderer;
pub mod scene;

pub use ecs::EntityId;
pub use host::HostCallbacks;
pub use renderer::{EngineError, RenderEngine};
pub use scene::SceneObjectId;
