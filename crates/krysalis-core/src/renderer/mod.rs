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

//! The rendering-side contracts consumed by the scene pipeline.
//!
//! Nothing in this module talks to a GPU. It defines the vocabulary (lights,
//! materials, textures, meshes) and the [`RenderEngine`] capability trait that a
//! concrete backend implements.

mod engine;
mod error;
pub mod light;
pub mod material;
pub mod mesh;
pub mod texture;

pub use engine::*;
pub use error::*;
pub use light::{LightBuildSpec, LightKind};
pub use material::{
    MagFilter, MaterialId, MaterialInstanceId, MaterialParameter, MaterialRegistry, MinFilter,
    SamplerParams,
};
pub use mesh::{CpuMesh, MeshPrimitive};
pub use texture::{PixelBuffer, TextureDescriptor, TextureFormat, TextureId};
