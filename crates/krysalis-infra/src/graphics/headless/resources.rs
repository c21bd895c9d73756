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

use ahash::AHashMap;
use krysalis_core::math::Mat4;
use krysalis_core::renderer::{
    LightBuildSpec, MaterialId, MaterialInstanceId, MaterialParameter, TextureDescriptor,
};

/// The renderable component recorded for an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessRenderable {
    /// The instance bound to each primitive, in primitive order.
    ///
    /// `None` means the slot fell back to the default material.
    pub slots: Vec<Option<MaterialInstanceId>>,
    /// Total vertex count across primitives.
    pub vertex_count: usize,
    /// Total index count across primitives.
    pub index_count: usize,
}

/// A texture created through the headless engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessTexture {
    /// The descriptor the texture was created with.
    pub descriptor: TextureDescriptor,
    /// Size of the base level upload, once one has happened.
    pub uploaded_bytes: Option<usize>,
}

#[derive(Debug, Default)]
pub(super) struct EntityRecord {
    pub transform: Option<Mat4>,
    pub light: Option<LightBuildSpec>,
    pub renderable: Option<HeadlessRenderable>,
}

#[derive(Debug)]
pub(super) struct MaterialRecord {
    pub package_len: usize,
}

#[derive(Debug)]
pub(super) struct InstanceRecord {
    pub material: MaterialId,
    pub parameters: AHashMap<String, MaterialParameter>,
}
