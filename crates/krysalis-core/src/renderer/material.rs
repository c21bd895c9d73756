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

//! Material handles, parameter values and the name-keyed material registry.

use super::texture::TextureId;
use crate::math::{Vec3, Vec4};
use ahash::AHashMap;

/// A handle to a compiled shader package loaded by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u64);

/// A handle to an instance of a material, with its own parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialInstanceId(pub u64);

/// Minification filter of a texture sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MinFilter {
    /// Nearest texel.
    Nearest,
    /// Linear blend of the nearest texels.
    Linear,
    /// Trilinear filtering across mip levels.
    #[default]
    LinearMipmapLinear,
}

/// Magnification filter of a texture sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MagFilter {
    /// Nearest texel.
    Nearest,
    /// Linear blend of the nearest texels.
    #[default]
    Linear,
}

/// Sampler state bound alongside a texture parameter.
///
/// The default is the fixed sampling policy used for every `sampler2d` parameter
/// in scene documents: trilinear minification and linear magnification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SamplerParams {
    /// Minification filter.
    pub min: MinFilter,
    /// Magnification filter.
    pub mag: MagFilter,
}

/// A typed value assigned to a named material parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialParameter {
    /// A scalar.
    Float(f32),
    /// A 3-component vector.
    Float3(Vec3),
    /// A 4-component vector.
    Float4(Vec4),
    /// A texture sampled with the given sampler.
    Texture {
        /// The texture to bind.
        texture: TextureId,
        /// The sampler state to bind with it.
        sampler: SamplerParams,
    },
}

/// Maps material names to material instances for a single mesh load.
///
/// Mesh primitives reference materials by name; the engine resolves each name
/// through this registry when it builds the renderable. Names iterate in
/// registration order.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    entries: AHashMap<String, MaterialInstanceId>,
    order: Vec<String>,
}

impl MaterialRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `instance` under `name`, returning the instance it replaced, if any.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        instance: MaterialInstanceId,
    ) -> Option<MaterialInstanceId> {
        let name = name.into();
        let previous = self.entries.insert(name.clone(), instance);
        if previous.is_none() {
            self.order.push(name);
        }
        previous
    }

    /// Looks up the instance registered under `name`.
    pub fn get(&self, name: &str) -> Option<MaterialInstanceId> {
        self.entries.get(name).copied()
    }

    /// Returns the number of registered names.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no material has been registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Picks the instance for a mesh primitive slot.
    ///
    /// A named slot binds to the entry with the same name. An unnamed slot binds
    /// to the first registered entry.
    pub fn resolve_slot(&self, slot: Option<&str>) -> Option<MaterialInstanceId> {
        match slot {
            Some(name) => self.get(name),
            None => self.order.first().and_then(|name| self.get(name)),
        }
    }

    /// Iterates over `(name, instance)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, MaterialInstanceId)> + '_ {
        self.order
            .iter()
            .filter_map(move |name| Some((name.as_str(), self.get(name)?)))
    }
}
