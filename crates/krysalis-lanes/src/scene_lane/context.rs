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

use crate::asset_lane::{ObjLoaderLane, TextureLoaderLane};
use ahash::AHashMap;
use krysalis_core::renderer::MaterialId;
use krysalis_core::RenderEngine;
use krysalis_io::AssetResolver;

/// Everything a scene builder needs, passed explicitly down the pipeline.
///
/// The engine is borrowed mutably for the lifetime of the context, so a load
/// has exclusive access to it from start to finish.
pub struct SceneContext<'a, E: RenderEngine + ?Sized> {
    /// The engine entities and resources are created in.
    pub engine: &'a mut E,
    /// Resolves every asset reference in the document.
    pub resolver: &'a AssetResolver,
    pub(crate) textures: TextureLoaderLane,
    pub(crate) meshes: ObjLoaderLane,
    materials: AHashMap<String, MaterialId>,
}

impl<'a, E: RenderEngine + ?Sized> SceneContext<'a, E> {
    /// Creates a context over `engine`, resolving assets through `resolver`.
    pub fn new(engine: &'a mut E, resolver: &'a AssetResolver) -> Self {
        Self {
            engine,
            resolver,
            textures: TextureLoaderLane,
            meshes: ObjLoaderLane,
            materials: AHashMap::new(),
        }
    }

    /// Returns the material already loaded from `uri` by this context.
    pub fn cached_material(&self, uri: &str) -> Option<MaterialId> {
        self.materials.get(uri).copied()
    }

    pub(crate) fn cache_material(&mut self, uri: &str, material: MaterialId) {
        self.materials.insert(uri.to_string(), material);
    }
}
