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

//! The engine capability consumed by the scene pipeline.

use super::error::EngineError;
use super::light::LightBuildSpec;
use super::material::{MaterialId, MaterialInstanceId, MaterialParameter, MaterialRegistry};
use super::mesh::CpuMesh;
use super::texture::{PixelBuffer, TextureDescriptor, TextureId};
use crate::ecs::EntityId;
use crate::math::Mat4;

/// The narrow interface through which the scene pipeline drives a render engine.
///
/// The engine exclusively owns every entity, component, material, texture and
/// buffer it creates; callers only hold handles. Implementations are not required
/// to be thread-safe: every method takes `&self`/`&mut self` on the thread that
/// owns the engine.
pub trait RenderEngine {
    // --- Entities ---

    /// Creates a new, component-less entity.
    fn create_entity(&mut self) -> EntityId;

    /// Destroys an entity and every component attached to it.
    ///
    /// The entity is also removed from the scene graph. Unknown handles are ignored.
    fn destroy_entity(&mut self, entity: EntityId);

    // --- Components ---

    /// Attaches a light component built from `spec`.
    fn create_light(&mut self, entity: EntityId, spec: &LightBuildSpec)
        -> Result<(), EngineError>;

    /// Attaches a renderable component built from decoded geometry.
    ///
    /// Each primitive is bound to the entry of `materials` matching its material name.
    fn create_renderable(
        &mut self,
        entity: EntityId,
        mesh: &CpuMesh,
        materials: &MaterialRegistry,
    ) -> Result<(), EngineError>;

    /// Attaches an identity transform component.
    fn create_transform(&mut self, entity: EntityId) -> Result<(), EngineError>;

    /// Sets the local transform of an entity that has a transform component.
    fn set_transform(&mut self, entity: EntityId, local: Mat4) -> Result<(), EngineError>;

    /// Returns the local transform of an entity, if it has a transform component.
    fn transform(&self, entity: EntityId) -> Option<Mat4>;

    /// Returns `true` if the entity has a transform component.
    fn has_transform(&self, entity: EntityId) -> bool;

    /// Returns `true` if the entity has a renderable component.
    fn has_renderable(&self, entity: EntityId) -> bool;

    /// Returns `true` if the entity has a light component.
    fn has_light(&self, entity: EntityId) -> bool;

    // --- Materials & textures ---

    /// Builds a material from a compiled shader package.
    fn load_material(&mut self, package: &[u8]) -> Result<MaterialId, EngineError>;

    /// Creates a new instance of a loaded material.
    fn create_material_instance(
        &mut self,
        material: MaterialId,
    ) -> Result<MaterialInstanceId, EngineError>;

    /// Sets a named parameter on a material instance.
    fn set_parameter(
        &mut self,
        instance: MaterialInstanceId,
        name: &str,
        value: MaterialParameter,
    ) -> Result<(), EngineError>;

    /// Creates an empty texture.
    fn create_texture(&mut self, descriptor: &TextureDescriptor)
        -> Result<TextureId, EngineError>;

    /// Uploads the base level of a texture.
    ///
    /// Ownership of the pixels moves into the engine, which releases the buffer
    /// once the upload has completed.
    fn upload_texture(&mut self, texture: TextureId, pixels: PixelBuffer)
        -> Result<(), EngineError>;

    // --- Scene graph ---

    /// Adds an entity to the scene graph. Adding it twice has no effect.
    fn add_to_scene(&mut self, entity: EntityId);

    /// Removes an entity from the scene graph.
    fn remove_from_scene(&mut self, entity: EntityId);

    /// Returns `true` if the entity is part of the scene graph.
    fn scene_contains(&self, entity: EntityId) -> bool;
}
