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

use super::resources::{
    EntityRecord, HeadlessRenderable, HeadlessTexture, InstanceRecord, MaterialRecord,
};
use ahash::{AHashMap, AHashSet};
use krysalis_core::math::Mat4;
use krysalis_core::renderer::{
    CpuMesh, LightBuildSpec, MaterialId, MaterialInstanceId, MaterialParameter,
    MaterialRegistry, PixelBuffer, TextureDescriptor, TextureId,
};
use krysalis_core::{EngineError, EntityId, RenderEngine};

/// A [`RenderEngine`] that keeps every entity, component and resource in memory.
///
/// Nothing is drawn. Every request is validated the way a GPU backend would
/// validate it, and the result can be inspected afterwards.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    handle_counter: u64,
    entities: AHashMap<EntityId, EntityRecord>,
    materials: AHashMap<MaterialId, MaterialRecord>,
    instances: AHashMap<MaterialInstanceId, InstanceRecord>,
    instance_order: Vec<MaterialInstanceId>,
    textures: AHashMap<TextureId, HeadlessTexture>,
    scene: Vec<EntityId>,
    in_scene: AHashSet<EntityId>,
}

impl HeadlessEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&mut self) -> u64 {
        self.handle_counter += 1;
        self.handle_counter
    }

    fn record_mut(&mut self, entity: EntityId) -> Result<&mut EntityRecord, EngineError> {
        self.entities
            .get_mut(&entity)
            .ok_or(EngineError::InvalidEntity(entity))
    }

    // --- Inspection ---

    /// Returns `true` if `entity` has been created and not destroyed.
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    /// The number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// The light parameters attached to `entity`.
    pub fn light(&self, entity: EntityId) -> Option<&LightBuildSpec> {
        self.entities.get(&entity)?.light.as_ref()
    }

    /// The renderable attached to `entity`.
    pub fn renderable(&self, entity: EntityId) -> Option<&HeadlessRenderable> {
        self.entities.get(&entity)?.renderable.as_ref()
    }

    /// The number of entities carrying a transform component.
    pub fn transform_component_count(&self) -> usize {
        self.entities
            .values()
            .filter(|record| record.transform.is_some())
            .count()
    }

    /// The number of materials loaded.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// The size of the shader package a material was built from.
    pub fn material_package_size(&self, material: MaterialId) -> Option<usize> {
        self.materials.get(&material).map(|record| record.package_len)
    }

    /// Every material instance, in creation order.
    pub fn material_instances(&self) -> Vec<MaterialInstanceId> {
        self.instance_order.clone()
    }

    /// The material an instance was created from.
    pub fn material_of(&self, instance: MaterialInstanceId) -> Option<MaterialId> {
        self.instances.get(&instance).map(|record| record.material)
    }

    /// The value last set for parameter `name` on `instance`.
    pub fn parameter(&self, instance: MaterialInstanceId, name: &str) -> Option<MaterialParameter> {
        self.instances.get(&instance)?.parameters.get(name).copied()
    }

    /// A texture and its upload state.
    pub fn texture(&self, texture: TextureId) -> Option<&HeadlessTexture> {
        self.textures.get(&texture)
    }

    /// The number of textures created.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// The scene graph, in insertion order.
    pub fn scene_entities(&self) -> &[EntityId] {
        &self.scene
    }
}

impl RenderEngine for HeadlessEngine {
    fn create_entity(&mut self) -> EntityId {
        let entity = EntityId::from_raw(self.next_handle());
        self.entities.insert(entity, EntityRecord::default());
        log::trace!("Created {}", entity);
        entity
    }

    fn destroy_entity(&mut self, entity: EntityId) {
        self.remove_from_scene(entity);
        if self.entities.remove(&entity).is_some() {
            log::trace!("Destroyed {}", entity);
        }
    }

    fn create_light(
        &mut self,
        entity: EntityId,
        spec: &LightBuildSpec,
    ) -> Result<(), EngineError> {
        let record = self.record_mut(entity)?;
        if record.light.is_some() {
            return Err(EngineError::ComponentAlreadyPresent {
                entity,
                component: "light",
            });
        }
        record.light = Some(*spec);
        Ok(())
    }

    fn create_renderable(
        &mut self,
        entity: EntityId,
        mesh: &CpuMesh,
        materials: &MaterialRegistry,
    ) -> Result<(), EngineError> {
        for (_, instance) in materials.iter() {
            if !self.instances.contains_key(&instance) {
                return Err(EngineError::InvalidMaterialInstance(instance));
            }
        }

        let record = self.record_mut(entity)?;
        if record.renderable.is_some() {
            return Err(EngineError::ComponentAlreadyPresent {
                entity,
                component: "renderable",
            });
        }

        let slots = mesh
            .material_slots()
            .map(|slot| {
                let instance = materials.resolve_slot(slot);
                if instance.is_none() {
                    log::warn!(
                        "{}: no material for slot {:?}, using the default material",
                        entity,
                        slot
                    );
                }
                instance
            })
            .collect();

        record.renderable = Some(HeadlessRenderable {
            slots,
            vertex_count: mesh.vertex_count(),
            index_count: mesh.primitives.iter().map(|p| p.indices.len()).sum(),
        });
        Ok(())
    }

    fn create_transform(&mut self, entity: EntityId) -> Result<(), EngineError> {
        let record = self.record_mut(entity)?;
        if record.transform.is_some() {
            return Err(EngineError::ComponentAlreadyPresent {
                entity,
                component: "transform",
            });
        }
        record.transform = Some(Mat4::IDENTITY);
        Ok(())
    }

    fn set_transform(&mut self, entity: EntityId, local: Mat4) -> Result<(), EngineError> {
        match self.record_mut(entity)?.transform.as_mut() {
            Some(transform) => {
                *transform = local;
                Ok(())
            }
            None => Err(EngineError::Backend(format!(
                "{entity} has no transform component"
            ))),
        }
    }

    fn transform(&self, entity: EntityId) -> Option<Mat4> {
        self.entities.get(&entity)?.transform
    }

    fn has_transform(&self, entity: EntityId) -> bool {
        self.transform(entity).is_some()
    }

    fn has_renderable(&self, entity: EntityId) -> bool {
        self.renderable(entity).is_some()
    }

    fn has_light(&self, entity: EntityId) -> bool {
        self.light(entity).is_some()
    }

    fn load_material(&mut self, package: &[u8]) -> Result<MaterialId, EngineError> {
        if package.is_empty() {
            return Err(EngineError::MaterialCreationFailed(
                "the shader package is empty".to_string(),
            ));
        }
        let material = MaterialId(self.next_handle());
        self.materials.insert(
            material,
            MaterialRecord {
                package_len: package.len(),
            },
        );
        Ok(material)
    }

    fn create_material_instance(
        &mut self,
        material: MaterialId,
    ) -> Result<MaterialInstanceId, EngineError> {
        if !self.materials.contains_key(&material) {
            return Err(EngineError::InvalidMaterial(material));
        }
        let instance = MaterialInstanceId(self.next_handle());
        self.instances.insert(
            instance,
            InstanceRecord {
                material,
                parameters: AHashMap::new(),
            },
        );
        self.instance_order.push(instance);
        Ok(instance)
    }

    fn set_parameter(
        &mut self,
        instance: MaterialInstanceId,
        name: &str,
        value: MaterialParameter,
    ) -> Result<(), EngineError> {
        if let MaterialParameter::Texture { texture, .. } = value {
            if !self.textures.contains_key(&texture) {
                return Err(EngineError::InvalidTexture(texture));
            }
        }
        let record = self
            .instances
            .get_mut(&instance)
            .ok_or(EngineError::InvalidMaterialInstance(instance))?;
        record.parameters.insert(name.to_string(), value);
        Ok(())
    }

    fn create_texture(
        &mut self,
        descriptor: &TextureDescriptor,
    ) -> Result<TextureId, EngineError> {
        if descriptor.width == 0 || descriptor.height == 0 || descriptor.levels == 0 {
            return Err(EngineError::Backend(format!(
                "invalid texture descriptor {descriptor:?}"
            )));
        }
        let texture = TextureId(self.next_handle());
        self.textures.insert(
            texture,
            HeadlessTexture {
                descriptor: *descriptor,
                uploaded_bytes: None,
            },
        );
        Ok(texture)
    }

    fn upload_texture(
        &mut self,
        texture: TextureId,
        pixels: PixelBuffer,
    ) -> Result<(), EngineError> {
        let record = self
            .textures
            .get_mut(&texture)
            .ok_or(EngineError::InvalidTexture(texture))?;

        let descriptor = record.descriptor;
        if pixels.width() != descriptor.width
            || pixels.height() != descriptor.height
            || pixels.format() != descriptor.format
        {
            return Err(EngineError::TextureUploadFailed {
                texture,
                details: format!(
                    "buffer is {}x{} {:?}, texture is {}x{} {:?}",
                    pixels.width(),
                    pixels.height(),
                    pixels.format(),
                    descriptor.width,
                    descriptor.height,
                    descriptor.format
                ),
            });
        }
        if pixels.data().len() != pixels.expected_len() {
            return Err(EngineError::TextureUploadFailed {
                texture,
                details: format!(
                    "expected {} bytes, got {}",
                    pixels.expected_len(),
                    pixels.data().len()
                ),
            });
        }

        record.uploaded_bytes = Some(pixels.data().len());
        pixels.release();
        Ok(())
    }

    fn add_to_scene(&mut self, entity: EntityId) {
        if self.in_scene.insert(entity) {
            self.scene.push(entity);
        }
    }

    fn remove_from_scene(&mut self, entity: EntityId) {
        if self.in_scene.remove(&entity) {
            self.scene.retain(|e| *e != entity);
        }
    }

    fn scene_contains(&self, entity: EntityId) -> bool {
        self.in_scene.contains(&entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krysalis_core::math::Vec3;
    use krysalis_core::renderer::{MeshPrimitive, SamplerParams, TextureFormat};
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    fn descriptor(width: u32, height: u32) -> TextureDescriptor {
        TextureDescriptor {
            width,
            height,
            levels: 1,
            format: TextureFormat::Rgba8,
        }
    }

    #[test]
    fn test_destroy_removes_from_scene() {
        let mut engine = HeadlessEngine::new();
        let entity = engine.create_entity();
        engine.add_to_scene(entity);
        engine.add_to_scene(entity);
        assert_eq!(engine.scene_entities(), &[entity]);

        engine.destroy_entity(entity);
        assert!(!engine.is_alive(entity));
        assert!(!engine.scene_contains(entity));
    }

    #[test]
    fn test_scene_keeps_insertion_order_across_removals() {
        let mut engine = HeadlessEngine::new();
        let entities: Vec<_> = (0..64).map(|_| engine.create_entity()).collect();
        for &entity in &entities {
            engine.add_to_scene(entity);
        }
        engine.add_to_scene(entities[10]);
        engine.remove_from_scene(entities[1]);
        engine.remove_from_scene(entities[1]);

        assert_eq!(engine.scene_entities().len(), 63);
        assert_eq!(&engine.scene_entities()[..2], &[entities[0], entities[2]]);
        assert!(!engine.scene_contains(entities[1]));
        assert!(engine.scene_contains(entities[63]));

        engine.add_to_scene(entities[1]);
        assert_eq!(engine.scene_entities().last(), Some(&entities[1]));
    }

    #[test]
    fn test_second_light_is_rejected() {
        let mut engine = HeadlessEngine::new();
        let entity = engine.create_entity();
        let spec = LightBuildSpec::point(Vec3::ONE, 1.0, Some(5.0));
        engine.create_light(entity, &spec).unwrap();
        assert_eq!(
            engine.create_light(entity, &spec),
            Err(EngineError::ComponentAlreadyPresent {
                entity,
                component: "light"
            })
        );
    }

    #[test]
    fn test_set_transform_requires_component() {
        let mut engine = HeadlessEngine::new();
        let entity = engine.create_entity();
        assert!(engine.set_transform(entity, Mat4::IDENTITY).is_err());
        engine.create_transform(entity).unwrap();
        assert!(engine.set_transform(entity, Mat4::IDENTITY).is_ok());
        assert!(engine.create_transform(entity).is_err());
    }

    #[test]
    fn test_empty_package_fails() {
        let mut engine = HeadlessEngine::new();
        assert!(matches!(
            engine.load_material(&[]),
            Err(EngineError::MaterialCreationFailed(_))
        ));
    }

    #[test]
    fn test_upload_releases_buffer() {
        let mut engine = HeadlessEngine::new();
        let texture = engine.create_texture(&descriptor(2, 2)).unwrap();

        let released = Arc::new(AtomicBool::new(false));
        let flag = released.clone();
        let pixels = PixelBuffer::new(vec![255; 16], 2, 2, TextureFormat::Rgba8)
            .with_release_callback(move |_| flag.store(true, Ordering::SeqCst));

        engine.upload_texture(texture, pixels).unwrap();
        assert!(released.load(Ordering::SeqCst));
        assert_eq!(engine.texture(texture).unwrap().uploaded_bytes, Some(16));
    }

    #[test]
    fn test_short_upload_is_rejected_and_still_released() {
        let mut engine = HeadlessEngine::new();
        let texture = engine.create_texture(&descriptor(2, 2)).unwrap();

        let released = Arc::new(AtomicBool::new(false));
        let flag = released.clone();
        let pixels = PixelBuffer::new(vec![255; 12], 2, 2, TextureFormat::Rgba8)
            .with_release_callback(move |_| flag.store(true, Ordering::SeqCst));

        let err = engine.upload_texture(texture, pixels).unwrap_err();
        assert!(matches!(err, EngineError::TextureUploadFailed { .. }));
        assert!(released.load(Ordering::SeqCst));
        assert_eq!(engine.texture(texture).unwrap().uploaded_bytes, None);
    }

    #[test]
    fn test_texture_parameter_requires_live_texture() {
        let mut engine = HeadlessEngine::new();
        let material = engine.load_material(b"pkg").unwrap();
        let instance = engine.create_material_instance(material).unwrap();

        let value = MaterialParameter::Texture {
            texture: TextureId(999),
            sampler: SamplerParams::default(),
        };
        assert_eq!(
            engine.set_parameter(instance, "albedo", value),
            Err(EngineError::InvalidTexture(TextureId(999)))
        );
    }

    #[test]
    fn test_renderable_binds_slots() {
        let mut engine = HeadlessEngine::new();
        let material = engine.load_material(b"pkg").unwrap();
        let base = engine.create_material_instance(material).unwrap();
        let mut registry = MaterialRegistry::new();
        registry.register("Base", base);

        let mesh = CpuMesh {
            primitives: vec![
                MeshPrimitive {
                    material_name: Some("Base".to_string()),
                    positions: vec![Vec3::ZERO; 3],
                    indices: vec![0, 1, 2],
                    ..Default::default()
                },
                MeshPrimitive {
                    material_name: Some("Glass".to_string()),
                    positions: vec![Vec3::ZERO; 3],
                    indices: vec![0, 1, 2],
                    ..Default::default()
                },
            ],
        };

        let entity = engine.create_entity();
        engine.create_renderable(entity, &mesh, &registry).unwrap();

        let renderable = engine.renderable(entity).unwrap();
        assert_eq!(renderable.slots, [Some(base), None]);
        assert_eq!(renderable.vertex_count, 6);
        assert_eq!(renderable.index_count, 6);
    }
}
