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

//! Drives a whole scene load: read, parse, build, transform, publish, verify.

use super::builders::{build_light, build_mesh};
use super::{
    apply_transform, verify_components, IdentifierRegistry, SceneContext, SceneLoadError,
    VerificationReport,
};
use krysalis_core::{EntityId, RenderEngine, SceneObjectId};
use krysalis_data::scene::{ComponentDefinition, SceneDocument, SceneObjectDefinition};
use krysalis_io::BridgeConfig;

/// The scene document loaded when nothing else is configured.
pub const DEFAULT_SCENE_PATH: &str = "scenes/scene.json";

/// What a successful load produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneLoadReport {
    /// Every entity created, in document order. All of them are in the scene graph.
    pub entities: Vec<EntityId>,
    /// How many objects were added to the identifier registry.
    pub registered: usize,
    /// The `id` of every object whose identifier did not parse.
    pub invalid_ids: Vec<String>,
    /// Identifiers that were already registered; the earlier entity kept them.
    pub duplicate_ids: Vec<SceneObjectId>,
    /// The component check run after publishing.
    pub verification: VerificationReport,
}

/// The lane that turns a scene document into engine entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneLoaderLane {
    scene_path: String,
}

impl Default for SceneLoaderLane {
    fn default() -> Self {
        Self::new(DEFAULT_SCENE_PATH)
    }
}

impl SceneLoaderLane {
    /// Creates a lane that loads the document at `scene_path`, relative to the asset root.
    pub fn new(scene_path: impl Into<String>) -> Self {
        Self {
            scene_path: scene_path.into(),
        }
    }

    /// Creates a lane for the scene named in `config`.
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(config.scene_path.clone())
    }

    /// The configured scene document path.
    pub fn scene_path(&self) -> &str {
        &self.scene_path
    }

    /// Reads, parses and builds the configured scene document.
    pub fn load<E: RenderEngine + ?Sized>(
        &self,
        ctx: &mut SceneContext<'_, E>,
        registry: &mut IdentifierRegistry,
    ) -> Result<SceneLoadReport, SceneLoadError> {
        log::info!("Loading scene '{}'...", self.scene_path);
        let bytes = ctx
            .resolver
            .read(&self.scene_path)
            .map_err(|source| SceneLoadError::SceneFile {
                path: self.scene_path.clone(),
                source,
            })?;
        let document =
            SceneDocument::from_slice(&bytes).map_err(|source| SceneLoadError::Parse {
                path: self.scene_path.clone(),
                source,
            })?;
        load_document(ctx, registry, &document)
    }
}

/// Builds an already parsed document.
///
/// On error, every entity created by this call is removed from the scene graph
/// and destroyed before the error is returned; the registry is left untouched.
pub fn load_document<E: RenderEngine + ?Sized>(
    ctx: &mut SceneContext<'_, E>,
    registry: &mut IdentifierRegistry,
    document: &SceneDocument,
) -> Result<SceneLoadReport, SceneLoadError> {
    let mut created = Vec::with_capacity(document.objects.len());

    if let Err(e) = build_and_transform(ctx, document, &mut created) {
        log::error!("Scene load failed: {}", e.report());
        rollback(&mut *ctx.engine, &created);
        return Err(e);
    }

    let mut report = publish(&mut *ctx.engine, registry, document, created);
    report.verification = verify_components(&*ctx.engine, registry);

    log::info!(
        "Scene loaded: {} entities, {} registered, {} invalid id(s).",
        report.entities.len(),
        report.registered,
        report.invalid_ids.len()
    );
    Ok(report)
}

fn build_and_transform<E: RenderEngine + ?Sized>(
    ctx: &mut SceneContext<'_, E>,
    document: &SceneDocument,
    created: &mut Vec<EntityId>,
) -> Result<(), SceneLoadError> {
    // --- Build ---
    for (index, object) in document.objects.iter().enumerate() {
        let entity = ctx.engine.create_entity();
        created.push(entity);
        build_object(ctx, entity, object)?;
        log::debug!(
            "Built {} object #{} ('{}') as {}.",
            object.component.kind_name(),
            index,
            object.id,
            entity
        );
    }

    // --- Transform ---
    for (object, &entity) in document.objects.iter().zip(created.iter()) {
        apply_transform(&mut *ctx.engine, entity, &object.transform).map_err(|source| {
            SceneLoadError::Engine {
                operation: format!("Failed to apply the transform of '{}' to {}", object.id, entity),
                source,
            }
        })?;
    }
    Ok(())
}

fn build_object<E: RenderEngine + ?Sized>(
    ctx: &mut SceneContext<'_, E>,
    entity: EntityId,
    object: &SceneObjectDefinition,
) -> Result<(), SceneLoadError> {
    match &object.component {
        ComponentDefinition::Light(light) => {
            let spec = build_light(light);
            ctx.engine
                .create_light(entity, &spec)
                .map_err(|source| SceneLoadError::Engine {
                    operation: format!("Failed to create the light of '{}'", object.id),
                    source,
                })
        }
        ComponentDefinition::Mesh(mesh) => build_mesh(ctx, entity, mesh).map(|_| ()),
    }
}

fn publish<E: RenderEngine + ?Sized>(
    engine: &mut E,
    registry: &mut IdentifierRegistry,
    document: &SceneDocument,
    entities: Vec<EntityId>,
) -> SceneLoadReport {
    let mut report = SceneLoadReport::default();

    for (index, (object, &entity)) in document.objects.iter().zip(entities.iter()).enumerate() {
        engine.add_to_scene(entity);

        match object.parsed_id() {
            Ok(id) => match registry.register(id, entity) {
                Ok(()) => report.registered += 1,
                Err(existing) => {
                    log::warn!(
                        "Identifier {} of object #{} is already registered to {}; {} stays unregistered.",
                        id,
                        index,
                        existing,
                        entity
                    );
                    report.duplicate_ids.push(id);
                }
            },
            Err(e) => {
                log::warn!(
                    "Object #{} has an invalid id '{}' ({}); {} is in the scene but not registered.",
                    index,
                    object.id,
                    e,
                    entity
                );
                report.invalid_ids.push(object.id.clone());
            }
        }
    }

    report.entities = entities;
    report
}

fn rollback<E: RenderEngine + ?Sized>(engine: &mut E, created: &[EntityId]) {
    for &entity in created.iter().rev() {
        engine.remove_from_scene(entity);
        engine.destroy_entity(entity);
    }
    log::warn!("Rolled back {} entities created by the failed load.", created.len());
}
