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

use super::bind_material;
use crate::asset_lane::MaterialLibraryResolver;
use crate::scene_lane::{SceneContext, SceneLoadError};
use krysalis_core::renderer::MaterialRegistry;
use krysalis_core::{EntityId, RenderEngine};
use krysalis_data::scene::MeshDefinition;
use krysalis_io::{asset::normalize_reference, AssetError, AssetResolver};
use std::error::Error;

/// Resolves `mtllib` names relative to the directory of the mesh file.
struct SiblingLibraries<'a> {
    resolver: &'a AssetResolver,
    directory: String,
}

impl<'a> SiblingLibraries<'a> {
    fn for_mesh(resolver: &'a AssetResolver, mesh_uri: &str) -> Self {
        let normalized = normalize_reference(mesh_uri);
        let directory = match normalized.rfind('/') {
            Some(split) => normalized[..=split].to_string(),
            None => String::new(),
        };
        Self {
            resolver,
            directory,
        }
    }
}

impl MaterialLibraryResolver for SiblingLibraries<'_> {
    fn resolve_library(&self, name: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        let reference = format!("{}{}", self.directory, normalize_reference(name));
        Ok(self.resolver.read(&reference)?)
    }
}

/// Attaches a renderable built from a mesh definition to `entity`.
///
/// Every material is bound and registered under its `materialName` first; the
/// mesh is then decoded and each primitive slot bound to the registry entry of
/// the same name. A slot without a matching entry gets the engine's default
/// material.
pub fn build_mesh<E: RenderEngine + ?Sized>(
    ctx: &mut SceneContext<'_, E>,
    entity: EntityId,
    definition: &MeshDefinition,
) -> Result<EntityId, SceneLoadError> {
    let mut materials = MaterialRegistry::new();
    for material in &definition.materials {
        let instance = bind_material(ctx, material)?;
        if materials
            .register(material.material_name.as_str(), instance)
            .is_some()
        {
            log::warn!(
                "Material name '{}' is declared twice for mesh '{}'; the last declaration is used.",
                material.material_name,
                definition.mesh_uri
            );
        }
    }

    let uri = definition.mesh_uri.as_str();
    let bytes = ctx
        .resolver
        .read(uri)
        .map_err(SceneLoadError::asset("mesh", uri))?;
    let libraries = SiblingLibraries::for_mesh(ctx.resolver, uri);
    let mesh = ctx
        .meshes
        .load_with_libraries(&bytes, &libraries)
        .map_err(|source| SceneLoadError::Asset {
            kind: "mesh",
            uri: uri.to_string(),
            source: AssetError::Decode {
                reference: uri.to_string(),
                source,
            },
        })?;

    for slot in mesh.material_slots() {
        if materials.resolve_slot(slot).is_none() {
            log::warn!(
                "Mesh '{}' has no material for slot '{}'; the engine default is used.",
                uri,
                slot.unwrap_or("<unnamed>")
            );
        }
    }

    ctx.engine
        .create_renderable(entity, &mesh, &materials)
        .map_err(|source| SceneLoadError::Engine {
            operation: format!("Failed to create a renderable from '{uri}' for {entity}"),
            source,
        })?;

    log::debug!(
        "Built mesh '{}' for {}: {} primitive(s), {} vertices, {} material(s).",
        uri,
        entity,
        mesh.primitives.len(),
        mesh.vertex_count(),
        materials.len()
    );
    Ok(entity)
}
