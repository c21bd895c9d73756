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

use crate::asset_lane::AssetLoaderLane;
use crate::scene_lane::{SceneContext, SceneLoadError};
use krysalis_core::math::{Vec3, Vec4};
use krysalis_core::renderer::{
    MaterialId, MaterialInstanceId, MaterialParameter, SamplerParams, TextureId,
};
use krysalis_core::RenderEngine;
use krysalis_data::scene::{MaterialDefinition, ParameterValueDefinition};
use krysalis_io::AssetError;

/// Creates a material instance from its definition and sets every parameter.
///
/// Shader packages are loaded once per URI and context. Parameters are set in
/// document order; textures are bound with the default sampler.
pub fn bind_material<E: RenderEngine + ?Sized>(
    ctx: &mut SceneContext<'_, E>,
    definition: &MaterialDefinition,
) -> Result<MaterialInstanceId, SceneLoadError> {
    let uri = definition.material_uri.as_str();
    let material = load_material(ctx, uri)?;
    let instance = ctx
        .engine
        .create_material_instance(material)
        .map_err(|source| SceneLoadError::Engine {
            operation: format!("Failed to create an instance of material '{uri}'"),
            source,
        })?;

    for parameter in &definition.parameters {
        let value = match &parameter.value {
            ParameterValueDefinition::Float(v) => MaterialParameter::Float(*v),
            ParameterValueDefinition::Float3(v) => MaterialParameter::Float3(Vec3::from(*v)),
            ParameterValueDefinition::Float4(v) => MaterialParameter::Float4(Vec4::from(*v)),
            ParameterValueDefinition::Sampler2d(path) => MaterialParameter::Texture {
                texture: upload_texture(ctx, path)?,
                sampler: SamplerParams::default(),
            },
        };
        ctx.engine
            .set_parameter(instance, &parameter.name, value)
            .map_err(|source| SceneLoadError::Engine {
                operation: format!(
                    "Failed to set parameter '{}' on material '{}'",
                    parameter.name, definition.material_name
                ),
                source,
            })?;
    }

    log::debug!(
        "Bound material '{}' from '{}' with {} parameter(s).",
        definition.material_name,
        uri,
        definition.parameters.len()
    );
    Ok(instance)
}

fn load_material<E: RenderEngine + ?Sized>(
    ctx: &mut SceneContext<'_, E>,
    uri: &str,
) -> Result<MaterialId, SceneLoadError> {
    if let Some(material) = ctx.cached_material(uri) {
        return Ok(material);
    }

    let package = ctx
        .resolver
        .read(uri)
        .map_err(SceneLoadError::asset("material", uri))?;
    if package.is_empty() {
        return Err(SceneLoadError::EmptyAsset {
            kind: "material",
            uri: uri.to_string(),
        });
    }

    let material = ctx
        .engine
        .load_material(&package)
        .map_err(|source| SceneLoadError::Engine {
            operation: format!("Failed to create material from '{uri}'"),
            source,
        })?;
    ctx.cache_material(uri, material);
    Ok(material)
}

/// Decodes an image file to RGBA8 and uploads it as a single-level texture.
///
/// The decoded pixels move into the engine together with a release callback;
/// they are freed once the engine has consumed them.
pub fn upload_texture<E: RenderEngine + ?Sized>(
    ctx: &mut SceneContext<'_, E>,
    uri: &str,
) -> Result<TextureId, SceneLoadError> {
    let bytes = ctx
        .resolver
        .read(uri)
        .map_err(SceneLoadError::asset("texture", uri))?;
    let image = ctx
        .textures
        .load(&bytes)
        .map_err(|source| SceneLoadError::Asset {
            kind: "texture",
            uri: uri.to_string(),
            source: AssetError::Decode {
                reference: uri.to_string(),
                source,
            },
        })?;

    let texture = ctx
        .engine
        .create_texture(&image.descriptor())
        .map_err(|source| SceneLoadError::Engine {
            operation: format!("Failed to create texture for '{uri}'"),
            source,
        })?;

    let reference = uri.to_string();
    let pixels = image.into_pixel_buffer().with_release_callback(move |data| {
        log::trace!("Released {} bytes of pixel data for '{}'.", data.len(), reference);
    });
    ctx.engine
        .upload_texture(texture, pixels)
        .map_err(|source| SceneLoadError::Engine {
            operation: format!("Failed to upload texture '{uri}'"),
            source,
        })?;

    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use krysalis_data::scene::ParameterDefinition;
    use krysalis_infra::HeadlessEngine;
    use krysalis_io::AssetResolver;
    use std::fs;

    fn material(parameters: Vec<ParameterDefinition>) -> MaterialDefinition {
        MaterialDefinition {
            material_uri: "materials/lit.filamat".to_string(),
            material_name: "Base".to_string(),
            parameters,
        }
    }

    fn parameter(name: &str, value: ParameterValueDefinition) -> ParameterDefinition {
        ParameterDefinition {
            name: name.to_string(),
            value,
        }
    }

    fn asset_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("materials")).unwrap();
        fs::write(dir.path().join("materials/lit.filamat"), b"FILAMAT").unwrap();
        dir
    }

    #[test]
    fn test_vector_parameters_keep_component_order() {
        let dir = asset_root();
        let resolver = AssetResolver::new(dir.path());
        let mut engine = HeadlessEngine::new();
        let mut ctx = SceneContext::new(&mut engine, &resolver);

        let instance = bind_material(
            &mut ctx,
            &material(vec![
                parameter("roughness", ParameterValueDefinition::Float(0.4)),
                parameter("tint", ParameterValueDefinition::Float3([0.1, 0.2, 0.3])),
                parameter("baseColor", ParameterValueDefinition::Float4([0.5, 0.6, 0.7, 0.8])),
            ]),
        )
        .unwrap();

        assert_eq!(
            engine.parameter(instance, "roughness"),
            Some(MaterialParameter::Float(0.4))
        );
        assert_eq!(
            engine.parameter(instance, "tint"),
            Some(MaterialParameter::Float3(Vec3::new(0.1, 0.2, 0.3)))
        );
        assert_eq!(
            engine.parameter(instance, "baseColor"),
            Some(MaterialParameter::Float4(Vec4::new(0.5, 0.6, 0.7, 0.8)))
        );
    }

    #[test]
    fn test_package_is_loaded_once_per_uri() {
        let dir = asset_root();
        let resolver = AssetResolver::new(dir.path());
        let mut engine = HeadlessEngine::new();
        let mut ctx = SceneContext::new(&mut engine, &resolver);

        let a = bind_material(&mut ctx, &material(vec![])).unwrap();
        let b = bind_material(&mut ctx, &material(vec![])).unwrap();

        assert_ne!(a, b);
        assert_eq!(engine.material_count(), 1);
        let material = engine.material_of(a).unwrap();
        assert_eq!(engine.material_of(b), Some(material));
        assert_eq!(engine.material_package_size(material), Some(b"FILAMAT".len()));
    }

    #[test]
    fn test_empty_package_is_fatal() {
        let dir = asset_root();
        fs::write(dir.path().join("materials/lit.filamat"), b"").unwrap();
        let resolver = AssetResolver::new(dir.path());
        let mut engine = HeadlessEngine::new();
        let mut ctx = SceneContext::new(&mut engine, &resolver);

        let err = bind_material(&mut ctx, &material(vec![])).unwrap_err();
        assert!(matches!(err, SceneLoadError::EmptyAsset { kind: "material", .. }));
    }

    #[test]
    fn test_undecodable_texture_is_fatal() {
        let dir = asset_root();
        fs::create_dir_all(dir.path().join("textures")).unwrap();
        fs::write(dir.path().join("textures/broken.png"), b"not a png").unwrap();
        let resolver = AssetResolver::new(dir.path());
        let mut engine = HeadlessEngine::new();
        let mut ctx = SceneContext::new(&mut engine, &resolver);

        let err = bind_material(
            &mut ctx,
            &material(vec![parameter(
                "albedo",
                ParameterValueDefinition::Sampler2d("textures/broken.png".to_string()),
            )]),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Failed to load texture 'textures/broken.png'");
    }
}
