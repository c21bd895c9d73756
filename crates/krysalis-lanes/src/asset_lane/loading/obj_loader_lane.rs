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

//! Defines a lane for loading OBJ mesh assets.

use super::AssetLoaderLane;
use ahash::AHashMap;
use anyhow::Context;
use krysalis_core::{
    math::Vec3,
    renderer::{CpuMesh, MeshPrimitive},
};
use std::error::Error;
use std::io::Cursor;
use std::path::Path;

/// Resolves the material libraries (`mtllib`) an OBJ file refers to.
pub trait MaterialLibraryResolver {
    /// Returns the raw contents of the material library named `name`.
    fn resolve_library(&self, name: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>>;
}

/// A resolver that knows no material libraries.
///
/// Primitives decoded with it carry no material name.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMaterialLibraries;

impl MaterialLibraryResolver for NoMaterialLibraries {
    fn resolve_library(&self, name: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        Err(format!("no material library resolver available for '{name}'").into())
    }
}

/// Lane for loading OBJ mesh assets.
///
/// Every OBJ model becomes one primitive. A primitive's material name is the
/// name of the `usemtl` material it was declared with, when that material is
/// defined in a library the resolver can provide.
#[derive(Clone, Debug, Default)]
pub struct ObjLoaderLane;

impl ObjLoaderLane {
    /// Decodes an OBJ file, reading its material libraries through `libraries`.
    pub fn load_with_libraries(
        &self,
        bytes: &[u8],
        libraries: &dyn MaterialLibraryResolver,
    ) -> Result<CpuMesh, Box<dyn Error + Send + Sync>> {
        let obj_text = std::str::from_utf8(bytes).context("OBJ file is not valid UTF-8")?;

        let (models, materials) = tobj::load_obj_buf(
            &mut Cursor::new(obj_text),
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
            |library: &Path| {
                let name = library.to_string_lossy();
                match libraries.resolve_library(&name) {
                    Ok(mtl) => tobj::load_mtl_buf(&mut Cursor::new(mtl)),
                    Err(e) => {
                        log::warn!("Material library '{}' unavailable: {}", name, e);
                        Ok((Vec::new(), AHashMap::new()))
                    }
                }
            },
        )
        .context("Failed to parse OBJ file")?;

        if models.is_empty() {
            return Err("No models found in OBJ file".into());
        }
        // tobj accepts arbitrary text as a single empty model.
        if !models
            .iter()
            .any(|model| !model.mesh.positions.is_empty() && !model.mesh.indices.is_empty())
        {
            return Err("OBJ file contains no geometry".into());
        }

        let materials = materials.unwrap_or_else(|e| {
            log::warn!("Ignoring OBJ material libraries: {}", e);
            Vec::new()
        });

        let primitives = models
            .into_iter()
            .map(|model| {
                let mesh = model.mesh;
                let material_name = mesh
                    .material_id
                    .and_then(|id| materials.get(id))
                    .map(|material| material.name.clone());

                MeshPrimitive {
                    material_name,
                    positions: mesh
                        .positions
                        .chunks_exact(3)
                        .map(|v| Vec3::new(v[0], v[1], v[2]))
                        .collect(),
                    normals: mesh
                        .normals
                        .chunks_exact(3)
                        .map(|n| Vec3::new(n[0], n[1], n[2]))
                        .collect(),
                    tex_coords: mesh
                        .texcoords
                        .chunks_exact(2)
                        .map(|t| [t[0], t[1]])
                        .collect(),
                    indices: mesh.indices,
                }
            })
            .collect();

        Ok(CpuMesh { primitives })
    }
}

impl AssetLoaderLane<CpuMesh> for ObjLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<CpuMesh, Box<dyn Error + Send + Sync>> {
        self.load_with_libraries(bytes, &NoMaterialLibraries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
o Quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1 4//1
";

    struct InlineLibrary(&'static str);

    impl MaterialLibraryResolver for InlineLibrary {
        fn resolve_library(&self, _name: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_quad_is_triangulated() {
        let mesh = ObjLoaderLane.load(QUAD.as_bytes()).unwrap();
        assert_eq!(mesh.primitives.len(), 1);

        let primitive = &mesh.primitives[0];
        assert_eq!(primitive.indices.len(), 6);
        assert_eq!(primitive.positions.len(), primitive.normals.len());
        assert_eq!(primitive.material_name, None);
    }

    #[test]
    fn test_usemtl_names_come_from_library() {
        let obj = "\
mtllib quad.mtl
o Quad
v 0 0 0
v 1 0 0
v 1 1 0
usemtl Base
f 1 2 3
";
        let mesh = ObjLoaderLane
            .load_with_libraries(obj.as_bytes(), &InlineLibrary("newmtl Base\nKd 1 1 1\n"))
            .unwrap();
        let slots: Vec<_> = mesh.material_slots().collect();
        assert_eq!(slots, [Some("Base")]);
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert!(ObjLoaderLane.load(b"# nothing here\n").is_err());
    }

    #[test]
    fn test_text_without_geometry_is_rejected() {
        let err = ObjLoaderLane
            .load(b"this is not a mesh at all")
            .unwrap_err();
        assert_eq!(err.to_string(), "OBJ file contains no geometry");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        assert!(ObjLoaderLane.load(&[0xff, 0xfe, 0x00]).is_err());
    }
}
