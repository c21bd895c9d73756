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

//! CPU-side mesh geometry, as decoded from a mesh file.

use crate::math::Vec3;

/// One drawable piece of a mesh, rendered with a single material.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshPrimitive {
    /// The material the primitive expects, looked up in a
    /// [`MaterialRegistry`](super::MaterialRegistry) by name.
    pub material_name: Option<String>,
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals, empty when the file has none.
    pub normals: Vec<Vec3>,
    /// Vertex texture coordinates, empty when the file has none.
    pub tex_coords: Vec<[f32; 2]>,
    /// Triangle list indices into the vertex arrays.
    pub indices: Vec<u32>,
}

/// Decoded mesh geometry, one primitive per material slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CpuMesh {
    /// The primitives in file order.
    pub primitives: Vec<MeshPrimitive>,
}

impl CpuMesh {
    /// Returns the material names the primitives expect, in primitive order.
    pub fn material_slots(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.primitives.iter().map(|p| p.material_name.as_deref())
    }

    /// Returns the total number of vertices across all primitives.
    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(|p| p.positions.len()).sum()
    }
}
