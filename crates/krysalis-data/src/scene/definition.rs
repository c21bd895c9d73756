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

//! Defines the serde representation of a JSON scene document.
//!
//! Field names follow the on-disk format (`lightType`, `meshURI`, ...). Object
//! kinds and parameter types are closed enums: an unknown `type` tag fails the
//! parse instead of producing an empty entity.

use krysalis_core::SceneObjectId;
use serde::{Deserialize, Serialize};

/// The root of a scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// The scene objects, in document order.
    pub objects: Vec<SceneObjectDefinition>,
}

/// A single object of the scene: an identifier, one component and a transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObjectDefinition {
    /// The external identifier. Expected to be a UUID, but kept as written so an
    /// unparseable id can be reported without failing the document.
    pub id: String,
    /// The component, selected by the object's `type` tag.
    #[serde(flatten)]
    pub component: ComponentDefinition,
    /// Where the object sits in the world.
    pub transform: TransformDefinition,
}

impl SceneObjectDefinition {
    /// Parses the object's `id` as a [`SceneObjectId`].
    pub fn parsed_id(&self) -> Result<SceneObjectId, uuid::Error> {
        SceneObjectId::parse(&self.id)
    }
}

/// The kind-specific payload of a scene object.
///
/// Serialized as `"type": "<kind>", "component": { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "component", rename_all = "lowercase")]
pub enum ComponentDefinition {
    /// A light source.
    Light(LightDefinition),
    /// A mesh with its materials.
    Mesh(MeshDefinition),
}

impl ComponentDefinition {
    /// Returns the `type` tag as written in documents.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ComponentDefinition::Light(_) => "light",
            ComponentDefinition::Mesh(_) => "mesh",
        }
    }
}

/// The variant of a light source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightTypeDefinition {
    /// A sun-like light with parallel rays.
    Directional,
    /// A local light with a falloff radius.
    Point,
}

/// The payload of a `light` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightDefinition {
    /// Directional or point.
    pub light_type: LightTypeDefinition,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Intensity multiplier.
    pub intensity: f32,
    /// Falloff radius. Required for point lights, ignored for directional ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub falloff: Option<f32>,
    /// Whether the light casts shadows.
    #[serde(default)]
    pub cast_shadows: bool,
}

/// The payload of a `mesh` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDefinition {
    /// Relative path of the mesh file.
    #[serde(rename = "meshURI")]
    pub mesh_uri: String,
    /// One material per primitive slot, in document order.
    #[serde(default)]
    pub materials: Vec<MaterialDefinition>,
}

/// A material instance to create and register for a mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDefinition {
    /// Relative path of the compiled shader package.
    #[serde(rename = "materialURI")]
    pub material_uri: String,
    /// The name mesh primitives use to refer to this material.
    #[serde(rename = "materialName")]
    pub material_name: String,
    /// Parameter values to set on the instance, in order.
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
}

/// A named, typed material parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// The parameter name declared by the shader package.
    pub name: String,
    /// The typed value, selected by the parameter's `type` tag.
    #[serde(flatten)]
    pub value: ParameterValueDefinition,
}

/// The value of a material parameter.
///
/// Serialized as `"type": "<kind>", "value": ...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ParameterValueDefinition {
    /// A scalar.
    #[serde(rename = "float")]
    Float(f32),
    /// A 3-component vector.
    #[serde(rename = "float3")]
    Float3([f32; 3]),
    /// A 4-component vector.
    #[serde(rename = "float4")]
    Float4([f32; 4]),
    /// Relative path of an image file, bound as a 2D texture.
    #[serde(rename = "sampler2d")]
    Sampler2d(String),
}

/// Position, rotation and scale of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformDefinition {
    /// Translation.
    pub position: [f32; 3],
    /// Axis-angle rotation, written as `[angleDegrees, axisX, axisY, axisZ]`.
    pub rotation: RotationDefinition,
    /// Per-axis scale.
    pub scale: [f32; 3],
}

impl Default for TransformDefinition {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: RotationDefinition::default(),
            scale: [1.0; 3],
        }
    }
}

/// An axis-angle rotation with the angle in degrees, as stored in documents.
///
/// Conversion to radians happens once, when the transform matrix is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct RotationDefinition {
    /// The rotation angle in degrees.
    pub angle_degrees: f32,
    /// The rotation axis. Need not be normalized.
    pub axis: [f32; 3],
}

impl Default for RotationDefinition {
    fn default() -> Self {
        Self {
            angle_degrees: 0.0,
            axis: [0.0, 1.0, 0.0],
        }
    }
}

impl From<[f32; 4]> for RotationDefinition {
    fn from(v: [f32; 4]) -> Self {
        Self {
            angle_degrees: v[0],
            axis: [v[1], v[2], v[3]],
        }
    }
}

impl From<RotationDefinition> for [f32; 4] {
    fn from(r: RotationDefinition) -> Self {
        [r.angle_degrees, r.axis[0], r.axis[1], r.axis[2]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_light_object_deserializes() {
        let value = json!({
            "id": "22222222-2222-2222-2222-222222222222",
            "type": "light",
            "component": {
                "lightType": "point",
                "color": [1.0, 0.5, 0.25],
                "intensity": 100000,
                "falloff": 10.0,
                "castShadows": true
            },
            "transform": { "position": [0, 3, 0], "rotation": [0, 0, 1, 0], "scale": [1, 1, 1] }
        });

        let object: SceneObjectDefinition = serde_json::from_value(value).unwrap();
        let ComponentDefinition::Light(light) = &object.component else {
            panic!("expected a light component");
        };
        assert_eq!(light.light_type, LightTypeDefinition::Point);
        assert_eq!(light.intensity, 100000.0);
        assert_eq!(light.falloff, Some(10.0));
        assert!(light.cast_shadows);
        assert_eq!(object.transform.position, [0.0, 3.0, 0.0]);
    }

    #[test]
    fn test_cast_shadows_defaults_to_false() {
        let light: LightDefinition = serde_json::from_value(json!({
            "lightType": "directional",
            "color": [1, 1, 1],
            "intensity": 1.0
        }))
        .unwrap();
        assert!(!light.cast_shadows);
        assert_eq!(light.falloff, None);
    }

    #[test]
    fn test_parameters_keep_their_types() {
        let material: MaterialDefinition = serde_json::from_value(json!({
            "materialURI": "materials/lit.filamat",
            "materialName": "Base",
            "parameters": [
                { "name": "roughness", "type": "float", "value": 0.4 },
                { "name": "tint", "type": "float3", "value": [0.1, 0.2, 0.3] },
                { "name": "baseColor", "type": "float4", "value": [1, 0, 0, 1] },
                { "name": "albedo", "type": "sampler2d", "value": "textures/albedo.png" }
            ]
        }))
        .unwrap();

        let values: Vec<_> = material.parameters.iter().map(|p| &p.value).collect();
        assert_eq!(values[0], &ParameterValueDefinition::Float(0.4));
        assert_eq!(values[1], &ParameterValueDefinition::Float3([0.1, 0.2, 0.3]));
        assert_eq!(values[2], &ParameterValueDefinition::Float4([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(
            values[3],
            &ParameterValueDefinition::Sampler2d("textures/albedo.png".to_string())
        );
    }

    #[test]
    fn test_unknown_object_type_is_rejected() {
        let result = serde_json::from_value::<SceneObjectDefinition>(json!({
            "id": "x",
            "type": "camera",
            "component": {},
            "transform": { "position": [0, 0, 0], "rotation": [0, 0, 1, 0], "scale": [1, 1, 1] }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_rotation_requires_four_components() {
        let result = serde_json::from_value::<TransformDefinition>(json!({
            "position": [0, 0, 0],
            "rotation": [0, 45, 0],
            "scale": [1, 1, 1]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_rotation_layout() {
        let rotation: RotationDefinition = serde_json::from_value(json!([90, 0, 0, 1])).unwrap();
        assert_eq!(rotation.angle_degrees, 90.0);
        assert_eq!(rotation.axis, [0.0, 0.0, 1.0]);
    }
}
