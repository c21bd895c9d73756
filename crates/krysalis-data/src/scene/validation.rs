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

//! Parsing and structural validation of scene documents.
//!
//! Serde rejects malformed JSON, a missing `objects` root, unknown `type` tags
//! and missing required fields. The checks here cover what the schema cannot
//! express on its own.

use super::definition::{
    ComponentDefinition, LightDefinition, LightTypeDefinition, MaterialDefinition,
    MeshDefinition, ParameterValueDefinition, SceneDocument, SceneObjectDefinition,
};
use thiserror::Error;

/// Result type alias for scene document parsing.
pub type Result<T> = std::result::Result<T, SceneParseError>;

/// Errors raised while turning bytes into a validated [`SceneDocument`].
#[derive(Error, Debug)]
pub enum SceneParseError {
    /// The input is not a well-formed scene document.
    #[error("Malformed scene document: {0}")]
    Json(#[from] serde_json::Error),

    /// An object parsed but violates a structural rule.
    #[error("Invalid scene object #{index} (id '{id}'): {reason}")]
    InvalidObject {
        /// Position of the object in the document.
        index: usize,
        /// The object's `id`, as written.
        id: String,
        /// What is wrong with the object.
        reason: String,
    },
}

impl SceneDocument {
    /// Parses and validates a scene document from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let document: SceneDocument = serde_json::from_slice(bytes)?;
        document.validate()?;
        log::debug!(
            "Parsed scene document with {} object(s).",
            document.objects.len()
        );
        Ok(document)
    }

    /// Parses and validates a scene document from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_slice(text.as_bytes())
    }

    /// Checks every object against the rules serde cannot enforce.
    pub fn validate(&self) -> Result<()> {
        for (index, object) in self.objects.iter().enumerate() {
            object
                .check()
                .map_err(|reason| SceneParseError::InvalidObject {
                    index,
                    id: object.id.clone(),
                    reason,
                })?;
        }
        Ok(())
    }
}

impl SceneObjectDefinition {
    fn check(&self) -> std::result::Result<(), String> {
        match &self.component {
            ComponentDefinition::Light(light) => check_light(light),
            ComponentDefinition::Mesh(mesh) => check_mesh(mesh),
        }
    }
}

fn check_light(light: &LightDefinition) -> std::result::Result<(), String> {
    if light.light_type == LightTypeDefinition::Point && light.falloff.is_none() {
        return Err("point light requires a 'falloff'".to_string());
    }
    Ok(())
}

fn check_mesh(mesh: &MeshDefinition) -> std::result::Result<(), String> {
    if mesh.mesh_uri.trim().is_empty() {
        return Err("'meshURI' is empty".to_string());
    }
    mesh.materials.iter().try_for_each(check_material)
}

fn check_material(material: &MaterialDefinition) -> std::result::Result<(), String> {
    if material.material_uri.trim().is_empty() {
        return Err(format!(
            "material '{}' has an empty 'materialURI'",
            material.material_name
        ));
    }
    for parameter in &material.parameters {
        if let ParameterValueDefinition::Sampler2d(path) = &parameter.value {
            if path.trim().is_empty() {
                return Err(format!(
                    "parameter '{}' of material '{}' has an empty texture path",
                    parameter.name, material.material_name
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY_TRANSFORM: &str =
        r#""transform": { "position": [0, 0, 0], "rotation": [0, 0, 1, 0], "scale": [1, 1, 1] }"#;

    fn light_document(component: &str) -> String {
        format!(
            r#"{{ "objects": [ {{ "id": "a", "type": "light", "component": {component}, {IDENTITY_TRANSFORM} }} ] }}"#
        )
    }

    #[test]
    fn test_point_light_without_falloff_is_rejected() {
        let text = light_document(r#"{ "lightType": "point", "color": [1, 1, 1], "intensity": 1 }"#);
        let err = SceneDocument::from_json_str(&text).unwrap_err();
        match err {
            SceneParseError::InvalidObject { index, id, reason } => {
                assert_eq!(index, 0);
                assert_eq!(id, "a");
                assert!(reason.contains("falloff"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_directional_light_without_falloff_is_accepted() {
        let text =
            light_document(r#"{ "lightType": "directional", "color": [1, 1, 1], "intensity": 1 }"#);
        let document = SceneDocument::from_json_str(&text).unwrap();
        assert_eq!(document.objects.len(), 1);
    }

    #[test]
    fn test_missing_objects_root_is_a_json_error() {
        let err = SceneDocument::from_json_str(r#"{ "entities": [] }"#).unwrap_err();
        assert!(matches!(err, SceneParseError::Json(_)));
    }

    #[test]
    fn test_empty_mesh_uri_is_rejected() {
        let text = format!(
            r#"{{ "objects": [ {{ "id": "m", "type": "mesh", "component": {{ "meshURI": " " }}, {IDENTITY_TRANSFORM} }} ] }}"#
        );
        let err = SceneDocument::from_json_str(&text).unwrap_err();
        assert!(err.to_string().contains("meshURI"));
    }

    #[test]
    fn test_empty_document_is_valid() {
        let document = SceneDocument::from_json_str(r#"{ "objects": [] }"#).unwrap();
        assert!(document.objects.is_empty());
    }
}
