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

use krysalis_data::scene::{
    ComponentDefinition, LightTypeDefinition, ParameterValueDefinition, SceneDocument,
    SceneParseError,
};

const SCENE: &str = r#"{
    "objects": [
        {
            "id": "11111111-1111-1111-1111-111111111111",
            "type": "mesh",
            "component": {
                "meshURI": "meshes\\cube.obj",
                "materials": [
                    {
                        "materialURI": "materials/lit.filamat",
                        "materialName": "Base",
                        "parameters": [
                            { "name": "roughness", "type": "float", "value": 0.4 }
                        ]
                    }
                ]
            },
            "transform": { "position": [1, 2, 3], "rotation": [90, 0, 1, 0], "scale": [2, 2, 2] }
        },
        {
            "id": "sun",
            "type": "light",
            "component": { "lightType": "directional", "color": [1, 1, 0.9], "intensity": 110000 },
            "transform": { "position": [0, 0, 0], "rotation": [0, 0, 1, 0], "scale": [1, 1, 1] }
        }
    ]
}"#;

#[test]
fn test_full_document_parses_in_order() {
    let document = SceneDocument::from_json_str(SCENE).unwrap();
    assert_eq!(document.objects.len(), 2);

    let mesh_object = &document.objects[0];
    assert!(mesh_object.parsed_id().is_ok());
    let ComponentDefinition::Mesh(mesh) = &mesh_object.component else {
        panic!("first object should be a mesh");
    };
    assert_eq!(mesh.mesh_uri, "meshes\\cube.obj");
    assert_eq!(mesh.materials[0].material_name, "Base");
    assert_eq!(
        mesh.materials[0].parameters[0].value,
        ParameterValueDefinition::Float(0.4)
    );
    assert_eq!(mesh_object.transform.rotation.angle_degrees, 90.0);
    assert_eq!(mesh_object.transform.scale, [2.0, 2.0, 2.0]);

    let light_object = &document.objects[1];
    assert!(light_object.parsed_id().is_err());
    assert_eq!(light_object.component.kind_name(), "light");
    let ComponentDefinition::Light(light) = &light_object.component else {
        panic!("second object should be a light");
    };
    assert_eq!(light.light_type, LightTypeDefinition::Directional);
    assert_eq!(light.falloff, None);
    assert!(!light.cast_shadows);
}

#[test]
fn test_truncated_json_is_rejected() {
    let truncated = &SCENE[..SCENE.len() / 2];
    assert!(matches!(
        SceneDocument::from_json_str(truncated),
        Err(SceneParseError::Json(_))
    ));
}

#[test]
fn test_missing_transform_is_rejected() {
    let text = r#"{ "objects": [ { "id": "x", "type": "light",
        "component": { "lightType": "directional", "color": [1, 1, 1], "intensity": 1 } } ] }"#;
    assert!(SceneDocument::from_json_str(text).is_err());
}
