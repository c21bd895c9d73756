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

use krysalis_core::math::Vec3;
use krysalis_core::renderer::LightBuildSpec;
use krysalis_data::scene::{LightDefinition, LightTypeDefinition};

/// Translates a light definition into the engine's light parameters.
///
/// Falloff is carried only by point lights; a `falloff` written on a
/// directional light is ignored.
pub fn build_light(definition: &LightDefinition) -> LightBuildSpec {
    let color = Vec3::from(definition.color);
    let spec = match definition.light_type {
        LightTypeDefinition::Directional => {
            LightBuildSpec::directional(color, definition.intensity)
        }
        LightTypeDefinition::Point => {
            LightBuildSpec::point(color, definition.intensity, definition.falloff)
        }
    };
    spec.with_shadows(definition.cast_shadows)
}
