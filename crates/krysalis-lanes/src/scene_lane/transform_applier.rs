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

use krysalis_core::math::{degrees_to_radians, Mat4, Vec3};
use krysalis_core::{EngineError, EntityId, RenderEngine};
use krysalis_data::scene::TransformDefinition;

/// Composes a definition into a single local transform, `T * R * S`.
///
/// This is the only place the rotation angle goes from degrees to radians.
pub fn compose_transform(definition: &TransformDefinition) -> Mat4 {
    Mat4::from_scale_axis_angle_translation(
        Vec3::from(definition.scale),
        Vec3::from(definition.rotation.axis),
        degrees_to_radians(definition.rotation.angle_degrees),
        Vec3::from(definition.position),
    )
}

/// Sets the local transform of `entity`, creating its transform component if absent.
///
/// Applying the same definition twice leaves a single component with the same value.
pub fn apply_transform<E: RenderEngine + ?Sized>(
    engine: &mut E,
    entity: EntityId,
    definition: &TransformDefinition,
) -> Result<(), EngineError> {
    if !engine.has_transform(entity) {
        engine.create_transform(entity)?;
    }
    engine.set_transform(entity, compose_transform(definition))
}
