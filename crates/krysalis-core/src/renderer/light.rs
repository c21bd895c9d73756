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

//! Light construction parameters.
//!
//! A [`LightBuildSpec`] is what the light component builder hands to the engine.
//! Falloff lives inside [`LightKind::Point`], so a directional light cannot carry one.

use crate::math::Vec3;

/// The variant of a light source, with its variant-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// An infinitely distant light with parallel rays and no falloff.
    Directional,
    /// A local light radiating from the entity's position.
    Point {
        /// Distance in world units beyond which the light has no effect.
        falloff: Option<f32>,
    },
}

/// The complete set of parameters needed to create a light component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightBuildSpec {
    /// The light variant.
    pub kind: LightKind,
    /// The linear RGB color of the light.
    pub color: Vec3,
    /// The intensity multiplier.
    pub intensity: f32,
    /// Whether the light casts shadows.
    pub cast_shadows: bool,
}

impl LightBuildSpec {
    /// Creates a directional light spec that does not cast shadows.
    pub fn directional(color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            color,
            intensity,
            cast_shadows: false,
        }
    }

    /// Creates a point light spec that does not cast shadows.
    pub fn point(color: Vec3, intensity: f32, falloff: Option<f32>) -> Self {
        Self {
            kind: LightKind::Point { falloff },
            color,
            intensity,
            cast_shadows: false,
        }
    }

    /// Sets whether the light casts shadows.
    pub fn with_shadows(mut self, cast_shadows: bool) -> Self {
        self.cast_shadows = cast_shadows;
        self
    }

    /// Returns the falloff radius, which only point lights can have.
    pub fn falloff(&self) -> Option<f32> {
        match self.kind {
            LightKind::Point { falloff } => falloff,
            LightKind::Directional => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_has_no_falloff() {
        let spec = LightBuildSpec::directional(Vec3::ONE, 2.0);
        assert_eq!(spec.falloff(), None);
        assert!(!spec.cast_shadows);
    }

    #[test]
    fn test_point_keeps_falloff() {
        let spec = LightBuildSpec::point(Vec3::ONE, 2.0, Some(12.5)).with_shadows(true);
        assert_eq!(spec.falloff(), Some(12.5));
        assert!(spec.cast_shadows);
    }
}
