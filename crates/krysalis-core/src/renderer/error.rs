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

//! Defines the error type reported by [`RenderEngine`](super::RenderEngine) implementations.

use super::material::{MaterialId, MaterialInstanceId};
use super::texture::TextureId;
use crate::ecs::EntityId;
use std::fmt;

/// An error raised by the engine while creating or mutating engine-owned objects.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The entity handle does not refer to a live entity.
    InvalidEntity(EntityId),
    /// The material handle does not refer to a loaded material.
    InvalidMaterial(MaterialId),
    /// The material instance handle does not refer to a live instance.
    InvalidMaterialInstance(MaterialInstanceId),
    /// The texture handle does not refer to a live texture.
    InvalidTexture(TextureId),
    /// A shader package could not be turned into a material.
    MaterialCreationFailed(String),
    /// The pixel data does not match the texture it is uploaded to.
    TextureUploadFailed {
        /// The texture the upload targeted.
        texture: TextureId,
        /// What was wrong with the upload.
        details: String,
    },
    /// The entity already carries a component that can only be attached once.
    ComponentAlreadyPresent {
        /// The entity in question.
        entity: EntityId,
        /// The kind of component, e.g. `"light"`.
        component: &'static str,
    },
    /// An error originating from the specific backend implementation.
    Backend(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidEntity(entity) => write!(f, "Invalid entity handle: {entity}"),
            EngineError::InvalidMaterial(id) => write!(f, "Invalid material handle: {id:?}"),
            EngineError::InvalidMaterialInstance(id) => {
                write!(f, "Invalid material instance handle: {id:?}")
            }
            EngineError::InvalidTexture(id) => write!(f, "Invalid texture handle: {id:?}"),
            EngineError::MaterialCreationFailed(msg) => {
                write!(f, "Material creation failed: {msg}")
            }
            EngineError::TextureUploadFailed { texture, details } => {
                write!(f, "Texture upload to {texture:?} failed: {details}")
            }
            EngineError::ComponentAlreadyPresent { entity, component } => {
                write!(f, "{entity} already has a {component} component")
            }
            EngineError::Backend(msg) => write!(f, "Backend-specific engine error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
