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

use super::IdentifierRegistry;
use krysalis_core::{EntityId, RenderEngine, SceneObjectId};

/// Which components a registered entity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentPresence {
    /// The identifier the entity is registered under.
    pub id: SceneObjectId,
    /// The entity.
    pub entity: EntityId,
    /// Whether a transform component is attached.
    pub transform: bool,
    /// Whether a renderable component is attached.
    pub renderable: bool,
    /// Whether a light component is attached.
    pub light: bool,
}

impl ComponentPresence {
    /// An entity is complete when it has a transform and something to show or emit.
    pub fn is_complete(&self) -> bool {
        self.transform && (self.renderable || self.light)
    }
}

/// The outcome of a verification pass, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    /// One entry per registered identifier.
    pub entries: Vec<ComponentPresence>,
}

impl VerificationReport {
    /// Returns `true` if every registered entity is complete.
    pub fn all_complete(&self) -> bool {
        self.entries.iter().all(ComponentPresence::is_complete)
    }

    /// Iterates over the entries that are missing a component.
    pub fn incomplete(&self) -> impl Iterator<Item = &ComponentPresence> {
        self.entries.iter().filter(|entry| !entry.is_complete())
    }
}

fn yes_no(present: bool) -> &'static str {
    if present {
        "yes"
    } else {
        "no"
    }
}

/// Logs which components every registered entity carries.
///
/// Diagnostic only: missing components are reported, never treated as errors.
pub fn verify_components<E: RenderEngine + ?Sized>(
    engine: &E,
    registry: &IdentifierRegistry,
) -> VerificationReport {
    let entries: Vec<_> = registry
        .iter()
        .map(|(id, entity)| {
            let presence = ComponentPresence {
                id,
                entity,
                transform: engine.has_transform(entity),
                renderable: engine.has_renderable(entity),
                light: engine.has_light(entity),
            };
            log::info!(
                "Verified {} ({}): transform={}, renderable={}, light={}",
                id,
                entity,
                yes_no(presence.transform),
                yes_no(presence.renderable),
                yes_no(presence.light)
            );
            if !presence.is_complete() {
                log::warn!("{} ({}) is missing components.", id, entity);
            }
            presence
        })
        .collect();

    VerificationReport { entries }
}
