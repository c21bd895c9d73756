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

use ahash::AHashMap;
use krysalis_core::{EntityId, SceneObjectId};

/// Maps external scene identifiers to the entities built for them.
///
/// Entries are only ever added. The registry does not own the entities: the
/// engine does, and tears them down together with the session.
#[derive(Debug, Default, Clone)]
pub struct IdentifierRegistry {
    entities: AHashMap<SceneObjectId, EntityId>,
    order: Vec<SceneObjectId>,
}

impl IdentifierRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entity` under `id`.
    ///
    /// The first registration of an id wins. Registering it again leaves the
    /// registry unchanged and returns the entity already registered.
    pub fn register(&mut self, id: SceneObjectId, entity: EntityId) -> Result<(), EntityId> {
        if let Some(existing) = self.entities.get(&id) {
            return Err(*existing);
        }
        self.entities.insert(id, entity);
        self.order.push(id);
        Ok(())
    }

    /// Looks up the entity registered under `id`.
    pub fn get(&self, id: &SceneObjectId) -> Option<EntityId> {
        self.entities.get(id).copied()
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: &SceneObjectId) -> bool {
        self.entities.contains_key(id)
    }

    /// The number of registered identifiers.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over `(id, entity)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (SceneObjectId, EntityId)> + '_ {
        self.order.iter().map(move |id| (*id, self.entities[id]))
    }
}
