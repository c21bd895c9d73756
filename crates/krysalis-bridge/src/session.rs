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

//! The lifecycle of one engine instance and the scene loaded into it.

use anyhow::{bail, Result};
use krysalis_core::{EntityId, HostCallbacks, RenderEngine};
use krysalis_io::{AssetResolver, BridgeConfig};
use krysalis_lanes::scene_lane::{
    IdentifierRegistry, SceneContext, SceneLoadReport, SceneLoaderLane,
};
use std::sync::Arc;

/// Where a [`RenderSession`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, scene not loaded yet.
    Idle,
    /// The scene is loaded and the session accepts updates.
    Running,
    /// Torn down. Nothing can be loaded anymore.
    ShutDown,
}

/// Owns an engine, the scene built into it and the identifier registry.
///
/// A fatal error during [`start`](Self::start) tears the session down and
/// notifies the host through [`HostCallbacks::shutdown`]. Dropping a session
/// shuts it down.
pub struct RenderSession<E: RenderEngine> {
    engine: E,
    host: Arc<dyn HostCallbacks>,
    resolver: AssetResolver,
    lane: SceneLoaderLane,
    registry: IdentifierRegistry,
    entities: Vec<EntityId>,
    state: SessionState,
}

impl<E: RenderEngine> RenderSession<E> {
    /// Creates an idle session over `engine`, configured by `config`.
    pub fn new(engine: E, config: &BridgeConfig, host: Arc<dyn HostCallbacks>) -> Self {
        Self {
            engine,
            host,
            resolver: AssetResolver::from_config(config),
            lane: SceneLoaderLane::from_config(config),
            registry: IdentifierRegistry::new(),
            entities: Vec::new(),
            state: SessionState::Idle,
        }
    }

    /// Loads the configured scene.
    ///
    /// On failure the session is torn down, the host's shutdown callback receives
    /// the full error chain, and the error is returned.
    pub fn start(&mut self) -> Result<SceneLoadReport> {
        if self.state == SessionState::ShutDown {
            bail!("Cannot start a render session that has been shut down");
        }

        let result = {
            let mut ctx = SceneContext::new(&mut self.engine, &self.resolver);
            self.lane.load(&mut ctx, &mut self.registry)
        };

        match result {
            Ok(report) => {
                self.entities.extend_from_slice(&report.entities);
                self.state = SessionState::Running;
                log::info!("Render session started with {} entities.", self.entities.len());
                Ok(report)
            }
            Err(e) => {
                let reason = e.report();
                log::error!("Fatal error while starting the render session: {}", reason);
                self.teardown();
                self.host.shutdown(&reason);
                Err(anyhow::Error::new(e).context("Failed to start the render session"))
            }
        }
    }

    /// Applies pending scene changesets. Live editing is not supported, so this does nothing.
    pub fn update_scene(&mut self) {
        log::trace!("Scene update requested; changesets are not supported.");
    }

    /// Tears the session down. Calling it again has no effect.
    pub fn shutdown(&mut self) {
        if self.teardown() {
            log::info!("Render session shut down.");
        }
    }

    fn teardown(&mut self) -> bool {
        if self.state == SessionState::ShutDown {
            return false;
        }
        log::info!("Closing renderer and freeing {} entities.", self.entities.len());
        for entity in self.entities.drain(..).rev() {
            self.engine.remove_from_scene(entity);
            self.engine.destroy_entity(entity);
        }
        self.registry = IdentifierRegistry::new();
        self.state = SessionState::ShutDown;
        true
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The engine this session drives.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Entities registered by identifier.
    pub fn registry(&self) -> &IdentifierRegistry {
        &self.registry
    }

    /// Every entity the session created, in creation order.
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }
}

impl<E: RenderEngine> Drop for RenderSession<E> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krysalis_core::host::NullHost;
    use krysalis_infra::HeadlessEngine;

    fn config(root: &std::path::Path) -> BridgeConfig {
        BridgeConfig {
            asset_root: Some(root.to_path_buf()),
            ..BridgeConfig::default()
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let dir = tempfile::tempdir().unwrap();
        let session = RenderSession::new(HeadlessEngine::new(), &config(dir.path()), Arc::new(NullHost));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.entities().is_empty());
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut session =
            RenderSession::new(HeadlessEngine::new(), &config(dir.path()), Arc::new(NullHost));
        session.shutdown();
        session.shutdown();
        assert_eq!(session.state(), SessionState::ShutDown);
        assert!(session.start().is_err());
    }
}
