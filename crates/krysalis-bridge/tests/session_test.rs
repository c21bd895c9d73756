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

use anyhow::Result;
use krysalis_bridge::{RenderSession, SessionState};
use krysalis_core::{HostCallbacks, RenderEngine};
use krysalis_infra::HeadlessEngine;
use krysalis_io::BridgeConfig;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

#[derive(Default)]
struct RecordingHost {
    shutdowns: Mutex<Vec<String>>,
}

impl HostCallbacks for RecordingHost {
    fn log(&self, _message: &str) {}

    fn shutdown(&self, reason: &str) {
        self.shutdowns.lock().unwrap().push(reason.to_string());
    }
}

const SCENE: &str = r#"{
    "objects": [
        {
            "id": "66666666-6666-6666-6666-666666666666",
            "type": "light",
            "component": { "lightType": "point", "color": [1, 1, 1], "intensity": 10, "falloff": 4 },
            "transform": { "position": [0, 2, 0], "rotation": [0, 0, 1, 0], "scale": [1, 1, 1] }
        },
        {
            "id": "77777777-7777-7777-7777-777777777777",
            "type": "light",
            "component": { "lightType": "directional", "color": [1, 1, 1], "intensity": 1 },
            "transform": { "position": [0, 0, 0], "rotation": [30, 1, 0, 0], "scale": [1, 1, 1] }
        }
    ]
}"#;

fn config_for(root: &Path, scene_path: &str) -> BridgeConfig {
    BridgeConfig {
        asset_root: Some(root.to_path_buf()),
        scene_path: scene_path.to_string(),
        ..BridgeConfig::default()
    }
}

#[test]
fn test_start_then_shutdown_releases_every_entity() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("levels"))?;
    fs::write(dir.path().join("levels/lights.json"), SCENE)?;

    let host = Arc::new(RecordingHost::default());
    let mut session = RenderSession::new(
        HeadlessEngine::new(),
        &config_for(dir.path(), "levels/lights.json"),
        host.clone(),
    );

    let report = session.start()?;
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(report.entities.len(), 2);
    assert_eq!(session.registry().len(), 2);
    for entity in session.entities() {
        assert!(session.engine().scene_contains(*entity));
    }

    session.update_scene();
    session.shutdown();
    assert_eq!(session.state(), SessionState::ShutDown);
    assert_eq!(session.engine().entity_count(), 0);
    assert!(session.engine().scene_entities().is_empty());
    assert!(session.registry().is_empty());
    assert!(host.shutdowns.lock().unwrap().is_empty());
    Ok(())
}

#[test]
fn test_failed_start_notifies_host() -> Result<()> {
    let dir = tempdir()?;
    let host = Arc::new(RecordingHost::default());
    let mut session = RenderSession::new(
        HeadlessEngine::new(),
        &config_for(dir.path(), "scenes/scene.json"),
        host.clone(),
    );

    assert!(session.start().is_err());
    assert_eq!(session.state(), SessionState::ShutDown);

    let shutdowns = host.shutdowns.lock().unwrap();
    assert_eq!(shutdowns.len(), 1);
    assert!(shutdowns[0].contains("scenes/scene.json"));
    Ok(())
}

#[test]
fn test_config_file_drives_session() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("scenes"))?;
    fs::write(dir.path().join("scenes/scene.json"), SCENE)?;
    fs::write(
        dir.path().join("krysalis.toml"),
        format!("asset_root = {:?}\n", dir.path().display().to_string()),
    )?;

    let config = BridgeConfig::load_or_default(dir.path())?;
    let mut session = RenderSession::new(
        HeadlessEngine::new(),
        &config,
        Arc::new(RecordingHost::default()),
    );
    let report = session.start()?;
    assert!(report.verification.all_complete());
    Ok(())
}
