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

//! The C ABI exported to the host.
//!
//! Callbacks may be registered at any time; a message sent while no callback is
//! registered is dropped. Errors never cross this boundary: a failed start is
//! reported through the shutdown callback.

use crate::logging;
use crate::session::RenderSession;
use krysalis_core::HostCallbacks;
use krysalis_infra::HeadlessEngine;
use krysalis_io::{module_directory, BridgeConfig};
use once_cell::sync::Lazy;
use std::ffi::{c_char, CStr, CString};
use std::sync::{Arc, Mutex, RwLock};

/// Receives one NUL-terminated UTF-8 log line. The pointer is only valid during the call.
pub type LogCallback = extern "C" fn(message: *const c_char);

/// Receives the NUL-terminated reason of a fatal shutdown. The pointer is only valid during the call.
pub type ShutdownCallback = extern "C" fn(reason: *const c_char);

#[derive(Default, Clone, Copy)]
struct RegisteredCallbacks {
    log: Option<LogCallback>,
    shutdown: Option<ShutdownCallback>,
}

static CALLBACKS: Lazy<RwLock<RegisteredCallbacks>> =
    Lazy::new(|| RwLock::new(RegisteredCallbacks::default()));

static SESSION: Lazy<Mutex<Option<RenderSession<HeadlessEngine>>>> =
    Lazy::new(|| Mutex::new(None));

fn callbacks() -> RegisteredCallbacks {
    *CALLBACKS.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_c_string(message: &str, f: impl FnOnce(*const c_char)) {
    // Interior NULs would truncate the message on the host side.
    if let Ok(text) = CString::new(message.replace('\0', "\u{FFFD}")) {
        f(text.as_ptr());
    }
}

/// [`HostCallbacks`] backed by the callbacks registered through this module.
///
/// Reads the registration on every call, so callbacks registered after the
/// logger was installed are picked up.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfiHost;

impl HostCallbacks for FfiHost {
    fn log(&self, message: &str) {
        if let Some(callback) = callbacks().log {
            with_c_string(message, |ptr| callback(ptr));
        }
    }

    fn shutdown(&self, reason: &str) {
        if let Some(callback) = callbacks().shutdown {
            with_c_string(reason, |ptr| callback(ptr));
        }
    }
}

/// Registers the host's log sink. Passing null unregisters it.
#[no_mangle]
pub extern "C" fn krysalis_register_log_callback(callback: Option<LogCallback>) {
    CALLBACKS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .log = callback;
}

/// Registers the host's fatal-shutdown notifier. Passing null unregisters it.
#[no_mangle]
pub extern "C" fn krysalis_register_shutdown_callback(callback: Option<ShutdownCallback>) {
    CALLBACKS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .shutdown = callback;
}

/// Echoes `message` back through the log callback.
///
/// # Safety
/// `message` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn krysalis_test_logger(message: *const c_char) {
    if message.is_null() {
        return;
    }
    let message = CStr::from_ptr(message).to_string_lossy();
    FfiHost.log(&message);
}

/// Loads `krysalis.toml` from the module directory, installs logging and loads
/// the scene into a headless engine.
///
/// Returns `true` on success. On failure the shutdown callback has already been
/// called with the reason.
#[no_mangle]
pub extern "C" fn krysalis_start() -> bool {
    let host: Arc<dyn HostCallbacks> = Arc::new(FfiHost);

    let config = match module_directory()
        .map_err(anyhow::Error::from)
        .and_then(|dir| BridgeConfig::load_or_default(&dir))
    {
        Ok(config) => config,
        Err(e) => {
            let reason = format!("{e:#}");
            host.log(&reason);
            host.shutdown(&reason);
            return false;
        }
    };
    logging::init(host.clone(), &config.log_filter);

    let mut slot = SESSION.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if slot.is_some() {
        log::warn!("krysalis_start called while a session is already running.");
        return true;
    }

    let mut session = RenderSession::new(HeadlessEngine::new(), &config, host);
    match session.start() {
        Ok(_) => {
            *slot = Some(session);
            true
        }
        Err(_) => false,
    }
}

/// Forwards a scene update request to the running session, if any.
#[no_mangle]
pub extern "C" fn krysalis_update_scene() {
    let mut slot = SESSION.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(session) = slot.as_mut() {
        session.update_scene();
    }
}

/// Shuts the running session down. Does nothing when no session is running.
#[no_mangle]
pub extern "C" fn krysalis_shutdown() {
    let session = SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .take();
    if let Some(mut session) = session {
        session.shutdown();
    }
}
