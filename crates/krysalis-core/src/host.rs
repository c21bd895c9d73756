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

//! The callback surface offered by the host process that loads the bridge.

/// Callbacks provided by the host.
///
/// The bridge only calls into these; it never implements the host side. A
/// host may register nothing, in which case messages are dropped.
pub trait HostCallbacks: Send + Sync {
    /// Delivers one log line to the host.
    fn log(&self, message: &str);

    /// Notifies the host that the bridge hit a fatal error and has torn down.
    fn shutdown(&self, reason: &str);
}

/// A [`HostCallbacks`] implementation that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl HostCallbacks for NullHost {
    fn log(&self, _message: &str) {}

    fn shutdown(&self, _reason: &str) {}
}
