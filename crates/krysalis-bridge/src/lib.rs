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

//! # Krysalis Bridge
//!
//! The module a host process loads. It owns a render engine and the scene built
//! into it, forwards every log record to the host, and reports fatal errors
//! through the host's shutdown callback instead of returning them.
//!
//! - [`session`]: the [`RenderSession`] lifecycle (start, update, shutdown).
//! - [`logging`]: the [`HostLogger`] that tees records to the console and the host.
//! - [`ffi`]: the `extern "C"` entry points.

#![warn(missing_docs)]

pub mod ffi;
pub mod logging;
pub mod session;

pub use logging::HostLogger;
pub use session::{RenderSession, SessionState};
