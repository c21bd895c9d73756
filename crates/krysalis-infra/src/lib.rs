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

//! # Krysalis Infra
//!
//! Concrete implementations of the contracts defined in `krysalis-core`.
//!
//! The only backend shipped here is [`HeadlessEngine`], an in-memory
//! [`RenderEngine`](krysalis_core::RenderEngine) that records what a scene load
//! asks of it. It backs the test suites and hosts that run without a GPU.

#![warn(missing_docs)]

pub mod graphics;

pub use graphics::headless::HeadlessEngine;
