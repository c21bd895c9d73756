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

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// A stable, external identifier of an object declared in a scene document.
///
/// Scene documents carry identifiers as strings. Only strings that parse as a UUID
/// become a `SceneObjectId`; this is the key of the identifier registry built
/// during scene loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SceneObjectId(Uuid);

impl SceneObjectId {
    /// Parses an identifier from its textual form.
    ///
    /// Accepts every textual UUID form understood by [`Uuid::try_parse`]
    /// (hyphenated, simple, braced and URN).
    pub fn parse(input: &str) -> Result<Self, uuid::Error> {
        Uuid::try_parse(input).map(Self)
    }

    /// Creates a new, random (version 4) identifier.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for SceneObjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SceneObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}
