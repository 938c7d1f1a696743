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

//! # Lane Abstraction
//!
//! A **Lane** is a reusable processing strategy driven by an agent. In Forma
//! every codec and every scene-level transformation (serialize, reconstruct)
//! is a lane. Agents hold lanes and call them; lanes never touch the remote
//! store themselves.

use std::fmt;

/// Classifies a lane by the kind of work it performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Converts one live value to its storage descriptor and back.
    Codec,
    /// Works on whole scene entities or whole scenes.
    Scene,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKind::Codec => write!(f, "codec"),
            LaneKind::Scene => write!(f, "scene"),
        }
    }
}

/// The common interface shared by all lanes.
pub trait Lane: Send + Sync {
    /// Returns the unique, versioned identifier of this strategy.
    ///
    /// Example: `"FORMA_GEOMETRY_V1"`.
    fn strategy_name(&self) -> &'static str;

    /// Returns the classification of this lane.
    fn lane_kind(&self) -> LaneKind;
}
