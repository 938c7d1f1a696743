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

//! Diagnostic counters.

mod registry;

pub use self::registry::*;

/// Names of the counters reported by the sync layer.
pub mod names {
    /// Snapshots applied to the scene store.
    pub const SNAPSHOTS_APPLIED: &str = "sync.snapshots_applied";
    /// Snapshots discarded because they belonged to an older generation.
    pub const SNAPSHOTS_DISCARDED: &str = "sync.snapshots_discarded";
    /// Placeholder entities substituted for unreadable records.
    pub const PLACEHOLDERS: &str = "reconstruct.placeholders";
    /// Light records dropped for carrying an unknown type.
    pub const LIGHTS_DROPPED: &str = "reconstruct.lights_dropped";
}
