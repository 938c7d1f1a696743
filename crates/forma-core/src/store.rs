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

//! The in-memory scene store the sync layer writes into.

use std::collections::HashSet;

use crate::remote::Collection;
use crate::scene::{Group, Light, Object3D, ProjectMetadata, SceneSettings};

/// The live, in-memory view of the active project.
///
/// Every `load_*` call replaces any existing entity with the same id, so
/// applying the same snapshot twice leaves the store unchanged.
pub trait SceneStore: Send {
    /// Inserts or replaces a top-level object.
    fn load_object(&mut self, object: Object3D);

    /// Inserts or replaces a group.
    fn load_group(&mut self, group: Group);

    /// Inserts or replaces a light.
    fn load_light(&mut self, light: Light);

    /// Removes every entity of `collection` whose id is not in `keep`.
    fn retain(&mut self, collection: Collection, keep: &HashSet<String>);

    /// Removes every entity and resets settings to their defaults.
    fn clear(&mut self);

    /// Applies the project's metadata and scene settings.
    fn apply_scene(&mut self, metadata: ProjectMetadata, settings: SceneSettings);
}
