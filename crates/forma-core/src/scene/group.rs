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

//! Defines editor groups.

/// A named selection of scene objects.
///
/// Members are soft references: an id in `object_ids` may name an object that
/// has since been deleted. That is an expected state, not corruption.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Identifier, unique within the project.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the group is expanded in the outliner.
    pub expanded: bool,
    /// Whether the group's members are rendered.
    pub visible: bool,
    /// Whether the group's members are protected from editing.
    pub locked: bool,
    /// Ordered ids of member objects.
    pub object_ids: Vec<String>,
}

impl Group {
    /// Creates a visible, unlocked, collapsed group.
    pub fn new(id: impl Into<String>, name: impl Into<String>, object_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            expanded: false,
            visible: true,
            locked: false,
            object_ids,
        }
    }

    /// Returns `true` if the group lists the given object id.
    pub fn contains(&self, object_id: &str) -> bool {
        self.object_ids.iter().any(|id| id == object_id)
    }
}
