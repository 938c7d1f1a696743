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

//! The in-memory home of the active project's scene.

use std::collections::{BTreeMap, HashSet};

use forma_core::remote::Collection;
use forma_core::scene::{Group, Light, Object3D, ProjectMetadata, SceneSettings};
use forma_core::SceneStore;

/// A group together with the members that currently exist.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGroup<'a> {
    /// The group itself.
    pub group: &'a Group,
    /// Existing members, in the group's `object_ids` order.
    pub members: Vec<&'a Object3D>,
}

impl ResolvedGroup<'_> {
    /// Ids listed by the group that no longer name an object.
    pub fn dangling(&self) -> Vec<&str> {
        self.group
            .object_ids
            .iter()
            .filter(|id| !self.members.iter().any(|member| &member.id == *id))
            .map(String::as_str)
            .collect()
    }
}

/// An id-keyed store of top-level objects, groups and lights.
///
/// Cross references between entities are ids, never pointers, so a group may
/// list an object that has been deleted without anything breaking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneWorld {
    metadata: ProjectMetadata,
    settings: SceneSettings,
    objects: BTreeMap<String, Object3D>,
    groups: BTreeMap<String, Group>,
    lights: BTreeMap<String, Light>,
}

impl SceneWorld {
    /// Creates an empty world with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// The project's descriptive fields.
    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    /// Replaces the project's descriptive fields.
    pub fn set_metadata(&mut self, metadata: ProjectMetadata) {
        self.metadata = metadata;
    }

    /// Scene-wide settings.
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Mutable access to scene-wide settings.
    pub fn settings_mut(&mut self) -> &mut SceneSettings {
        &mut self.settings
    }

    /// Iterates over top-level objects in id order.
    pub fn objects(&self) -> impl Iterator<Item = &Object3D> {
        self.objects.values()
    }

    /// Iterates over groups in id order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Iterates over lights in id order.
    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.lights.values()
    }

    /// Looks up a top-level object.
    pub fn object(&self, id: &str) -> Option<&Object3D> {
        self.objects.get(id)
    }

    /// Looks up a group.
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.get(id)
    }

    /// Looks up a light.
    pub fn light(&self, id: &str) -> Option<&Light> {
        self.lights.get(id)
    }

    /// Number of top-level objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Ids of every entity in a collection.
    pub fn ids(&self, collection: Collection) -> Vec<&str> {
        match collection {
            Collection::Objects => self.objects.keys().map(String::as_str).collect(),
            Collection::Groups => self.groups.keys().map(String::as_str).collect(),
            Collection::Lights => self.lights.keys().map(String::as_str).collect(),
        }
    }

    /// Returns `true` if the world holds no entities.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.groups.is_empty() && self.lights.is_empty()
    }

    /// Removes a top-level object.
    pub fn remove_object(&mut self, id: &str) -> Option<Object3D> {
        self.objects.remove(id)
    }

    /// Removes a group. Its members are left in place.
    pub fn remove_group(&mut self, id: &str) -> Option<Group> {
        self.groups.remove(id)
    }

    /// Removes a light.
    pub fn remove_light(&mut self, id: &str) -> Option<Light> {
        self.lights.remove(id)
    }

    /// Resolves a group's soft references, skipping ids with no object.
    pub fn resolve_group(&self, id: &str) -> Option<ResolvedGroup<'_>> {
        let group = self.groups.get(id)?;
        let members = group
            .object_ids
            .iter()
            .filter_map(|object_id| self.objects.get(object_id))
            .collect();
        Some(ResolvedGroup { group, members })
    }

    /// Resolves an object's `group_id`. Returns `None` when unset or dangling.
    pub fn group_of(&self, object_id: &str) -> Option<&Group> {
        let group_id = self.objects.get(object_id)?.group_id.as_deref()?;
        self.groups.get(group_id)
    }
}

impl SceneStore for SceneWorld {
    fn load_object(&mut self, object: Object3D) {
        self.objects.insert(object.id.clone(), object);
    }

    fn load_group(&mut self, group: Group) {
        self.groups.insert(group.id.clone(), group);
    }

    fn load_light(&mut self, light: Light) {
        self.lights.insert(light.id.clone(), light);
    }

    fn retain(&mut self, collection: Collection, keep: &HashSet<String>) {
        match collection {
            Collection::Objects => self.objects.retain(|id, _| keep.contains(id)),
            Collection::Groups => self.groups.retain(|id, _| keep.contains(id)),
            Collection::Lights => self.lights.retain(|id, _| keep.contains(id)),
        }
    }

    fn clear(&mut self) {
        self.objects.clear();
        self.groups.clear();
        self.lights.clear();
        self.metadata = ProjectMetadata::default();
        self.settings = SceneSettings::default();
    }

    fn apply_scene(&mut self, metadata: ProjectMetadata, settings: SceneSettings) {
        self.metadata = metadata;
        self.settings = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forma_core::scene::{Geometry, StandardMaterial};

    fn cube(id: &str) -> Object3D {
        Object3D::mesh(id, id, Geometry::unit_box(), StandardMaterial::default())
    }

    #[test]
    fn test_load_replaces_by_id() {
        let mut world = SceneWorld::new();
        world.load_object(cube("a"));

        let mut renamed = cube("a");
        renamed.name = "Renamed".into();
        world.load_object(renamed);

        assert_eq!(world.object_count(), 1);
        assert_eq!(world.object("a").map(|o| o.name.as_str()), Some("Renamed"));
    }

    #[test]
    fn test_resolve_group_skips_dangling_ids() {
        let mut world = SceneWorld::new();
        world.load_object(cube("a"));
        world.load_object(cube("c"));
        world.load_group(Group::new(
            "g1",
            "Group",
            vec!["c".into(), "deleted".into(), "a".into()],
        ));

        let resolved = world.resolve_group("g1").expect("group exists");
        let member_ids: Vec<_> = resolved.members.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(member_ids, vec!["c", "a"]);
        assert_eq!(resolved.dangling(), vec!["deleted"]);
        assert!(world.resolve_group("missing").is_none());
    }

    #[test]
    fn test_group_of_follows_soft_reference() {
        let mut world = SceneWorld::new();
        world.load_object(cube("a").in_group("g1"));
        world.load_object(cube("b").in_group("gone"));
        world.load_group(Group::new("g1", "Group", vec!["a".into()]));

        assert_eq!(world.group_of("a").map(|g| g.id.as_str()), Some("g1"));
        assert!(world.group_of("b").is_none());
    }

    #[test]
    fn test_retain_prunes_one_collection() {
        let mut world = SceneWorld::new();
        world.load_object(cube("a"));
        world.load_object(cube("b"));
        world.load_light(Light::point());

        let keep: HashSet<String> = ["b".to_string()].into_iter().collect();
        world.retain(Collection::Objects, &keep);

        assert_eq!(world.ids(Collection::Objects), vec!["b"]);
        assert_eq!(world.light_count(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut world = SceneWorld::new();
        world.load_object(cube("a"));
        world.apply_scene(
            ProjectMetadata {
                name: "Demo".into(),
                description: String::new(),
            },
            SceneSettings {
                grid_visible: false,
                ..SceneSettings::default()
            },
        );

        world.clear();

        assert!(world.is_empty());
        assert_eq!(world, SceneWorld::new());
    }
}
