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

//! Turns a live scene into storage-normalized records.

use forma_core::lane::{Lane, LaneKind};
use forma_core::scene::{
    Group, Light, LightType, Object3D, ObjectBody, ProjectMetadata, SceneSettings,
};
use forma_data::scene::{
    CameraRecord, GroupRecord, LightRecord, ObjectRecord, SceneDocument, SettingsRecord,
    TransformRecord, SCENE_FORMAT_VERSION,
};
use forma_data::SceneWorld;

use super::SceneRecords;
use crate::codec_lane::{GeometryCodecLane, MaterialCodecLane};

/// The scene serializer.
///
/// Pure: it only reads the live scene. Children of containers are not tracked
/// on their own in the store, so their ids and names are synthesized from the
/// parent as `<parent>_child_<index>`.
///
/// A top-level object holding a placeholder anywhere in its tree stands for a
/// record that could not be read. Bulk serialization withholds it instead of
/// writing the stand-in over the stored document.
#[derive(Debug, Default, Clone, Copy)]
pub struct SceneSerializerLane {
    geometry: GeometryCodecLane,
    material: MaterialCodecLane,
}

impl SceneSerializerLane {
    /// Creates a new instance of the lane.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes a whole world, including its aggregate document.
    pub fn serialize_world(&self, world: &SceneWorld) -> SceneRecords {
        self.serialize(
            world.metadata(),
            world.settings(),
            world.objects(),
            world.groups(),
            world.lights(),
        )
    }

    /// Serializes live entities and scene settings.
    pub fn serialize<'a>(
        &self,
        metadata: &ProjectMetadata,
        settings: &SceneSettings,
        objects: impl IntoIterator<Item = &'a Object3D>,
        groups: impl IntoIterator<Item = &'a Group>,
        lights: impl IntoIterator<Item = &'a Light>,
    ) -> SceneRecords {
        let mut records = SceneRecords {
            scene: self.serialize_scene(metadata, settings),
            groups: groups.into_iter().map(|g| self.serialize_group(g)).collect(),
            lights: lights.into_iter().map(|l| self.serialize_light(l)).collect(),
            ..SceneRecords::default()
        };
        for object in objects {
            if object.has_placeholder() {
                log::warn!("Withholding object '{}': it holds a placeholder", object.id);
                records.withheld_objects.push(object.id.clone());
            } else {
                records.objects.push(self.serialize_object(object));
            }
        }

        log::debug!(
            "Serialized {} objects, {} groups, {} lights",
            records.objects.len(),
            records.groups.len(),
            records.lights.len()
        );
        records
    }

    /// Serializes one top-level object and its children.
    pub fn serialize_object(&self, object: &Object3D) -> ObjectRecord {
        self.object_record(object, object.id.clone(), object.name.clone())
    }

    fn object_record(&self, object: &Object3D, id: String, name: String) -> ObjectRecord {
        let t = &object.transform;
        let mut record = ObjectRecord {
            visible: Some(object.visible),
            locked: Some(object.locked),
            group_id: object.group_id.clone(),
            transform: TransformRecord {
                position: Some(t.position),
                rotation: Some(t.rotation),
                scale: Some(t.scale),
            },
            ..ObjectRecord::default()
        };

        match &object.body {
            ObjectBody::Mesh(mesh) => {
                record.geometry = Some(self.geometry.encode(&mesh.geometry));
                record.material = Some(self.material.encode(&mesh.material));
            }
            ObjectBody::Container(children) if !children.is_empty() => {
                record.children = Some(
                    children
                        .iter()
                        .enumerate()
                        .map(|(index, child)| {
                            self.object_record(
                                child,
                                format!("{id}_child_{index}"),
                                format!("{name}_child_{index}"),
                            )
                        })
                        .collect(),
                );
            }
            // An empty container is a record with neither geometry nor children.
            ObjectBody::Container(_) => {}
        }

        record.id = id;
        record.name = name;
        record
    }

    /// Serializes a group by direct field copy.
    pub fn serialize_group(&self, group: &Group) -> GroupRecord {
        GroupRecord {
            id: group.id.clone(),
            name: group.name.clone(),
            expanded: Some(group.expanded),
            visible: Some(group.visible),
            locked: Some(group.locked),
            object_ids: group.object_ids.clone(),
        }
    }

    /// Serializes a light. Kind-specific fields are only written for kinds that use them.
    pub fn serialize_light(&self, light: &Light) -> LightRecord {
        let mut record = LightRecord {
            id: light.id.clone(),
            name: light.name.clone(),
            light_type: Some(light.kind().tag().to_string()),
            position: Some(light.position),
            target: light.light_type.target(),
            intensity: Some(light.intensity),
            color_hex: Some(light.color.to_hex()),
            visible: Some(light.visible),
            cast_shadow: Some(light.cast_shadow),
            ..LightRecord::default()
        };

        match &light.light_type {
            LightType::Directional(_) => {}
            LightType::Point(p) => {
                record.distance = Some(p.distance);
                record.decay = Some(p.decay);
            }
            LightType::Spot(s) => {
                record.distance = Some(s.distance);
                record.decay = Some(s.decay);
                record.angle = Some(s.angle);
                record.penumbra = Some(s.penumbra);
            }
        }
        record
    }

    /// Builds the aggregate scene document.
    pub fn serialize_scene(
        &self,
        metadata: &ProjectMetadata,
        settings: &SceneSettings,
    ) -> SceneDocument {
        SceneDocument {
            format_version: Some(SCENE_FORMAT_VERSION),
            name: metadata.name.clone(),
            description: metadata.description.clone(),
            settings: SettingsRecord {
                background_color_hex: Some(settings.background_color.to_hex()),
                grid_visible: Some(settings.grid_visible),
                grid_size: Some(settings.grid_size),
            },
            camera: CameraRecord {
                perspective: Some(settings.camera.perspective),
                position: Some(settings.camera.position),
                target: Some(settings.camera.target),
                fov: Some(settings.camera.fov),
            },
        }
    }
}

impl Lane for SceneSerializerLane {
    fn strategy_name(&self) -> &'static str {
        "FORMA_SCENE_SERIALIZER_V1"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forma_core::math::{Color, Vec3};
    use forma_core::remote::Collection;
    use forma_core::scene::{Geometry, GeometryKind, StandardMaterial, Transform};
    use forma_core::SceneStore;
    use serde_json::json;

    fn cube(id: &str) -> Object3D {
        Object3D::mesh(id, id, Geometry::unit_box(), StandardMaterial::default())
    }

    #[test]
    fn test_leaf_mesh_record() {
        let lane = SceneSerializerLane::new();
        let object = Object3D::mesh(
            "m1",
            "Red cube",
            Geometry::unit_box(),
            StandardMaterial::from_color(Color::from_u32(0xff0000)),
        )
        .with_transform(Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::ZERO,
            Vec3::splat(2.0),
        ));

        let record = lane.serialize_object(&object);

        assert_eq!(record.id, "m1");
        assert_eq!(record.visible, Some(true));
        assert!(record.children.is_none());
        let geometry = record.geometry.as_ref().expect("mesh has geometry");
        assert_eq!(geometry.kind, GeometryKind::Box);
        let material = record.material.as_ref().expect("mesh has material");
        assert_eq!(material.color_hex.as_deref(), Some("#ff0000"));

        let encoded = serde_json::to_value(&record).expect("record should encode");
        assert_eq!(
            encoded["transform"]["position"],
            json!({ "x": 1.0, "y": 2.0, "z": 3.0 })
        );
    }

    #[test]
    fn test_children_get_synthesized_ids() {
        let lane = SceneSerializerLane::new();
        let inner = Object3D::container("ignored", "ignored", vec![cube("x")]);
        let parent = Object3D::container("table", "Table", vec![cube("leg"), inner]);

        let record = lane.serialize_object(&parent);

        let children = record.children.expect("container has children");
        assert_eq!(children[0].id, "table_child_0");
        assert_eq!(children[0].name, "Table_child_0");
        assert_eq!(children[1].id, "table_child_1");
        let grandchildren = children[1].children.as_ref().expect("nested container");
        assert_eq!(grandchildren[0].id, "table_child_1_child_0");
        assert_eq!(grandchildren[0].name, "Table_child_1_child_0");
    }

    #[test]
    fn test_empty_container_has_neither_geometry_nor_children() {
        let record =
            SceneSerializerLane::new().serialize_object(&Object3D::container("e", "Empty", vec![]));
        assert!(record.children.is_none());
        assert!(record.geometry.is_none());
    }

    #[test]
    fn test_placeholders_are_withheld() {
        let lane = SceneSerializerLane::new();
        let mut broken = cube("broken");
        broken.placeholder = true;
        let mut inner = cube("leg");
        inner.placeholder = true;
        let table = Object3D::container("table", "Table", vec![cube("top"), inner]);

        let records = lane.serialize(
            &ProjectMetadata::default(),
            &SceneSettings::default(),
            [&cube("ok"), &broken, &table],
            std::iter::empty::<&Group>(),
            std::iter::empty::<&Light>(),
        );

        assert_eq!(records.ids(Collection::Objects), vec!["ok"]);
        assert_eq!(records.withheld_objects, vec!["broken", "table"]);
    }

    #[test]
    fn test_light_fields_follow_kind() {
        let lane = SceneSerializerLane::new();

        let point = lane.serialize_light(&Light::point().at(Vec3::new(0.0, 3.0, 0.0)));
        assert_eq!(point.light_type.as_deref(), Some("Point"));
        assert_eq!(point.decay, Some(2.0));
        assert_eq!(point.distance, Some(0.0));
        assert_eq!(point.target, None);
        assert_eq!(point.angle, None);

        let spot = lane.serialize_light(&Light::spot());
        assert_eq!(spot.light_type.as_deref(), Some("Spot"));
        assert!(spot.angle.is_some());
        assert_eq!(spot.target, Some(Vec3::ZERO));

        let directional = lane.serialize_light(&Light::directional());
        assert_eq!(directional.decay, None);
        assert_eq!(directional.target, Some(Vec3::ZERO));
    }

    #[test]
    fn test_serialize_world_is_pure() {
        let mut world = SceneWorld::new();
        world.load_object(cube("a"));
        world.load_group(Group::new("g", "Group", vec!["a".into(), "gone".into()]));
        world.load_light(Light::point());
        let before = world.clone();

        let records = SceneSerializerLane::new().serialize_world(&world);

        assert_eq!(world, before);
        assert_eq!(records.ids(Collection::Objects), vec!["a"]);
        assert_eq!(records.groups[0].object_ids, vec!["a", "gone"]);
        assert_eq!(records.lights.len(), 1);
        assert_eq!(records.scene.format_version, Some(SCENE_FORMAT_VERSION));

        let documents = records
            .documents(Collection::Groups)
            .expect("records should encode");
        assert_eq!(documents[0].id, "g");
        assert_eq!(documents[0].data["objectIds"], json!(["a", "gone"]));
    }
}
