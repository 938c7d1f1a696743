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

//! Turns stored records back into live entities.
//!
//! Every entry point returns a usable value. Field-level problems resolve to
//! documented defaults; anything worse replaces the one affected object with a
//! placeholder so the rest of the scene still loads.

use std::panic::{self, AssertUnwindSafe};

use forma_core::lane::{Lane, LaneKind};
use forma_core::math::{Color, Vec3};
use forma_core::remote::Document;
use forma_core::scene::{
    CameraState, Geometry, Group, Light, LightKind, LightType, Mesh, Object3D, ObjectBody,
    ProjectMetadata, SceneSettings, StandardMaterial, Transform,
};
use forma_data::scene::{
    GroupRecord, LightRecord, ObjectRecord, RecordError, SceneDocument, SCENE_FORMAT_VERSION,
};
use thiserror::Error;

use crate::codec_lane::{GeometryCodecLane, MaterialCodecLane};

/// The default limit on container nesting.
pub const DEFAULT_MAX_CHILD_DEPTH: usize = 32;

/// Why an object record was replaced by a placeholder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconstructError {
    /// The document is not a record at all.
    #[error("malformed record: {0}")]
    Malformed(#[from] RecordError),
    /// Containers are nested deeper than the configured limit.
    #[error("children nested deeper than {max} levels")]
    DepthExceeded {
        /// The configured limit.
        max: usize,
    },
    /// A transform component is NaN or infinite.
    #[error("transform has non-finite components")]
    NonFiniteTransform,
    /// Building the entity panicked.
    #[error("entity construction panicked: {0}")]
    Panicked(String),
}

/// The scene reconstructor.
#[derive(Debug, Clone, Copy)]
pub struct SceneReconstructorLane {
    geometry: GeometryCodecLane,
    material: MaterialCodecLane,
    max_child_depth: usize,
}

impl Default for SceneReconstructorLane {
    fn default() -> Self {
        Self {
            geometry: GeometryCodecLane::new(),
            material: MaterialCodecLane::new(),
            max_child_depth: DEFAULT_MAX_CHILD_DEPTH,
        }
    }
}

impl SceneReconstructorLane {
    /// Creates a new instance of the lane with the default nesting limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the container nesting limit.
    pub fn with_max_child_depth(mut self, max_child_depth: usize) -> Self {
        self.max_child_depth = max_child_depth;
        self
    }

    /// Reconstructs an object from a raw store document.
    ///
    /// A record without an id takes the document id.
    pub fn reconstruct_document(&self, document: &Document) -> Object3D {
        match ObjectRecord::from_value(&document.data) {
            Ok(mut record) => {
                if record.id.is_empty() {
                    record.id = document.id.clone();
                }
                self.reconstruct_object(&record)
            }
            Err(e) => {
                let record = ObjectRecord {
                    id: document.id.clone(),
                    ..ObjectRecord::default()
                };
                self.placeholder(&record, &ReconstructError::Malformed(e))
            }
        }
    }

    /// Reconstructs an object record. Never fails.
    pub fn reconstruct_object(&self, record: &ObjectRecord) -> Object3D {
        self.build(record, 0)
    }

    fn build(&self, record: &ObjectRecord, depth: usize) -> Object3D {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.try_build(record, depth)));
        match outcome {
            Ok(Ok(object)) => object,
            Ok(Err(e)) => self.placeholder(record, &e),
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                self.placeholder(record, &ReconstructError::Panicked(message))
            }
        }
    }

    fn try_build(&self, record: &ObjectRecord, depth: usize) -> Result<Object3D, ReconstructError> {
        if let Some(e) = &record.malformed {
            return Err(e.clone().into());
        }
        if depth > self.max_child_depth {
            return Err(ReconstructError::DepthExceeded {
                max: self.max_child_depth,
            });
        }

        let stored = &record.transform;
        let transform = Transform::new(
            stored.position.unwrap_or(Vec3::ZERO),
            stored.rotation.unwrap_or(Vec3::ZERO),
            stored.scale.unwrap_or(Vec3::ONE),
        );
        if !transform.is_finite() {
            return Err(ReconstructError::NonFiniteTransform);
        }

        let body = if let Some(children) = &record.children {
            ObjectBody::Container(
                children
                    .iter()
                    .map(|child| self.build(child, depth + 1))
                    .collect(),
            )
        } else if let Some(geometry) = &record.geometry {
            ObjectBody::Mesh(Mesh::new(
                self.geometry.decode(geometry),
                self.material.decode(record.material.as_ref()),
            ))
        } else {
            ObjectBody::Container(Vec::new())
        };

        Ok(Object3D {
            id: record.id.clone(),
            name: record.name.clone(),
            visible: record.visible.unwrap_or(true),
            locked: record.locked.unwrap_or(false),
            group_id: record.group_id.clone(),
            transform,
            body,
            placeholder: false,
        })
    }

    /// The stand-in for a record that could not be reconstructed: a unit box
    /// in the error-indicator material, at the record's position when usable.
    pub fn placeholder(&self, record: &ObjectRecord, reason: &ReconstructError) -> Object3D {
        log::warn!(
            "Substituting a placeholder for object '{}': {reason}",
            record.id
        );

        let position = record
            .transform
            .position
            .filter(Vec3::is_finite)
            .unwrap_or(Vec3::ZERO);

        let mut object = Object3D::mesh(
            record.id.clone(),
            record.name.clone(),
            Geometry::unit_box(),
            StandardMaterial::error_indicator(),
        )
        .with_transform(Transform::from_position(position));
        object.group_id = record.group_id.clone();
        object.placeholder = true;
        object
    }

    /// Reconstructs a group from a raw store document.
    ///
    /// Returns `None` for documents that are not objects.
    pub fn reconstruct_group_document(&self, document: &Document) -> Option<Group> {
        match GroupRecord::from_value(&document.data) {
            Ok(mut record) => {
                if record.id.is_empty() {
                    record.id = document.id.clone();
                }
                Some(self.reconstruct_group(&record))
            }
            Err(e) => {
                log::warn!("Skipping group document '{}': {e}", document.id);
                None
            }
        }
    }

    /// Reconstructs a group. Member ids are kept as-is, dangling or not.
    pub fn reconstruct_group(&self, record: &GroupRecord) -> Group {
        Group {
            id: record.id.clone(),
            name: record.name.clone(),
            expanded: record.expanded.unwrap_or(false),
            visible: record.visible.unwrap_or(true),
            locked: record.locked.unwrap_or(false),
            object_ids: record.object_ids.clone(),
        }
    }

    /// Reconstructs a light from a raw store document.
    ///
    /// Returns `None` for documents that are not objects and for unknown types.
    pub fn reconstruct_light_document(&self, document: &Document) -> Option<Light> {
        match LightRecord::from_value(&document.data) {
            Ok(mut record) => {
                if record.id.is_empty() {
                    record.id = document.id.clone();
                }
                self.reconstruct_light(&record)
            }
            Err(e) => {
                log::warn!("Skipping light document '{}': {e}", document.id);
                None
            }
        }
    }

    /// Reconstructs a light. Returns `None` when the type tag is unknown,
    /// since there is no safe generic light to fall back to.
    pub fn reconstruct_light(&self, record: &LightRecord) -> Option<Light> {
        let tag = record.light_type.as_deref().unwrap_or_default();
        let Some(kind) = LightKind::from_tag(tag) else {
            log::warn!("Dropping light '{}' with unknown type '{tag}'", record.id);
            return None;
        };

        let mut light_type = kind.defaults();
        match &mut light_type {
            LightType::Directional(d) => {
                set_vec3(record.target, &mut d.target);
            }
            LightType::Point(p) => {
                set_number(record.distance, &mut p.distance);
                set_number(record.decay, &mut p.decay);
            }
            LightType::Spot(s) => {
                set_vec3(record.target, &mut s.target);
                set_number(record.distance, &mut s.distance);
                set_number(record.decay, &mut s.decay);
                set_number(record.angle, &mut s.angle);
                set_number(record.penumbra, &mut s.penumbra);
            }
        }

        let mut light = Light::new(record.id.clone(), record.name.clone(), light_type);
        set_vec3(record.position, &mut light.position);
        set_number(record.intensity, &mut light.intensity);
        if let Some(color) = record.color_hex.as_deref().and_then(Color::from_hex) {
            light.color = color;
        }
        light.visible = record.visible.unwrap_or(true);
        light.cast_shadow = record.cast_shadow.unwrap_or(false);
        Some(light)
    }

    /// Reconstructs project metadata and settings from the raw aggregate document.
    pub fn reconstruct_scene_value(
        &self,
        value: &serde_json::Value,
    ) -> (ProjectMetadata, SceneSettings) {
        match SceneDocument::from_value(value) {
            Ok(document) => self.reconstruct_scene(&document),
            Err(e) => {
                log::warn!("Ignoring unreadable scene document: {e}");
                (ProjectMetadata::default(), SceneSettings::default())
            }
        }
    }

    /// Reconstructs project metadata and settings. Every field defaults on its own.
    pub fn reconstruct_scene(&self, document: &SceneDocument) -> (ProjectMetadata, SceneSettings) {
        match document.format_version {
            Some(version) if version > SCENE_FORMAT_VERSION => log::warn!(
                "Scene document format {version} is newer than {}, reading leniently",
                SCENE_FORMAT_VERSION
            ),
            None => log::debug!("Scene document has no format version"),
            _ => {}
        }

        let metadata = ProjectMetadata {
            name: document.name.clone(),
            description: document.description.clone(),
        };

        let mut settings = SceneSettings::default();
        let stored = &document.settings;
        if let Some(color) = stored
            .background_color_hex
            .as_deref()
            .and_then(Color::from_hex)
        {
            settings.background_color = color;
        }
        if let Some(visible) = stored.grid_visible {
            settings.grid_visible = visible;
        }
        set_number(stored.grid_size, &mut settings.grid_size);

        let camera: &mut CameraState = &mut settings.camera;
        let stored = &document.camera;
        if let Some(perspective) = stored.perspective {
            camera.perspective = perspective;
        }
        set_vec3(stored.position, &mut camera.position);
        set_vec3(stored.target, &mut camera.target);
        set_number(stored.fov, &mut camera.fov);

        (metadata, settings)
    }
}

fn set_number(value: Option<f32>, slot: &mut f32) {
    if let Some(value) = value.filter(|v| v.is_finite()) {
        *slot = value;
    }
}

fn set_vec3(value: Option<Vec3>, slot: &mut Vec3) {
    if let Some(value) = value.filter(Vec3::is_finite) {
        *slot = value;
    }
}

impl Lane for SceneReconstructorLane {
    fn strategy_name(&self) -> &'static str {
        "FORMA_SCENE_RECONSTRUCTOR_V1"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneSerializerLane;
    use approx::assert_relative_eq;
    use forma_core::math::FRAC_PI_3;
    use forma_core::scene::ERROR_INDICATOR_COLOR;
    use serde_json::{json, Value};

    fn object_from(value: Value) -> Object3D {
        SceneReconstructorLane::new().reconstruct_document(&Document::new("doc-id", value))
    }

    #[test]
    fn test_end_to_end_red_cube() {
        let original = Object3D::mesh(
            "cube",
            "Cube",
            Geometry::unit_box(),
            StandardMaterial::from_color(Color::from_u32(0xff0000)),
        )
        .with_transform(Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::ZERO,
            Vec3::splat(2.0),
        ));

        let record = SceneSerializerLane::new().serialize_object(&original);
        let wire = serde_json::to_value(&record).expect("record should encode");
        let decoded = object_from(wire);

        let mesh = decoded.as_mesh().expect("leaf mesh");
        assert!(mesh.geometry.is_unit_box());
        assert_eq!(mesh.material.color.to_hex(), "#ff0000");
        assert_eq!(decoded.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(decoded.transform.scale, Vec3::splat(2.0));
        assert!(!decoded.placeholder);
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_unrecognized_geometry_is_unit_box() {
        let object = object_from(json!({
            "id": "foo",
            "geometry": { "kind": "FooGeometry", "parameters": {} }
        }));

        let mesh = object.as_mesh().expect("still a mesh");
        assert!(mesh.geometry.is_unit_box());
        assert_eq!(mesh.material, StandardMaterial::default());
        assert!(!object.placeholder);
    }

    #[test]
    fn test_container_and_empty_records() {
        let container = object_from(json!({ "id": "c", "children": [] }));
        assert_eq!(container.children(), Some(&[][..]));

        // Children win over geometry.
        let both = object_from(json!({
            "id": "b",
            "geometry": { "kind": "Box" },
            "children": [{ "id": "k", "geometry": { "kind": "Sphere" } }]
        }));
        assert_eq!(both.children().map(<[Object3D]>::len), Some(1));

        let bare = object_from(json!({ "id": "n" }));
        assert!(bare.is_container());
        assert_eq!(bare.count(), 1);
    }

    #[test]
    fn test_visibility_defaults_to_true() {
        let object = object_from(json!({
            "id": "v",
            "visible": null,
            "geometry": { "kind": "Box" }
        }));
        assert!(object.visible);
        assert!(!object.locked);

        let hidden = object_from(json!({ "id": "h", "visible": false }));
        assert!(!hidden.visible);
    }

    #[test]
    fn test_missing_id_uses_document_id() {
        let object = object_from(json!({ "name": "anonymous" }));
        assert_eq!(object.id, "doc-id");
    }

    #[test]
    fn test_non_object_document_becomes_placeholder() {
        let object = object_from(json!("garbage"));

        assert!(object.placeholder);
        assert_eq!(object.id, "doc-id");
        let mesh = object.as_mesh().expect("placeholder is a mesh");
        assert!(mesh.geometry.is_unit_box());
        assert_eq!(mesh.material.color, ERROR_INDICATOR_COLOR);
        assert_eq!(object.transform.position, Vec3::ZERO);
    }

    #[test]
    fn test_malformed_child_only_degrades_its_slot() {
        let object = object_from(json!({
            "id": "parent",
            "children": [{ "id": "ok", "geometry": { "kind": "Cone" } }, 7]
        }));

        let children = object.children().expect("container");
        assert_eq!(children.len(), 2);
        assert!(!children[0].placeholder);
        assert!(children[1].placeholder);
        assert!(!object.placeholder);
    }

    #[test]
    fn test_non_finite_transform_keeps_finite_position() {
        let object = object_from(json!({
            "id": "huge",
            "transform": { "position": [4, 5, 6], "scale": [1e39, 1, 1] },
            "geometry": { "kind": "Box" }
        }));
        assert!(object.placeholder);
        assert_eq!(object.transform.position, Vec3::new(4.0, 5.0, 6.0));

        let lost = object_from(json!({
            "id": "lost",
            "transform": { "position": [1e39, 0, 0] }
        }));
        assert!(lost.placeholder);
        assert_eq!(lost.transform.position, Vec3::ZERO);
    }

    #[test]
    fn test_depth_limit() {
        let lane = SceneReconstructorLane::new().with_max_child_depth(1);
        let record = ObjectRecord::from_value(&json!({
            "id": "a",
            "children": [{ "id": "b", "children": [{ "id": "c" }] }]
        }))
        .expect("object body");

        let object = lane.reconstruct_object(&record);
        let b = &object.children().expect("a is a container")[0];
        assert!(!b.placeholder);
        let c = &b.children().expect("b is a container")[0];
        assert!(c.placeholder);
    }

    #[test]
    fn test_point_light_defaults() {
        let lane = SceneReconstructorLane::new();
        let light = lane
            .reconstruct_light_document(&Document::new(
                "l1",
                json!({ "id": "l1", "type": "Point", "intensity": 2 }),
            ))
            .expect("point lights are known");

        let LightType::Point(point) = light.light_type else {
            panic!("expected a point light, got {:?}", light.light_type);
        };
        assert_relative_eq!(point.decay, 2.0);
        assert_relative_eq!(point.distance, 0.0);
        assert_relative_eq!(light.intensity, 2.0);
        assert!(light.visible);
    }

    #[test]
    fn test_spot_light_defaults_and_target() {
        let lane = SceneReconstructorLane::new();
        let record = LightRecord::from_value(&json!({
            "id": "s",
            "type": "Spot",
            "target": { "x": 1, "y": 0, "z": 0 },
            "angle": "wide"
        }))
        .expect("object body");

        let light = lane.reconstruct_light(&record).expect("spot lights are known");
        let LightType::Spot(spot) = light.light_type else {
            panic!("expected a spot light");
        };
        assert_relative_eq!(spot.angle, FRAC_PI_3);
        assert_relative_eq!(spot.penumbra, 0.0);
        assert_eq!(spot.target, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_unknown_light_type_is_dropped() {
        let lane = SceneReconstructorLane::new();
        let record = LightRecord {
            id: "x".into(),
            light_type: Some("ambient".into()),
            ..LightRecord::default()
        };
        assert!(lane.reconstruct_light(&record).is_none());
        assert!(lane
            .reconstruct_light_document(&Document::new("y", json!({ "id": "y" })))
            .is_none());
    }

    #[test]
    fn test_light_tags_survive_load_then_save() {
        let reconstructor = SceneReconstructorLane::new();
        let serializer = SceneSerializerLane::new();

        for tag in ["Directional", "Point", "Spot"] {
            let light = reconstructor
                .reconstruct_light_document(&Document::new("l", json!({ "id": "l", "type": tag })))
                .expect("known light type");
            let record = serializer.serialize_light(&light);
            assert_eq!(record.light_type.as_deref(), Some(tag));
        }
    }

    #[test]
    fn test_group_keeps_dangling_ids() {
        let lane = SceneReconstructorLane::new();
        let group = lane
            .reconstruct_group_document(&Document::new(
                "g",
                json!({ "name": "Set", "objectIds": ["a", "deleted"] }),
            ))
            .expect("object body");

        assert_eq!(group.id, "g");
        assert_eq!(group.object_ids, vec!["a", "deleted"]);
        assert!(group.visible);
        assert!(lane
            .reconstruct_group_document(&Document::new("bad", json!(3)))
            .is_none());
    }

    #[test]
    fn test_scene_round_trip() {
        let metadata = ProjectMetadata {
            name: "Studio".into(),
            description: "Two lights".into(),
        };
        let mut settings = SceneSettings::default();
        settings.grid_visible = false;
        settings.background_color = Color::from_u32(0x202020);
        settings.camera.fov = 50.0;

        let document = SceneSerializerLane::new().serialize_scene(&metadata, &settings);
        let wire = serde_json::to_value(&document).expect("document should encode");
        let (metadata_back, settings_back) =
            SceneReconstructorLane::new().reconstruct_scene_value(&wire);

        assert_eq!(metadata_back, metadata);
        assert_eq!(settings_back, settings);
    }

    #[test]
    fn test_unreadable_scene_document_uses_defaults() {
        let (metadata, settings) =
            SceneReconstructorLane::new().reconstruct_scene_value(&json!(null));
        assert_eq!(metadata, ProjectMetadata::default());
        assert_eq!(settings, SceneSettings::default());
    }
}
