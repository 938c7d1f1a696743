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

//! Entity records stored one per document in the remote collections.

use std::fmt;

use forma_core::math::Vec3;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{lenient, GeometryDescriptor, MaterialDescriptor};

/// Why a raw document could not be read as a record at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The document body is not a JSON object.
    NotAnObject(&'static str),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::NotAnObject(found) => {
                write!(f, "Expected a JSON object, found {found}")
            }
        }
    }
}

impl std::error::Error for RecordError {}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn object_only<T: Default + for<'de> Deserialize<'de>>(value: &Value) -> Result<T, RecordError> {
    if !value.is_object() {
        return Err(RecordError::NotAnObject(value_kind(value)));
    }
    // Every field is lenient, so an object always decodes.
    Ok(serde_json::from_value(value.clone()).unwrap_or_default())
}

/// The stored transform of an object. Absent components take identity defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformRecord {
    /// Translation.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::vec3"
    )]
    pub position: Option<Vec3>,
    /// Euler rotation, in radians.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::vec3"
    )]
    pub rotation: Option<Vec3>,
    /// Scale.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::vec3"
    )]
    pub scale: Option<Vec3>,
}

/// The stored form of a scene object.
///
/// `children` present (even empty) marks a container; otherwise `geometry`
/// present marks a leaf mesh; a record with neither is an empty container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectRecord {
    /// Identifier. Empty when the document did not carry one.
    #[serde(deserialize_with = "lenient::or_default")]
    pub id: String,
    /// Display name.
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    /// Visibility. Absent means visible.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub visible: Option<bool>,
    /// Edit lock. Absent means unlocked.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub locked: Option<bool>,
    /// Soft reference to a group.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub group_id: Option<String>,
    /// Local transform.
    #[serde(deserialize_with = "lenient::or_default")]
    pub transform: TransformRecord,
    /// Geometry of a leaf mesh.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub geometry: Option<GeometryDescriptor>,
    /// Material of a leaf mesh.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub material: Option<MaterialDescriptor>,
    /// Ordered children of a container.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "children"
    )]
    pub children: Option<Vec<ObjectRecord>>,
    /// Set when this slot held something that was not a record.
    #[serde(skip)]
    pub malformed: Option<RecordError>,
}

impl ObjectRecord {
    /// Reads an object record from a raw document body.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        object_only(value)
    }

    /// A stand-in for a slot that could not be read.
    pub fn malformed(error: RecordError) -> Self {
        Self {
            malformed: Some(error),
            ..Self::default()
        }
    }
}

fn children<'de, D>(deserializer: D) -> Result<Option<Vec<ObjectRecord>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_array().map(|items| {
        items
            .iter()
            .map(|item| ObjectRecord::from_value(item).unwrap_or_else(ObjectRecord::malformed))
            .collect()
    }))
}

/// The stored form of an editor group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupRecord {
    /// Identifier. Empty when the document did not carry one.
    #[serde(deserialize_with = "lenient::or_default")]
    pub id: String,
    /// Display name.
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    /// Outliner expansion state.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub expanded: Option<bool>,
    /// Visibility of the members.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub visible: Option<bool>,
    /// Edit lock of the members.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub locked: Option<bool>,
    /// Ordered soft references to member objects.
    #[serde(deserialize_with = "lenient::strings")]
    pub object_ids: Vec<String>,
}

impl GroupRecord {
    /// Reads a group record from a raw document body.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        object_only(value)
    }
}

/// The stored form of a light.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LightRecord {
    /// Identifier. Empty when the document did not carry one.
    #[serde(deserialize_with = "lenient::or_default")]
    pub id: String,
    /// Display name.
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    /// The light tag: `directional`, `point` or `spot`.
    #[serde(
        rename = "type",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub light_type: Option<String>,
    /// World position.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::vec3"
    )]
    pub position: Option<Vec3>,
    /// Aim point of directional and spot lights.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::vec3"
    )]
    pub target: Option<Vec3>,
    /// Brightness multiplier.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub intensity: Option<f32>,
    /// Light color as `#rrggbb`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub color_hex: Option<String>,
    /// Whether the light contributes to the scene.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub visible: Option<bool>,
    /// Whether the light casts shadows.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub cast_shadow: Option<bool>,
    /// Range of point and spot lights.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub distance: Option<f32>,
    /// Falloff exponent of point and spot lights.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub decay: Option<f32>,
    /// Cone half-angle of a spot light, in radians.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub angle: Option<f32>,
    /// Edge softness of a spot light.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub penumbra: Option<f32>,
}

impl LightRecord {
    /// Reads a light record from a raw document body.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        object_only(value)
    }
}
