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

//! The per-project aggregate document holding scene-wide settings.

use forma_core::math::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, RecordError};

/// The aggregate document layout version written by this crate.
pub const SCENE_FORMAT_VERSION: u32 = 1;

/// Scene-wide display settings as stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsRecord {
    /// Viewport background as `#rrggbb`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub background_color_hex: Option<String>,
    /// Whether the ground grid is drawn.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub grid_visible: Option<bool>,
    /// Extent of the ground grid.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub grid_size: Option<f32>,
}

/// The editor camera as stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRecord {
    /// Perspective (`true`) or orthographic (`false`) projection.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub perspective: Option<bool>,
    /// Camera position.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::vec3"
    )]
    pub position: Option<Vec3>,
    /// Look-at point.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::vec3"
    )]
    pub target: Option<Vec3>,
    /// Vertical field of view, in degrees.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub fov: Option<f32>,
}

/// The aggregate scene document of a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneDocument {
    /// Layout version. Absent on documents predating versioning.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub format_version: Option<u32>,
    /// Project name.
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    /// Project description.
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: String,
    /// Display settings.
    #[serde(deserialize_with = "lenient::or_default")]
    pub settings: SettingsRecord,
    /// Editor camera.
    #[serde(deserialize_with = "lenient::or_default")]
    pub camera: CameraRecord,
}

impl SceneDocument {
    /// Reads the aggregate document from its raw body.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        if !value.is_object() {
            return Err(RecordError::NotAnObject("a non-object value"));
        }
        Ok(serde_json::from_value(value.clone()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scene_document_wire_layout() {
        let document = SceneDocument {
            format_version: Some(SCENE_FORMAT_VERSION),
            name: "Demo".into(),
            description: String::new(),
            settings: SettingsRecord {
                background_color_hex: Some("#f0f0f0".into()),
                grid_visible: Some(true),
                grid_size: Some(20.0),
            },
            camera: CameraRecord {
                perspective: Some(false),
                position: None,
                target: None,
                fov: Some(50.0),
            },
        };

        let encoded = serde_json::to_value(&document).expect("document should encode");
        assert_eq!(encoded["formatVersion"], json!(1));
        assert_eq!(encoded["settings"]["backgroundColorHex"], json!("#f0f0f0"));
        assert_eq!(encoded["settings"]["gridVisible"], json!(true));
        assert_eq!(encoded["camera"]["perspective"], json!(false));
    }

    #[test]
    fn test_scene_document_tolerates_garbage_sections() {
        let document = SceneDocument::from_value(&json!({
            "name": "Old project",
            "settings": "dark",
            "camera": { "fov": "wide", "position": [1, 2, 3] }
        }))
        .expect("object body");

        assert_eq!(document.format_version, None);
        assert_eq!(document.name, "Old project");
        assert_eq!(document.settings, SettingsRecord::default());
        assert_eq!(document.camera.fov, None);
        assert_eq!(document.camera.position, Some(Vec3::new(1.0, 2.0, 3.0)));
    }
}
