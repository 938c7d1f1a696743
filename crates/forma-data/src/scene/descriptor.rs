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

//! Normalized descriptors of shape and appearance.

use forma_core::math::Vec2;
use forma_core::scene::GeometryKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// The stored form of a geometry: a kind tag and a kind-specific parameter map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeometryDescriptor {
    /// The geometry tag. Unknown tags are kept verbatim.
    #[serde(deserialize_with = "lenient::or_default")]
    pub kind: GeometryKind,
    /// Kind-specific parameters. Keys the kind does not use are ignored.
    #[serde(deserialize_with = "lenient::map")]
    pub parameters: Map<String, Value>,
    /// The concrete type name of a geometry that could not be encoded.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub type_name: Option<String>,
}

impl GeometryDescriptor {
    /// Creates a descriptor with the given kind and parameters.
    pub fn new(kind: GeometryKind, parameters: Map<String, Value>) -> Self {
        Self {
            kind,
            parameters,
            type_name: None,
        }
    }

    /// Creates an `Unknown` descriptor that remembers the original type name.
    pub fn unknown(type_name: impl Into<String>) -> Self {
        Self {
            kind: GeometryKind::Unknown,
            parameters: Map::new(),
            type_name: Some(type_name.into()),
        }
    }
}

/// The stored form of a standard material.
///
/// Every field is optional on the wire and defaults independently.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialDescriptor {
    /// Base color as `#rrggbb`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub color_hex: Option<String>,
    /// Opacity in `[0, 1]`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub opacity: Option<f32>,
    /// Whether opacity is honored.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub transparent: Option<bool>,
    /// Metalness in `[0, 1]`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub metalness: Option<f32>,
    /// Roughness in `[0, 1]`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub roughness: Option<f32>,
    /// Whether the mesh is drawn as wireframe.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub wireframe: Option<bool>,
    /// Emissive color as `#rrggbb`. Only written when not black.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::option"
    )]
    pub emissive_hex: Option<String>,
}

/// The stored form of one 2D shape: an outline and its holes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathDescriptor {
    /// Outline vertices in drawing order.
    #[serde(deserialize_with = "lenient::points")]
    pub points: Vec<Vec2>,
    /// Hole contours, each an independent closed vertex list.
    #[serde(deserialize_with = "lenient::holes")]
    pub holes: Vec<Vec<Vec2>>,
}

impl PathDescriptor {
    /// Reads a path descriptor from a raw JSON value.
    ///
    /// Returns `None` for values that are not objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geometry_descriptor_keeps_foreign_tag() {
        let descriptor: GeometryDescriptor =
            serde_json::from_value(json!({ "kind": "FooGeometry", "parameters": {} }))
                .expect("descriptor should decode");

        assert_eq!(
            descriptor.kind,
            GeometryKind::Unrecognized("FooGeometry".to_string())
        );
        let encoded = serde_json::to_value(&descriptor).expect("descriptor should encode");
        assert_eq!(encoded["kind"], json!("FooGeometry"));
    }

    #[test]
    fn test_geometry_descriptor_missing_kind_is_unknown() {
        let descriptor: GeometryDescriptor =
            serde_json::from_value(json!({ "parameters": [] })).expect("lenient");
        assert_eq!(descriptor.kind, GeometryKind::Unknown);
        assert!(descriptor.parameters.is_empty());
    }

    #[test]
    fn test_unknown_descriptor_writes_type_name() {
        let encoded = serde_json::to_value(GeometryDescriptor::unknown("LatheGeometry"))
            .expect("descriptor should encode");
        assert_eq!(
            encoded,
            json!({ "kind": "Unknown", "parameters": {}, "typeName": "LatheGeometry" })
        );
    }

    #[test]
    fn test_material_descriptor_partial_fields() {
        let descriptor: MaterialDescriptor =
            serde_json::from_value(json!({ "colorHex": "#00ff00", "opacity": "half" }))
                .expect("lenient");
        assert_eq!(descriptor.color_hex.as_deref(), Some("#00ff00"));
        assert_eq!(descriptor.opacity, None);
        assert_eq!(descriptor.roughness, None);
    }

    #[test]
    fn test_path_descriptor_accepts_pairs() {
        let descriptor = PathDescriptor::from_value(&json!({
            "points": [[0, 0], { "x": 1, "y": 0 }, [1, 1]],
            "holes": [[[0.2, 0.2], [0.4, 0.2], [0.3, 0.4]], "bogus"]
        }))
        .expect("object should decode");

        assert_eq!(descriptor.points.len(), 3);
        assert_eq!(descriptor.points[1], Vec2::new(1.0, 0.0));
        assert_eq!(descriptor.holes.len(), 1);
        assert!(PathDescriptor::from_value(&json!("not a path")).is_none());
    }
}
