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

//! Field decoders that never reject a document.
//!
//! The `deserialize_with` adapters read the raw JSON value first and only then
//! try to interpret it, so a malformed field can never fail the enclosing
//! record. The `*_param` helpers do the same for loosely-typed parameter maps.

use forma_core::math::{Vec2, Vec3};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Reads a field as `Some(T)`, or `None` if it has the wrong shape.
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Reads a field as `T`, or `T::default()` if it has the wrong shape.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    option(deserializer).map(Option::unwrap_or_default)
}

/// Reads a vector written as `{x, y, z}` or `[x, y, z]`.
pub fn vec3<'de, D>(deserializer: D) -> Result<Option<Vec3>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| vec3_from_value(&value))
}

/// Reads a list of 2D points, dropping entries that are not points.
pub fn points<'de, D>(deserializer: D) -> Result<Vec<Vec2>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| points_from_value(&value))
}

/// Reads a list of hole contours, dropping entries that are not point lists.
pub fn holes<'de, D>(deserializer: D) -> Result<Vec<Vec<Vec2>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|holes| {
            holes
                .iter()
                .filter(|hole| hole.is_array())
                .map(points_from_value)
                .collect()
        })
        .unwrap_or_default())
}

/// Reads a list of strings, dropping entries that are not strings.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default())
}

/// Reads an object as a parameter map, or an empty map for anything else.
pub fn map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

/// Interprets a JSON value as a 3D vector.
///
/// All three components must be numbers. Values too large for `f32` become
/// infinite and are left for the caller to validate.
pub fn vec3_from_value(value: &Value) -> Option<Vec3> {
    match value {
        Value::Object(map) => Some(Vec3::new(
            map.get("x")?.as_f64()? as f32,
            map.get("y")?.as_f64()? as f32,
            map.get("z")?.as_f64()? as f32,
        )),
        Value::Array(items) if items.len() == 3 => Some(Vec3::new(
            items[0].as_f64()? as f32,
            items[1].as_f64()? as f32,
            items[2].as_f64()? as f32,
        )),
        _ => None,
    }
}

/// Interprets a JSON value as a 2D point, written as `{x, y}` or `[x, y]`.
pub fn vec2_from_value(value: &Value) -> Option<Vec2> {
    match value {
        Value::Object(map) => Some(Vec2::new(
            map.get("x")?.as_f64()? as f32,
            map.get("y")?.as_f64()? as f32,
        )),
        Value::Array(items) if items.len() == 2 => Some(Vec2::new(
            items[0].as_f64()? as f32,
            items[1].as_f64()? as f32,
        )),
        _ => None,
    }
    .filter(Vec2::is_finite)
}

fn points_from_value(value: &Value) -> Vec<Vec2> {
    value
        .as_array()
        .map(|points| points.iter().filter_map(vec2_from_value).collect())
        .unwrap_or_default()
}

/// Reads a finite number from a parameter map.
pub fn number_param(parameters: &Map<String, Value>, key: &str) -> Option<f32> {
    parameters
        .get(key)
        .and_then(Value::as_f64)
        .map(|n| n as f32)
        .filter(|n| n.is_finite())
}

/// Reads a segment count from a parameter map, rounded and clamped to at least 1.
pub fn count_param(parameters: &Map<String, Value>, key: &str) -> Option<u32> {
    number_param(parameters, key).map(|n| n.round().clamp(1.0, u32::MAX as f32) as u32)
}

/// Reads a boolean from a parameter map.
pub fn flag_param(parameters: &Map<String, Value>, key: &str) -> Option<bool> {
    parameters.get(key).and_then(Value::as_bool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Default)]
    #[serde(default)]
    struct Probe {
        #[serde(deserialize_with = "option")]
        flag: Option<bool>,
        #[serde(deserialize_with = "vec3")]
        position: Option<Vec3>,
        #[serde(deserialize_with = "strings")]
        ids: Vec<String>,
    }

    #[test]
    fn test_wrong_typed_fields_read_as_absent() {
        let probe: Probe = serde_json::from_value(json!({
            "flag": "yes",
            "position": "origin",
            "ids": 12
        }))
        .expect("lenient fields never fail");

        assert_eq!(probe.flag, None);
        assert_eq!(probe.position, None);
        assert!(probe.ids.is_empty());
    }

    #[test]
    fn test_vectors_accept_objects_and_arrays() {
        assert_eq!(
            vec3_from_value(&json!({ "x": 1, "y": 2.5, "z": -3 })),
            Some(Vec3::new(1.0, 2.5, -3.0))
        );
        assert_eq!(
            vec3_from_value(&json!([1, 2, 3])),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
        assert_eq!(vec3_from_value(&json!({ "x": 1, "y": 2 })), None);
        assert_eq!(vec2_from_value(&json!([0.5, 1])), Some(Vec2::new(0.5, 1.0)));
    }

    #[test]
    fn test_string_list_skips_foreign_entries() {
        let probe: Probe =
            serde_json::from_value(json!({ "ids": ["a", 3, null, "b"] })).expect("lenient");
        assert_eq!(probe.ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_parameter_helpers() {
        let params = json!({ "radius": 2, "segments": 0, "open": true, "bad": "x" });
        let params = params.as_object().expect("object literal");

        assert_eq!(number_param(params, "radius"), Some(2.0));
        assert_eq!(number_param(params, "bad"), None);
        assert_eq!(count_param(params, "segments"), Some(1));
        assert_eq!(flag_param(params, "open"), Some(true));
        assert_eq!(flag_param(params, "missing"), None);
    }
}
