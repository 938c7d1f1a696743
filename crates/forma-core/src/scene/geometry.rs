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

//! Defines the live geometry kinds supported by the scene model.
//!
//! Each kind is its own struct carrying only the parameters valid for it. The
//! `Default` impl of every struct is the single source of default values: the
//! geometry decoder starts from [`Geometry::defaults`] and overrides whatever
//! the stored descriptor provides.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::f32::consts::{PI, TAU};
use std::fmt;

use super::Shape;

/// The closed set of geometry tags used on the wire.
///
/// Tags round-trip byte-for-byte: a tag that is not part of the known set is
/// kept verbatim in [`GeometryKind::Unrecognized`] so it serializes back to the
/// exact string it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GeometryKind {
    /// An axis-aligned box.
    Box,
    /// A UV sphere.
    Sphere,
    /// A cylinder with independent top and bottom radii.
    Cylinder,
    /// A cone.
    Cone,
    /// A flat rectangle.
    Plane,
    /// A torus.
    Torus,
    /// A flat geometry filled from 2D shape paths.
    ShapePath,
    /// 2D shape paths extruded along Z.
    ExtrudedShapePath,
    /// A geometry whose concrete kind could not be encoded.
    #[default]
    Unknown,
    /// A tag that is not part of the known set, kept for diagnostics.
    Unrecognized(String),
}

impl GeometryKind {
    /// Returns the wire tag for this kind.
    pub fn tag(&self) -> &str {
        match self {
            GeometryKind::Box => "Box",
            GeometryKind::Sphere => "Sphere",
            GeometryKind::Cylinder => "Cylinder",
            GeometryKind::Cone => "Cone",
            GeometryKind::Plane => "Plane",
            GeometryKind::Torus => "Torus",
            GeometryKind::ShapePath => "ShapePath",
            GeometryKind::ExtrudedShapePath => "ExtrudedShapePath",
            GeometryKind::Unknown => "Unknown",
            GeometryKind::Unrecognized(tag) => tag,
        }
    }

    /// Maps a wire tag to a kind.
    ///
    /// Only the canonical tags are recognized. Anything else, renderer type
    /// names included, is kept verbatim as [`GeometryKind::Unrecognized`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Box" => GeometryKind::Box,
            "Sphere" => GeometryKind::Sphere,
            "Cylinder" => GeometryKind::Cylinder,
            "Cone" => GeometryKind::Cone,
            "Plane" => GeometryKind::Plane,
            "Torus" => GeometryKind::Torus,
            "ShapePath" => GeometryKind::ShapePath,
            "ExtrudedShapePath" => GeometryKind::ExtrudedShapePath,
            "Unknown" => GeometryKind::Unknown,
            other => GeometryKind::Unrecognized(other.to_string()),
        }
    }

    /// Returns `true` for the six kinds fully described by scalar parameters.
    pub fn is_parametric(&self) -> bool {
        matches!(
            self,
            GeometryKind::Box
                | GeometryKind::Sphere
                | GeometryKind::Cylinder
                | GeometryKind::Cone
                | GeometryKind::Plane
                | GeometryKind::Torus
        )
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for GeometryKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for GeometryKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(GeometryKind::from_tag(&tag))
    }
}

/// Parameters of a box geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    /// Size along X.
    pub width: f32,
    /// Size along Y.
    pub height: f32,
    /// Size along Z.
    pub depth: f32,
    /// Number of segments along X.
    pub width_segments: u32,
    /// Number of segments along Y.
    pub height_segments: u32,
    /// Number of segments along Z.
    pub depth_segments: u32,
}

impl BoxGeometry {
    /// Creates a box with the given extents and a single segment per face.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            ..Default::default()
        }
    }
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            width_segments: 1,
            height_segments: 1,
            depth_segments: 1,
        }
    }
}

/// Parameters of a UV sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    /// Sphere radius.
    pub radius: f32,
    /// Number of horizontal segments.
    pub width_segments: u32,
    /// Number of vertical segments.
    pub height_segments: u32,
    /// Horizontal starting angle.
    pub phi_start: f32,
    /// Horizontal sweep angle.
    pub phi_length: f32,
    /// Vertical starting angle.
    pub theta_start: f32,
    /// Vertical sweep angle.
    pub theta_length: f32,
}

impl Default for SphereGeometry {
    fn default() -> Self {
        Self {
            radius: 0.5,
            width_segments: 32,
            height_segments: 16,
            phi_start: 0.0,
            phi_length: TAU,
            theta_start: 0.0,
            theta_length: PI,
        }
    }
}

/// Parameters of a cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderGeometry {
    /// Radius at the top cap.
    pub radius_top: f32,
    /// Radius at the bottom cap.
    pub radius_bottom: f32,
    /// Height along Y.
    pub height: f32,
    /// Number of segments around the circumference.
    pub radial_segments: u32,
    /// Number of rows of faces along the height.
    pub height_segments: u32,
    /// Whether the caps are left open.
    pub open_ended: bool,
    /// Starting angle of the sweep.
    pub theta_start: f32,
    /// Sweep angle.
    pub theta_length: f32,
}

impl Default for CylinderGeometry {
    fn default() -> Self {
        Self {
            radius_top: 0.5,
            radius_bottom: 0.5,
            height: 1.0,
            radial_segments: 32,
            height_segments: 1,
            open_ended: false,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }
}

/// Parameters of a cone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeGeometry {
    /// Radius of the base.
    pub radius: f32,
    /// Height along Y.
    pub height: f32,
    /// Number of segments around the circumference.
    pub radial_segments: u32,
    /// Number of rows of faces along the height.
    pub height_segments: u32,
    /// Whether the base is left open.
    pub open_ended: bool,
    /// Starting angle of the sweep.
    pub theta_start: f32,
    /// Sweep angle.
    pub theta_length: f32,
}

impl Default for ConeGeometry {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 1.0,
            radial_segments: 32,
            height_segments: 1,
            open_ended: false,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }
}

/// Parameters of a flat rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneGeometry {
    /// Size along X.
    pub width: f32,
    /// Size along Y.
    pub height: f32,
    /// Number of segments along X.
    pub width_segments: u32,
    /// Number of segments along Y.
    pub height_segments: u32,
}

impl Default for PlaneGeometry {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            width_segments: 1,
            height_segments: 1,
        }
    }
}

/// Parameters of a torus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusGeometry {
    /// Distance from the center of the torus to the center of the tube.
    pub radius: f32,
    /// Radius of the tube.
    pub tube: f32,
    /// Number of segments around the tube.
    pub radial_segments: u32,
    /// Number of segments along the ring.
    pub tubular_segments: u32,
    /// Central angle of the ring.
    pub arc: f32,
}

impl Default for TorusGeometry {
    fn default() -> Self {
        Self {
            radius: 0.5,
            tube: 0.2,
            radial_segments: 16,
            tubular_segments: 100,
            arc: TAU,
        }
    }
}

/// A flat geometry filled from one or more 2D shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGeometry {
    /// The shapes to fill.
    pub shapes: Vec<Shape>,
    /// Number of samples per curved segment.
    pub curve_segments: u32,
}

impl Default for ShapeGeometry {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            curve_segments: 12,
        }
    }
}

/// Options controlling how shapes are extruded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeOptions {
    /// Extrusion depth along Z.
    pub depth: f32,
    /// Number of subdivisions along the depth.
    pub steps: u32,
    /// Whether a bevel is applied to the edges.
    pub bevel_enabled: bool,
    /// How deep into the shape the bevel goes.
    pub bevel_thickness: f32,
    /// Distance from the outline that the bevel extends.
    pub bevel_size: f32,
    /// Number of bevel layers.
    pub bevel_segments: u32,
    /// Number of samples per curved segment.
    pub curve_segments: u32,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            depth: 1.0,
            steps: 1,
            bevel_enabled: false,
            bevel_thickness: 0.2,
            bevel_size: 0.1,
            bevel_segments: 3,
            curve_segments: 12,
        }
    }
}

/// One or more 2D shapes extruded into a solid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtrudeGeometry {
    /// The shapes to extrude.
    pub shapes: Vec<Shape>,
    /// The extrusion options.
    pub options: ExtrudeOptions,
}

/// A live geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// See [`BoxGeometry`].
    Box(BoxGeometry),
    /// See [`SphereGeometry`].
    Sphere(SphereGeometry),
    /// See [`CylinderGeometry`].
    Cylinder(CylinderGeometry),
    /// See [`ConeGeometry`].
    Cone(ConeGeometry),
    /// See [`PlaneGeometry`].
    Plane(PlaneGeometry),
    /// See [`TorusGeometry`].
    Torus(TorusGeometry),
    /// See [`ShapeGeometry`].
    Shape(ShapeGeometry),
    /// See [`ExtrudeGeometry`].
    Extrude(ExtrudeGeometry),
    /// A geometry produced by some other tool that the codecs cannot describe.
    ///
    /// Only the concrete type name survives, for diagnostics.
    Foreign {
        /// The original concrete type name.
        type_name: String,
    },
}

impl Geometry {
    /// The 1×1×1 box used wherever geometry data cannot be trusted.
    pub fn unit_box() -> Self {
        Geometry::Box(BoxGeometry::default())
    }

    /// Returns the default geometry for a kind, or `None` for kinds that have
    /// no defaults (`Unknown` and unrecognized tags).
    pub fn defaults(kind: &GeometryKind) -> Option<Self> {
        match kind {
            GeometryKind::Box => Some(Geometry::Box(BoxGeometry::default())),
            GeometryKind::Sphere => Some(Geometry::Sphere(SphereGeometry::default())),
            GeometryKind::Cylinder => Some(Geometry::Cylinder(CylinderGeometry::default())),
            GeometryKind::Cone => Some(Geometry::Cone(ConeGeometry::default())),
            GeometryKind::Plane => Some(Geometry::Plane(PlaneGeometry::default())),
            GeometryKind::Torus => Some(Geometry::Torus(TorusGeometry::default())),
            GeometryKind::ShapePath => Some(Geometry::Shape(ShapeGeometry::default())),
            GeometryKind::ExtrudedShapePath => Some(Geometry::Extrude(ExtrudeGeometry::default())),
            GeometryKind::Unknown | GeometryKind::Unrecognized(_) => None,
        }
    }

    /// Returns the wire kind of this geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Box(_) => GeometryKind::Box,
            Geometry::Sphere(_) => GeometryKind::Sphere,
            Geometry::Cylinder(_) => GeometryKind::Cylinder,
            Geometry::Cone(_) => GeometryKind::Cone,
            Geometry::Plane(_) => GeometryKind::Plane,
            Geometry::Torus(_) => GeometryKind::Torus,
            Geometry::Shape(_) => GeometryKind::ShapePath,
            Geometry::Extrude(_) => GeometryKind::ExtrudedShapePath,
            Geometry::Foreign { .. } => GeometryKind::Unknown,
        }
    }

    /// Returns the concrete type name, as reported in diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            Geometry::Box(_) => "BoxGeometry",
            Geometry::Sphere(_) => "SphereGeometry",
            Geometry::Cylinder(_) => "CylinderGeometry",
            Geometry::Cone(_) => "ConeGeometry",
            Geometry::Plane(_) => "PlaneGeometry",
            Geometry::Torus(_) => "TorusGeometry",
            Geometry::Shape(_) => "ShapeGeometry",
            Geometry::Extrude(_) => "ExtrudeGeometry",
            Geometry::Foreign { type_name } => type_name,
        }
    }

    /// Returns the box parameters if this is a box.
    pub fn as_box(&self) -> Option<&BoxGeometry> {
        match self {
            Geometry::Box(b) => Some(b),
            _ => None,
        }
    }

    /// Returns `true` if this is the default 1×1×1 box.
    pub fn is_unit_box(&self) -> bool {
        self.as_box().is_some_and(|b| *b == BoxGeometry::default())
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::unit_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        let kinds = [
            GeometryKind::Box,
            GeometryKind::Sphere,
            GeometryKind::Cylinder,
            GeometryKind::Cone,
            GeometryKind::Plane,
            GeometryKind::Torus,
            GeometryKind::ShapePath,
            GeometryKind::ExtrudedShapePath,
            GeometryKind::Unknown,
        ];
        for kind in kinds {
            assert_eq!(GeometryKind::from_tag(kind.tag()), kind);
        }
    }

    #[test]
    fn test_unrecognized_tag_is_kept_verbatim() {
        let kind = GeometryKind::from_tag("FooGeometry");
        assert_eq!(kind, GeometryKind::Unrecognized("FooGeometry".to_string()));
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, "\"FooGeometry\"");
    }

    #[test]
    fn test_renderer_type_names_are_not_canonical() {
        for tag in ["BoxGeometry", "ExtrudeGeometry", "box"] {
            let kind = GeometryKind::from_tag(tag);
            assert_eq!(kind, GeometryKind::Unrecognized(tag.to_string()));
            assert_eq!(kind.tag(), tag);
        }
    }

    #[test]
    fn test_defaults_table() {
        assert!(Geometry::defaults(&GeometryKind::Box)
            .unwrap()
            .is_unit_box());
        match Geometry::defaults(&GeometryKind::Sphere) {
            Some(Geometry::Sphere(s)) => {
                assert_eq!(s.radius, 0.5);
                assert_eq!((s.width_segments, s.height_segments), (32, 16));
            }
            other => panic!("unexpected defaults: {other:?}"),
        }
        assert!(Geometry::defaults(&GeometryKind::Unknown).is_none());
        assert!(Geometry::defaults(&GeometryKind::from_tag("Nope")).is_none());
    }

    #[test]
    fn test_foreign_geometry_reports_unknown_kind() {
        let foreign = Geometry::Foreign {
            type_name: "LatheGeometry".to_string(),
        };
        assert_eq!(foreign.kind(), GeometryKind::Unknown);
        assert_eq!(foreign.type_name(), "LatheGeometry");
    }
}
