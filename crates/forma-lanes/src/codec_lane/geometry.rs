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

//! Converts live geometries to descriptors and back.

use forma_core::lane::{Lane, LaneKind};
use forma_core::scene::{ExtrudeOptions, Geometry, Shape};
use forma_data::scene::lenient::{count_param, flag_param, number_param};
use forma_data::scene::{GeometryDescriptor, PathDescriptor};
use serde_json::{json, Map, Value};

use super::ShapePathCodecLane;

/// The geometry codec.
///
/// Decoding starts from the per-kind defaults of [`Geometry::defaults`] and
/// overrides every parameter the descriptor carries, so the defaults live in
/// exactly one table. It never fails: unusable descriptors become the unit box.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeometryCodecLane {
    paths: ShapePathCodecLane,
}

type Params = Map<String, Value>;

impl GeometryCodecLane {
    /// Creates a new instance of the lane.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes a live geometry.
    pub fn encode(&self, geometry: &Geometry) -> GeometryDescriptor {
        let parameters = match geometry {
            Geometry::Box(b) => json!({
                "width": b.width,
                "height": b.height,
                "depth": b.depth,
                "widthSegments": b.width_segments,
                "heightSegments": b.height_segments,
                "depthSegments": b.depth_segments,
            }),
            Geometry::Sphere(s) => json!({
                "radius": s.radius,
                "widthSegments": s.width_segments,
                "heightSegments": s.height_segments,
                "phiStart": s.phi_start,
                "phiLength": s.phi_length,
                "thetaStart": s.theta_start,
                "thetaLength": s.theta_length,
            }),
            Geometry::Cylinder(c) => json!({
                "radiusTop": c.radius_top,
                "radiusBottom": c.radius_bottom,
                "height": c.height,
                "radialSegments": c.radial_segments,
                "heightSegments": c.height_segments,
                "openEnded": c.open_ended,
                "thetaStart": c.theta_start,
                "thetaLength": c.theta_length,
            }),
            Geometry::Cone(c) => json!({
                "radius": c.radius,
                "height": c.height,
                "radialSegments": c.radial_segments,
                "heightSegments": c.height_segments,
                "openEnded": c.open_ended,
                "thetaStart": c.theta_start,
                "thetaLength": c.theta_length,
            }),
            Geometry::Plane(p) => json!({
                "width": p.width,
                "height": p.height,
                "widthSegments": p.width_segments,
                "heightSegments": p.height_segments,
            }),
            Geometry::Torus(t) => json!({
                "radius": t.radius,
                "tube": t.tube,
                "radialSegments": t.radial_segments,
                "tubularSegments": t.tubular_segments,
                "arc": t.arc,
            }),
            Geometry::Shape(s) => json!({
                "shapes": self.encode_shapes(&s.shapes, s.curve_segments),
                "curveSegments": s.curve_segments,
            }),
            Geometry::Extrude(e) => json!({
                "shapes": self.encode_shapes(&e.shapes, e.options.curve_segments),
                "options": encode_options(&e.options),
            }),
            Geometry::Foreign { type_name } => {
                log::debug!("Encoding '{type_name}' as an Unknown geometry");
                return GeometryDescriptor::unknown(type_name.clone());
            }
        };

        let parameters = match parameters {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        GeometryDescriptor::new(geometry.kind(), parameters)
    }

    fn encode_shapes(&self, shapes: &[Shape], divisions: u32) -> Vec<PathDescriptor> {
        shapes
            .iter()
            .map(|shape| self.paths.encode(shape, divisions))
            .collect()
    }

    /// Decodes a descriptor into a live geometry.
    pub fn decode(&self, descriptor: &GeometryDescriptor) -> Geometry {
        let Some(mut geometry) = Geometry::defaults(&descriptor.kind) else {
            log::warn!(
                "Unsupported geometry kind '{}'{}, substituting a unit box",
                descriptor.kind,
                descriptor
                    .type_name
                    .as_deref()
                    .map(|name| format!(" (originally {name})"))
                    .unwrap_or_default()
            );
            return Geometry::unit_box();
        };

        let p = &descriptor.parameters;
        match &mut geometry {
            Geometry::Box(b) => {
                set_number(p, "width", &mut b.width);
                set_number(p, "height", &mut b.height);
                set_number(p, "depth", &mut b.depth);
                set_count(p, "widthSegments", &mut b.width_segments);
                set_count(p, "heightSegments", &mut b.height_segments);
                set_count(p, "depthSegments", &mut b.depth_segments);
            }
            Geometry::Sphere(s) => {
                set_number(p, "radius", &mut s.radius);
                set_count(p, "widthSegments", &mut s.width_segments);
                set_count(p, "heightSegments", &mut s.height_segments);
                set_number(p, "phiStart", &mut s.phi_start);
                set_number(p, "phiLength", &mut s.phi_length);
                set_number(p, "thetaStart", &mut s.theta_start);
                set_number(p, "thetaLength", &mut s.theta_length);
            }
            Geometry::Cylinder(c) => {
                set_number(p, "radiusTop", &mut c.radius_top);
                set_number(p, "radiusBottom", &mut c.radius_bottom);
                set_number(p, "height", &mut c.height);
                set_count(p, "radialSegments", &mut c.radial_segments);
                set_count(p, "heightSegments", &mut c.height_segments);
                set_flag(p, "openEnded", &mut c.open_ended);
                set_number(p, "thetaStart", &mut c.theta_start);
                set_number(p, "thetaLength", &mut c.theta_length);
            }
            Geometry::Cone(c) => {
                set_number(p, "radius", &mut c.radius);
                set_number(p, "height", &mut c.height);
                set_count(p, "radialSegments", &mut c.radial_segments);
                set_count(p, "heightSegments", &mut c.height_segments);
                set_flag(p, "openEnded", &mut c.open_ended);
                set_number(p, "thetaStart", &mut c.theta_start);
                set_number(p, "thetaLength", &mut c.theta_length);
            }
            Geometry::Plane(pl) => {
                set_number(p, "width", &mut pl.width);
                set_number(p, "height", &mut pl.height);
                set_count(p, "widthSegments", &mut pl.width_segments);
                set_count(p, "heightSegments", &mut pl.height_segments);
            }
            Geometry::Torus(t) => {
                set_number(p, "radius", &mut t.radius);
                set_number(p, "tube", &mut t.tube);
                set_count(p, "radialSegments", &mut t.radial_segments);
                set_count(p, "tubularSegments", &mut t.tubular_segments);
                set_number(p, "arc", &mut t.arc);
            }
            Geometry::Shape(s) => {
                set_count(p, "curveSegments", &mut s.curve_segments);
                s.shapes = self.decode_shapes(p);
                if s.shapes.is_empty() {
                    return self.path_fallback(descriptor);
                }
            }
            Geometry::Extrude(e) => {
                if let Some(Value::Object(options)) = p.get("options") {
                    decode_options(options, &mut e.options);
                }
                e.shapes = self.decode_shapes(p);
                if e.shapes.is_empty() {
                    return self.path_fallback(descriptor);
                }
            }
            Geometry::Foreign { .. } => {}
        }

        geometry
    }

    fn decode_shapes(&self, parameters: &Params) -> Vec<Shape> {
        let Some(Value::Array(shapes)) = parameters.get("shapes") else {
            return Vec::new();
        };
        shapes
            .iter()
            .filter_map(PathDescriptor::from_value)
            .filter_map(|descriptor| self.paths.decode(&descriptor))
            .collect()
    }

    fn path_fallback(&self, descriptor: &GeometryDescriptor) -> Geometry {
        log::warn!(
            "{} geometry has no usable shapes, substituting a unit box",
            descriptor.kind
        );
        Geometry::unit_box()
    }
}

fn encode_options(options: &ExtrudeOptions) -> Value {
    json!({
        "depth": options.depth,
        "steps": options.steps,
        "bevelEnabled": options.bevel_enabled,
        "bevelThickness": options.bevel_thickness,
        "bevelSize": options.bevel_size,
        "bevelSegments": options.bevel_segments,
        "curveSegments": options.curve_segments,
    })
}

fn decode_options(p: &Params, options: &mut ExtrudeOptions) {
    set_number(p, "depth", &mut options.depth);
    set_count(p, "steps", &mut options.steps);
    set_flag(p, "bevelEnabled", &mut options.bevel_enabled);
    set_number(p, "bevelThickness", &mut options.bevel_thickness);
    set_number(p, "bevelSize", &mut options.bevel_size);
    set_count(p, "bevelSegments", &mut options.bevel_segments);
    set_count(p, "curveSegments", &mut options.curve_segments);
}

fn set_number(p: &Params, key: &str, slot: &mut f32) {
    if let Some(value) = number_param(p, key) {
        *slot = value;
    }
}

fn set_count(p: &Params, key: &str, slot: &mut u32) {
    if let Some(value) = count_param(p, key) {
        *slot = value;
    }
}

fn set_flag(p: &Params, key: &str, slot: &mut bool) {
    if let Some(value) = flag_param(p, key) {
        *slot = value;
    }
}

impl Lane for GeometryCodecLane {
    fn strategy_name(&self) -> &'static str {
        "FORMA_GEOMETRY_V1"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Codec
    }
}
