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

//! Converts 2D shapes to vertex lists and back.

use forma_core::lane::{Lane, LaneKind};
use forma_core::scene::{Path, Shape};
use forma_data::scene::PathDescriptor;

/// Flattens shapes to their anchor vertices and rebuilds them as polygons.
///
/// Decoding reproduces vertices exactly with straight segments only. Curves
/// in a live shape are sampled on encode, so a polygonal shape round-trips
/// unchanged while a curved one comes back as its sampled polygon.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShapePathCodecLane;

impl ShapePathCodecLane {
    /// Creates a new instance of the lane.
    pub fn new() -> Self {
        Self
    }

    /// Encodes a shape. `divisions` is the number of samples per curve segment.
    pub fn encode(&self, shape: &Shape, divisions: u32) -> PathDescriptor {
        PathDescriptor {
            points: shape.outline.points(divisions),
            holes: shape
                .holes
                .iter()
                .map(|hole| hole.points(divisions))
                .filter(|points| !points.is_empty())
                .collect(),
        }
    }

    /// Decodes a shape. Returns `None` when the outline has no points.
    ///
    /// Empty holes are skipped the same way.
    pub fn decode(&self, descriptor: &PathDescriptor) -> Option<Shape> {
        let outline = Path::from_points(&descriptor.points)?;
        let holes = descriptor
            .holes
            .iter()
            .filter_map(|hole| Path::from_points(hole))
            .collect();
        Some(Shape { outline, holes })
    }
}

impl Lane for ShapePathCodecLane {
    fn strategy_name(&self) -> &'static str {
        "FORMA_SHAPE_PATH_V1"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Codec
    }
}
