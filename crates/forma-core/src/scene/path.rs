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

//! Defines 2D paths and the shapes built from them.

use crate::math::Vec2;

/// One drawing command of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Starts the contour at a point.
    MoveTo(Vec2),
    /// Draws a straight line to a point.
    LineTo(Vec2),
    /// Draws a quadratic Bézier curve.
    QuadraticTo {
        /// The control point.
        control: Vec2,
        /// The end point.
        end: Vec2,
    },
    /// Draws a cubic Bézier curve.
    CubicTo {
        /// The first control point.
        control1: Vec2,
        /// The second control point.
        control2: Vec2,
        /// The end point.
        end: Vec2,
    },
}

/// A single 2D contour made of drawing commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a polygonal path: a move-to on the first point and a line-to on
    /// every following point.
    ///
    /// Returns `None` for an empty point list, which callers treat as "no path".
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut path = Self::new();
        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }
        Some(path)
    }

    /// Appends a move-to command.
    pub fn move_to(&mut self, point: Vec2) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(point));
        self
    }

    /// Appends a line-to command.
    pub fn line_to(&mut self, point: Vec2) -> &mut Self {
        self.segments.push(PathSegment::LineTo(point));
        self
    }

    /// Appends a quadratic curve command.
    pub fn quadratic_to(&mut self, control: Vec2, end: Vec2) -> &mut Self {
        self.segments.push(PathSegment::QuadraticTo { control, end });
        self
    }

    /// Appends a cubic curve command.
    pub fn cubic_to(&mut self, control1: Vec2, control2: Vec2, end: Vec2) -> &mut Self {
        self.segments.push(PathSegment::CubicTo {
            control1,
            control2,
            end,
        });
        self
    }

    /// Returns the drawing commands in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns `true` if the path has no commands.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Flattens the path into its ordered anchor points.
    ///
    /// Straight segments contribute their end point as-is, repeats included.
    /// Curves contribute `divisions` samples after their start point, the last
    /// one being the end point.
    pub fn points(&self, divisions: u32) -> Vec<Vec2> {
        let divisions = divisions.max(1);
        let mut points: Vec<Vec2> = Vec::with_capacity(self.segments.len());
        let mut cursor = Vec2::ZERO;

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => {
                    points.push(p);
                    cursor = p;
                }
                PathSegment::QuadraticTo { control, end } => {
                    for i in 1..=divisions {
                        let t = i as f32 / divisions as f32;
                        points.push(quadratic_bezier(cursor, control, end, t));
                    }
                    cursor = end;
                }
                PathSegment::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    for i in 1..=divisions {
                        let t = i as f32 / divisions as f32;
                        points.push(cubic_bezier(cursor, control1, control2, end, t));
                    }
                    cursor = end;
                }
            }
        }

        points
    }
}

fn quadratic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let a = Vec2::lerp(p0, p1, t);
    let b = Vec2::lerp(p1, p2, t);
    Vec2::lerp(a, b, t)
}

fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let a = quadratic_bezier(p0, p1, p2, t);
    let b = quadratic_bezier(p1, p2, p3, t);
    Vec2::lerp(a, b, t)
}

/// A closed outline with optional holes cut out of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    /// The outer contour.
    pub outline: Path,
    /// Contours removed from the interior.
    pub holes: Vec<Path>,
}

impl Shape {
    /// Creates a shape without holes.
    pub fn new(outline: Path) -> Self {
        Self {
            outline,
            holes: Vec::new(),
        }
    }

    /// Adds a hole to the shape.
    pub fn with_hole(mut self, hole: Path) -> Self {
        self.holes.push(hole);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_from_points_uses_move_then_lines() {
        let path = Path::from_points(&square()).unwrap();
        let segments = path.segments();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0], PathSegment::MoveTo(Vec2::new(0.0, 0.0)));
        assert!(segments[1..]
            .iter()
            .all(|s| matches!(s, PathSegment::LineTo(_))));
    }

    #[test]
    fn test_from_points_empty_is_none() {
        assert!(Path::from_points(&[]).is_none());
    }

    #[test]
    fn test_polygon_points_are_reproduced_exactly() {
        let points = square();
        let path = Path::from_points(&points).unwrap();
        assert_eq!(path.points(12), points);
    }

    #[test]
    fn test_repeated_vertices_are_kept() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ];
        let path = Path::from_points(&points).unwrap();
        assert_eq!(path.points(12), points);
    }

    #[test]
    fn test_curves_are_sampled() {
        let mut path = Path::new();
        path.move_to(Vec2::new(0.0, 0.0))
            .quadratic_to(Vec2::new(1.0, 2.0), Vec2::new(2.0, 0.0));
        let points = path.points(4);
        // Start point plus four samples, the last one being the end point.
        assert_eq!(points.len(), 5);
        assert_eq!(points[4], Vec2::new(2.0, 0.0));
        // The curve's midpoint is at (1, 1).
        assert!(points[2].approx_eq(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_cubic_curve_ends_on_end_point() {
        let mut path = Path::new();
        path.move_to(Vec2::ZERO).cubic_to(
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        );
        let points = path.points(8);
        assert_eq!(points.len(), 9);
        assert!(points[8].approx_eq(Vec2::new(1.0, 0.0)));
    }
}
