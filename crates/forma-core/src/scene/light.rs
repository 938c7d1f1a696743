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

//! Defines the three light kinds a scene may contain.
//!
//! Per-kind parameters live on the variant payloads; their `Default` impls are
//! the per-type default table the reconstructor falls back to.

use crate::math::{Color, Vec3, FRAC_PI_3};
use std::fmt;

/// A light that illuminates from a uniform direction, from its position towards its target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectionalLight {
    /// The point the light is aimed at. Defaults to the world origin.
    pub target: Vec3,
}

/// A light that emits in all directions from its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Maximum range of the light. `0.0` means unlimited.
    pub distance: f32,
    /// How fast the light dims along the distance.
    pub decay: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            distance: 0.0,
            decay: 2.0,
        }
    }
}

/// A light that emits in a cone from its position towards its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    /// The point the cone is aimed at. Defaults to the world origin.
    pub target: Vec3,
    /// Maximum range of the light. `0.0` means unlimited.
    pub distance: f32,
    /// How fast the light dims along the distance.
    pub decay: f32,
    /// Maximum extent of the cone, in radians.
    pub angle: f32,
    /// Fraction of the cone attenuated by the penumbra, in `[0.0, 1.0]`.
    pub penumbra: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 0.0,
            decay: 2.0,
            angle: FRAC_PI_3,
            penumbra: 0.0,
        }
    }
}

/// The tag of a light kind, as written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    /// See [`DirectionalLight`].
    Directional,
    /// See [`PointLight`].
    Point,
    /// See [`SpotLight`].
    Spot,
}

impl LightKind {
    /// Returns the wire tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            LightKind::Directional => "Directional",
            LightKind::Point => "Point",
            LightKind::Spot => "Spot",
        }
    }

    /// Maps a wire tag to a kind. Returns `None` for anything outside the known set.
    ///
    /// Matching is exact so that a tag read from storage is written back
    /// unchanged.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Directional" => Some(LightKind::Directional),
            "Point" => Some(LightKind::Point),
            "Spot" => Some(LightKind::Spot),
            _ => None,
        }
    }

    /// Returns the default parameters for this kind.
    pub fn defaults(&self) -> LightType {
        match self {
            LightKind::Directional => LightType::Directional(DirectionalLight::default()),
            LightKind::Point => LightType::Point(PointLight::default()),
            LightKind::Spot => LightType::Spot(SpotLight::default()),
        }
    }
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An enumeration of all supported light types with their parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightType {
    /// A directional light.
    Directional(DirectionalLight),
    /// A point light.
    Point(PointLight),
    /// A spotlight.
    Spot(SpotLight),
}

impl LightType {
    /// Returns the tag of this light type.
    pub fn kind(&self) -> LightKind {
        match self {
            LightType::Directional(_) => LightKind::Directional,
            LightType::Point(_) => LightKind::Point,
            LightType::Spot(_) => LightKind::Spot,
        }
    }

    /// Returns the target for kinds that have one.
    pub fn target(&self) -> Option<Vec3> {
        match self {
            LightType::Directional(d) => Some(d.target),
            LightType::Spot(s) => Some(s.target),
            LightType::Point(_) => None,
        }
    }
}

impl Default for LightType {
    fn default() -> Self {
        LightType::Directional(DirectionalLight::default())
    }
}

/// A light source placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Identifier, unique within the project.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The type and type-specific parameters of the light.
    pub light_type: LightType,
    /// World-space position.
    pub position: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
    /// The color of the light.
    pub color: Color,
    /// Whether the light contributes to the scene.
    pub visible: bool,
    /// Whether the light casts shadows.
    pub cast_shadow: bool,
}

impl Light {
    /// Creates a new visible white light of intensity 1 at the origin.
    pub fn new(id: impl Into<String>, name: impl Into<String>, light_type: LightType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            light_type,
            position: Vec3::ZERO,
            intensity: 1.0,
            color: Color::WHITE,
            visible: true,
            cast_shadow: false,
        }
    }

    /// Creates a new directional light with a generated id.
    pub fn directional() -> Self {
        Self::new(
            uuid::Uuid::new_v4().to_string(),
            "Directional Light",
            LightKind::Directional.defaults(),
        )
    }

    /// Creates a new point light with a generated id.
    pub fn point() -> Self {
        Self::new(
            uuid::Uuid::new_v4().to_string(),
            "Point Light",
            LightKind::Point.defaults(),
        )
    }

    /// Creates a new spot light with a generated id.
    pub fn spot() -> Self {
        Self::new(
            uuid::Uuid::new_v4().to_string(),
            "Spot Light",
            LightKind::Spot.defaults(),
        )
    }

    /// Moves the light.
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Returns the tag of this light.
    pub fn kind(&self) -> LightKind {
        self.light_type.kind()
    }
}
