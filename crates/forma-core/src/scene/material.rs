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

//! Defines the standard physically-based material used by every mesh.

use crate::math::Color;

/// The fixed alert color of the material put on placeholder entities.
pub const ERROR_INDICATOR_COLOR: Color = Color::MAGENTA;

/// A physically-based material using the metallic-roughness workflow.
///
/// # Examples
///
/// ```
/// use forma_core::scene::StandardMaterial;
/// use forma_core::math::Color;
///
/// // A smooth, metallic surface.
/// let chrome = StandardMaterial {
///     color: Color::rgb(0.9, 0.9, 0.9),
///     metalness: 1.0,
///     roughness: 0.1,
///     ..Default::default()
/// };
/// assert!(!chrome.transparent);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StandardMaterial {
    /// The base color (albedo) of the material.
    pub color: Color,

    /// The opacity in `[0.0, 1.0]`. Only honored when `transparent` is set.
    pub opacity: f32,

    /// Whether the material is blended with what is behind it.
    pub transparent: bool,

    /// The metallic factor (0.0 = dielectric, 1.0 = metal).
    pub metalness: f32,

    /// The roughness factor (0.0 = smooth, 1.0 = rough).
    pub roughness: f32,

    /// Whether the mesh is drawn as wireframe.
    pub wireframe: bool,

    /// The emitted color. Black means no emission.
    pub emissive: Color,
}

impl StandardMaterial {
    /// Creates an opaque material of the given color with default surface properties.
    pub fn from_color(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// The distinguishable material put on placeholder entities.
    pub fn error_indicator() -> Self {
        Self::from_color(ERROR_INDICATOR_COLOR)
    }

    /// Returns `true` if the material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emissive != Color::BLACK
    }
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            transparent: false,
            metalness: 0.0,
            roughness: 1.0,
            wireframe: false,
            emissive: Color::BLACK,
        }
    }
}
