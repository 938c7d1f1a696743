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

//! Scene-wide settings persisted in the project's aggregate document.

use crate::math::{Color, Vec3};

/// The editor camera as last saved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// `true` for a perspective projection, `false` for orthographic.
    pub perspective: bool,
    /// Camera position.
    pub position: Vec3,
    /// The point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view, in degrees.
    pub fov: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            perspective: true,
            position: Vec3::new(5.0, 5.0, 5.0),
            target: Vec3::ZERO,
            fov: 75.0,
        }
    }
}

/// Scene-wide display settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    /// Viewport background.
    pub background_color: Color,
    /// Whether the ground grid is drawn.
    pub grid_visible: bool,
    /// Extent of the ground grid.
    pub grid_size: f32,
    /// The editor camera.
    pub camera: CameraState,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            background_color: Color::from_u32(0xf0f0f0),
            grid_visible: true,
            grid_size: 20.0,
            camera: CameraState::default(),
        }
    }
}

/// Descriptive project fields stored next to the settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectMetadata {
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}
