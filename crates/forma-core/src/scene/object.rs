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

//! Defines scene objects: leaf meshes and containers of child objects.

use crate::math::Vec3;

use super::{Geometry, StandardMaterial};

/// Describes an object's position, rotation and scale.
///
/// The rotation is a set of Euler angles in radians, applied in XYZ order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The translation of the object.
    pub position: Vec3,
    /// The Euler rotation of the object, in radians.
    pub rotation: Vec3,
    /// The scale of the object.
    pub scale: Vec3,
}

impl Transform {
    /// Creates a new `Transform`.
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Creates a `Transform` with a given position and identity rotation/scale.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Creates the identity `Transform`.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Returns `true` if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for Transform {
    /// Returns the identity `Transform`.
    fn default() -> Self {
        Self::identity()
    }
}

/// The geometry and material of a leaf object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// The shape of the mesh.
    pub geometry: Geometry,
    /// The surface appearance of the mesh.
    pub material: StandardMaterial,
}

impl Mesh {
    /// Creates a new mesh.
    pub fn new(geometry: Geometry, material: StandardMaterial) -> Self {
        Self { geometry, material }
    }
}

/// What an object carries: a mesh, or an ordered list of children.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectBody {
    /// A leaf object with its own geometry.
    Mesh(Mesh),
    /// An object that only groups its children. May be empty.
    Container(Vec<Object3D>),
}

/// A scene object.
#[derive(Debug, Clone, PartialEq)]
pub struct Object3D {
    /// Identifier, unique within the project.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the object is rendered.
    pub visible: bool,
    /// Whether the object is protected from editing.
    pub locked: bool,
    /// Soft reference to the group this object belongs to.
    pub group_id: Option<String>,
    /// Local transform.
    pub transform: Transform,
    /// Mesh or children.
    pub body: ObjectBody,
    /// Set on entities substituted for records that could not be reconstructed.
    pub placeholder: bool,
}

impl Object3D {
    /// Creates a visible, unlocked leaf mesh.
    pub fn mesh(
        id: impl Into<String>,
        name: impl Into<String>,
        geometry: Geometry,
        material: StandardMaterial,
    ) -> Self {
        Self::with_body(id, name, ObjectBody::Mesh(Mesh::new(geometry, material)))
    }

    /// Creates a visible, unlocked container.
    pub fn container(
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<Object3D>,
    ) -> Self {
        Self::with_body(id, name, ObjectBody::Container(children))
    }

    /// Creates a leaf mesh with a generated id.
    pub fn new_mesh(
        name: impl Into<String>,
        geometry: Geometry,
        material: StandardMaterial,
    ) -> Self {
        Self::mesh(uuid::Uuid::new_v4().to_string(), name, geometry, material)
    }

    fn with_body(id: impl Into<String>, name: impl Into<String>, body: ObjectBody) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visible: true,
            locked: false,
            group_id: None,
            transform: Transform::identity(),
            body,
            placeholder: false,
        }
    }

    /// Replaces the transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the group soft reference.
    pub fn in_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Returns the mesh of a leaf object.
    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.body {
            ObjectBody::Mesh(mesh) => Some(mesh),
            ObjectBody::Container(_) => None,
        }
    }

    /// Returns the children of a container.
    pub fn children(&self) -> Option<&[Object3D]> {
        match &self.body {
            ObjectBody::Container(children) => Some(children),
            ObjectBody::Mesh(_) => None,
        }
    }

    /// Returns `true` if this object is a container.
    pub fn is_container(&self) -> bool {
        matches!(self.body, ObjectBody::Container(_))
    }

    /// Returns `true` if this object or any descendant is a placeholder.
    pub fn has_placeholder(&self) -> bool {
        self.placeholder
            || self
                .children()
                .is_some_and(|children| children.iter().any(Object3D::has_placeholder))
    }

    /// Counts this object and all its descendants.
    pub fn count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.iter().map(Object3D::count).sum())
    }
}
