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

//! Groups the live, richly-typed scene graph types.
//!
//! These are the values an editor manipulates: meshes with parametric or
//! path-based geometry, containers of child objects, groups that reference
//! objects by id, and lights. Their storage-normalized counterparts live in
//! `forma-data`.

mod geometry;
mod group;
mod light;
mod material;
mod object;
mod path;
mod settings;

pub use geometry::*;
pub use group::*;
pub use light::*;
pub use material::*;
pub use object::*;
pub use path::*;
pub use settings::*;
