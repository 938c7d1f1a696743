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

//! Serializable, storage-normalized representations of a scene.
//!
//! These types are the wire contract. Field names are camelCase and every
//! field decodes leniently: a value of the wrong type is read as if it were
//! absent, leaving the documented default to the reconstructor.

mod descriptor;
mod document;
pub mod lenient;
mod record;

pub use self::descriptor::*;
pub use self::document::*;
pub use self::record::*;
