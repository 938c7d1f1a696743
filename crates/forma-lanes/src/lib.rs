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

//! # Forma Lanes
//!
//! The hot-path strategies of the persistence engine. Codec lanes convert one
//! live value to its descriptor and back; scene lanes turn whole entities into
//! records (serializer) and records back into entities (reconstructor).
//!
//! Decoding never fails. Missing or malformed data degrades to documented
//! defaults, to the unit box, or to a placeholder entity.

#![warn(missing_docs)]

pub mod codec_lane;
pub mod scene_lane;

pub use codec_lane::{GeometryCodecLane, MaterialCodecLane, ShapePathCodecLane};
pub use scene_lane::{
    ReconstructError, SceneReconstructorLane, SceneRecords, SceneSerializerLane,
};
