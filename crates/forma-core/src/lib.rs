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

//! # Forma Core
//!
//! Foundational crate containing the live scene types, traits, and interface
//! contracts shared by every other Forma crate.
//!
//! Nothing in here talks to a network or a renderer. The two external
//! collaborators of the persistence engine, the in-memory scene store and the
//! remote document store, are described as traits ([`store::SceneStore`] and
//! [`remote::RemoteDocumentStore`]) and implemented elsewhere.

#![warn(missing_docs)]

pub mod lane;
pub mod math;
pub mod remote;
pub mod scene;
pub mod store;

pub use store::SceneStore;
