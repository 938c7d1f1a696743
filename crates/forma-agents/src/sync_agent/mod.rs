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

//! Acts as the **[A]gent** keeping a local scene store in step with the
//! remote project.
//!
//! The agent walks each project through `Idle → Loading → Subscribed →
//! TornDown`. While subscribed, every collection snapshot delivered by the
//! remote store is reconstructed and merged into the store by id; entities
//! missing from a snapshot are pruned.
//!
//! Snapshots carry the generation they were subscribed under. The generation
//! moves on every activation and teardown, so anything still in flight from a
//! previous project is discarded before it can touch the store.

mod agent;

pub use agent::*;
