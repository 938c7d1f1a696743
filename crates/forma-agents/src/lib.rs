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

//! # Forma Agents
//!
//! Agents own the lanes and talk to the remote store. The [`SyncAgent`] keeps
//! a scene store in step with the active project; the [`PersistenceAgent`]
//! writes a scene back.

#![warn(missing_docs)]

mod error;
pub mod persistence_agent;
pub mod sync_agent;

pub use error::SyncError;
pub use persistence_agent::{PersistenceAgent, SaveReport};
pub use sync_agent::{SyncAgent, SyncState};
