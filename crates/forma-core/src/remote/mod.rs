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

//! The contract of the remote document store that persists projects.
//!
//! A project is addressed by its owner and project id. Its state is spread
//! over one aggregate scene document and three flat collections (objects,
//! groups and lights), each holding one document per top-level entity.

mod error;
mod subscription;

pub use self::error::*;
pub use self::subscription::*;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Addresses one project of one owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectKey {
    /// The user that owns the project.
    pub owner_id: String,
    /// The project identifier.
    pub project_id: String,
}

impl ProjectKey {
    /// Creates a new key.
    pub fn new(owner_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            project_id: project_id.into(),
        }
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner_id, self.project_id)
    }
}

/// The per-project collections that hold entity documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Collection {
    /// Top-level scene objects.
    Objects,
    /// Editor groups.
    Groups,
    /// Scene lights.
    Lights,
}

impl Collection {
    /// Every collection, in subscription order.
    pub const ALL: [Collection; 3] = [Collection::Objects, Collection::Groups, Collection::Lights];

    /// The collection's name in the remote store.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Objects => "objects",
            Collection::Groups => "groups",
            Collection::Lights => "lights",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One document of a collection: its id and its JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The document id. Matches the entity id it stores.
    pub id: String,
    /// The document body.
    pub data: serde_json::Value,
}

impl Document {
    /// Creates a new document.
    pub fn new(id: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// A remote store holding project documents.
///
/// All calls are asynchronous and may fail with a [`RemoteError`]; callers
/// decide whether to retry. Subscriptions deliver the full current membership
/// of a collection once when established and again after every change.
#[async_trait]
pub trait RemoteDocumentStore: Send + Sync {
    /// Fetches the aggregate scene document of a project, if one exists.
    async fn get_scene(&self, key: &ProjectKey) -> Result<Option<serde_json::Value>, RemoteError>;

    /// Creates or replaces the aggregate scene document.
    async fn put_scene(&self, key: &ProjectKey, scene: serde_json::Value)
        -> Result<(), RemoteError>;

    /// Deletes the aggregate scene document and every collection document.
    async fn delete_scene(&self, key: &ProjectKey) -> Result<(), RemoteError>;

    /// Lists every document of a collection.
    async fn list_documents(
        &self,
        collection: Collection,
        key: &ProjectKey,
    ) -> Result<Vec<Document>, RemoteError>;

    /// Creates or replaces one document of a collection.
    async fn put_document(
        &self,
        collection: Collection,
        key: &ProjectKey,
        document: Document,
    ) -> Result<(), RemoteError>;

    /// Deletes one document of a collection. Deleting a missing id is not an error.
    async fn delete_document(
        &self,
        collection: Collection,
        key: &ProjectKey,
        id: &str,
    ) -> Result<(), RemoteError>;

    /// Opens a push subscription delivering snapshots into `sink`.
    async fn subscribe(
        &self,
        collection: Collection,
        key: &ProjectKey,
        sink: SnapshotSink,
    ) -> Result<Subscription, RemoteError>;
}
