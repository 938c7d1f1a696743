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

//! Defines the PersistenceAgent, which writes a scene to the remote store.

use std::collections::HashSet;
use std::sync::Arc;

use forma_core::lane::Lane;
use forma_core::remote::{Collection, Document, ProjectKey, RemoteDocumentStore, RemoteError};
use forma_core::scene::{Group, Light, Object3D};
use forma_data::SceneWorld;
use forma_lanes::SceneSerializerLane;
use serde::Serialize;

use crate::SyncError;

/// What one [`PersistenceAgent::save`] did to the remote store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Documents written, aggregate document excluded.
    pub written: usize,
    /// Stale documents deleted.
    pub removed: usize,
}

/// The agent responsible for saving and deleting project data.
pub struct PersistenceAgent {
    remote: Arc<dyn RemoteDocumentStore>,
    serializer: SceneSerializerLane,
}

impl PersistenceAgent {
    /// Creates a new `PersistenceAgent` writing to `remote`.
    pub fn new(remote: Arc<dyn RemoteDocumentStore>) -> Self {
        let serializer = SceneSerializerLane::new();
        log::debug!(
            "PersistenceAgent using {} lane '{}'",
            serializer.lane_kind(),
            serializer.strategy_name()
        );
        Self { remote, serializer }
    }

    /// Saves a whole world as project `key`.
    ///
    /// Writes the aggregate document, upserts one document per entity, then
    /// deletes documents of the project that are no longer in the world. The
    /// first failing call aborts the save and is returned.
    ///
    /// Objects holding placeholders are neither written nor deleted, so the
    /// stored record they stand in for is left as it was.
    pub async fn save(
        &self,
        key: &ProjectKey,
        world: &SceneWorld,
    ) -> Result<SaveReport, SyncError> {
        let records = self.serializer.serialize_world(world);
        let mut report = SaveReport::default();

        let scene = serde_json::to_value(&records.scene)?;
        self.remote
            .put_scene(key, scene)
            .await
            .map_err(|e| remote_failure("write scene document", key, e))?;

        for collection in Collection::ALL {
            let documents = records.documents(collection)?;
            let mut keep: HashSet<String> =
                documents.iter().map(|d| d.id.clone()).collect();
            if collection == Collection::Objects {
                keep.extend(records.withheld_objects.iter().cloned());
            }

            for document in documents {
                self.remote
                    .put_document(collection, key, document)
                    .await
                    .map_err(|e| remote_failure("write document", key, e))?;
                report.written += 1;
            }

            let existing = self
                .remote
                .list_documents(collection, key)
                .await
                .map_err(|e| remote_failure("list documents", key, e))?;
            for stale in existing.iter().filter(|d| !keep.contains(&d.id)) {
                self.remote
                    .delete_document(collection, key, &stale.id)
                    .await
                    .map_err(|e| remote_failure("delete stale document", key, e))?;
                report.removed += 1;
            }
        }

        log::info!(
            "Saved project {key}: {} documents written, {} removed",
            report.written,
            report.removed
        );
        Ok(report)
    }

    /// Writes a single top-level object.
    ///
    /// An object holding a placeholder is skipped with a warning.
    pub async fn put_object(&self, key: &ProjectKey, object: &Object3D) -> Result<(), SyncError> {
        if object.has_placeholder() {
            log::warn!(
                "Not writing object '{}' over its stored record: it holds a placeholder",
                object.id
            );
            return Ok(());
        }
        let record = self.serializer.serialize_object(object);
        self.put(Collection::Objects, key, &record.id, &record).await
    }

    /// Writes a single group.
    pub async fn put_group(&self, key: &ProjectKey, group: &Group) -> Result<(), SyncError> {
        let record = self.serializer.serialize_group(group);
        self.put(Collection::Groups, key, &record.id, &record).await
    }

    /// Writes a single light.
    pub async fn put_light(&self, key: &ProjectKey, light: &Light) -> Result<(), SyncError> {
        let record = self.serializer.serialize_light(light);
        self.put(Collection::Lights, key, &record.id, &record).await
    }

    async fn put<T: Serialize>(
        &self,
        collection: Collection,
        key: &ProjectKey,
        id: &str,
        record: &T,
    ) -> Result<(), SyncError> {
        let document = Document::new(id, serde_json::to_value(record)?);
        self.remote
            .put_document(collection, key, document)
            .await
            .map_err(|e| remote_failure("write document", key, e))
    }

    /// Deletes one object document.
    pub async fn delete_object(&self, key: &ProjectKey, id: &str) -> Result<(), SyncError> {
        self.delete(Collection::Objects, key, id).await
    }

    /// Deletes one group document. Objects listing the group keep their reference.
    pub async fn delete_group(&self, key: &ProjectKey, id: &str) -> Result<(), SyncError> {
        self.delete(Collection::Groups, key, id).await
    }

    /// Deletes one light document.
    pub async fn delete_light(&self, key: &ProjectKey, id: &str) -> Result<(), SyncError> {
        self.delete(Collection::Lights, key, id).await
    }

    async fn delete(
        &self,
        collection: Collection,
        key: &ProjectKey,
        id: &str,
    ) -> Result<(), SyncError> {
        self.remote
            .delete_document(collection, key, id)
            .await
            .map_err(|e| remote_failure("delete document", key, e))
    }

    /// Deletes every document of a project, then its aggregate document.
    pub async fn delete_project(&self, key: &ProjectKey) -> Result<(), SyncError> {
        for collection in Collection::ALL {
            let documents = self
                .remote
                .list_documents(collection, key)
                .await
                .map_err(|e| remote_failure("list documents", key, e))?;
            for document in documents {
                self.delete(collection, key, &document.id).await?;
            }
        }
        self.remote
            .delete_scene(key)
            .await
            .map_err(|e| remote_failure("delete scene document", key, e))?;
        log::info!("Deleted project {key}");
        Ok(())
    }
}

fn remote_failure(operation: &str, key: &ProjectKey, error: RemoteError) -> SyncError {
    log::error!("Failed to {operation} for project {key}: {error}");
    SyncError::Remote(error)
}
