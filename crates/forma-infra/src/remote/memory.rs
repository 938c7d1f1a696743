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

//! An in-process remote document store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use forma_core::remote::{
    Collection, Document, ProjectKey, RemoteDocumentStore, RemoteError, SnapshotSink,
    Subscription,
};
use serde_json::Value;

/// The store operations that can be made to fail on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    /// [`RemoteDocumentStore::get_scene`].
    GetScene,
    /// [`RemoteDocumentStore::put_scene`].
    PutScene,
    /// [`RemoteDocumentStore::delete_scene`].
    DeleteScene,
    /// [`RemoteDocumentStore::list_documents`].
    ListDocuments,
    /// [`RemoteDocumentStore::put_document`].
    PutDocument,
    /// [`RemoteDocumentStore::delete_document`].
    DeleteDocument,
    /// [`RemoteDocumentStore::subscribe`].
    Subscribe,
}

type CollectionKey = (Collection, ProjectKey);

#[derive(Debug, Default)]
struct Inner {
    scenes: HashMap<ProjectKey, Value>,
    collections: HashMap<CollectionKey, BTreeMap<String, Value>>,
    sinks: Vec<(ProjectKey, SnapshotSink)>,
    failures: HashMap<RemoteOperation, RemoteError>,
    offline: bool,
}

impl Inner {
    fn check(&mut self, operation: RemoteOperation) -> Result<(), RemoteError> {
        if self.offline {
            return Err(RemoteError::Unavailable("store is offline".to_string()));
        }
        match self.failures.remove(&operation) {
            Some(error) => {
                log::debug!("Injected failure for {operation:?}: {error}");
                Err(error)
            }
            None => Ok(()),
        }
    }

    fn membership(&self, collection: Collection, key: &ProjectKey) -> Vec<Document> {
        self.collections
            .get(&(collection, key.clone()))
            .map(|documents| {
                documents
                    .iter()
                    .map(|(id, data)| Document::new(id.clone(), data.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Pushes the current membership to every open sink of the collection and
    /// forgets the closed ones.
    fn notify(&mut self, collection: Collection, key: &ProjectKey) {
        let documents = self.membership(collection, key);
        self.sinks.retain(|(sink_key, sink)| {
            if sink.is_closed() {
                return false;
            }
            if sink.collection() != collection || sink_key != key {
                return true;
            }
            sink.deliver(documents.clone())
        });
    }
}

/// A [`RemoteDocumentStore`] kept entirely in memory.
///
/// Subscriptions deliver the full membership once when established and again
/// after every write to the collection, synchronously from inside the write.
/// Failures can be injected per operation, or for everything with
/// [`set_offline`](Self::set_offline).
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    inner: Mutex<Inner>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes the next call of `operation` fail with `error`.
    pub fn fail_next(&self, operation: RemoteOperation, error: RemoteError) {
        self.lock().failures.insert(operation, error);
    }

    /// Makes every operation fail with [`RemoteError::Unavailable`] while set.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Re-delivers the current membership of a collection to its subscribers.
    pub fn redeliver(&self, collection: Collection, key: &ProjectKey) {
        self.lock().notify(collection, key);
    }

    /// Reads one stored document without going through the async API.
    pub fn document(&self, collection: Collection, key: &ProjectKey, id: &str) -> Option<Value> {
        self.lock()
            .collections
            .get(&(collection, key.clone()))
            .and_then(|documents| documents.get(id).cloned())
    }

    /// Number of documents stored in a collection.
    pub fn document_count(&self, collection: Collection, key: &ProjectKey) -> usize {
        self.lock()
            .collections
            .get(&(collection, key.clone()))
            .map_or(0, BTreeMap::len)
    }

    /// Reads the stored aggregate document without going through the async API.
    pub fn scene(&self, key: &ProjectKey) -> Option<Value> {
        self.lock().scenes.get(key).cloned()
    }

    /// Number of subscriptions that are still open.
    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.lock();
        inner.sinks.retain(|(_, sink)| !sink.is_closed());
        inner.sinks.len()
    }
}

#[async_trait]
impl RemoteDocumentStore for MemoryDocumentStore {
    async fn get_scene(&self, key: &ProjectKey) -> Result<Option<Value>, RemoteError> {
        let mut inner = self.lock();
        inner.check(RemoteOperation::GetScene)?;
        Ok(inner.scenes.get(key).cloned())
    }

    async fn put_scene(&self, key: &ProjectKey, scene: Value) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        inner.check(RemoteOperation::PutScene)?;
        inner.scenes.insert(key.clone(), scene);
        Ok(())
    }

    async fn delete_scene(&self, key: &ProjectKey) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        inner.check(RemoteOperation::DeleteScene)?;
        if inner.scenes.remove(key).is_none() {
            return Err(RemoteError::NotFound {
                collection: None,
                id: key.project_id.clone(),
            });
        }
        for collection in Collection::ALL {
            if inner.collections.remove(&(collection, key.clone())).is_some() {
                inner.notify(collection, key);
            }
        }
        Ok(())
    }

    async fn list_documents(
        &self,
        collection: Collection,
        key: &ProjectKey,
    ) -> Result<Vec<Document>, RemoteError> {
        let mut inner = self.lock();
        inner.check(RemoteOperation::ListDocuments)?;
        Ok(inner.membership(collection, key))
    }

    async fn put_document(
        &self,
        collection: Collection,
        key: &ProjectKey,
        document: Document,
    ) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        inner.check(RemoteOperation::PutDocument)?;
        if document.id.is_empty() {
            return Err(RemoteError::Rejected("document id is empty".to_string()));
        }
        inner
            .collections
            .entry((collection, key.clone()))
            .or_default()
            .insert(document.id, document.data);
        inner.notify(collection, key);
        Ok(())
    }

    async fn delete_document(
        &self,
        collection: Collection,
        key: &ProjectKey,
        id: &str,
    ) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        inner.check(RemoteOperation::DeleteDocument)?;
        let removed = inner
            .collections
            .get_mut(&(collection, key.clone()))
            .and_then(|documents| documents.remove(id))
            .is_some();
        if removed {
            inner.notify(collection, key);
        }
        Ok(())
    }

    async fn subscribe(
        &self,
        collection: Collection,
        key: &ProjectKey,
        sink: SnapshotSink,
    ) -> Result<Subscription, RemoteError> {
        let mut inner = self.lock();
        inner.check(RemoteOperation::Subscribe)?;

        let subscription = Subscription::new(collection, sink.token());
        let initial = inner.membership(collection, key);
        log::trace!(
            "Subscribed to '{collection}' of {key} (generation {}), {} documents",
            sink.generation(),
            initial.len()
        );
        if sink.deliver(initial) {
            inner.sinks.push((key.clone(), sink));
        }
        Ok(subscription)
    }
}
