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

//! Defines the SyncAgent, which owns the subscriptions of the active project.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use forma_core::lane::Lane;
use forma_core::remote::{
    CancelToken, Collection, CollectionSnapshot, ProjectKey, RemoteDocumentStore, RemoteError,
    SnapshotMessage, SnapshotSink, Subscription,
};
use forma_core::scene::{Object3D, ProjectMetadata, SceneSettings};
use forma_core::SceneStore;
use forma_data::FormaConfig;
use forma_lanes::SceneReconstructorLane;
use forma_telemetry::metrics::names;
use forma_telemetry::{CounterHandle, MetricsRegistry};

use crate::SyncError;

/// Where the agent is in a project's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// No project has been activated, or the last activation failed.
    #[default]
    Idle,
    /// The aggregate document is being read and subscriptions established.
    Loading,
    /// Snapshots are being applied to the store.
    Subscribed,
    /// The project was closed and the store cleared.
    TornDown,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncState::Idle => "idle",
            SyncState::Loading => "loading",
            SyncState::Subscribed => "subscribed",
            SyncState::TornDown => "torn down",
        };
        f.write_str(name)
    }
}

/// Holds telemetry handles for the sync layer.
struct SyncMetrics {
    snapshots_applied: CounterHandle,
    snapshots_discarded: CounterHandle,
    placeholders: CounterHandle,
    lights_dropped: CounterHandle,
}

impl SyncMetrics {
    fn register(registry: &MetricsRegistry) -> Self {
        Self {
            snapshots_applied: registry.register_counter(names::SNAPSHOTS_APPLIED),
            snapshots_discarded: registry.register_counter(names::SNAPSHOTS_DISCARDED),
            placeholders: registry.register_counter(names::PLACEHOLDERS),
            lights_dropped: registry.register_counter(names::LIGHTS_DROPPED),
        }
    }
}

/// The agent responsible for synchronizing one active project at a time.
///
/// Remote stores push snapshots into the agent's inbox from whatever context
/// they run in. The store is only mutated by the agent itself, from
/// [`activate`](Self::activate), [`pump`](Self::pump),
/// [`process_next`](Self::process_next) and [`teardown`](Self::teardown).
pub struct SyncAgent {
    remote: Arc<dyn RemoteDocumentStore>,
    reconstructor: SceneReconstructorLane,
    prune_missing: bool,
    state: SyncState,
    generation: u64,
    active: Option<ProjectKey>,
    subscriptions: Vec<Subscription>,
    inbox_tx: flume::Sender<SnapshotMessage>,
    inbox_rx: flume::Receiver<SnapshotMessage>,
    registry: Arc<MetricsRegistry>,
    metrics: SyncMetrics,
}

impl SyncAgent {
    /// Creates an idle agent with its own metrics registry.
    pub fn new(remote: Arc<dyn RemoteDocumentStore>, config: &FormaConfig) -> Self {
        Self::with_registry(remote, config, Arc::new(MetricsRegistry::new()))
    }

    /// Creates an idle agent reporting into a shared metrics registry.
    pub fn with_registry(
        remote: Arc<dyn RemoteDocumentStore>,
        config: &FormaConfig,
        registry: Arc<MetricsRegistry>,
    ) -> Self {
        let (inbox_tx, inbox_rx) = flume::unbounded();
        let metrics = SyncMetrics::register(&registry);
        let reconstructor = SceneReconstructorLane::new()
            .with_max_child_depth(config.reconstruction.max_child_depth);
        log::debug!(
            "SyncAgent using {} lane '{}'",
            reconstructor.lane_kind(),
            reconstructor.strategy_name()
        );
        Self {
            remote,
            reconstructor,
            prune_missing: config.sync.prune_missing,
            state: SyncState::Idle,
            generation: 0,
            active: None,
            subscriptions: Vec::new(),
            inbox_tx,
            inbox_rx,
            registry,
            metrics,
        }
    }

    /// Creates an idle agent configured from a RON file. A missing file yields the defaults.
    pub fn from_config_path(
        remote: Arc<dyn RemoteDocumentStore>,
        path: impl AsRef<Path>,
    ) -> Result<Self, SyncError> {
        let config = FormaConfig::load(path)?;
        Ok(Self::new(remote, &config))
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// The current generation. Snapshots tagged with any other value are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The project currently loading or subscribed, if any.
    pub fn active(&self) -> Option<&ProjectKey> {
        self.active.as_ref()
    }

    /// Number of subscriptions held for the active project.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions
            .iter()
            .filter(|subscription| !subscription.is_cancelled())
            .count()
    }

    /// Number of snapshots waiting in the inbox.
    pub fn pending(&self) -> usize {
        self.inbox_rx.len()
    }

    /// The registry the agent reports its counters into.
    pub fn metrics(&self) -> &MetricsRegistry {
        &self.registry
    }

    /// Makes `key` the active project.
    ///
    /// Any previously active project is torn down first. The aggregate
    /// document is applied to the store, then the three collections are
    /// subscribed and their initial snapshots applied. On failure every
    /// subscription opened so far is cancelled, the store is cleared and the
    /// agent is left [`SyncState::Idle`].
    pub async fn activate(
        &mut self,
        key: ProjectKey,
        store: &mut dyn SceneStore,
    ) -> Result<(), SyncError> {
        if self.active.is_some() {
            self.teardown(store);
        }

        self.generation += 1;
        self.active = Some(key.clone());
        self.transition(SyncState::Loading);

        if let Err(e) = self.load(&key, store).await {
            log::error!("Failed to activate project {key}: {e}");
            self.abort(store);
            return Err(e.into());
        }

        self.transition(SyncState::Subscribed);
        let applied = self.pump(store);
        log::debug!("Applied {applied} initial snapshots for {key}");
        Ok(())
    }

    async fn load(
        &mut self,
        key: &ProjectKey,
        store: &mut dyn SceneStore,
    ) -> Result<(), RemoteError> {
        match self.remote.get_scene(key).await? {
            Some(scene) => {
                let (metadata, settings) = self.reconstructor.reconstruct_scene_value(&scene);
                store.apply_scene(metadata, settings);
            }
            None => {
                log::debug!("Project {key} has no scene document, using default settings");
                store.apply_scene(ProjectMetadata::default(), SceneSettings::default());
            }
        }

        for collection in Collection::ALL {
            let sink = SnapshotSink::new(
                self.generation,
                collection,
                CancelToken::new(),
                self.inbox_tx.clone(),
            );
            let subscription = self.remote.subscribe(collection, key, sink).await?;
            self.subscriptions.push(subscription);
        }
        Ok(())
    }

    fn abort(&mut self, store: &mut dyn SceneStore) {
        self.cancel_subscriptions();
        self.generation += 1;
        self.active = None;
        store.clear();
        self.transition(SyncState::Idle);
    }

    /// Closes the active project.
    ///
    /// Cancels all subscriptions before anything else, moves the generation
    /// on so in-flight snapshots are discarded, and clears the store.
    pub fn teardown(&mut self, store: &mut dyn SceneStore) {
        self.cancel_subscriptions();
        self.generation += 1;
        if let Some(key) = self.active.take() {
            log::info!("Tearing down project {key}");
        }
        store.clear();
        self.transition(SyncState::TornDown);
    }

    fn cancel_subscriptions(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.cancel();
        }
    }

    fn transition(&mut self, next: SyncState) {
        if self.state != next {
            log::info!("Sync state {} -> {next}", self.state);
            self.state = next;
        }
    }

    /// Applies every snapshot already waiting in the inbox. Returns how many were applied.
    pub fn pump(&mut self, store: &mut dyn SceneStore) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.inbox_rx.try_recv() {
            if self.apply_snapshot(message, store) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for the next snapshot and applies it.
    ///
    /// Returns `Ok(false)` if the snapshot was stale.
    pub async fn process_next(&mut self, store: &mut dyn SceneStore) -> Result<bool, SyncError> {
        if self.state != SyncState::Subscribed {
            return Err(SyncError::InvalidState {
                state: self.state,
                operation: "process snapshots",
            });
        }

        let message = self
            .inbox_rx
            .recv_async()
            .await
            .map_err(|_| RemoteError::Cancelled)?;
        Ok(self.apply_snapshot(message, store))
    }

    /// Applies one snapshot as the full membership of its collection.
    ///
    /// Every document is reconstructed and loaded by id. When pruning is
    /// enabled, entities of the collection absent from the snapshot are
    /// removed. Returns `false` without touching the store if the snapshot's
    /// generation is stale or the agent is not subscribed.
    pub fn apply_snapshot(&mut self, message: SnapshotMessage, store: &mut dyn SceneStore) -> bool {
        let SnapshotMessage {
            generation,
            snapshot,
        } = message;
        if generation != self.generation || self.state != SyncState::Subscribed {
            log::debug!(
                "Discarding '{}' snapshot from generation {generation} (current {}, {})",
                snapshot.collection,
                self.generation,
                self.state
            );
            self.metrics.snapshots_discarded.increment();
            return false;
        }

        let CollectionSnapshot {
            collection,
            documents,
        } = snapshot;
        let mut keep = HashSet::with_capacity(documents.len());

        match collection {
            Collection::Objects => {
                for document in &documents {
                    let object = self.reconstructor.reconstruct_document(document);
                    self.metrics.placeholders.add(count_placeholders(&object));
                    keep.insert(object.id.clone());
                    store.load_object(object);
                }
            }
            Collection::Groups => {
                for document in &documents {
                    if let Some(group) = self.reconstructor.reconstruct_group_document(document) {
                        keep.insert(group.id.clone());
                        store.load_group(group);
                    }
                }
            }
            Collection::Lights => {
                for document in &documents {
                    match self.reconstructor.reconstruct_light_document(document) {
                        Some(light) => {
                            keep.insert(light.id.clone());
                            store.load_light(light);
                        }
                        None => self.metrics.lights_dropped.increment(),
                    }
                }
            }
        }

        if self.prune_missing {
            store.retain(collection, &keep);
        }

        log::trace!(
            "Applied '{collection}' snapshot with {} documents",
            documents.len()
        );
        self.metrics.snapshots_applied.increment();
        true
    }
}

fn count_placeholders(object: &Object3D) -> u64 {
    let own = u64::from(object.placeholder);
    own + object
        .children()
        .map_or(0, |children| children.iter().map(count_placeholders).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use forma_core::remote::Document;
    use forma_data::SceneWorld;
    use forma_infra::MemoryDocumentStore;
    use serde_json::json;

    fn agent() -> SyncAgent {
        SyncAgent::new(Arc::new(MemoryDocumentStore::new()), &FormaConfig::default())
    }

    fn message(
        generation: u64,
        collection: Collection,
        documents: Vec<Document>,
    ) -> SnapshotMessage {
        SnapshotMessage {
            generation,
            snapshot: CollectionSnapshot {
                collection,
                documents,
            },
        }
    }

    #[test]
    fn test_new_agent_is_idle() {
        let agent = agent();
        assert_eq!(agent.state(), SyncState::Idle);
        assert_eq!(agent.generation(), 0);
        assert!(agent.active().is_none());
        assert_eq!(agent.metrics().metric_count(), 4);
        assert_eq!(
            agent.reconstructor.strategy_name(),
            "FORMA_SCENE_RECONSTRUCTOR_V1"
        );
    }

    #[test]
    fn test_snapshots_are_discarded_while_idle() {
        let mut agent = agent();
        let mut world = SceneWorld::new();

        let applied = agent.apply_snapshot(
            message(0, Collection::Groups, vec![Document::new("g", json!({ "id": "g" }))]),
            &mut world,
        );

        assert!(!applied);
        assert!(world.is_empty());
        assert_eq!(agent.metrics().counter_value(names::SNAPSHOTS_DISCARDED), 1);
    }

    #[tokio::test]
    async fn test_process_next_requires_subscription() {
        let mut agent = agent();
        let mut world = SceneWorld::new();

        let result = agent.process_next(&mut world).await;

        assert!(matches!(
            result,
            Err(SyncError::InvalidState {
                state: SyncState::Idle,
                ..
            })
        ));
    }

    #[test]
    fn test_placeholders_are_counted_through_containers() {
        let mut child = Object3D::container("c", "c", vec![]);
        child.placeholder = true;
        let mut parent = Object3D::container("p", "p", vec![child.clone(), child]);
        assert_eq!(count_placeholders(&parent), 2);
        parent.placeholder = true;
        assert_eq!(count_placeholders(&parent), 3);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SyncState::TornDown.to_string(), "torn down");
        assert_eq!(SyncState::Subscribed.to_string(), "subscribed");
    }
}
