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

//! Push-subscription primitives shared by remote stores and their consumers.
//!
//! A consumer hands the store a [`SnapshotSink`] when subscribing. The sink is
//! tagged with the consumer's current generation and carries a
//! [`CancelToken`]; every snapshot it delivers lands in the consumer's single
//! inbox as a [`SnapshotMessage`]. The consumer keeps the returned
//! [`Subscription`] and cancels it on teardown. Messages already queued when
//! that happens still carry the old generation, which is how the consumer
//! recognizes and drops them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{Collection, Document};

/// A shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a live token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token (and all its clones) as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// The full current membership of one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot {
    /// The collection the documents belong to.
    pub collection: Collection,
    /// Every document currently in the collection for the subscribed project.
    pub documents: Vec<Document>,
}

/// A snapshot as it arrives in a consumer's inbox.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotMessage {
    /// The consumer generation the subscription was opened under.
    pub generation: u64,
    /// The delivered snapshot.
    pub snapshot: CollectionSnapshot,
}

/// The delivery end a remote store pushes snapshots into.
#[derive(Debug, Clone)]
pub struct SnapshotSink {
    generation: u64,
    collection: Collection,
    token: CancelToken,
    sender: flume::Sender<SnapshotMessage>,
}

impl SnapshotSink {
    /// Creates a sink delivering into `sender`.
    pub fn new(
        generation: u64,
        collection: Collection,
        token: CancelToken,
        sender: flume::Sender<SnapshotMessage>,
    ) -> Self {
        Self {
            generation,
            collection,
            token,
            sender,
        }
    }

    /// The collection this sink was opened for.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// The consumer generation this sink is tagged with.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A clone of the sink's cancellation token.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Returns `true` once the subscription is cancelled or the consumer is gone.
    ///
    /// Stores drop closed sinks instead of delivering to them.
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled() || self.sender.is_disconnected()
    }

    /// Pushes a full-membership snapshot. Returns `false` if the sink is closed.
    pub fn deliver(&self, documents: Vec<Document>) -> bool {
        if self.token.is_cancelled() {
            return false;
        }

        let message = SnapshotMessage {
            generation: self.generation,
            snapshot: CollectionSnapshot {
                collection: self.collection,
                documents,
            },
        };

        match self.sender.send(message) {
            Ok(()) => true,
            Err(e) => {
                log::debug!(
                    "Dropping '{}' snapshot, consumer disconnected: {e}",
                    self.collection
                );
                false
            }
        }
    }
}

/// The consumer's handle to an established push subscription.
///
/// Dropping the handle cancels the subscription.
#[derive(Debug)]
pub struct Subscription {
    collection: Collection,
    token: CancelToken,
}

impl Subscription {
    /// Wraps the token of an established subscription.
    pub fn new(collection: Collection, token: CancelToken) -> Self {
        Self { collection, token }
    }

    /// The subscribed collection.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Stops further deliveries.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once the subscription has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str) -> Document {
        Document::new(id, json!({ "id": id }))
    }

    #[test]
    fn test_sink_delivers_tagged_snapshot() {
        let (tx, rx) = flume::unbounded();
        let sink = SnapshotSink::new(7, Collection::Objects, CancelToken::new(), tx);

        assert!(sink.deliver(vec![doc("a")]));

        let message = rx.try_recv().expect("a message should be queued");
        assert_eq!(message.generation, 7);
        assert_eq!(message.snapshot.collection, Collection::Objects);
        assert_eq!(message.snapshot.documents, vec![doc("a")]);
    }

    #[test]
    fn test_cancelled_sink_stops_delivering() {
        let (tx, rx) = flume::unbounded();
        let token = CancelToken::new();
        let sink = SnapshotSink::new(1, Collection::Lights, token.clone(), tx);
        let subscription = Subscription::new(Collection::Lights, token);

        subscription.cancel();

        assert!(sink.is_closed());
        assert!(!sink.deliver(vec![doc("l1")]));
        assert!(rx.is_empty());
    }

    #[test]
    fn test_dropping_subscription_cancels() {
        let (tx, _rx) = flume::unbounded();
        let token = CancelToken::new();
        let sink = SnapshotSink::new(1, Collection::Groups, token.clone(), tx);
        {
            let _subscription = Subscription::new(Collection::Groups, token);
        }
        assert!(sink.is_closed());
    }

    #[test]
    fn test_sink_closed_when_consumer_gone() {
        let (tx, rx) = flume::unbounded();
        let sink = SnapshotSink::new(1, Collection::Objects, CancelToken::new(), tx);
        drop(rx);
        assert!(sink.is_closed());
        assert!(!sink.deliver(Vec::new()));
    }
}
