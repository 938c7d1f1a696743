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

//! Registry for managing counters.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;

/// A cheap, cloneable handle to one registered counter.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    name: Arc<str>,
    value: Arc<AtomicU64>,
}

impl CounterHandle {
    /// The counter's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds one.
    pub fn increment(&self) {
        self.add(1);
    }

    /// Adds `n`.
    pub fn add(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    /// The current value.
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// A point-in-time copy of every counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Counter values keyed by name.
    pub counters: BTreeMap<String, u64>,
}

impl MetricsSnapshot {
    /// Value of a counter, or 0 if it was never registered.
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Renders the snapshot as JSON, for logs and diagnostics dumps.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "counters": self.counters })
    }
}

/// Central registry of named counters.
///
/// Registering the same name twice returns handles to the same counter.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    counters: RwLock<BTreeMap<String, Arc<AtomicU64>>>,
}

impl MetricsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a counter, or returns the existing one with that name.
    pub fn register_counter(&self, name: &str) -> CounterHandle {
        if let Some(value) = self
            .counters
            .read()
            .ok()
            .and_then(|counters| counters.get(name).cloned())
        {
            return CounterHandle {
                name: Arc::from(name),
                value,
            };
        }

        let value = match self.counters.write() {
            Ok(mut counters) => counters
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(AtomicU64::new(0)))
                .clone(),
            Err(poisoned) => {
                log::error!("Metrics registry lock poisoned while registering '{name}'");
                let mut counters = poisoned.into_inner();
                counters
                    .entry(name.to_string())
                    .or_insert_with(|| Arc::new(AtomicU64::new(0)))
                    .clone()
            }
        };

        CounterHandle {
            name: Arc::from(name),
            value,
        }
    }

    /// Value of a counter, or 0 if it was never registered.
    pub fn counter_value(&self, name: &str) -> u64 {
        self.counters
            .read()
            .ok()
            .and_then(|counters| counters.get(name).map(|v| v.load(Ordering::Relaxed)))
            .unwrap_or(0)
    }

    /// Number of registered counters.
    pub fn metric_count(&self) -> usize {
        self.counters.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Copies every counter value.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let counters = self
            .counters
            .read()
            .map(|counters| {
                counters
                    .iter()
                    .map(|(name, value)| (name.clone(), value.load(Ordering::Relaxed)))
                    .collect()
            })
            .unwrap_or_default();
        MetricsSnapshot { counters }
    }
}
