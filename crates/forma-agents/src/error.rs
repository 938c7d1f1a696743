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

use std::fmt;

use forma_core::remote::RemoteError;
use forma_data::config::ConfigError;

use crate::sync_agent::SyncState;

/// An error surfaced by the sync and persistence agents.
#[derive(Debug)]
pub enum SyncError {
    /// A remote store call failed. Nothing is retried.
    Remote(RemoteError),
    /// The operation is not valid in the agent's current state.
    InvalidState {
        /// The state the agent was in.
        state: SyncState,
        /// What was attempted.
        operation: &'static str,
    },
    /// The configuration could not be loaded.
    Config(ConfigError),
    /// A record could not be encoded for the store.
    Encode(serde_json::Error),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Remote(e) => write!(f, "Remote store error: {e}"),
            SyncError::InvalidState { state, operation } => {
                write!(f, "Cannot {operation} while {state}")
            }
            SyncError::Config(e) => write!(f, "Configuration error: {e}"),
            SyncError::Encode(e) => write!(f, "Failed to encode record: {e}"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Remote(e) => Some(e),
            SyncError::Config(e) => Some(e),
            SyncError::Encode(e) => Some(e),
            SyncError::InvalidState { .. } => None,
        }
    }
}

impl From<RemoteError> for SyncError {
    fn from(e: RemoteError) -> Self {
        SyncError::Remote(e)
    }
}

impl From<ConfigError> for SyncError {
    fn from(e: ConfigError) -> Self {
        SyncError::Config(e)
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::Encode(e)
    }
}
