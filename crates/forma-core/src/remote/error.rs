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

//! Defines the errors reported by a remote document store.

use std::fmt;

use super::Collection;

/// An error reported by a [`RemoteDocumentStore`](super::RemoteDocumentStore) operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The store could not be reached.
    Unavailable(String),
    /// The addressed document does not exist.
    NotFound {
        /// The collection that was queried, or `None` for the aggregate scene document.
        collection: Option<Collection>,
        /// The id that was looked up.
        id: String,
    },
    /// The caller is not allowed to perform the operation.
    PermissionDenied(String),
    /// The store refused the payload.
    Rejected(String),
    /// The operation was cancelled before it completed.
    Cancelled,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Unavailable(reason) => {
                write!(f, "Remote store unavailable: {reason}")
            }
            RemoteError::NotFound {
                collection: Some(collection),
                id,
            } => write!(f, "Document '{id}' not found in '{collection}'"),
            RemoteError::NotFound {
                collection: None,
                id,
            } => write!(f, "Scene document for project '{id}' not found"),
            RemoteError::PermissionDenied(reason) => {
                write!(f, "Permission denied: {reason}")
            }
            RemoteError::Rejected(reason) => write!(f, "Remote store rejected the write: {reason}"),
            RemoteError::Cancelled => write!(f, "Operation cancelled"),
        }
    }
}

impl std::error::Error for RemoteError {}
