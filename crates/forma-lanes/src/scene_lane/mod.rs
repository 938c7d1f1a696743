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

//! Scene-level lanes: whole entities to records and back.

mod reconstructor;
mod serializer;

pub use self::reconstructor::*;
pub use self::serializer::*;

use forma_core::remote::{Collection, Document};
use forma_data::scene::{GroupRecord, LightRecord, ObjectRecord, SceneDocument};
use serde::Serialize;

/// Every record of a project as produced by one save.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneRecords {
    /// The aggregate scene document.
    pub scene: SceneDocument,
    /// One record per top-level object.
    pub objects: Vec<ObjectRecord>,
    /// One record per group.
    pub groups: Vec<GroupRecord>,
    /// One record per light.
    pub lights: Vec<LightRecord>,
    /// Ids of top-level objects left out because they hold placeholders.
    /// Their stored documents are still the only good copy.
    pub withheld_objects: Vec<String>,
}

impl SceneRecords {
    /// Ids of the records in one collection, in save order.
    pub fn ids(&self, collection: Collection) -> Vec<&str> {
        match collection {
            Collection::Objects => self.objects.iter().map(|r| r.id.as_str()).collect(),
            Collection::Groups => self.groups.iter().map(|r| r.id.as_str()).collect(),
            Collection::Lights => self.lights.iter().map(|r| r.id.as_str()).collect(),
        }
    }

    /// The records of one collection as store documents keyed by record id.
    pub fn documents(&self, collection: Collection) -> Result<Vec<Document>, serde_json::Error> {
        match collection {
            Collection::Objects => to_documents(&self.objects, |r| &r.id),
            Collection::Groups => to_documents(&self.groups, |r| &r.id),
            Collection::Lights => to_documents(&self.lights, |r| &r.id),
        }
    }
}

fn to_documents<T: Serialize>(
    records: &[T],
    id: impl Fn(&T) -> &String,
) -> Result<Vec<Document>, serde_json::Error> {
    records
        .iter()
        .map(|record| Ok(Document::new(id(record).clone(), serde_json::to_value(record)?)))
        .collect()
}
