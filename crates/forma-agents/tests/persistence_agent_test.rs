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

use std::sync::Arc;

use forma_agents::{PersistenceAgent, SaveReport, SyncAgent, SyncError};
use forma_core::math::{Color, Vec3};
use forma_core::remote::{Collection, Document, ProjectKey, RemoteDocumentStore, RemoteError};
use forma_core::scene::{
    Geometry, Group, Light, LightKind, Object3D, ProjectMetadata, StandardMaterial, Transform,
};
use forma_core::SceneStore;
use forma_data::{FormaConfig, SceneWorld};
use forma_infra::{MemoryDocumentStore, RemoteOperation};
use serde_json::json;

fn key() -> ProjectKey {
    ProjectKey::new("owner-1", "studio")
}

/// A small scene using only leaf meshes, so ids survive a round trip.
fn studio() -> SceneWorld {
    let mut world = SceneWorld::new();
    world.set_metadata(ProjectMetadata {
        name: "Studio".into(),
        description: "Product shot".into(),
    });
    world.settings_mut().background_color = Color::from_u32(0x101820);
    world.settings_mut().grid_size = 40.0;

    let mut red = StandardMaterial::from_color(Color::from_u32(0xff0000));
    red.metalness = 0.5;
    red.roughness = 0.25;
    world.load_object(
        Object3D::mesh("cube", "Red cube", Geometry::unit_box(), red)
            .with_transform(Transform::new(
                Vec3::new(1.0, 2.0, 3.0),
                Vec3::ZERO,
                Vec3::splat(2.0),
            ))
            .in_group("props"),
    );
    world.load_object(
        Object3D::mesh(
            "floor",
            "Floor",
            Geometry::defaults(&forma_core::scene::GeometryKind::Plane).expect("Plane has defaults"),
            StandardMaterial::default(),
        )
        .in_group("props"),
    );
    world.load_group(Group::new(
        "props",
        "Props",
        vec!["cube".into(), "floor".into()],
    ));
    world.load_light(Light::new("sun", "Sun", LightKind::Directional.defaults()));
    world.load_light(
        Light::new("bulb", "Bulb", LightKind::Point.defaults()).at(Vec3::new(0.0, 3.0, 0.0)),
    );
    world
}

#[tokio::test]
async fn test_save_writes_every_record() {
    let remote = Arc::new(MemoryDocumentStore::new());
    let agent = PersistenceAgent::new(remote.clone());

    let report = agent.save(&key(), &studio()).await.expect("save should succeed");

    assert_eq!(
        report,
        SaveReport {
            written: 5,
            removed: 0
        }
    );
    let scene = remote.scene(&key()).expect("scene document");
    assert_eq!(scene["name"], "Studio");
    assert_eq!(scene["settings"]["backgroundColorHex"], "#101820");
    assert_eq!(remote.document_count(Collection::Objects, &key()), 2);
    assert_eq!(remote.document_count(Collection::Groups, &key()), 1);
    assert_eq!(remote.document_count(Collection::Lights, &key()), 2);

    let cube = remote
        .document(Collection::Objects, &key(), "cube")
        .expect("cube document");
    assert_eq!(cube["geometry"]["kind"], "Box");
    assert_eq!(cube["material"]["colorHex"], "#ff0000");
    assert_eq!(cube["groupId"], "props");
}

#[tokio::test]
async fn test_save_then_load_round_trips() {
    // --- 1. ARRANGE ---
    let remote = Arc::new(MemoryDocumentStore::new());
    let original = studio();
    PersistenceAgent::new(remote.clone())
        .save(&key(), &original)
        .await
        .expect("save should succeed");

    // --- 2. ACT ---
    // A second session opens the same project.
    let mut sync = SyncAgent::new(remote.clone(), &FormaConfig::default());
    let mut loaded = SceneWorld::new();
    sync.activate(key(), &mut loaded)
        .await
        .expect("activation should succeed");

    // --- 3. ASSERT ---
    assert_eq!(loaded.metadata(), original.metadata());
    assert_eq!(loaded.settings(), original.settings());
    assert_eq!(loaded.object("cube"), original.object("cube"));
    assert_eq!(loaded.object("floor"), original.object("floor"));
    assert_eq!(loaded.group("props"), original.group("props"));
    assert_eq!(loaded.light("sun"), original.light("sun"));
    assert_eq!(loaded.light("bulb"), original.light("bulb"));
    assert_eq!(loaded, original);
}

#[tokio::test]
async fn test_containers_load_with_synthesized_child_ids() {
    let remote = Arc::new(MemoryDocumentStore::new());
    let mut world = SceneWorld::new();
    let leg = Object3D::mesh("leg", "Leg", Geometry::unit_box(), StandardMaterial::default());
    world.load_object(Object3D::container("table", "Table", vec![leg.clone(), leg]));
    PersistenceAgent::new(remote.clone())
        .save(&key(), &world)
        .await
        .expect("save should succeed");

    let mut sync = SyncAgent::new(remote, &FormaConfig::default());
    let mut loaded = SceneWorld::new();
    sync.activate(key(), &mut loaded).await.expect("activate");

    let table = loaded.object("table").expect("table");
    let children = table.children().expect("table is a container");
    let ids: Vec<_> = children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["table_child_0", "table_child_1"]);
    assert_eq!(children[1].name, "Table_child_1");
    assert_eq!(table.count(), 3);
}

#[tokio::test]
async fn test_save_removes_stale_documents() {
    let remote = Arc::new(MemoryDocumentStore::new());
    let agent = PersistenceAgent::new(remote.clone());
    let mut world = studio();
    agent.save(&key(), &world).await.expect("first save");

    world.remove_object("floor");
    world.remove_light("bulb");
    let report = agent.save(&key(), &world).await.expect("second save");

    assert_eq!(report.removed, 2);
    assert!(remote.document(Collection::Objects, &key(), "floor").is_none());
    assert!(remote.document(Collection::Lights, &key(), "bulb").is_none());
    // The group keeps its soft reference to the removed object.
    let props = remote
        .document(Collection::Groups, &key(), "props")
        .expect("group document");
    assert_eq!(props["objectIds"], json!(["cube", "floor"]));
}

#[tokio::test]
async fn test_save_failure_propagates_without_retry() {
    // --- 1. ARRANGE ---
    let remote = Arc::new(MemoryDocumentStore::new());
    let agent = PersistenceAgent::new(remote.clone());
    remote.fail_next(
        RemoteOperation::PutDocument,
        RemoteError::Unavailable("connection reset".into()),
    );

    // --- 2. ACT ---
    let result = agent.save(&key(), &studio()).await;

    // --- 3. ASSERT ---
    match result {
        Err(SyncError::Remote(RemoteError::Unavailable(reason))) => {
            assert_eq!(reason, "connection reset")
        }
        other => panic!("expected an unavailable error, got {other:?}"),
    }
    // The aggregate document was written before the failure; nothing after it was.
    assert!(remote.scene(&key()).is_some());
    assert_eq!(remote.document_count(Collection::Objects, &key()), 0);
    assert_eq!(remote.document_count(Collection::Lights, &key()), 0);
}

#[tokio::test]
async fn test_single_entity_writes_and_deletes() {
    let remote = Arc::new(MemoryDocumentStore::new());
    let agent = PersistenceAgent::new(remote.clone());
    let light = Light::new("spot", "Spot", LightKind::Spot.defaults());

    agent
        .put_object(&key(), &Object3D::container("empty", "Empty", vec![]))
        .await
        .expect("put_object");
    agent
        .put_group(&key(), &Group::new("g", "G", vec!["empty".into()]))
        .await
        .expect("put_group");
    agent.put_light(&key(), &light).await.expect("put_light");

    let spot = remote
        .document(Collection::Lights, &key(), "spot")
        .expect("light document");
    assert_eq!(spot["type"], "Spot");
    assert!(spot.get("angle").is_some());

    agent.delete_object(&key(), "empty").await.expect("delete_object");
    agent.delete_group(&key(), "g").await.expect("delete_group");
    agent.delete_light(&key(), "spot").await.expect("delete_light");

    for collection in Collection::ALL {
        assert_eq!(remote.document_count(collection, &key()), 0);
    }
}

#[tokio::test]
async fn test_delete_project_removes_everything() {
    let remote = Arc::new(MemoryDocumentStore::new());
    let agent = PersistenceAgent::new(remote.clone());
    agent.save(&key(), &studio()).await.expect("save");

    agent.delete_project(&key()).await.expect("delete_project");

    assert!(remote.scene(&key()).is_none());
    for collection in Collection::ALL {
        assert_eq!(remote.document_count(collection, &key()), 0);
    }

    let again = agent.delete_project(&key()).await;
    assert!(matches!(
        again,
        Err(SyncError::Remote(RemoteError::NotFound { .. }))
    ));
}

#[tokio::test]
async fn test_subscribed_session_sees_saves() {
    // --- 1. ARRANGE ---
    let remote = Arc::new(MemoryDocumentStore::new());
    let mut sync = SyncAgent::new(remote.clone(), &FormaConfig::default());
    let mut viewer = SceneWorld::new();
    sync.activate(key(), &mut viewer).await.expect("activate");
    let editor = PersistenceAgent::new(remote.clone());

    // --- 2. ACT ---
    let mut world = studio();
    editor.save(&key(), &world).await.expect("save");
    sync.pump(&mut viewer);

    world.remove_object("floor");
    editor.save(&key(), &world).await.expect("save");
    sync.pump(&mut viewer);

    // --- 3. ASSERT ---
    assert_eq!(viewer.ids(Collection::Objects), vec!["cube"]);
    assert_eq!(viewer.light_count(), 2);
    assert_eq!(viewer.group_count(), 1);
}

#[tokio::test]
async fn test_saving_a_degraded_scene_keeps_unreadable_records() {
    // --- 1. ARRANGE ---
    let remote = Arc::new(MemoryDocumentStore::new());
    let corrupt = json!("garbage");
    let half_broken = json!({
        "id": "shelf",
        "children": [{ "id": "a", "geometry": { "kind": "Box" } }, 42]
    });
    for (id, data) in [
        ("good", json!({ "id": "good", "geometry": { "kind": "Box" } })),
        ("broken", corrupt.clone()),
        ("shelf", half_broken.clone()),
    ] {
        remote
            .put_document(Collection::Objects, &key(), Document::new(id, data))
            .await
            .expect("put should succeed");
    }

    let mut sync = SyncAgent::new(remote.clone(), &FormaConfig::default());
    let mut world = SceneWorld::new();
    sync.activate(key(), &mut world).await.expect("activate");
    assert!(world.object("broken").expect("broken").placeholder);
    assert!(world.object("shelf").expect("shelf").has_placeholder());

    // --- 2. ACT ---
    let report = PersistenceAgent::new(remote.clone())
        .save(&key(), &world)
        .await
        .expect("save should succeed");

    // --- 3. ASSERT ---
    assert_eq!(report.written, 1);
    assert_eq!(report.removed, 0);
    assert_eq!(
        remote.document(Collection::Objects, &key(), "broken"),
        Some(corrupt)
    );
    assert_eq!(
        remote.document(Collection::Objects, &key(), "shelf"),
        Some(half_broken)
    );
}

#[tokio::test]
async fn test_put_object_skips_placeholders() {
    let remote = Arc::new(MemoryDocumentStore::new());
    let agent = PersistenceAgent::new(remote.clone());
    let mut stand_in = Object3D::mesh(
        "x",
        "x",
        Geometry::unit_box(),
        StandardMaterial::error_indicator(),
    );
    stand_in.placeholder = true;

    agent.put_object(&key(), &stand_in).await.expect("put_object");

    assert!(remote.document(Collection::Objects, &key(), "x").is_none());
}
