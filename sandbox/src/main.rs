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

// Forma Sandbox
// Saves a scene, reopens it in a second session and applies a remote edit.

use std::sync::Arc;

use anyhow::{Context, Result};
use forma_agents::{PersistenceAgent, SyncAgent};
use forma_core::math::{Color, Vec3};
use forma_core::remote::{Collection, Document, ProjectKey, RemoteDocumentStore};
use forma_core::scene::{
    Geometry, GeometryKind, Group, Light, LightKind, Object3D, ProjectMetadata, StandardMaterial,
    Transform,
};
use forma_core::SceneStore;
use forma_data::{FormaConfig, SceneWorld};
use forma_infra::MemoryDocumentStore;
use forma_telemetry::{init_logging, LoggingConfig, MetricsRegistry};

fn build_scene() -> SceneWorld {
    let mut world = SceneWorld::new();
    world.set_metadata(ProjectMetadata {
        name: "Sandbox".into(),
        description: "A table, a lamp and a broken record".into(),
    });

    let leg = |x: f32, z: f32| {
        Object3D::mesh(
            "leg",
            "Leg",
            Geometry::defaults(&GeometryKind::Cylinder).expect("Cylinder has defaults"),
            StandardMaterial::from_color(Color::from_u32(0x8b5a2b)),
        )
        .with_transform(Transform::from_position(Vec3::new(x, 0.5, z)))
    };
    world.load_object(
        Object3D::container(
            "table",
            "Table",
            vec![leg(-1.0, -1.0), leg(1.0, -1.0), leg(-1.0, 1.0), leg(1.0, 1.0)],
        )
        .in_group("furniture"),
    );
    world.load_object(
        Object3D::mesh(
            "cube",
            "Red cube",
            Geometry::unit_box(),
            StandardMaterial::from_color(Color::from_u32(0xff0000)),
        )
        .with_transform(Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::ZERO,
            Vec3::splat(2.0),
        )),
    );
    world.load_group(Group::new(
        "furniture",
        "Furniture",
        vec!["table".into(), "chair".into()],
    ));
    world.load_light(Light::new("sun", "Sun", LightKind::Directional.defaults()));
    world.load_light(
        Light::new("lamp", "Lamp", LightKind::Point.defaults()).at(Vec3::new(0.0, 3.0, 0.0)),
    );
    world
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sandbox/forma.ron".to_string());
    let config = FormaConfig::load(&config_path)
        .with_context(|| format!("loading configuration from {config_path}"))?;
    init_logging(LoggingConfig::with_filter(config.logging.filter.clone()));

    let remote = Arc::new(MemoryDocumentStore::new());
    let key = ProjectKey::new("demo-owner", "sandbox");

    // First session: save the scene.
    let world = build_scene();
    let report = PersistenceAgent::new(remote.clone())
        .save(&key, &world)
        .await
        .context("saving the sandbox scene")?;
    log::info!(
        "Saved {} documents ({} removed)",
        report.written,
        report.removed
    );

    // Second session: open the project.
    let registry = Arc::new(MetricsRegistry::new());
    let mut sync = SyncAgent::with_registry(remote.clone(), &config, registry.clone());
    let mut session = SceneWorld::new();
    sync.activate(key.clone(), &mut session)
        .await
        .context("opening the sandbox project")?;
    log::info!(
        "Loaded '{}' with {} objects, {} groups, {} lights",
        session.metadata().name,
        session.object_count(),
        session.group_count(),
        session.light_count()
    );
    if let Some(resolved) = session.resolve_group("furniture") {
        log::info!(
            "Group 'furniture' has {} members, dangling: {:?}",
            resolved.members.len(),
            resolved.dangling()
        );
    }

    // Someone else edits the project: a geometry this build does not know
    // and a record that is not an object at all.
    remote
        .put_document(
            Collection::Objects,
            &key,
            Document::new(
                "blob",
                serde_json::json!({
                    "id": "blob",
                    "name": "Blob",
                    "geometry": { "kind": "FooGeometry", "parameters": {} }
                }),
            ),
        )
        .await
        .context("writing a remote edit")?;
    remote
        .put_document(
            Collection::Objects,
            &key,
            Document::new("corrupt", serde_json::json!([1, 2, 3])),
        )
        .await
        .context("writing a remote edit")?;
    let applied = sync.pump(&mut session);
    log::info!(
        "Applied {applied} remote snapshots, now {} objects",
        session.object_count()
    );

    sync.teardown(&mut session);

    println!(
        "{}",
        serde_json::to_string_pretty(&registry.snapshot().to_json())
            .context("rendering metrics")?
    );
    Ok(())
}
