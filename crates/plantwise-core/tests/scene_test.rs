//! Scene reconciliation tests against an in-memory SQLite database

mod common;

use std::collections::BTreeSet;

use serde_json::json;

use plantwise_common::PlantwiseError;
use plantwise_core::PlantLocks;
use plantwise_core::model::{SceneAssetDescriptor, SensorTagForm};
use plantwise_core::service::{scene, sensor_tag};
use plantwise_persistence::entity::{asset, sensor_tag as sensor_tag_entity};
use plantwise_persistence::sea_orm::*;

use common::*;

fn descriptors(value: serde_json::Value) -> Vec<SceneAssetDescriptor> {
    serde_json::from_value(value).unwrap()
}

async fn plant_asset_ids(db: &DatabaseConnection, plant_id: i64) -> BTreeSet<i64> {
    asset::Entity::find()
        .filter(asset::Column::PlantId.eq(plant_id))
        .all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect()
}

fn domain_error(err: &anyhow::Error) -> &PlantwiseError {
    err.downcast_ref::<PlantwiseError>()
        .expect("expected a domain error")
}

#[tokio::test]
async fn test_pump_valve_example() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    scene::save_scene(&db, &locks, plant.id, descriptors(json!([{"id": 1, "name": "Pump"}])))
        .await
        .unwrap();

    let records = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([
            {"id": 1, "name": "Pump", "position": [1, 2, 3]},
            {"name": "Valve"}
        ])),
    )
    .await
    .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, 1);
    assert_eq!(records[0].name, "Pump");
    assert_eq!(records[0].position, [1.0, 2.0, 3.0]);
    assert_eq!(records[1].name, "Valve");
    assert_ne!(records[1].id, 1);

    let ids = plant_asset_ids(&db, plant.id).await;
    assert_eq!(ids, BTreeSet::from([1, records[1].id]));
}

#[tokio::test]
async fn test_set_equality_and_deletion_by_omission() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    let first = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([{"name": "A"}, {"name": "B"}, {"name": "C"}])),
    )
    .await
    .unwrap();
    assert_eq!(plant_asset_ids(&db, plant.id).await.len(), 3);

    let keep = first[1].id;
    let second = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([{"id": keep, "name": "B"}])),
    )
    .await
    .unwrap();

    assert_eq!(second.len(), 1);
    assert_eq!(plant_asset_ids(&db, plant.id).await, BTreeSet::from([keep]));

    let emptied = scene::save_scene(&db, &locks, plant.id, Vec::new())
        .await
        .unwrap();
    assert!(emptied.is_empty());
    assert!(plant_asset_ids(&db, plant.id).await.is_empty());
}

#[tokio::test]
async fn test_resubmitting_result_is_idempotent() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    let first = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([
            {"name": "Tank", "scale": [2, 2, 2], "telemetryMapping": {"rotation_y": "rpm"}},
            {"name": "Pipe", "description": "inlet", "config": {"color": "#ff0000"}}
        ])),
    )
    .await
    .unwrap();

    let resubmitted: Vec<SceneAssetDescriptor> =
        serde_json::from_value(serde_json::to_value(&first).unwrap()).unwrap();
    let second = scene::save_scene(&db, &locks, plant.id, resubmitted)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(plant_asset_ids(&db, plant.id).await.len(), 2);
}

#[tokio::test]
async fn test_unknown_id_is_inserted_with_that_id() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    let records = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([{"id": 500, "name": "Imported"}])),
    )
    .await
    .unwrap();
    assert_eq!(records[0].id, 500);

    // Later server-assigned ids do not collide with the explicit one
    let records = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([{"id": 500, "name": "Imported"}, {"name": "Fresh"}])),
    )
    .await
    .unwrap();
    assert!(records[1].id > 500);
}

#[tokio::test]
async fn test_transform_defaults() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    let records = scene::save_scene(&db, &locks, plant.id, descriptors(json!([{}])))
        .await
        .unwrap();

    let record = &records[0];
    assert_eq!(record.name, "Untitled");
    assert_eq!(record.position, [0.0, 0.0, 0.0]);
    assert_eq!(record.rotation, [0.0, 0.0, 0.0]);
    assert_eq!(record.scale, [1.0, 1.0, 1.0]);
    assert_eq!(record.telemetry_mapping, json!({}));
    assert_eq!(record.plant_id, plant.id);
}

#[tokio::test]
async fn test_missing_plant_is_not_found() {
    let db = memory_db().await;
    let locks = PlantLocks::new();

    let err = scene::save_scene(&db, &locks, 42, descriptors(json!([{"name": "A"}])))
        .await
        .unwrap_err();

    assert!(matches!(domain_error(&err), PlantwiseError::NotFound { .. }));
}

#[tokio::test]
async fn test_plant_locks_released_after_saves() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    for plant_id in 1000..1050 {
        scene::save_scene(&db, &locks, plant_id, Vec::new())
            .await
            .unwrap_err();
    }
    assert!(locks.is_empty());

    scene::save_scene(&db, &locks, plant.id, descriptors(json!([{"name": "A"}])))
        .await
        .unwrap();
    assert!(locks.is_empty());
}

#[tokio::test]
async fn test_missing_template_rolls_back() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    let before = scene::save_scene(&db, &locks, plant.id, descriptors(json!([{"name": "A"}])))
        .await
        .unwrap();

    let err = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([{"name": "B"}, {"name": "C", "assetId": 999}])),
    )
    .await
    .unwrap_err();

    assert!(matches!(domain_error(&err), PlantwiseError::Validation(_)));
    assert_eq!(
        plant_asset_ids(&db, plant.id).await,
        BTreeSet::from([before[0].id])
    );
}

#[tokio::test]
async fn test_missing_device_rolls_back() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    let err = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([{"name": "A", "boundDeviceId": 77}])),
    )
    .await
    .unwrap_err();

    assert!(matches!(domain_error(&err), PlantwiseError::Validation(_)));
    assert!(plant_asset_ids(&db, plant.id).await.is_empty());
}

#[tokio::test]
async fn test_device_of_another_client_rejected() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;
    let other = create_client(&db, "Globex").await;
    let foreign = create_device(&db, other.id, "SN-FOREIGN").await;

    let err = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([{"name": "A", "boundDeviceId": foreign.id}])),
    )
    .await
    .unwrap_err();

    assert!(matches!(domain_error(&err), PlantwiseError::Validation(_)));
}

#[tokio::test]
async fn test_template_and_device_binding() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (client, plant) = tenant_with_plant(&db).await;
    let template_id = create_template(&db, "Pump").await;
    let device = create_device(&db, client.id, "SN-1").await;

    let records = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([{
            "name": "Pump",
            "assetId": template_id,
            "boundDeviceId": device.id,
            "telemetryMapping": {"rotation_y": "rpm"}
        }])),
    )
    .await
    .unwrap();

    assert_eq!(records[0].asset_id, Some(template_id));
    assert_eq!(records[0].bound_device_id, Some(device.id));
    assert_eq!(records[0].telemetry_mapping, json!({"rotation_y": "rpm"}));
}

#[tokio::test]
async fn test_id_owned_by_another_plant_conflicts() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (client, plant) = tenant_with_plant(&db).await;
    let other_plant = create_plant(&db, client.id, "Warehouse").await;

    let other = scene::save_scene(
        &db,
        &locks,
        other_plant.id,
        descriptors(json!([{"name": "Forklift"}])),
    )
    .await
    .unwrap();

    let err = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([{"id": other[0].id, "name": "Stolen"}])),
    )
    .await
    .unwrap_err();

    assert!(matches!(domain_error(&err), PlantwiseError::Conflict(_)));
    let untouched = asset::Entity::find_by_id(other[0].id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.plant_id, other_plant.id);
    assert_eq!(untouched.name, "Forklift");
}

#[tokio::test]
async fn test_omitted_subtree_and_tags_cascade() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    let records = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([
            {"id": 10, "name": "Line"},
            {"id": 11, "name": "Motor", "parentId": 10},
            {"id": 12, "name": "Other"}
        ])),
    )
    .await
    .unwrap();
    assert_eq!(records.len(), 3);

    sensor_tag::create(
        &db,
        SensorTagForm {
            asset_id: 11,
            sensor_id: "TT-1".to_string(),
            sensor_type: None,
            position: None,
        },
    )
    .await
    .unwrap();

    scene::save_scene(&db, &locks, plant.id, descriptors(json!([{"id": 12, "name": "Other"}])))
        .await
        .unwrap();

    assert_eq!(plant_asset_ids(&db, plant.id).await, BTreeSet::from([12]));
    let tags = sensor_tag_entity::Entity::find().all(&db).await.unwrap();
    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_reparented_child_survives_parent_omission() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([
            {"id": 1, "name": "Old parent"},
            {"id": 2, "name": "New parent"},
            {"id": 3, "name": "Child", "parentId": 1}
        ])),
    )
    .await
    .unwrap();

    let records = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([
            {"id": 3, "name": "Child", "parentId": 2},
            {"id": 2, "name": "New parent"}
        ])),
    )
    .await
    .unwrap();

    assert_eq!(records[0].id, 3);
    assert_eq!(records[0].parent_id, Some(2));
    assert_eq!(plant_asset_ids(&db, plant.id).await, BTreeSet::from([2, 3]));
}

#[tokio::test]
async fn test_sensor_tags_are_embedded_in_records() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    scene::save_scene(&db, &locks, plant.id, descriptors(json!([{"id": 5, "name": "Pump"}])))
        .await
        .unwrap();
    sensor_tag::create(
        &db,
        SensorTagForm {
            asset_id: 5,
            sensor_id: "VT-9".to_string(),
            sensor_type: None,
            position: Some([0.0, 1.0, 0.0]),
        },
    )
    .await
    .unwrap();

    let records = scene::save_scene(&db, &locks, plant.id, descriptors(json!([{"id": 5, "name": "Pump"}])))
        .await
        .unwrap();

    assert_eq!(records[0].sensor_tags.len(), 1);
    assert_eq!(records[0].sensor_tags[0].sensor_id, "VT-9");
}

#[tokio::test]
async fn test_response_follows_request_order() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    let records = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([
            {"name": "first"},
            {"id": 30, "name": "second", "parentId": 20},
            {"name": "third"},
            {"id": 20, "name": "fourth"}
        ])),
    )
    .await
    .unwrap();

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["first", "second", "third", "fourth"]);
    assert_eq!(records[1].id, 30);
    assert_eq!(records[3].id, 20);
}

#[tokio::test]
async fn test_invalid_plan_writes_nothing() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    let err = scene::save_scene(
        &db,
        &locks,
        plant.id,
        descriptors(json!([{"id": 1, "name": "A"}, {"id": 1, "name": "B"}])),
    )
    .await
    .unwrap_err();

    assert!(matches!(domain_error(&err), PlantwiseError::Validation(_)));
    assert!(plant_asset_ids(&db, plant.id).await.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_leave_one_complete_scene() {
    let db = memory_db().await;
    let locks = PlantLocks::new();
    let (_, plant) = tenant_with_plant(&db).await;

    let mut handles = Vec::new();
    for round in 0..6_i64 {
        let db = db.clone();
        let locks = locks.clone();
        let plant_id = plant.id;
        handles.push(tokio::spawn(async move {
            let scene = json!([
                {"id": 100 + round * 10, "name": format!("root-{round}")},
                {"id": 101 + round * 10, "name": format!("leaf-{round}"), "parentId": 100 + round * 10},
                {"name": format!("new-{round}")}
            ]);
            scene::save_scene(&db, &locks, plant_id, descriptors(scene))
                .await
                .unwrap()
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    let ids = plant_asset_ids(&db, plant.id).await;
    assert_eq!(ids.len(), 3);
    let matches_one = results.iter().any(|records| {
        records.iter().map(|r| r.id).collect::<BTreeSet<_>>() == ids
    });
    assert!(matches_one, "final state must equal exactly one submitted scene");
    assert!(locks.is_empty());
}
