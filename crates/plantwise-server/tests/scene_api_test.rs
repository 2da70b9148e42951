//! HTTP tests for scene save

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{tenant_with_plant, test_state};

#[actix_web::test]
async fn test_save_scene_round_trip() {
    let state = test_state().await;
    let (_, plant_id) = tenant_with_plant(&state).await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene/")
        .set_json(json!({"plant_id": plant_id, "assets": [{"id": 1, "name": "Pump"}]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene")
        .set_json(json!({
            "plant_id": plant_id,
            "assets": [
                {"id": 1, "name": "Pump", "position": [1, 2, 3]},
                {"name": "Valve"}
            ]
        }))
        .to_request();
    let records: Value = test::call_and_read_body_json(&app, req).await;
    let records = records.as_array().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[0]["plantId"], plant_id);
    assert_eq!(records[0]["position"], json!([1.0, 2.0, 3.0]));
    assert_eq!(records[0]["scale"], json!([1.0, 1.0, 1.0]));
    assert_eq!(records[0]["sensorTags"], json!([]));
    assert_eq!(records[1]["name"], "Valve");
    assert_ne!(records[1]["id"], 1);

    // Records are accepted back unchanged
    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene")
        .set_json(json!({"plantId": plant_id, "assets": records}))
        .to_request();
    let again: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(again.as_array().unwrap(), records);

    let req = test::TestRequest::get()
        .uri(&format!("/api/assets/assets?plant={}", plant_id))
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["totalCount"], 2);
}

#[actix_web::test]
async fn test_save_scene_missing_plant() {
    let state = test_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene")
        .set_json(json!({"plant_id": 9999, "assets": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "not_found");
    assert_eq!(body["error"], "plant 9999 not found");
}

#[actix_web::test]
async fn test_save_scene_rejects_malformed_bodies() {
    let state = test_state().await;
    let (_, plant_id) = tenant_with_plant(&state).await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"plant_id\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "validation");
    assert_eq!(body["code"], 10000);

    // `assets` is required
    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene")
        .set_json(json!({"plant_id": plant_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene")
        .set_json(json!({"plant_id": plant_id, "assets": [{"name": "A", "position": [1, 2]}]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene")
        .set_json(json!({
            "plant_id": plant_id,
            "assets": [{"id": 7, "name": "A", "parent_id": 8}, {"id": 8, "name": "B", "parent_id": 7}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "validation");

    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene")
        .insert_header(("content-type", "text/plain"))
        .set_payload("plant_id=1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 20003);
}

#[actix_web::test]
async fn test_save_scene_unknown_template_rolls_back() {
    let state = test_state().await;
    let (_, plant_id) = tenant_with_plant(&state).await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene")
        .set_json(json!({"plant_id": plant_id, "assets": [{"name": "Keep"}]}))
        .to_request();
    let saved: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene")
        .set_json(json!({"plant_id": plant_id, "assets": [{"name": "New", "asset_id": 777}]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/assets/assets?plant={}", plant_id))
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["totalCount"], 1);
    assert_eq!(page["pageItems"][0]["id"], saved[0]["id"]);
}

#[actix_web::test]
async fn test_save_scene_cross_plant_id_conflicts() {
    let state = test_state().await;
    let (client_id, plant_id) = tenant_with_plant(&state).await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/tenants/plants")
        .set_json(json!({"client_id": client_id, "name": "Annex"}))
        .to_request();
    let other: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene")
        .set_json(json!({"plant_id": plant_id, "assets": [{"name": "Pump"}]}))
        .to_request();
    let saved: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/assets/save_scene")
        .set_json(json!({"plant_id": other["id"], "assets": [{"id": saved[0]["id"], "name": "Stolen"}]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "conflict");
}
