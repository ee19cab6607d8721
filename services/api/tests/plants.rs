mod common;

use axum::http::StatusCode;
use common::test_app;
use serde_json::{Value, json};
use std::collections::HashSet;

fn owners(plants: &Value) -> HashSet<String> {
    plants
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["ownerId"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_plant_access_scenario() {
    let app = test_app();

    let alice = app.register("alice").await;
    let alice_id = app.user_id(&alice).await;
    let bob = app.register("bob").await;
    let admin = app.seed_admin("root_admin").await;

    let plant = app.create_plant(&alice, "Fiddle leaf").await;
    assert_eq!(plant["ownerId"], alice_id.as_str());
    assert_eq!(plant["status"], "vault");
    assert!(plant["positionX"].is_null());
    assert!(plant["positionY"].is_null());

    let uri = format!("/api/plants/{}", plant["id"].as_str().unwrap());

    let (status, body) = app.get(&uri, &bob).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied.");

    let (status, body) = app.get(&uri, &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], plant["id"]);

    let (status, _) = app.get(&uri, &alice).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_forces_owner_status_and_positions() {
    let app = test_app();
    let alice = app.register("alice").await;
    let alice_id = app.user_id(&alice).await;
    let bob = app.register("bob").await;
    let bob_id = app.user_id(&bob).await;

    let (status, plant) = app
        .post(
            "/api/plants",
            Some(&alice),
            json!({
                "name": "Monstera",
                "species": "Deliciosa",
                "imageUrl": "https://images.example.com/m.png",
                "ownerId": bob_id,
                "status": "garden",
                "positionX": 10,
                "positionY": 20
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(plant["ownerId"], alice_id.as_str());
    assert_eq!(plant["status"], "vault");
    assert!(plant["positionX"].is_null());
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let app = test_app();
    let alice = app.register("alice").await;
    let plant = app.create_plant(&alice, "Basil").await;
    let uri = format!("/api/plants/{}", plant["id"].as_str().unwrap());

    let (status, body) = app.delete(&uri, &alice).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Plant deleted successfully");

    let (status, body) = app.delete(&uri, &alice).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Plant not found.");
}

#[tokio::test]
async fn test_listing_is_scoped_by_role() {
    let app = test_app();
    let alice = app.register("alice").await;
    let alice_id = app.user_id(&alice).await;
    let bob = app.register("bob").await;
    let bob_id = app.user_id(&bob).await;
    let admin = app.seed_admin("root_admin").await;

    app.create_plant(&alice, "Aloe").await;
    app.create_plant(&alice, "Agave").await;
    app.create_plant(&bob, "Bamboo").await;

    let (status, mine) = app.get("/api/plants", &alice).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 2);
    assert_eq!(owners(&mine), HashSet::from([alice_id.clone()]));

    let (_, bobs) = app.get("/api/plants", &bob).await;
    assert_eq!(bobs.as_array().unwrap().len(), 1);
    assert_eq!(owners(&bobs), HashSet::from([bob_id.clone()]));

    let (status, all) = app.get("/api/plants", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);
    assert_eq!(owners(&all), HashSet::from([alice_id, bob_id]));
}

#[tokio::test]
async fn test_listing_is_newest_first_and_filters_by_status() {
    let app = test_app();
    let alice = app.register("alice").await;

    let first = app.create_plant(&alice, "Aloe").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = app.create_plant(&alice, "Agave").await;

    let (_, all) = app.get("/api/plants", &alice).await;
    assert_eq!(all[0]["id"], second["id"]);
    assert_eq!(all[1]["id"], first["id"]);

    let uri = format!("/api/plants/{}", first["id"].as_str().unwrap());
    let (status, _) = app
        .put(&uri, &alice, json!({ "status": "garden", "positionX": 1, "positionY": 2 }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, garden) = app.get("/api/plants?status=garden", &alice).await;
    assert_eq!(garden.as_array().unwrap().len(), 1);
    assert_eq!(garden[0]["id"], first["id"]);

    let (_, vault) = app.get("/api/plants?status=vault", &alice).await;
    assert_eq!(vault.as_array().unwrap().len(), 1);
    assert_eq!(vault[0]["id"], second["id"]);

    let (status, _) = app.get("/api/plants?status=attic", &alice).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_partial_update_leaves_absent_fields() {
    let app = test_app();
    let alice = app.register("alice").await;
    let plant = app.create_plant(&alice, "Fern").await;
    let uri = format!("/api/plants/{}", plant["id"].as_str().unwrap());

    let (status, updated) = app
        .put(&uri, &alice, json!({ "status": "garden", "positionX": 3.5, "positionY": -1 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "garden");
    assert_eq!(updated["positionX"], 3.5);
    assert_eq!(updated["positionY"], -1.0);
    assert_eq!(updated["name"], plant["name"]);
    assert_eq!(updated["species"], plant["species"]);
    assert_eq!(updated["imageUrl"], plant["imageUrl"]);
    assert_eq!(updated["ownerId"], plant["ownerId"]);
    assert_eq!(updated["createdAt"], plant["createdAt"]);

    let (_, cleared) = app.put(&uri, &alice, json!({ "positionX": null })).await;
    assert!(cleared["positionX"].is_null());
    assert_eq!(cleared["positionY"], -1.0);
    assert_eq!(cleared["status"], "garden");
}

#[tokio::test]
async fn test_invalid_update_is_atomic() {
    let app = test_app();
    let alice = app.register("alice").await;
    let plant = app.create_plant(&alice, "Fern").await;
    let uri = format!("/api/plants/{}", plant["id"].as_str().unwrap());

    let (status, body) = app
        .put(&uri, &alice, json!({ "name": "Renamed fern", "imageUrl": "nope" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "\"imageUrl\" must be a valid uri");

    let (status, _) = app.put(&uri, &alice, json!({ "ownerId": "someone" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.put(&uri, &alice, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, current) = app.get(&uri, &alice).await;
    assert_eq!(current["name"], "Fern");
    assert_eq!(current["updatedAt"], plant["updatedAt"]);
}

#[tokio::test]
async fn test_foreign_plants_cannot_be_mutated() {
    let app = test_app();
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let admin = app.seed_admin("root_admin").await;
    let plant = app.create_plant(&alice, "Fern").await;
    let uri = format!("/api/plants/{}", plant["id"].as_str().unwrap());

    let (status, _) = app.put(&uri, &bob, json!({ "name": "Stolen" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.delete(&uri, &bob).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = app.put(&uri, &admin, json!({ "name": "Curated" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Curated");

    let (status, _) = app.delete(&uri, &admin).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_plant_ids_are_not_found() {
    let app = test_app();
    let alice = app.register("alice").await;

    let (status, body) = app.get("/api/plants/not-a-uuid", &alice).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Plant not found.");

    let missing = format!("/api/plants/{}", uuid::Uuid::new_v4());
    let (status, _) = app.put(&missing, &alice, json!({ "name": "Ghost" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_checks_access_before_the_body() {
    let app = test_app();
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let plant = app.create_plant(&alice, "Fern").await;
    let uri = format!("/api/plants/{}", plant["id"].as_str().unwrap());

    for body in [json!({ "status": "attic" }), json!({ "ownerId": "x" })] {
        let (status, response) = app.put(&uri, &bob, body).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(response["message"], "Access denied.");
    }

    let missing = format!("/api/plants/{}", uuid::Uuid::new_v4());
    let (status, response) = app.put(&missing, &bob, json!({ "status": "attic" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["message"], "Plant not found.");

    let (status, response) = app.put(&uri, &alice, json!({ "status": "attic" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "\"status\" must be one of [garden, vault]");

    let (status, response) = app.put(&uri, &alice, json!({ "ownerId": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "\"ownerId\" is not allowed");
}
