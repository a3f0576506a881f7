use super::models::{blood_units, stored_units};
use crate::config::test_helpers::setup_test_app_with_db;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::Utc;
use sea_orm::EntityTrait;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn extract_response_body(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    let body: Value = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        let raw_text = String::from_utf8_lossy(&bytes);
        json!({"error": raw_text})
    });
    (status, body)
}

async fn request(app: &axum::Router, method: &str, uri: &str, payload: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    let body = match payload {
        Some(payload) => Body::from(payload.to_string()),
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    extract_response_body(response).await
}

/// Registers a blood bank and a donor, returning their ids
async fn create_bank_and_donor(app: &axum::Router) -> (i64, i64) {
    let (status, body) = request(
        app,
        "POST",
        "/api/institutions",
        Some(json!({ "institution_type": "bloodbank", "institution_name": "Northgate Blood Bank" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Failed to create test blood bank: {body:?}");
    let bank_id = body["id"].as_i64().unwrap();

    let (status, body) = request(
        app,
        "POST",
        "/api/donors",
        Some(json!({
            "f_name": "Iris",
            "l_name": "Deng",
            "date_of_birth": "1993-02-17",
            "phone_number": "555-0161",
            "blood_type": "B-",
            "bb_id": bank_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Failed to create test donor: {body:?}");
    let donor_id = body["id"].as_i64().unwrap();

    (bank_id, donor_id)
}

#[tokio::test]
async fn test_donation_validation() {
    let (app, db) = setup_test_app_with_db().await;
    let (bank_id, donor_id) = create_bank_and_donor(&app).await;

    // Missing expiration date
    let (status, body) = request(
        &app,
        "POST",
        "/api/donations",
        Some(json!({
            "donor_id": donor_id,
            "blood_type": "B-",
            "quantity_donated": 1,
            "bloodbank_id": bank_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");

    // Zero quantity reads as absent
    let (status, body) = request(
        &app,
        "POST",
        "/api/donations",
        Some(json!({
            "donor_id": donor_id,
            "blood_type": "B-",
            "expiration_date": "2026-09-01",
            "quantity_donated": 0,
            "bloodbank_id": bank_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");

    // Invalid blood type
    let (status, body) = request(
        &app,
        "POST",
        "/api/donations",
        Some(json!({
            "donor_id": donor_id,
            "blood_type": "B!",
            "expiration_date": "2026-09-01",
            "quantity_donated": 1,
            "bloodbank_id": bank_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid blood type");

    let units = blood_units::Entity::find().all(&db).await.unwrap();
    assert!(units.is_empty(), "Rejected donations must not create units");
}

#[tokio::test]
async fn test_donation_unknown_donor() {
    let (app, db) = setup_test_app_with_db().await;
    let (bank_id, _donor_id) = create_bank_and_donor(&app).await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/donations",
        Some(json!({
            "donor_id": 9999,
            "blood_type": "B-",
            "expiration_date": "2026-09-01",
            "quantity_donated": 1,
            "bloodbank_id": bank_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Donor not found");

    let units = blood_units::Entity::find().all(&db).await.unwrap();
    assert!(units.is_empty());
}

#[tokio::test]
async fn test_donation_unknown_blood_bank() {
    let (app, db) = setup_test_app_with_db().await;
    let (_bank_id, donor_id) = create_bank_and_donor(&app).await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/donations",
        Some(json!({
            "donor_id": donor_id,
            "blood_type": "B-",
            "expiration_date": "2026-09-01",
            "quantity_donated": 1,
            "bloodbank_id": 9999
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Blood bank not found");

    let units = blood_units::Entity::find().all(&db).await.unwrap();
    assert!(units.is_empty());
}

#[tokio::test]
async fn test_donation_success() {
    let (app, db) = setup_test_app_with_db().await;
    let (bank_id, donor_id) = create_bank_and_donor(&app).await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/donations",
        Some(json!({
            "donor_id": donor_id,
            "blood_type": "B-",
            "expiration_date": "2026-09-01",
            "quantity_donated": 2,
            "bloodbank_id": bank_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Failed to record donation: {body:?}");
    assert_eq!(body["message"], "Donation recorded successfully");
    let blood_id = body["blood_id"].as_i64().unwrap();

    // Exactly one unit and one storage link, pointing at the right rows
    let units = blood_units::Entity::find().all(&db).await.unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(i64::from(units[0].id), blood_id);
    assert_eq!(units[0].blood_type, "B-");
    assert_eq!(units[0].quantity_donated, 2);
    assert_eq!(i64::from(units[0].donor_id), donor_id);

    let stored = stored_units::Entity::find().all(&db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(i64::from(stored[0].blood_unit_id), blood_id);
    assert_eq!(i64::from(stored[0].blood_bank_id), bank_id);

    // The donor's last donation date advanced to today
    let (status, body) = request(&app, "GET", &format!("/api/donors/{donor_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["last_donation_date"],
        Utc::now().date_naive().to_string()
    );
}

#[tokio::test]
async fn test_donor_delete_blocked_by_donation() {
    let (app, _db) = setup_test_app_with_db().await;
    let (bank_id, donor_id) = create_bank_and_donor(&app).await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/donations",
        Some(json!({
            "donor_id": donor_id,
            "blood_type": "B-",
            "expiration_date": "2026-09-01",
            "quantity_donated": 1,
            "bloodbank_id": bank_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(&app, "DELETE", &format!("/api/donors/{donor_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "Failed to delete donor. May have related records."
    );

    // The donor is still there
    let (status, _) = request(&app, "GET", &format!("/api/donors/{donor_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}
