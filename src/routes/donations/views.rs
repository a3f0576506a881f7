use super::models::{DonationCreate, blood_units, stored_units};
use crate::common::errors::{ApiError, DbErrorExt};
use crate::common::models::{is_valid_blood_type, non_empty};
use crate::common::state::AppState;
use crate::routes::donors::models as donors;
use crate::routes::institutions::models::blood_banks;
use axum::{Json, extract::State};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use serde_json::{Value, json};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(record_donation))
        .with_state(state.db.clone())
}

/// Registers a new unit from an existing donor into an existing blood
/// bank's inventory and advances the donor's last donation date.
#[utoipa::path(
    post,
    path = "",
    request_body = DonationCreate,
    responses(
        (status = 200, description = "Donation recorded successfully"),
        (status = 400, description = "Missing fields or invalid blood type"),
        (status = 404, description = "Donor or blood bank not found")
    )
)]
pub async fn record_donation(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<DonationCreate>,
) -> Result<Json<Value>, ApiError> {
    // A quantity below one reads as absent, like the other fields
    let (
        Some(donor_id),
        Some(blood_type),
        Some(expiration_date),
        Some(quantity_donated),
        Some(bloodbank_id),
    ) = (
        payload.donor_id,
        non_empty(payload.blood_type.as_deref()),
        payload.expiration_date,
        payload.quantity_donated.filter(|quantity| *quantity >= 1),
        payload.bloodbank_id,
    )
    else {
        return Err(ApiError::Validation("All fields are required".to_string()));
    };

    if !is_valid_blood_type(blood_type) {
        return Err(ApiError::Validation("Invalid blood type".to_string()));
    }

    // Existence is checked up front so the caller gets a precise 404.
    // A concurrent delete between these lookups and the transaction
    // below is an accepted race; the foreign keys catch it at insert
    // time and the request fails as a whole.
    let donor = donors::Entity::find_by_id(donor_id)
        .one(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to record donation"))?
        .ok_or_else(|| ApiError::NotFound("Donor not found".to_string()))?;

    blood_banks::Entity::find_by_id(bloodbank_id)
        .one(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to record donation"))?
        .ok_or_else(|| ApiError::NotFound("Blood bank not found".to_string()))?;

    // Unit, storage link and donor stamp commit together or not at all
    let txn = db
        .begin()
        .await
        .map_err(|err| err.to_api_error("Failed to record donation"))?;

    let unit = blood_units::ActiveModel {
        blood_type: Set(blood_type.to_string()),
        expiration_date: Set(expiration_date),
        quantity_donated: Set(quantity_donated),
        donor_id: Set(donor_id),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|err| err.to_api_error("Failed to record donation"))?;

    stored_units::ActiveModel {
        blood_unit_id: Set(unit.id),
        blood_bank_id: Set(bloodbank_id),
    }
    .insert(&txn)
    .await
    .map_err(|err| err.to_api_error("Failed to record donation"))?;

    let mut donor: donors::ActiveModel = donor.into();
    donor.last_donation_date = Set(Some(Utc::now().date_naive()));
    donor
        .update(&txn)
        .await
        .map_err(|err| err.to_api_error("Failed to record donation"))?;

    txn.commit()
        .await
        .map_err(|err| err.to_api_error("Failed to record donation"))?;

    Ok(Json(json!({
        "message": "Donation recorded successfully",
        "blood_id": unit.id
    })))
}
