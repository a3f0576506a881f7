use super::models::{Column, DonorCreate, DonorUpdate, DonorWithBloodBank, Entity, Relation};
use crate::common::errors::{ApiError, DbErrorExt, is_foreign_key_violation};
use crate::common::models::{is_valid_blood_type, non_empty};
use crate::common::state::AppState;
use crate::routes::institutions::models::blood_banks;
use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, JoinType, QueryOrder, QuerySelect,
    RelationTrait, Set,
};
use serde_json::{Value, json};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_all_donors, create_donor))
        .routes(routes!(get_one_donor, update_donor, delete_donor))
        .with_state(state.db.clone())
}

#[utoipa::path(
    post,
    path = "",
    request_body = DonorCreate,
    responses(
        (status = 200, description = "Donor created successfully"),
        (status = 400, description = "Missing required fields or invalid blood type")
    )
)]
pub async fn create_donor(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<DonorCreate>,
) -> Result<Json<Value>, ApiError> {
    let (Some(f_name), Some(l_name), Some(date_of_birth), Some(phone_number), Some(blood_type)) = (
        non_empty(payload.f_name.as_deref()),
        non_empty(payload.l_name.as_deref()),
        payload.date_of_birth,
        non_empty(payload.phone_number.as_deref()),
        non_empty(payload.blood_type.as_deref()),
    ) else {
        return Err(ApiError::Validation("Required fields missing".to_string()));
    };

    if !is_valid_blood_type(blood_type) {
        return Err(ApiError::Validation("Invalid blood type".to_string()));
    }

    let donor = super::models::ActiveModel {
        f_name: Set(f_name.to_string()),
        m_initial: Set(payload.m_initial),
        l_name: Set(l_name.to_string()),
        date_of_birth: Set(date_of_birth),
        phone_number: Set(phone_number.to_string()),
        gender: Set(payload.gender),
        last_donation_date: Set(payload.last_donation_date),
        bb_id: Set(payload.bb_id),
        ..Default::default()
    }
    .insert(&db)
    .await
    .map_err(|err| err.to_api_error("Failed to create donor"))?;

    Ok(Json(json!({
        "message": "Donor created successfully",
        "id": donor.id
    })))
}

#[utoipa::path(
    get,
    path = "",
    responses(
        (status = 200, description = "All donors, newest first, with their home blood bank name", body = [DonorWithBloodBank])
    )
)]
pub async fn get_all_donors(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<DonorWithBloodBank>>, ApiError> {
    let donors = Entity::find()
        .column_as(blood_banks::Column::Name, "bloodbank_name")
        .join(JoinType::LeftJoin, Relation::BloodBank.def())
        .order_by_desc(Column::Id)
        .into_model::<DonorWithBloodBank>()
        .all(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to fetch donors"))?;

    Ok(Json(donors))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Donor ID")),
    responses(
        (status = 200, description = "The donor row", body = super::models::Model),
        (status = 404, description = "Donor not found")
    )
)]
pub async fn get_one_donor(
    Path(id): Path<i32>,
    State(db): State<DatabaseConnection>,
) -> Result<Json<super::models::Model>, ApiError> {
    let donor = Entity::find_by_id(id)
        .one(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to fetch donor"))?
        .ok_or_else(|| ApiError::NotFound("Donor not found".to_string()))?;

    Ok(Json(donor))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = i32, Path, description = "Donor ID")),
    request_body = DonorUpdate,
    responses(
        (status = 200, description = "Donor updated successfully"),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "Donor not found")
    )
)]
pub async fn update_donor(
    Path(id): Path<i32>,
    State(db): State<DatabaseConnection>,
    Json(payload): Json<DonorUpdate>,
) -> Result<Json<Value>, ApiError> {
    let (Some(f_name), Some(l_name), Some(date_of_birth), Some(phone_number)) = (
        non_empty(payload.f_name.as_deref()),
        non_empty(payload.l_name.as_deref()),
        payload.date_of_birth,
        non_empty(payload.phone_number.as_deref()),
    ) else {
        return Err(ApiError::Validation("Required fields missing".to_string()));
    };

    let donor = Entity::find_by_id(id)
        .one(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to update donor"))?
        .ok_or_else(|| ApiError::NotFound("Donor not found".to_string()))?;

    let mut donor: super::models::ActiveModel = donor.into();
    donor.f_name = Set(f_name.to_string());
    donor.m_initial = Set(payload.m_initial);
    donor.l_name = Set(l_name.to_string());
    donor.date_of_birth = Set(date_of_birth);
    donor.phone_number = Set(phone_number.to_string());
    donor.gender = Set(payload.gender);
    // Overwritten like any other field; donation recording is the only
    // path that advances it automatically.
    donor.last_donation_date = Set(payload.last_donation_date);
    donor.bb_id = Set(payload.bb_id);

    donor
        .update(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to update donor"))?;

    Ok(Json(json!({ "message": "Donor updated successfully" })))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = i32, Path, description = "Donor ID")),
    responses(
        (status = 200, description = "Donor deleted successfully"),
        (status = 404, description = "Donor not found"),
        (status = 409, description = "Donor has dependent records")
    )
)]
pub async fn delete_donor(
    Path(id): Path<i32>,
    State(db): State<DatabaseConnection>,
) -> Result<Json<Value>, ApiError> {
    let result = Entity::delete_by_id(id).exec(&db).await.map_err(|err| {
        if is_foreign_key_violation(&err) {
            ApiError::Conflict("Failed to delete donor. May have related records.".to_string())
        } else {
            err.to_api_error("Failed to delete donor")
        }
    })?;

    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Donor not found".to_string()));
    }

    Ok(Json(json!({ "message": "Donor deleted successfully" })))
}
