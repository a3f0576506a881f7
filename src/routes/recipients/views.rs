use super::models::{Column, Entity, RecipientCreate, RecipientUpdate};
use crate::common::errors::{ApiError, DbErrorExt, is_foreign_key_violation};
use crate::common::models::{is_valid_blood_type, non_empty};
use crate::common::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde_json::{Value, json};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_all_recipients, create_recipient))
        .routes(routes!(get_one_recipient, update_recipient, delete_recipient))
        .with_state(state.db.clone())
}

#[utoipa::path(
    post,
    path = "",
    request_body = RecipientCreate,
    responses(
        (status = 200, description = "Recipient created successfully"),
        (status = 400, description = "Missing required fields or invalid blood type")
    )
)]
pub async fn create_recipient(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<RecipientCreate>,
) -> Result<Json<Value>, ApiError> {
    let (Some(f_name), Some(l_name), Some(date_of_birth), Some(blood_type), Some(phone_number)) = (
        non_empty(payload.f_name.as_deref()),
        non_empty(payload.l_name.as_deref()),
        payload.date_of_birth,
        non_empty(payload.blood_type.as_deref()),
        non_empty(payload.phone_number.as_deref()),
    ) else {
        return Err(ApiError::Validation("Required fields missing".to_string()));
    };

    if !is_valid_blood_type(blood_type) {
        return Err(ApiError::Validation("Invalid blood type".to_string()));
    }

    let recipient = super::models::ActiveModel {
        f_name: Set(f_name.to_string()),
        m_initial: Set(payload.m_initial),
        l_name: Set(l_name.to_string()),
        date_of_birth: Set(date_of_birth),
        gender: Set(payload.gender),
        blood_type: Set(blood_type.to_string()),
        phone_number: Set(phone_number.to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await
    .map_err(|err| err.to_api_error("Failed to create recipient"))?;

    Ok(Json(json!({
        "message": "Recipient created successfully",
        "id": recipient.id
    })))
}

#[utoipa::path(
    get,
    path = "",
    responses(
        (status = 200, description = "All recipients, newest first", body = [super::models::Model])
    )
)]
pub async fn get_all_recipients(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<super::models::Model>>, ApiError> {
    let recipients = Entity::find()
        .order_by_desc(Column::Id)
        .all(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to fetch recipients"))?;

    Ok(Json(recipients))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Recipient ID")),
    responses(
        (status = 200, description = "The recipient row", body = super::models::Model),
        (status = 404, description = "Recipient not found")
    )
)]
pub async fn get_one_recipient(
    Path(id): Path<i32>,
    State(db): State<DatabaseConnection>,
) -> Result<Json<super::models::Model>, ApiError> {
    let recipient = Entity::find_by_id(id)
        .one(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to fetch recipient"))?
        .ok_or_else(|| ApiError::NotFound("Recipient not found".to_string()))?;

    Ok(Json(recipient))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = i32, Path, description = "Recipient ID")),
    request_body = RecipientUpdate,
    responses(
        (status = 200, description = "Recipient updated successfully"),
        (status = 400, description = "Missing required fields or invalid blood type"),
        (status = 404, description = "Recipient not found")
    )
)]
pub async fn update_recipient(
    Path(id): Path<i32>,
    State(db): State<DatabaseConnection>,
    Json(payload): Json<RecipientUpdate>,
) -> Result<Json<Value>, ApiError> {
    if let Some(blood_type) = non_empty(payload.blood_type.as_deref()) {
        if !is_valid_blood_type(blood_type) {
            return Err(ApiError::Validation("Invalid blood type".to_string()));
        }
    }

    let (Some(f_name), Some(l_name), Some(date_of_birth), Some(phone_number)) = (
        non_empty(payload.f_name.as_deref()),
        non_empty(payload.l_name.as_deref()),
        payload.date_of_birth,
        non_empty(payload.phone_number.as_deref()),
    ) else {
        return Err(ApiError::Validation("Required fields missing".to_string()));
    };

    let recipient = Entity::find_by_id(id)
        .one(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to update recipient"))?
        .ok_or_else(|| ApiError::NotFound("Recipient not found".to_string()))?;

    let mut recipient: super::models::ActiveModel = recipient.into();
    recipient.f_name = Set(f_name.to_string());
    recipient.m_initial = Set(payload.m_initial.clone());
    recipient.l_name = Set(l_name.to_string());
    recipient.date_of_birth = Set(date_of_birth);
    recipient.gender = Set(payload.gender.clone());
    if let Some(blood_type) = non_empty(payload.blood_type.as_deref()) {
        recipient.blood_type = Set(blood_type.to_string());
    }
    recipient.phone_number = Set(phone_number.to_string());

    recipient
        .update(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to update recipient"))?;

    Ok(Json(json!({ "message": "Recipient updated successfully" })))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = i32, Path, description = "Recipient ID")),
    responses(
        (status = 200, description = "Recipient deleted successfully"),
        (status = 404, description = "Recipient not found"),
        (status = 409, description = "Recipient has dependent records")
    )
)]
pub async fn delete_recipient(
    Path(id): Path<i32>,
    State(db): State<DatabaseConnection>,
) -> Result<Json<Value>, ApiError> {
    let result = Entity::delete_by_id(id).exec(&db).await.map_err(|err| {
        if is_foreign_key_violation(&err) {
            ApiError::Conflict("Failed to delete recipient. May have related records.".to_string())
        } else {
            err.to_api_error("Failed to delete recipient")
        }
    })?;

    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Recipient not found".to_string()));
    }

    Ok(Json(json!({ "message": "Recipient deleted successfully" })))
}
