use super::models::{InstitutionCreate, blood_banks, hospitals};
use crate::common::errors::{ApiError, DbErrorExt};
use crate::common::models::non_empty;
use crate::common::state::AppState;
use axum::{Json, extract::State};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde_json::{Value, json};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(create_institution))
        .routes(routes!(get_all_blood_banks))
        .routes(routes!(get_all_hospitals))
        .with_state(state.db.clone())
}

#[utoipa::path(
    post,
    path = "/institutions",
    request_body = InstitutionCreate,
    responses(
        (status = 200, description = "Institution created successfully"),
        (status = 400, description = "Missing name or invalid institution type")
    )
)]
pub async fn create_institution(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<InstitutionCreate>,
) -> Result<Json<Value>, ApiError> {
    let (Some(institution_type), Some(name)) = (
        non_empty(payload.institution_type.as_deref()),
        non_empty(payload.institution_name.as_deref()),
    ) else {
        return Err(ApiError::Validation(
            "Institution type and name are required".to_string(),
        ));
    };

    match institution_type {
        "bloodbank" => {
            let bank = blood_banks::ActiveModel {
                name: Set(name.to_string()),
                location: Set(payload.location),
                phone_number: Set(payload.phone_number),
                ..Default::default()
            }
            .insert(&db)
            .await
            .map_err(|err| err.to_api_error("Failed to create institution"))?;

            Ok(Json(json!({
                "message": "Blood Bank created successfully",
                "id": bank.id
            })))
        }
        "hospital" => {
            let hospital = hospitals::ActiveModel {
                name: Set(name.to_string()),
                location: Set(payload.location),
                phone_number: Set(payload.phone_number),
                ..Default::default()
            }
            .insert(&db)
            .await
            .map_err(|err| err.to_api_error("Failed to create institution"))?;

            Ok(Json(json!({
                "message": "Hospital created successfully",
                "id": hospital.id
            })))
        }
        _ => Err(ApiError::Validation("Invalid institution type".to_string())),
    }
}

#[utoipa::path(
    get,
    path = "/bloodbanks",
    responses(
        (status = 200, description = "All blood banks ordered by name", body = [blood_banks::Model])
    )
)]
pub async fn get_all_blood_banks(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<blood_banks::Model>>, ApiError> {
    let banks = blood_banks::Entity::find()
        .order_by_asc(blood_banks::Column::Name)
        .all(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to fetch blood banks"))?;

    Ok(Json(banks))
}

#[utoipa::path(
    get,
    path = "/hospitals",
    responses(
        (status = 200, description = "All hospitals ordered by name", body = [hospitals::Model])
    )
)]
pub async fn get_all_hospitals(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<hospitals::Model>>, ApiError> {
    let hospitals = hospitals::Entity::find()
        .order_by_asc(hospitals::Column::Name)
        .all(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to fetch hospitals"))?;

    Ok(Json(hospitals))
}
