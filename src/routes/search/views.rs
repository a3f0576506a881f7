use super::models::{InventoryMatch, InventoryRow, SearchRequest};
use crate::common::errors::{ApiError, DbErrorExt};
use crate::common::models::non_empty;
use crate::common::state::AppState;
use crate::routes::donations::models::{blood_units, stored_units};
use crate::routes::institutions::models::blood_banks;
use axum::{Json, extract::State};
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(search_inventory))
        .with_state(state.db.clone())
}

/// Available units of a blood type, soonest-expiring first. The query
/// starts from a fixed base and appends a typed predicate per supplied
/// filter; no pagination.
#[utoipa::path(
    post,
    path = "",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching units ordered by ascending expiration date", body = [InventoryMatch]),
        (status = 400, description = "Blood type missing")
    )
)]
pub async fn search_inventory(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<Vec<InventoryMatch>>, ApiError> {
    let Some(blood_type) = non_empty(payload.blood_type.as_deref()) else {
        return Err(ApiError::Validation("Blood type is required".to_string()));
    };

    let mut query = blood_units::Entity::find()
        .select_only()
        .column_as(blood_units::Column::Id, "blood_id")
        .column(blood_units::Column::BloodType)
        .column(blood_units::Column::ExpirationDate)
        .column(blood_units::Column::QuantityDonated)
        .column_as(blood_banks::Column::Id, "bloodbank_id")
        .column_as(blood_banks::Column::Name, "bloodbank_name")
        .column(blood_banks::Column::Location)
        .join(JoinType::InnerJoin, blood_units::Relation::StoredUnit.def())
        .join(JoinType::InnerJoin, stored_units::Relation::BloodBank.def())
        .filter(blood_units::Column::BloodType.eq(blood_type))
        .order_by_asc(blood_units::Column::ExpirationDate);

    if let Some(bloodbank_id) = payload.bloodbank_id {
        query = query.filter(blood_banks::Column::Id.eq(bloodbank_id));
    }
    if let Some(expiration_start) = payload.expiration_start {
        query = query.filter(blood_units::Column::ExpirationDate.gte(expiration_start));
    }
    if let Some(expiration_end) = payload.expiration_end {
        query = query.filter(blood_units::Column::ExpirationDate.lte(expiration_end));
    }

    let rows = query
        .into_model::<InventoryRow>()
        .all(&db)
        .await
        .map_err(|err| err.to_api_error("Failed to search inventory"))?;

    let today = Utc::now().date_naive();
    let matches = rows
        .into_iter()
        .map(|row| InventoryMatch::from_row(row, today))
        .collect();

    Ok(Json(matches))
}
