use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Blood type is mandatory; the remaining filters are each applied only
/// when supplied, ANDed together.
#[derive(Deserialize, ToSchema)]
pub struct SearchRequest {
    pub blood_type: Option<String>,
    pub bloodbank_id: Option<i32>,
    pub expiration_start: Option<NaiveDate>,
    pub expiration_end: Option<NaiveDate>,
}

/// Projection of the blood_units ⋈ stored_units ⋈ blood_banks join
#[derive(Debug, FromQueryResult)]
pub struct InventoryRow {
    pub blood_id: i32,
    pub blood_type: String,
    pub expiration_date: NaiveDate,
    pub quantity_donated: i32,
    pub bloodbank_id: i32,
    pub bloodbank_name: String,
    pub location: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryMatch {
    pub blood_id: i32,
    pub blood_type: String,
    pub expiration_date: NaiveDate,
    pub quantity_donated: i32,
    pub bloodbank_id: i32,
    pub bloodbank_name: String,
    pub location: Option<String>,
    /// Negative for stock already past its expiration date; expired
    /// units are reported, not filtered, and it is the caller's job to
    /// interpret them.
    pub days_until_expiration: i64,
}

impl InventoryMatch {
    pub fn from_row(row: InventoryRow, today: NaiveDate) -> Self {
        let days_until_expiration = (row.expiration_date - today).num_days();
        InventoryMatch {
            blood_id: row.blood_id,
            blood_type: row.blood_type,
            expiration_date: row.expiration_date,
            quantity_donated: row.quantity_donated,
            bloodbank_id: row.bloodbank_id,
            bloodbank_name: row.bloodbank_name,
            location: row.location,
            days_until_expiration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(expiration_date: NaiveDate) -> InventoryRow {
        InventoryRow {
            blood_id: 1,
            blood_type: "O-".to_string(),
            expiration_date,
            quantity_donated: 2,
            bloodbank_id: 7,
            bloodbank_name: "Central".to_string(),
            location: None,
        }
    }

    #[test]
    fn test_days_until_expiration() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();

        let future = InventoryMatch::from_row(row(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()), today);
        assert_eq!(future.days_until_expiration, 5);

        let same_day = InventoryMatch::from_row(row(today), today);
        assert_eq!(same_day.days_until_expiration, 0);

        let expired = InventoryMatch::from_row(row(NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()), today);
        assert_eq!(expired.days_until_expiration, -7);
    }
}
