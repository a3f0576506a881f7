use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Canonical ABO/Rh blood types accepted anywhere a blood type is stored
pub const VALID_BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

pub fn is_valid_blood_type(blood_type: &str) -> bool {
    VALID_BLOOD_TYPES.contains(&blood_type)
}

/// Missing and empty-string fields are both treated as absent
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(ToSchema, Deserialize, Serialize)]
pub struct HealthCheck {
    pub status: String,
}
