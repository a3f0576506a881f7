use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "donors")]
#[schema(as = Donor)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub f_name: String,
    pub m_initial: Option<String>,
    pub l_name: String,
    pub date_of_birth: Date,
    pub phone_number: String,
    pub gender: Option<String>,
    pub last_donation_date: Option<Date>,
    pub bb_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::routes::institutions::models::blood_banks::Entity",
        from = "Column::BbId",
        to = "crate::routes::institutions::models::blood_banks::Column::Id"
    )]
    BloodBank,
    #[sea_orm(has_many = "crate::routes::donations::models::blood_units::Entity")]
    BloodUnits,
}

impl Related<crate::routes::institutions::models::blood_banks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BloodBank.def()
    }
}

impl Related<crate::routes::donations::models::blood_units::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BloodUnits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// The intake form collects a blood type so the donor can be screened,
/// but the type is recorded per donated unit rather than on the donor
/// row.
#[derive(Deserialize, ToSchema)]
pub struct DonorCreate {
    pub f_name: Option<String>,
    pub m_initial: Option<String>,
    pub l_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub last_donation_date: Option<NaiveDate>,
    pub bb_id: Option<i32>,
}

/// Same shape as the create payload minus the blood type. Every mutable
/// field is overwritten, last_donation_date included.
#[derive(Deserialize, ToSchema)]
pub struct DonorUpdate {
    pub f_name: Option<String>,
    pub m_initial: Option<String>,
    pub l_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub last_donation_date: Option<NaiveDate>,
    pub bb_id: Option<i32>,
}

/// Listing row: donor columns plus the joined home blood bank name
#[derive(Debug, FromQueryResult, Serialize, ToSchema)]
pub struct DonorWithBloodBank {
    pub id: i32,
    pub f_name: String,
    pub m_initial: Option<String>,
    pub l_name: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub gender: Option<String>,
    pub last_donation_date: Option<NaiveDate>,
    pub bb_id: Option<i32>,
    pub bloodbank_name: Option<String>,
}
