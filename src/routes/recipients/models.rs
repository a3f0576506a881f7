use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "recipients")]
#[schema(as = Recipient)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub f_name: String,
    pub m_initial: Option<String>,
    pub l_name: String,
    pub date_of_birth: Date,
    pub gender: Option<String>,
    pub blood_type: String,
    pub phone_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Deserialize, ToSchema)]
pub struct RecipientCreate {
    pub f_name: Option<String>,
    pub m_initial: Option<String>,
    pub l_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub phone_number: Option<String>,
}

/// Blood type is re-validated only when a value is supplied; an absent
/// value leaves the stored one untouched.
#[derive(Deserialize, ToSchema)]
pub struct RecipientUpdate {
    pub f_name: Option<String>,
    pub m_initial: Option<String>,
    pub l_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub phone_number: Option<String>,
}
