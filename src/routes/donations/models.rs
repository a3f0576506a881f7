use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

/// A donated unit. Created only through donation recording, never
/// directly.
pub mod blood_units {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};
    use utoipa::ToSchema;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
    #[sea_orm(table_name = "blood_units")]
    #[schema(as = BloodUnit)]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub blood_type: String,
        pub expiration_date: Date,
        pub quantity_donated: i32,
        pub donor_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "crate::routes::donors::models::Entity",
            from = "Column::DonorId",
            to = "crate::routes::donors::models::Column::Id"
        )]
        Donor,
        #[sea_orm(has_one = "super::stored_units::Entity")]
        StoredUnit,
    }

    impl Related<crate::routes::donors::models::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Donor.def()
        }
    }

    impl Related<super::stored_units::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::StoredUnit.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Association between a unit and the blood bank holding it. Written
/// once at donation time, never updated.
pub mod stored_units {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};
    use utoipa::ToSchema;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
    #[sea_orm(table_name = "stored_units")]
    #[schema(as = StoredUnit)]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub blood_unit_id: i32,
        pub blood_bank_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::blood_units::Entity",
            from = "Column::BloodUnitId",
            to = "super::blood_units::Column::Id"
        )]
        BloodUnit,
        #[sea_orm(
            belongs_to = "crate::routes::institutions::models::blood_banks::Entity",
            from = "Column::BloodBankId",
            to = "crate::routes::institutions::models::blood_banks::Column::Id"
        )]
        BloodBank,
    }

    impl Related<super::blood_units::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::BloodUnit.def()
        }
    }

    impl Related<crate::routes::institutions::models::blood_banks::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::BloodBank.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Deserialize, ToSchema)]
pub struct DonationCreate {
    pub donor_id: Option<i32>,
    pub blood_type: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    pub quantity_donated: Option<i32>,
    pub bloodbank_id: Option<i32>,
}
