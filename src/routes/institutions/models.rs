use serde::Deserialize;
use utoipa::ToSchema;

/// Blood banks own stored blood units (via the storage association) and
/// the donors who registered with them.
pub mod blood_banks {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};
    use utoipa::ToSchema;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
    #[sea_orm(table_name = "blood_banks")]
    #[schema(as = BloodBank)]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub location: Option<String>,
        pub phone_number: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "crate::routes::donors::models::Entity")]
        Donors,
        #[sea_orm(has_many = "crate::routes::donations::models::stored_units::Entity")]
        StoredUnits,
    }

    impl Related<crate::routes::donors::models::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Donors.def()
        }
    }

    impl Related<crate::routes::donations::models::stored_units::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::StoredUnits.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Hospitals have no further relations in scope.
pub mod hospitals {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};
    use utoipa::ToSchema;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
    #[sea_orm(table_name = "hospitals")]
    #[schema(as = Hospital)]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub location: Option<String>,
        pub phone_number: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// One endpoint creates either institution kind, discriminated by
/// `institution_type`.
#[derive(Deserialize, ToSchema)]
pub struct InstitutionCreate {
    pub institution_type: Option<String>,
    pub institution_name: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
}
