use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)] // Schema migration requires extensive table definitions
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create blood_banks table
        manager
            .create_table(
                Table::create()
                    .table(BloodBanks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BloodBanks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BloodBanks::Name).string().not_null())
                    .col(ColumnDef::new(BloodBanks::Location).string())
                    .col(ColumnDef::new(BloodBanks::PhoneNumber).string())
                    .to_owned(),
            )
            .await?;

        // Create hospitals table
        manager
            .create_table(
                Table::create()
                    .table(Hospitals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hospitals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Hospitals::Name).string().not_null())
                    .col(ColumnDef::new(Hospitals::Location).string())
                    .col(ColumnDef::new(Hospitals::PhoneNumber).string())
                    .to_owned(),
            )
            .await?;

        // Create donors table
        manager
            .create_table(
                Table::create()
                    .table(Donors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Donors::FName).string().not_null())
                    .col(ColumnDef::new(Donors::MInitial).string())
                    .col(ColumnDef::new(Donors::LName).string().not_null())
                    .col(ColumnDef::new(Donors::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Donors::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Donors::Gender).string())
                    .col(ColumnDef::new(Donors::LastDonationDate).date())
                    .col(ColumnDef::new(Donors::BbId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donors_bb_id")
                            .from(Donors::Table, Donors::BbId)
                            .to(BloodBanks::Table, BloodBanks::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Create recipients table
        manager
            .create_table(
                Table::create()
                    .table(Recipients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Recipients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Recipients::FName).string().not_null())
                    .col(ColumnDef::new(Recipients::MInitial).string())
                    .col(ColumnDef::new(Recipients::LName).string().not_null())
                    .col(ColumnDef::new(Recipients::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Recipients::Gender).string())
                    .col(ColumnDef::new(Recipients::BloodType).string().not_null())
                    .col(ColumnDef::new(Recipients::PhoneNumber).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create blood_units table. Deleting a donor with units on file
        // must fail, hence the RESTRICT.
        manager
            .create_table(
                Table::create()
                    .table(BloodUnits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BloodUnits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BloodUnits::BloodType).string().not_null())
                    .col(ColumnDef::new(BloodUnits::ExpirationDate).date().not_null())
                    .col(
                        ColumnDef::new(BloodUnits::QuantityDonated)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BloodUnits::DonorId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blood_units_donor_id")
                            .from(BloodUnits::Table, BloodUnits::DonorId)
                            .to(Donors::Table, Donors::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Create stored_units association table. One unit is stored at
        // exactly one blood bank, so the unit id doubles as primary key.
        manager
            .create_table(
                Table::create()
                    .table(StoredUnits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StoredUnits::BloodUnitId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StoredUnits::BloodBankId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stored_units_blood_unit_id")
                            .from(StoredUnits::Table, StoredUnits::BloodUnitId)
                            .to(BloodUnits::Table, BloodUnits::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stored_units_blood_bank_id")
                            .from(StoredUnits::Table, StoredUnits::BloodBankId)
                            .to(BloodBanks::Table, BloodBanks::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Indexes on the columns the inventory search filters on
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blood_units_blood_type")
                    .table(BloodUnits::Table)
                    .col(BloodUnits::BloodType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blood_units_expiration_date")
                    .table(BloodUnits::Table)
                    .col(BloodUnits::ExpirationDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse dependency order
        manager
            .drop_table(Table::drop().table(StoredUnits::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BloodUnits::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Recipients::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Donors::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Hospitals::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BloodBanks::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

// All table identifiers
#[derive(DeriveIden)]
enum BloodBanks {
    Table,
    Id,
    Name,
    Location,
    PhoneNumber,
}

#[derive(DeriveIden)]
enum Hospitals {
    Table,
    Id,
    Name,
    Location,
    PhoneNumber,
}

#[derive(DeriveIden)]
enum Donors {
    Table,
    Id,
    FName,
    MInitial,
    LName,
    DateOfBirth,
    PhoneNumber,
    Gender,
    LastDonationDate,
    BbId,
}

#[derive(DeriveIden)]
enum Recipients {
    Table,
    Id,
    FName,
    MInitial,
    LName,
    DateOfBirth,
    Gender,
    BloodType,
    PhoneNumber,
}

#[derive(DeriveIden)]
enum BloodUnits {
    Table,
    Id,
    BloodType,
    ExpirationDate,
    QuantityDonated,
    DonorId,
}

#[derive(DeriveIden)]
enum StoredUnits {
    Table,
    BloodUnitId,
    BloodBankId,
}
