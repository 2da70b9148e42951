use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Client::Table)
                    .if_not_exists()
                    .col(id_column(Client::Id))
                    .col(ColumnDef::new(Client::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Client::SubscriptionPlan)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Client::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Plant::Table)
                    .if_not_exists()
                    .col(id_column(Plant::Id))
                    .col(ColumnDef::new(Plant::ClientId).big_integer().not_null())
                    .col(ColumnDef::new(Plant::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Plant::Location).string_len(255).not_null())
                    .col(ColumnDef::new(Plant::ModelUrl).string_len(1024).null())
                    .col(
                        ColumnDef::new(Plant::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plant_client")
                            .from(Plant::Table, Plant::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AssetTemplate::Table)
                    .if_not_exists()
                    .col(id_column(AssetTemplate::Id))
                    .col(
                        ColumnDef::new(AssetTemplate::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssetTemplate::Category)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssetTemplate::ModelFile)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssetTemplate::Thumbnail)
                            .string_len(1024)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssetTemplate::DefaultScale)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssetTemplate::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Device::Table)
                    .if_not_exists()
                    .col(id_column(Device::Id))
                    .col(ColumnDef::new(Device::ClientId).big_integer().not_null())
                    .col(ColumnDef::new(Device::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Device::SerialNumber)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Device::Token)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Device::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Device::LastSeen)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Device::LatestTelemetry).json().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_device_client")
                            .from(Device::Table, Device::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Asset::Table)
                    .if_not_exists()
                    .col(id_column(Asset::Id))
                    .col(ColumnDef::new(Asset::PlantId).big_integer().not_null())
                    .col(ColumnDef::new(Asset::TemplateId).big_integer().null())
                    .col(ColumnDef::new(Asset::ParentId).big_integer().null())
                    .col(ColumnDef::new(Asset::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Asset::AssetType).string_len(100).not_null())
                    .col(ColumnDef::new(Asset::Description).text().not_null())
                    .col(ColumnDef::new(Asset::PositionX).double().not_null())
                    .col(ColumnDef::new(Asset::PositionY).double().not_null())
                    .col(ColumnDef::new(Asset::PositionZ).double().not_null())
                    .col(ColumnDef::new(Asset::RotationX).double().not_null())
                    .col(ColumnDef::new(Asset::RotationY).double().not_null())
                    .col(ColumnDef::new(Asset::RotationZ).double().not_null())
                    .col(ColumnDef::new(Asset::ScaleX).double().not_null())
                    .col(ColumnDef::new(Asset::ScaleY).double().not_null())
                    .col(ColumnDef::new(Asset::ScaleZ).double().not_null())
                    .col(ColumnDef::new(Asset::BoundDeviceId).big_integer().null())
                    .col(ColumnDef::new(Asset::TelemetryMapping).json().not_null())
                    .col(ColumnDef::new(Asset::Config).json().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_plant")
                            .from(Asset::Table, Asset::PlantId)
                            .to(Plant::Table, Plant::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_template")
                            .from(Asset::Table, Asset::TemplateId)
                            .to(AssetTemplate::Table, AssetTemplate::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_parent")
                            .from(Asset::Table, Asset::ParentId)
                            .to(Asset::Table, Asset::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_device")
                            .from(Asset::Table, Asset::BoundDeviceId)
                            .to(Device::Table, Device::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_asset_plant")
                    .table(Asset::Table)
                    .col(Asset::PlantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SensorTag::Table)
                    .if_not_exists()
                    .col(id_column(SensorTag::Id))
                    .col(ColumnDef::new(SensorTag::AssetId).big_integer().not_null())
                    .col(ColumnDef::new(SensorTag::SensorId).string_len(100).not_null())
                    .col(
                        ColumnDef::new(SensorTag::SensorType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SensorTag::PositionX).double().not_null())
                    .col(ColumnDef::new(SensorTag::PositionY).double().not_null())
                    .col(ColumnDef::new(SensorTag::PositionZ).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sensor_tag_asset")
                            .from(SensorTag::Table, SensorTag::AssetId)
                            .to(Asset::Table, Asset::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SensorTag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Asset::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Device::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssetTemplate::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plant::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Client::Table).to_owned())
            .await?;
        Ok(())
    }
}

/// Auto-increment 64-bit primary key (rendered as `INTEGER PRIMARY KEY` on SQLite)
fn id_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

#[derive(DeriveIden)]
enum Client {
    Table,
    Id,
    Name,
    SubscriptionPlan,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Plant {
    Table,
    Id,
    ClientId,
    Name,
    Location,
    ModelUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AssetTemplate {
    Table,
    Id,
    Name,
    Category,
    ModelFile,
    Thumbnail,
    DefaultScale,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Device {
    Table,
    Id,
    ClientId,
    Name,
    SerialNumber,
    Token,
    CreatedAt,
    LastSeen,
    LatestTelemetry,
}

#[derive(DeriveIden)]
enum Asset {
    Table,
    Id,
    PlantId,
    TemplateId,
    ParentId,
    Name,
    AssetType,
    Description,
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    BoundDeviceId,
    TelemetryMapping,
    Config,
}

#[derive(DeriveIden)]
enum SensorTag {
    Table,
    Id,
    AssetId,
    SensorId,
    SensorType,
    PositionX,
    PositionY,
    PositionZ,
}
