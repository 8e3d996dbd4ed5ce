use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_dealers_table::Migration),
            Box::new(m20240101_000002_create_materials_table::Migration),
            Box::new(m20240101_000003_create_purchase_order_tables::Migration),
            Box::new(m20240101_000004_create_material_inward_tables::Migration),
            Box::new(m20240101_000005_create_pending_material_tables::Migration),
            Box::new(m20240101_000006_create_bom_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_dealers_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_dealers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Dealer::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Dealer::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Dealer::Name).string().not_null())
                        .col(ColumnDef::new(Dealer::Address).string().null())
                        .col(ColumnDef::new(Dealer::City).string().null())
                        .col(ColumnDef::new(Dealer::State).string().null())
                        .col(ColumnDef::new(Dealer::Country).string().null())
                        .col(ColumnDef::new(Dealer::Pincode).string().null())
                        .col(ColumnDef::new(Dealer::Telephone).string().null())
                        .col(ColumnDef::new(Dealer::Mobile).string().null())
                        .col(ColumnDef::new(Dealer::Email).string().null())
                        .col(ColumnDef::new(Dealer::GstNo).string().null())
                        .col(ColumnDef::new(Dealer::BankName).string().null())
                        .col(ColumnDef::new(Dealer::AccountNo).string().null())
                        .col(ColumnDef::new(Dealer::IfscCode).string().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_dealer_name")
                        .table(Dealer::Table)
                        .col(Dealer::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Dealer::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Dealer {
        Table,
        Id,
        Name,
        Address,
        City,
        State,
        Country,
        Pincode,
        Telephone,
        Mobile,
        Email,
        GstNo,
        BankName,
        AccountNo,
        IfscCode,
    }
}

mod m20240101_000002_create_materials_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_materials_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Material::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Material::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Material::BaseName).string().not_null())
                        .col(
                            ColumnDef::new(Material::DefinedNameWithSpec)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Material::Brand).string().null())
                        .col(ColumnDef::new(Material::HsnCode).string().null())
                        .col(ColumnDef::new(Material::DealerId).integer().null())
                        .col(ColumnDef::new(Material::Tax).double().null())
                        .col(ColumnDef::new(Material::Price).double().null())
                        .col(ColumnDef::new(Material::CurrentStock).double().null())
                        .col(ColumnDef::new(Material::Units).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_material_dealer")
                                .from(Material::Table, Material::DealerId)
                                .to(
                                    super::m20240101_000001_create_dealers_table::Dealer::Table,
                                    super::m20240101_000001_create_dealers_table::Dealer::Id,
                                ),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_material_defined_name")
                        .table(Material::Table)
                        .col(Material::DefinedNameWithSpec)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_material_dealer_id")
                        .table(Material::Table)
                        .col(Material::DealerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Material::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Material {
        Table,
        Id,
        BaseName,
        DefinedNameWithSpec,
        Brand,
        HsnCode,
        DealerId,
        Tax,
        Price,
        CurrentStock,
        Units,
    }
}

mod m20240101_000003_create_purchase_order_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_purchase_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // po_no is human-assigned sequential, not auto-incremented
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrder::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrder::PoNo)
                                .integer()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrder::DealerId).integer().null())
                        .col(ColumnDef::new(PurchaseOrder::Date).date().not_null())
                        .col(ColumnDef::new(PurchaseOrder::Status).string().not_null())
                        .col(ColumnDef::new(PurchaseOrder::Notes).string().null())
                        .col(
                            ColumnDef::new(PurchaseOrder::Discount)
                                .double()
                                .not_null()
                                .default(0),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_order_dealer")
                                .from(PurchaseOrder::Table, PurchaseOrder::DealerId)
                                .to(
                                    super::m20240101_000001_create_dealers_table::Dealer::Table,
                                    super::m20240101_000001_create_dealers_table::Dealer::Id,
                                ),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrderItem::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrderItem::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrderItem::PoNo).integer().not_null())
                        .col(
                            ColumnDef::new(PurchaseOrderItem::MaterialId)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItem::MaterialName)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(PurchaseOrderItem::Spec).string().null())
                        .col(ColumnDef::new(PurchaseOrderItem::Brand).string().null())
                        .col(
                            ColumnDef::new(PurchaseOrderItem::DealerName)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItem::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItem::Price)
                                .double()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(PurchaseOrderItem::Unit).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_order_item_po")
                                .from(PurchaseOrderItem::Table, PurchaseOrderItem::PoNo)
                                .to(PurchaseOrder::Table, PurchaseOrder::PoNo)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_order_item_material")
                                .from(PurchaseOrderItem::Table, PurchaseOrderItem::MaterialId)
                                .to(
                                    super::m20240101_000002_create_materials_table::Material::Table,
                                    super::m20240101_000002_create_materials_table::Material::Id,
                                ),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_order_status")
                        .table(PurchaseOrder::Table)
                        .col(PurchaseOrder::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_order_item_po_no")
                        .table(PurchaseOrderItem::Table)
                        .col(PurchaseOrderItem::PoNo)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PurchaseOrderItem::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PurchaseOrder::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum PurchaseOrder {
        Table,
        PoNo,
        DealerId,
        Date,
        Status,
        Notes,
        Discount,
    }

    #[derive(DeriveIden)]
    pub(super) enum PurchaseOrderItem {
        Table,
        Id,
        PoNo,
        MaterialId,
        MaterialName,
        Spec,
        Brand,
        DealerName,
        Quantity,
        Price,
        Unit,
    }
}

mod m20240101_000004_create_material_inward_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_material_inward_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // No FK to purchase_order: inward records outlive PO deletion
            manager
                .create_table(
                    Table::create()
                        .table(MaterialInward::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MaterialInward::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MaterialInward::PoNo).integer().not_null())
                        .col(ColumnDef::new(MaterialInward::DealerName).string().null())
                        .col(ColumnDef::new(MaterialInward::PoDate).date().null())
                        .col(
                            ColumnDef::new(MaterialInward::DateOfInward)
                                .date()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MaterialInward::BillNo).string().null())
                        .col(ColumnDef::new(MaterialInward::BillDate).date().null())
                        .col(
                            ColumnDef::new(MaterialInward::Cost)
                                .double()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(MaterialInward::PaymentMethod)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(MaterialInward::Status).string().not_null())
                        .col(
                            ColumnDef::new(MaterialInward::IsPendingInward)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MaterialInwardItem::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MaterialInwardItem::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MaterialInwardItem::MaterialInwardId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MaterialInwardItem::PoItemId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MaterialInwardItem::MaterialName)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(MaterialInwardItem::Spec).string().null())
                        .col(ColumnDef::new(MaterialInwardItem::Brand).string().null())
                        .col(
                            ColumnDef::new(MaterialInwardItem::OrderedQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MaterialInwardItem::QuantityReceived)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MaterialInwardItem::Unit).string().null())
                        .col(
                            ColumnDef::new(MaterialInwardItem::Status)
                                .string()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_material_inward_item_inward")
                                .from(
                                    MaterialInwardItem::Table,
                                    MaterialInwardItem::MaterialInwardId,
                                )
                                .to(MaterialInward::Table, MaterialInward::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_material_inward_po_no")
                        .table(MaterialInward::Table)
                        .col(MaterialInward::PoNo)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_material_inward_item_inward_id")
                        .table(MaterialInwardItem::Table)
                        .col(MaterialInwardItem::MaterialInwardId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MaterialInwardItem::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(MaterialInward::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum MaterialInward {
        Table,
        Id,
        PoNo,
        DealerName,
        PoDate,
        DateOfInward,
        BillNo,
        BillDate,
        Cost,
        PaymentMethod,
        Status,
        IsPendingInward,
    }

    #[derive(DeriveIden)]
    pub(super) enum MaterialInwardItem {
        Table,
        Id,
        MaterialInwardId,
        PoItemId,
        MaterialName,
        Spec,
        Brand,
        OrderedQuantity,
        QuantityReceived,
        Unit,
        Status,
    }
}

mod m20240101_000005_create_pending_material_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_pending_material_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PendingMaterial::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PendingMaterial::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PendingMaterial::PoNo).integer().not_null())
                        .col(
                            ColumnDef::new(PendingMaterial::PoItemId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PendingMaterial::MaterialName)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(PendingMaterial::Spec).string().null())
                        .col(ColumnDef::new(PendingMaterial::Brand).string().null())
                        .col(
                            ColumnDef::new(PendingMaterial::OrderedQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PendingMaterial::ReceivedQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PendingMaterial::PendingQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PendingMaterial::Unit).string().null())
                        .col(ColumnDef::new(PendingMaterial::Status).string().not_null())
                        .col(
                            ColumnDef::new(PendingMaterial::OriginalInwardId)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PendingMaterial::ProofDocument)
                                .string()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PendingMaterialResolution::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PendingMaterialResolution::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PendingMaterialResolution::PendingMaterialId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PendingMaterialResolution::MaterialInwardId)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PendingMaterialResolution::ResolvedQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PendingMaterialResolution::BillNo)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PendingMaterialResolution::BillDate)
                                .date()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PendingMaterialResolution::Notes)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PendingMaterialResolution::ResolvedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_pending_resolution_pending")
                                .from(
                                    PendingMaterialResolution::Table,
                                    PendingMaterialResolution::PendingMaterialId,
                                )
                                .to(PendingMaterial::Table, PendingMaterial::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_pending_material_po_no")
                        .table(PendingMaterial::Table)
                        .col(PendingMaterial::PoNo)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_pending_material_status")
                        .table(PendingMaterial::Table)
                        .col(PendingMaterial::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_pending_resolution_pending_id")
                        .table(PendingMaterialResolution::Table)
                        .col(PendingMaterialResolution::PendingMaterialId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(
                    Table::drop()
                        .table(PendingMaterialResolution::Table)
                        .to_owned(),
                )
                .await?;
            manager
                .drop_table(Table::drop().table(PendingMaterial::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum PendingMaterial {
        Table,
        Id,
        PoNo,
        PoItemId,
        MaterialName,
        Spec,
        Brand,
        OrderedQuantity,
        ReceivedQuantity,
        PendingQuantity,
        Unit,
        Status,
        OriginalInwardId,
        ProofDocument,
    }

    #[derive(DeriveIden)]
    pub(super) enum PendingMaterialResolution {
        Table,
        Id,
        PendingMaterialId,
        MaterialInwardId,
        ResolvedQuantity,
        BillNo,
        BillDate,
        Notes,
        ResolvedAt,
    }
}

mod m20240101_000006_create_bom_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_bom_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Bom::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Bom::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Bom::BomIdentifier)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Bom::Consignee).string().null())
                        .col(ColumnDef::new(Bom::ProductName).string().null())
                        .col(ColumnDef::new(Bom::Date).date().not_null())
                        .col(ColumnDef::new(Bom::Status).string().not_null())
                        .col(ColumnDef::new(Bom::CompletionDate).date().null())
                        .col(ColumnDef::new(Bom::Notes).string().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BomMaterial::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BomMaterial::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BomMaterial::BomId).integer().not_null())
                        .col(ColumnDef::new(BomMaterial::MaterialId).integer().not_null())
                        .col(
                            ColumnDef::new(BomMaterial::QuantityRequired)
                                .double()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BomMaterial::QuantityProvided)
                                .double()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BomMaterial::IsFullyProvided)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bom_material_bom")
                                .from(BomMaterial::Table, BomMaterial::BomId)
                                .to(Bom::Table, Bom::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bom_material_material")
                                .from(BomMaterial::Table, BomMaterial::MaterialId)
                                .to(
                                    super::m20240101_000002_create_materials_table::Material::Table,
                                    super::m20240101_000002_create_materials_table::Material::Id,
                                ),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BomSupplyTransaction::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BomSupplyTransaction::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BomSupplyTransaction::BomId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BomSupplyTransaction::SupplyDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BomSupplyTransaction::SupplyType)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(BomSupplyTransaction::Notes).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bom_supply_transaction_bom")
                                .from(BomSupplyTransaction::Table, BomSupplyTransaction::BomId)
                                .to(Bom::Table, Bom::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BomSupplyItem::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BomSupplyItem::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BomSupplyItem::TransactionId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BomSupplyItem::BomId).integer().not_null())
                        .col(
                            ColumnDef::new(BomSupplyItem::MaterialId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BomSupplyItem::QuantityProvided)
                                .double()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bom_supply_item_transaction")
                                .from(BomSupplyItem::Table, BomSupplyItem::TransactionId)
                                .to(BomSupplyTransaction::Table, BomSupplyTransaction::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_bom_material_bom_id")
                        .table(BomMaterial::Table)
                        .col(BomMaterial::BomId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_bom_supply_item_transaction_id")
                        .table(BomSupplyItem::Table)
                        .col(BomSupplyItem::TransactionId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BomSupplyItem::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(BomSupplyTransaction::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(BomMaterial::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Bom::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Bom {
        Table,
        Id,
        BomIdentifier,
        Consignee,
        ProductName,
        Date,
        Status,
        CompletionDate,
        Notes,
    }

    #[derive(DeriveIden)]
    pub(super) enum BomMaterial {
        Table,
        Id,
        BomId,
        MaterialId,
        QuantityRequired,
        QuantityProvided,
        IsFullyProvided,
    }

    #[derive(DeriveIden)]
    pub(super) enum BomSupplyTransaction {
        Table,
        Id,
        BomId,
        SupplyDate,
        SupplyType,
        Notes,
    }

    #[derive(DeriveIden)]
    pub(super) enum BomSupplyItem {
        Table,
        Id,
        TransactionId,
        BomId,
        MaterialId,
        QuantityProvided,
    }
}
