use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A catalog item held in the storeroom. `defined_name_with_spec` is the
/// display name used on purchase orders and inward records.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub base_name: Option<String>,
    pub defined_name_with_spec: Option<String>,
    pub brand: Option<String>,
    pub hsn_code: Option<String>,
    pub dealer_id: Option<i32>,
    pub tax: Option<f64>,
    pub price: Option<f64>,
    pub current_stock: Option<f64>,
    pub units: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dealer::Entity",
        from = "Column::DealerId",
        to = "super::dealer::Column::Id"
    )]
    Dealer,
    #[sea_orm(has_many = "super::purchase_order_item::Entity")]
    PurchaseOrderItems,
    #[sea_orm(has_many = "super::bom_material::Entity")]
    BomMaterials,
    #[sea_orm(has_many = "super::bom_supply_item::Entity")]
    BomSupplyItems,
}

impl Related<super::dealer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dealer.def()
    }
}

impl Related<super::purchase_order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrderItems.def()
    }
}

impl Related<super::bom_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BomMaterials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
