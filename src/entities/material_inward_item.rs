use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-line received quantity for one inward event. `ordered_quantity` is
/// copied from the PO item at receipt time; `status` is `completed` when the
/// event received at least the ordered quantity, `partial` otherwise.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material_inward_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub material_inward_id: i32,
    pub po_item_id: i32,
    pub material_name: Option<String>,
    pub spec: Option<String>,
    pub brand: Option<String>,
    pub ordered_quantity: i32,
    pub quantity_received: i32,
    pub unit: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::material_inward::Entity",
        from = "Column::MaterialInwardId",
        to = "super::material_inward::Column::Id"
    )]
    MaterialInward,
    #[sea_orm(
        belongs_to = "super::purchase_order_item::Entity",
        from = "Column::PoItemId",
        to = "super::purchase_order_item::Column::Id"
    )]
    PurchaseOrderItem,
}

impl Related<super::material_inward::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialInward.def()
    }
}

impl Related<super::purchase_order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
