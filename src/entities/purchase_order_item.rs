use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One ordered line on a purchase order.
///
/// `material_name`, `spec`, `brand` and `dealer_name` are snapshots taken at
/// PO creation time so the printed order stays stable even if the catalog
/// entry is renamed later. `material_id` may be absent for ad hoc,
/// non-catalog items.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_order_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub po_no: i32,
    pub material_id: Option<i32>,
    pub material_name: Option<String>,
    pub spec: Option<String>,
    pub brand: Option<String>,
    pub dealer_name: Option<String>,
    pub quantity: i32,
    pub price: f64,
    pub unit: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchase_order::Entity",
        from = "Column::PoNo",
        to = "super::purchase_order::Column::PoNo"
    )]
    PurchaseOrder,
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id"
    )]
    Material,
}

impl Related<super::purchase_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrder.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
