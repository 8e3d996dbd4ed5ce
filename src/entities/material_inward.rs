use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One receiving event against a purchase order. A PO may accumulate several
/// inward records, one per delivery. `dealer_name` and `po_date` are
/// snapshots of the PO at the time of receipt. `is_pending_inward` marks
/// records created by the pending-materials resolution flow rather than a
/// first-hand delivery.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material_inward")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub po_no: i32,
    pub dealer_name: Option<String>,
    pub po_date: Option<NaiveDate>,
    pub date_of_inward: NaiveDate,
    pub bill_no: Option<String>,
    pub bill_date: Option<NaiveDate>,
    pub cost: f64,
    pub payment_method: Option<String>,
    pub status: String,
    pub is_pending_inward: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::material_inward_item::Entity")]
    Items,
}

impl Related<super::material_inward_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub mod status {
    pub const PARTIAL: &str = "partial";
    pub const COMPLETED: &str = "completed";
}
