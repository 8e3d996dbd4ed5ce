use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase order header. `po_no` is the human-facing sequential order number
/// and doubles as the primary key. Totals are never stored; they are derived
/// from the line items at read time (see `services::purchase_orders::PoTotals`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_order")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub po_no: i32,
    pub dealer_id: Option<i32>,
    pub date: NaiveDate,
    pub status: String,
    pub notes: Option<String>,
    pub discount: f64,
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
    Items,
}

impl Related<super::dealer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dealer.def()
    }
}

impl Related<super::purchase_order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Purchase order lifecycle states. Stored as free text to stay compatible
/// with hand-edited rows; these constants are the values the service writes.
pub mod status {
    pub const UNSENT: &str = "unsent";
    pub const PARTIAL: &str = "partial";
    pub const RECEIVED: &str = "received";
}
