use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bill of materials header. `bom_identifier` is the human-facing unique
/// reference (`BOM-YYYYMMDD-HHMMSS-nnnn`), assigned at creation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bom")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub bom_identifier: String,
    pub consignee: Option<String>,
    pub product_name: Option<String>,
    pub date: NaiveDate,
    pub status: String,
    pub completion_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bom_material::Entity")]
    Materials,
    #[sea_orm(has_many = "super::bom_supply_transaction::Entity")]
    SupplyTransactions,
}

impl Related<super::bom_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Materials.def()
    }
}

impl Related<super::bom_supply_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplyTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub mod status {
    pub const IN_PROGRESS: &str = "in_progress";
    pub const COMPLETED: &str = "completed";
}
