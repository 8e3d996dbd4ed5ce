use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only audit log of resolution events. One row per resolution
/// action; rows are never mutated or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pending_material_resolution")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pending_material_id: i32,
    pub material_inward_id: Option<i32>,
    pub resolved_quantity: i32,
    pub bill_no: Option<String>,
    pub bill_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub resolved_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pending_material::Entity",
        from = "Column::PendingMaterialId",
        to = "super::pending_material::Column::Id"
    )]
    PendingMaterial,
    #[sea_orm(
        belongs_to = "super::material_inward::Entity",
        from = "Column::MaterialInwardId",
        to = "super::material_inward::Column::Id"
    )]
    MaterialInward,
}

impl Related<super::pending_material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PendingMaterial.def()
    }
}

impl Related<super::material_inward::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialInward.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
