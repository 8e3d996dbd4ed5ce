use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Outstanding (unreceived) quantity for one PO line item.
///
/// Rows are created when a receiving event leaves a line short and are never
/// deleted afterwards; resolution events only move the quantities and the
/// derived status. The invariant `pending_quantity = ordered_quantity -
/// received_quantity >= 0` holds at every point in a row's history.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pending_material")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub po_no: i32,
    pub po_item_id: i32,
    pub material_name: Option<String>,
    pub spec: Option<String>,
    pub brand: Option<String>,
    pub ordered_quantity: i32,
    pub received_quantity: i32,
    pub pending_quantity: i32,
    pub unit: Option<String>,
    pub status: String,
    pub original_inward_id: Option<i32>,
    pub proof_document: Option<String>,
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
        belongs_to = "super::purchase_order_item::Entity",
        from = "Column::PoItemId",
        to = "super::purchase_order_item::Column::Id"
    )]
    PurchaseOrderItem,
    #[sea_orm(has_many = "super::pending_material_resolution::Entity")]
    Resolutions,
}

impl Related<super::purchase_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrder.def()
    }
}

impl Related<super::pending_material_resolution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resolutions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Lifecycle states of a pending row. The status is always derivable from
/// the quantity pair; it is stored only so list views can filter on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingStatus {
    Pending,
    PartiallyResolved,
    Resolved,
}

impl PendingStatus {
    /// Derives the status from the ordered/pending quantity pair.
    /// Zero pending is terminal; pending equal to ordered means nothing has
    /// been resolved yet; anything in between is partially resolved.
    pub fn from_quantities(ordered_quantity: i32, pending_quantity: i32) -> Self {
        debug_assert!(pending_quantity >= 0 && pending_quantity <= ordered_quantity);
        if pending_quantity == 0 {
            PendingStatus::Resolved
        } else if pending_quantity < ordered_quantity {
            PendingStatus::PartiallyResolved
        } else {
            PendingStatus::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PendingStatus::Pending => "pending",
            PendingStatus::PartiallyResolved => "partially_resolved",
            PendingStatus::Resolved => "resolved",
        }
    }

    /// Statuses shown in operational views; resolved rows stay queryable by
    /// PO number for audit but are excluded from day-to-day listings.
    pub fn open_statuses() -> [&'static str; 2] {
        ["pending", "partially_resolved"]
    }
}

impl std::fmt::Display for PendingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::PendingStatus;

    #[test]
    fn untouched_row_is_pending() {
        assert_eq!(
            PendingStatus::from_quantities(10, 10),
            PendingStatus::Pending
        );
    }

    #[test]
    fn partially_received_row_is_partially_resolved() {
        assert_eq!(
            PendingStatus::from_quantities(10, 4),
            PendingStatus::PartiallyResolved
        );
        assert_eq!(
            PendingStatus::from_quantities(10, 9),
            PendingStatus::PartiallyResolved
        );
        assert_eq!(
            PendingStatus::from_quantities(10, 1),
            PendingStatus::PartiallyResolved
        );
    }

    #[test]
    fn zero_pending_is_resolved() {
        assert_eq!(
            PendingStatus::from_quantities(10, 0),
            PendingStatus::Resolved
        );
    }

    #[test]
    fn status_strings_match_stored_values() {
        assert_eq!(PendingStatus::Pending.as_str(), "pending");
        assert_eq!(
            PendingStatus::PartiallyResolved.as_str(),
            "partially_resolved"
        );
        assert_eq!(PendingStatus::Resolved.as_str(), "resolved");
    }
}
