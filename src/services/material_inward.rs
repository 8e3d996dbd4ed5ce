use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

use crate::{
    entities::{
        dealer::Entity as DealerEntity,
        material_inward::{self, Entity as MaterialInwardEntity},
        material_inward_item::{self, Entity as MaterialInwardItemEntity},
        pending_material::{self, Entity as PendingMaterialEntity, PendingStatus},
        purchase_order::{self, Entity as PurchaseOrderEntity},
        purchase_order_item::{self, Entity as PurchaseOrderItemEntity},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    forms::InwardLineForm,
};

/// Header fields for a new receiving event, plus the per-line receipt
/// entries keyed by PO item id.
#[derive(Debug, Clone)]
pub struct NewMaterialInward {
    pub po_no: i32,
    pub date_of_inward: NaiveDate,
    pub bill_no: Option<String>,
    pub bill_date: Option<NaiveDate>,
    pub cost: f64,
    pub payment_method: Option<String>,
    pub lines: Vec<InwardLineForm>,
}

/// Header-only fields for editing an existing inward record.
#[derive(Debug, Clone)]
pub struct MaterialInwardHeaderUpdate {
    pub date_of_inward: Option<NaiveDate>,
    pub bill_no: Option<String>,
    pub bill_date: Option<NaiveDate>,
    pub cost: Option<f64>,
    pub payment_method: Option<String>,
}

/// One inward record with its items.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialInwardDetail {
    pub inward: material_inward::Model,
    pub items: Vec<material_inward_item::Model>,
}

/// PO summary served to the receive form when an order number is entered.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PoLookup {
    pub po_no: i32,
    pub po_date: Option<NaiveDate>,
    pub dealer_name: Option<String>,
    pub total_cost: f64,
}

#[derive(Clone)]
pub struct MaterialInwardService {
    db: Arc<DatabaseConnection>,
    event_sender: Option<EventSender>,
}

impl MaterialInwardService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Option<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Lists receiving events, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<material_inward::Model>, ServiceError> {
        MaterialInwardEntity::find()
            .order_by_desc(material_inward::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<MaterialInwardDetail, ServiceError> {
        let inward = MaterialInwardEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Material inward {} not found", id)))?;

        let items = MaterialInwardItemEntity::find()
            .filter(material_inward_item::Column::MaterialInwardId.eq(id))
            .order_by_asc(material_inward_item::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(MaterialInwardDetail { inward, items })
    }

    /// PO lookup backing the receive form: date, dealer and ordered value.
    #[instrument(skip(self))]
    pub async fn lookup_po(&self, po_no: i32) -> Result<PoLookup, ServiceError> {
        let po = PurchaseOrderEntity::find_by_id(po_no)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {} not found", po_no)))?;

        let dealer_name = match po.dealer_id {
            Some(dealer_id) => DealerEntity::find_by_id(dealer_id)
                .one(&*self.db)
                .await
                .map_err(ServiceError::db_error)?
                .map(|d| d.name),
            None => None,
        };

        let items = PurchaseOrderItemEntity::find()
            .filter(purchase_order_item::Column::PoNo.eq(po_no))
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;
        let total_cost = items
            .iter()
            .map(|item| item.price * item.quantity as f64)
            .sum();

        Ok(PoLookup {
            po_no: po.po_no,
            po_date: Some(po.date),
            dealer_name,
            total_cost,
        })
    }

    /// Records one receiving event against a purchase order.
    ///
    /// Every PO line is classified by its submitted entry: received with a
    /// positive quantity produces an inward item (completed iff received >=
    /// ordered), anything else counts as fully outstanding. Shortfalls
    /// create or update pending rows inside the same transaction. The PO
    /// transitions to `received` when every line was fully received in this
    /// single event, and to `partial` otherwise.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewMaterialInward) -> Result<i32, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let po = PurchaseOrderEntity::find_by_id(input.po_no)
            .one(&txn)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order {} not found", input.po_no))
            })?;

        let dealer_name = match po.dealer_id {
            Some(dealer_id) => DealerEntity::find_by_id(dealer_id)
                .one(&txn)
                .await
                .map_err(ServiceError::db_error)?
                .map(|d| d.name),
            None => None,
        };

        let po_items = PurchaseOrderItemEntity::find()
            .filter(purchase_order_item::Column::PoNo.eq(input.po_no))
            .order_by_asc(purchase_order_item::Column::Id)
            .all(&txn)
            .await
            .map_err(ServiceError::db_error)?;

        if po_items.is_empty() {
            return Err(ServiceError::InvalidOperation(format!(
                "Purchase order {} has no line items to receive",
                input.po_no
            )));
        }

        let line_for = |po_item_id: i32| -> Option<&InwardLineForm> {
            input.lines.iter().find(|l| l.po_item_id == po_item_id)
        };

        // Classify every PO line before writing anything.
        let fully_received = po_items.iter().all(|item| {
            line_for(item.id)
                .map(|l| l.received && l.quantity_received >= item.quantity)
                .unwrap_or(false)
        });

        let inward_status = if fully_received {
            material_inward::status::COMPLETED
        } else {
            material_inward::status::PARTIAL
        };

        let inward = material_inward::ActiveModel {
            po_no: Set(input.po_no),
            dealer_name: Set(dealer_name),
            po_date: Set(Some(po.date)),
            date_of_inward: Set(input.date_of_inward),
            bill_no: Set(input.bill_no),
            bill_date: Set(input.bill_date),
            cost: Set(input.cost),
            payment_method: Set(input.payment_method),
            status: Set(inward_status.to_string()),
            is_pending_inward: Set(false),
            ..Default::default()
        };
        let inward = inward.insert(&txn).await.map_err(|e| {
            error!("Failed to create material inward: {}", e);
            ServiceError::db_error(e)
        })?;

        for po_item in &po_items {
            let received_quantity = match line_for(po_item.id) {
                Some(line) if line.received && line.quantity_received > 0 => {
                    if line.quantity_received > po_item.quantity {
                        return Err(ServiceError::InvalidOperation(format!(
                            "Cannot receive more than ordered for item {}. Ordered: {}, received: {}",
                            po_item.id, po_item.quantity, line.quantity_received
                        )));
                    }

                    let item_status = if line.quantity_received >= po_item.quantity {
                        material_inward::status::COMPLETED
                    } else {
                        material_inward::status::PARTIAL
                    };

                    let inward_item = material_inward_item::ActiveModel {
                        material_inward_id: Set(inward.id),
                        po_item_id: Set(po_item.id),
                        material_name: Set(po_item.material_name.clone()),
                        spec: Set(po_item.spec.clone()),
                        brand: Set(po_item.brand.clone()),
                        ordered_quantity: Set(po_item.quantity),
                        quantity_received: Set(line.quantity_received),
                        unit: Set(po_item.unit.clone()),
                        status: Set(item_status.to_string()),
                        ..Default::default()
                    };
                    inward_item
                        .insert(&txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    line.quantity_received
                }
                // Unmarked or zero-quantity lines are fully outstanding.
                _ => 0,
            };

            let shortfall = po_item.quantity - received_quantity;
            if shortfall > 0 {
                upsert_pending(&txn, input.po_no, po_item, received_quantity, inward.id).await?;
            }
        }

        let new_po_status = if fully_received {
            purchase_order::status::RECEIVED
        } else {
            purchase_order::status::PARTIAL
        };
        let mut po_status_change: Option<String> = None;
        if po.status != new_po_status {
            let old_status = po.status.clone();
            let mut order: purchase_order::ActiveModel = po.into();
            order.status = Set(new_po_status.to_string());
            order.update(&txn).await.map_err(ServiceError::db_error)?;
            po_status_change = Some(old_status);
        }

        txn.commit().await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::MaterialInwardRecorded {
                    inward_id: inward.id,
                    po_no: input.po_no,
                    fully_received,
                })
                .await;
            if let Some(old_status) = po_status_change {
                sender
                    .send_or_log(Event::PurchaseOrderStatusChanged {
                        po_no: input.po_no,
                        old_status,
                        new_status: new_po_status.to_string(),
                    })
                    .await;
            }
        }

        info!(
            "Material inward {} recorded against PO {} ({})",
            inward.id, input.po_no, inward_status
        );
        Ok(inward.id)
    }

    /// Header-field edit; line items and pending rows are untouched.
    #[instrument(skip(self, update))]
    pub async fn update_header(
        &self,
        id: i32,
        update: MaterialInwardHeaderUpdate,
    ) -> Result<(), ServiceError> {
        let existing = MaterialInwardEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Material inward {} not found", id)))?;

        let mut inward: material_inward::ActiveModel = existing.into();
        if let Some(date_of_inward) = update.date_of_inward {
            inward.date_of_inward = Set(date_of_inward);
        }
        inward.bill_no = Set(update.bill_no);
        inward.bill_date = Set(update.bill_date);
        if let Some(cost) = update.cost {
            inward.cost = Set(cost);
        }
        inward.payment_method = Set(update.payment_method);
        inward.update(&*self.db).await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::MaterialInwardUpdated(id)).await;
        }

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = MaterialInwardEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Material inward {} not found", id)))?;

        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        MaterialInwardItemEntity::delete_many()
            .filter(material_inward_item::Column::MaterialInwardId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::db_error)?;

        let inward: material_inward::ActiveModel = existing.into();
        inward.delete(&txn).await.map_err(ServiceError::db_error)?;

        txn.commit().await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::MaterialInwardDeleted(id)).await;
        }

        info!("Material inward {} deleted", id);
        Ok(())
    }
}

/// Creates the pending row for a short line, or folds this event's received
/// quantity into an already-open row for the same PO item.
async fn upsert_pending(
    txn: &DatabaseTransaction,
    po_no: i32,
    po_item: &purchase_order_item::Model,
    received_quantity: i32,
    inward_id: i32,
) -> Result<(), ServiceError> {
    let existing = PendingMaterialEntity::find()
        .filter(pending_material::Column::PoNo.eq(po_no))
        .filter(pending_material::Column::PoItemId.eq(po_item.id))
        .filter(pending_material::Column::Status.is_in(PendingStatus::open_statuses()))
        .one(txn)
        .await
        .map_err(ServiceError::db_error)?;

    match existing {
        Some(row) => {
            let new_received = row.received_quantity + received_quantity;
            let new_pending = row.ordered_quantity - new_received;
            if new_pending < 0 {
                return Err(ServiceError::InvalidOperation(format!(
                    "Received quantity for item {} exceeds the ordered quantity",
                    po_item.id
                )));
            }
            let new_status = PendingStatus::from_quantities(row.ordered_quantity, new_pending);

            let mut pending: pending_material::ActiveModel = row.into();
            pending.received_quantity = Set(new_received);
            pending.pending_quantity = Set(new_pending);
            pending.status = Set(new_status.as_str().to_string());
            pending.update(txn).await.map_err(ServiceError::db_error)?;
        }
        None => {
            let pending_quantity = po_item.quantity - received_quantity;
            let status = PendingStatus::from_quantities(po_item.quantity, pending_quantity);

            let pending = pending_material::ActiveModel {
                po_no: Set(po_no),
                po_item_id: Set(po_item.id),
                material_name: Set(po_item.material_name.clone()),
                spec: Set(po_item.spec.clone()),
                brand: Set(po_item.brand.clone()),
                ordered_quantity: Set(po_item.quantity),
                received_quantity: Set(received_quantity),
                pending_quantity: Set(pending_quantity),
                unit: Set(po_item.unit.clone()),
                status: Set(status.as_str().to_string()),
                original_inward_id: Set(Some(inward_id)),
                proof_document: Set(None),
                ..Default::default()
            };
            pending.insert(txn).await.map_err(ServiceError::db_error)?;
        }
    }

    Ok(())
}
