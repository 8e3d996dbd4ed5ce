use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    entities::{
        dealer::Entity as DealerEntity,
        material_inward::{self, Entity as MaterialInwardEntity},
        material_inward_item::{self, Entity as MaterialInwardItemEntity},
        pending_material::{self, Entity as PendingMaterialEntity, PendingStatus},
        pending_material_resolution::{self, Entity as ResolutionEntity},
        purchase_order::{self, Entity as PurchaseOrderEntity},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    forms::{PendingRegistrationForm, PendingUpdateForm},
};

/// A pending row together with its purchase order, for list views.
#[derive(Debug, Clone, Serialize)]
pub struct PendingWithOrder {
    pub pending: pending_material::Model,
    pub order: Option<purchase_order::Model>,
}

/// One single-row resolution event.
#[derive(Debug, Clone, Default)]
pub struct ResolveInput {
    pub resolve_quantity: i32,
    pub bill_no: Option<String>,
    pub bill_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub proof_document: Option<String>,
}

/// Header fields for a batch resolution, which records a new (pending)
/// inward event alongside the per-row updates.
#[derive(Debug, Clone)]
pub struct PendingBatchHeader {
    pub date_of_inward: NaiveDate,
    pub bill_no: Option<String>,
    pub bill_date: Option<NaiveDate>,
    pub cost: f64,
    pub payment_method: Option<String>,
}

#[derive(Clone)]
pub struct PendingMaterialService {
    db: Arc<DatabaseConnection>,
    event_sender: Option<EventSender>,
}

impl PendingMaterialService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Option<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Operational list: rows still awaiting material. Resolved rows are
    /// excluded here but stay queryable by PO number.
    #[instrument(skip(self))]
    pub async fn list_unresolved(&self) -> Result<Vec<PendingWithOrder>, ServiceError> {
        let rows = PendingMaterialEntity::find()
            .filter(pending_material::Column::Status.is_in(PendingStatus::open_statuses()))
            .order_by_asc(pending_material::Column::Id)
            .find_also_related(PurchaseOrderEntity)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(rows
            .into_iter()
            .map(|(pending, order)| PendingWithOrder { pending, order })
            .collect())
    }

    /// Every pending row for one PO, including resolved history.
    #[instrument(skip(self))]
    pub async fn list_for_po(&self, po_no: i32) -> Result<Vec<pending_material::Model>, ServiceError> {
        PendingMaterialEntity::find()
            .filter(pending_material::Column::PoNo.eq(po_no))
            .order_by_asc(pending_material::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    /// Open rows for one PO, the set the batch-resolution form operates on.
    #[instrument(skip(self))]
    pub async fn open_for_po(&self, po_no: i32) -> Result<Vec<pending_material::Model>, ServiceError> {
        PendingMaterialEntity::find()
            .filter(pending_material::Column::PoNo.eq(po_no))
            .filter(pending_material::Column::Status.is_in(PendingStatus::open_statuses()))
            .order_by_asc(pending_material::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    /// Resolution history for one pending row.
    #[instrument(skip(self))]
    pub async fn resolutions(
        &self,
        pending_id: i32,
    ) -> Result<Vec<pending_material_resolution::Model>, ServiceError> {
        ResolutionEntity::find()
            .filter(pending_material_resolution::Column::PendingMaterialId.eq(pending_id))
            .order_by_asc(pending_material_resolution::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    /// Shortfall candidates from one inward: its non-completed items, shaped
    /// for the registration form.
    #[instrument(skip(self))]
    pub async fn shortfall_candidates(
        &self,
        inward_id: i32,
    ) -> Result<Vec<material_inward_item::Model>, ServiceError> {
        // 404 when the inward itself is missing
        MaterialInwardEntity::find_by_id(inward_id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Material inward {} not found", inward_id))
            })?;

        MaterialInwardItemEntity::find()
            .filter(material_inward_item::Column::MaterialInwardId.eq(inward_id))
            .filter(material_inward_item::Column::Status.ne(material_inward::status::COMPLETED))
            .order_by_asc(material_inward_item::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    /// Explicit registration of shortfall rows posted from an inward's
    /// registration form. Only rows with the checkbox set are written.
    #[instrument(skip(self, rows))]
    pub async fn register_from_inward(
        &self,
        inward_id: i32,
        rows: Vec<PendingRegistrationForm>,
    ) -> Result<usize, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let inward = MaterialInwardEntity::find_by_id(inward_id)
            .one(&txn)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Material inward {} not found", inward_id))
            })?;

        let mut registered = Vec::new();
        for row in rows.into_iter().filter(|r| r.is_pending) {
            let status = PendingStatus::from_quantities(row.ordered_quantity, row.pending_quantity);
            let pending = pending_material::ActiveModel {
                po_no: Set(inward.po_no),
                po_item_id: Set(row.po_item_id),
                material_name: Set(row.material_name),
                spec: Set(row.spec),
                brand: Set(row.brand),
                ordered_quantity: Set(row.ordered_quantity),
                received_quantity: Set(row.received_quantity),
                pending_quantity: Set(row.pending_quantity),
                unit: Set(row.unit),
                status: Set(status.as_str().to_string()),
                original_inward_id: Set(Some(inward_id)),
                proof_document: Set(None),
                ..Default::default()
            };
            let created = pending.insert(&txn).await.map_err(|e| {
                error!("Failed to register pending material: {}", e);
                ServiceError::db_error(e)
            })?;
            registered.push(created);
        }

        txn.commit().await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            for row in &registered {
                sender
                    .send_or_log(Event::PendingMaterialRegistered {
                        pending_id: row.id,
                        po_no: row.po_no,
                        pending_quantity: row.pending_quantity,
                    })
                    .await;
            }
        }

        info!(
            "Registered {} pending rows from inward {}",
            registered.len(),
            inward_id
        );
        Ok(registered.len())
    }

    /// Resolves a single pending row. A zero quantity is a no-op; resolving
    /// more than is pending is rejected so `0 <= pending <= ordered` holds.
    #[instrument(skip(self, input))]
    pub async fn resolve(
        &self,
        pending_id: i32,
        input: ResolveInput,
    ) -> Result<pending_material::Model, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let row = PendingMaterialEntity::find_by_id(pending_id)
            .one(&txn)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Pending material {} not found", pending_id))
            })?;

        if input.resolve_quantity == 0 && input.proof_document.is_none() {
            txn.commit().await.map_err(ServiceError::db_error)?;
            return Ok(row);
        }

        let po_no = row.po_no;
        let updated = apply_resolution(&txn, row, &input, None).await?;
        let remaining = updated.pending_quantity;

        let po_received = settle_po_if_resolved(&txn, po_no).await?;

        txn.commit().await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::PendingMaterialResolved {
                    pending_id,
                    resolved_quantity: input.resolve_quantity,
                    remaining_quantity: remaining,
                })
                .await;
            if let Some((po_no, old_status)) = po_received {
                sender
                    .send_or_log(Event::PurchaseOrderStatusChanged {
                        po_no,
                        old_status,
                        new_status: purchase_order::status::RECEIVED.to_string(),
                    })
                    .await;
            }
        }

        Ok(updated)
    }

    /// Batch resolution for one PO: records a new inward flagged as a
    /// pending-resolution event, then applies each submitted line with a
    /// positive quantity to its pending row.
    #[instrument(skip(self, header, updates))]
    pub async fn batch_update(
        &self,
        po_no: i32,
        header: PendingBatchHeader,
        updates: Vec<PendingUpdateForm>,
    ) -> Result<i32, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let po = PurchaseOrderEntity::find_by_id(po_no)
            .one(&txn)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {} not found", po_no)))?;

        let dealer_name = match po.dealer_id {
            Some(dealer_id) => DealerEntity::find_by_id(dealer_id)
                .one(&txn)
                .await
                .map_err(ServiceError::db_error)?
                .map(|d| d.name),
            None => None,
        };

        let inward = material_inward::ActiveModel {
            po_no: Set(po_no),
            dealer_name: Set(dealer_name),
            po_date: Set(Some(po.date)),
            date_of_inward: Set(header.date_of_inward),
            bill_no: Set(header.bill_no.clone()),
            bill_date: Set(header.bill_date),
            cost: Set(header.cost),
            payment_method: Set(header.payment_method),
            status: Set(material_inward::status::PARTIAL.to_string()),
            is_pending_inward: Set(true),
            ..Default::default()
        };
        let inward = inward.insert(&txn).await.map_err(ServiceError::db_error)?;

        let mut resolved_events = Vec::new();
        for update in updates {
            if update.quantity_received == 0 {
                continue;
            }

            let row = PendingMaterialEntity::find_by_id(update.pending_id)
                .one(&txn)
                .await
                .map_err(ServiceError::db_error)?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!(
                        "Pending material {} not found",
                        update.pending_id
                    ))
                })?;

            let item_status = if update.quantity_received >= row.pending_quantity {
                material_inward::status::COMPLETED
            } else {
                material_inward::status::PARTIAL
            };
            let inward_item = material_inward_item::ActiveModel {
                material_inward_id: Set(inward.id),
                po_item_id: Set(row.po_item_id),
                material_name: Set(row.material_name.clone()),
                spec: Set(row.spec.clone()),
                brand: Set(row.brand.clone()),
                ordered_quantity: Set(row.ordered_quantity),
                quantity_received: Set(update.quantity_received),
                unit: Set(row.unit.clone()),
                status: Set(item_status.to_string()),
                ..Default::default()
            };
            inward_item
                .insert(&txn)
                .await
                .map_err(ServiceError::db_error)?;

            let resolve = ResolveInput {
                resolve_quantity: update.quantity_received,
                bill_no: header.bill_no.clone(),
                bill_date: header.bill_date,
                notes: None,
                proof_document: None,
            };
            let updated = apply_resolution(&txn, row, &resolve, Some(inward.id)).await?;
            resolved_events.push((updated.id, update.quantity_received, updated.pending_quantity));
        }

        let po_received = settle_po_if_resolved(&txn, po_no).await?;

        txn.commit().await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::MaterialInwardRecorded {
                    inward_id: inward.id,
                    po_no,
                    fully_received: false,
                })
                .await;
            for (pending_id, resolved_quantity, remaining_quantity) in resolved_events {
                sender
                    .send_or_log(Event::PendingMaterialResolved {
                        pending_id,
                        resolved_quantity,
                        remaining_quantity,
                    })
                    .await;
            }
            if let Some((po_no, old_status)) = po_received {
                sender
                    .send_or_log(Event::PurchaseOrderStatusChanged {
                        po_no,
                        old_status,
                        new_status: purchase_order::status::RECEIVED.to_string(),
                    })
                    .await;
            }
        }

        info!("Batch resolution recorded as inward {} for PO {}", inward.id, po_no);
        Ok(inward.id)
    }
}

/// Applies one resolution to a pending row: moves the quantities, rederives
/// the status, appends the immutable audit row and stores the proof path
/// (last writer wins).
async fn apply_resolution(
    txn: &DatabaseTransaction,
    row: pending_material::Model,
    input: &ResolveInput,
    material_inward_id: Option<i32>,
) -> Result<pending_material::Model, ServiceError> {
    if input.resolve_quantity < 0 {
        return Err(ServiceError::ValidationError(
            "Resolve quantity must not be negative".to_string(),
        ));
    }
    if input.resolve_quantity > row.pending_quantity {
        return Err(ServiceError::InvalidOperation(format!(
            "Cannot resolve {} against pending quantity {}",
            input.resolve_quantity, row.pending_quantity
        )));
    }

    let pending_id = row.id;
    let new_received = row.received_quantity + input.resolve_quantity;
    let new_pending = row.ordered_quantity - new_received;
    let new_status = PendingStatus::from_quantities(row.ordered_quantity, new_pending);

    let mut pending: pending_material::ActiveModel = row.into();
    pending.received_quantity = Set(new_received);
    pending.pending_quantity = Set(new_pending);
    pending.status = Set(new_status.as_str().to_string());
    if let Some(proof) = &input.proof_document {
        pending.proof_document = Set(Some(proof.clone()));
    }
    let updated = pending.update(txn).await.map_err(ServiceError::db_error)?;

    if input.resolve_quantity > 0 {
        let resolution = pending_material_resolution::ActiveModel {
            pending_material_id: Set(pending_id),
            material_inward_id: Set(material_inward_id),
            resolved_quantity: Set(input.resolve_quantity),
            bill_no: Set(input.bill_no.clone()),
            bill_date: Set(input.bill_date),
            notes: Set(input.notes.clone()),
            resolved_at: Set(Utc::now()),
            ..Default::default()
        };
        resolution.insert(txn).await.map_err(ServiceError::db_error)?;
    }

    Ok(updated)
}

/// When no open pending rows remain for the PO, flips it to `received`.
/// Returns the transition for event emission after commit.
async fn settle_po_if_resolved(
    txn: &DatabaseTransaction,
    po_no: i32,
) -> Result<Option<(i32, String)>, ServiceError> {
    let open = PendingMaterialEntity::find()
        .filter(pending_material::Column::PoNo.eq(po_no))
        .filter(pending_material::Column::Status.is_in(PendingStatus::open_statuses()))
        .one(txn)
        .await
        .map_err(ServiceError::db_error)?;

    if open.is_some() {
        return Ok(None);
    }

    let po = PurchaseOrderEntity::find_by_id(po_no)
        .one(txn)
        .await
        .map_err(ServiceError::db_error)?;

    match po {
        Some(po) if po.status != purchase_order::status::RECEIVED => {
            let old_status = po.status.clone();
            let mut order: purchase_order::ActiveModel = po.into();
            order.status = Set(purchase_order::status::RECEIVED.to_string());
            order.update(txn).await.map_err(ServiceError::db_error)?;
            Ok(Some((po_no, old_status)))
        }
        _ => Ok(None),
    }
}
