use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

use crate::{
    entities::{
        dealer::{self, Entity as DealerEntity},
        purchase_order::{self, status, Entity as PurchaseOrderEntity},
        purchase_order_item::{self, Entity as PurchaseOrderItemEntity},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    forms::PoItemForm,
};

/// Derived money amounts for one purchase order. Never persisted; computed
/// from the line items on every read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PoTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub grand_total: f64,
}

impl PoTotals {
    /// `discount` is a percentage (0..100) of the subtotal; `tax_rate` is the
    /// configured flat fraction (`tax_rate` in `AppConfig`).
    pub fn compute(items: &[purchase_order_item::Model], discount: f64, tax_rate: f64) -> Self {
        let subtotal: f64 = items
            .iter()
            .map(|item| item.price * item.quantity as f64)
            .sum();
        let tax_amount = subtotal * tax_rate;
        let discount_amount = subtotal * (discount / 100.0);
        PoTotals {
            subtotal,
            tax_amount,
            discount_amount,
            grand_total: subtotal + tax_amount - discount_amount,
        }
    }
}

/// Header fields plus the full replacement item set for a create or edit.
#[derive(Debug, Clone)]
pub struct PurchaseOrderInput {
    pub dealer_id: Option<i32>,
    pub date: NaiveDate,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub discount: f64,
    pub items: Vec<PoItemForm>,
}

/// One purchase order with its dealer, items and derived totals.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderDetail {
    pub order: purchase_order::Model,
    pub dealer: Option<dealer::Model>,
    pub items: Vec<purchase_order_item::Model>,
    pub totals: PoTotals,
}

#[derive(Clone)]
pub struct PurchaseOrderService {
    db: Arc<DatabaseConnection>,
    event_sender: Option<EventSender>,
    tax_rate: f64,
}

impl PurchaseOrderService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: Option<EventSender>,
        tax_rate: f64,
    ) -> Self {
        Self {
            db,
            event_sender,
            tax_rate,
        }
    }

    /// Next free order number: one past the current maximum.
    #[instrument(skip(self))]
    pub async fn next_po_number(&self) -> Result<i32, ServiceError> {
        let last = PurchaseOrderEntity::find()
            .order_by_desc(purchase_order::Column::PoNo)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;
        Ok(last.map(|po| po.po_no + 1).unwrap_or(1))
    }

    /// Lists orders newest first. `query` matches the material-name or
    /// dealer-name snapshots on the order's lines.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: Option<&str>,
        status_filter: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<PurchaseOrderDetail>, ServiceError> {
        let mut select = PurchaseOrderEntity::find();

        if let Some(status_filter) = status_filter.map(str::trim).filter(|s| !s.is_empty()) {
            select = select.filter(purchase_order::Column::Status.eq(status_filter));
        }

        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", q);
            let matching_po_nos: Vec<i32> = PurchaseOrderItemEntity::find()
                .select_only()
                .column(purchase_order_item::Column::PoNo)
                .filter(
                    Condition::any()
                        .add(purchase_order_item::Column::MaterialName.like(&pattern))
                        .add(purchase_order_item::Column::DealerName.like(&pattern)),
                )
                .into_tuple()
                .all(&*self.db)
                .await
                .map_err(ServiceError::db_error)?;
            select = select.filter(purchase_order::Column::PoNo.is_in(matching_po_nos));
        }

        let orders = select
            .order_by_desc(purchase_order::Column::PoNo)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;

        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(self.hydrate(order).await?);
        }
        Ok(details)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, po_no: i32) -> Result<PurchaseOrderDetail, ServiceError> {
        let order = PurchaseOrderEntity::find_by_id(po_no)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {} not found", po_no)))?;
        self.hydrate(order).await
    }

    async fn hydrate(
        &self,
        order: purchase_order::Model,
    ) -> Result<PurchaseOrderDetail, ServiceError> {
        let dealer = match order.dealer_id {
            Some(dealer_id) => DealerEntity::find_by_id(dealer_id)
                .one(&*self.db)
                .await
                .map_err(ServiceError::db_error)?,
            None => None,
        };

        let items = PurchaseOrderItemEntity::find()
            .filter(purchase_order_item::Column::PoNo.eq(order.po_no))
            .order_by_asc(purchase_order_item::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;

        let totals = PoTotals::compute(&items, order.discount, self.tax_rate);
        Ok(PurchaseOrderDetail {
            order,
            dealer,
            items,
            totals,
        })
    }

    /// Creates the order and its full item set in one transaction.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: PurchaseOrderInput) -> Result<i32, ServiceError> {
        let po_no = self.next_po_number().await?;
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let order = purchase_order::ActiveModel {
            po_no: Set(po_no),
            dealer_id: Set(input.dealer_id),
            date: Set(input.date),
            status: Set(input.status.unwrap_or_else(|| status::UNSENT.to_string())),
            notes: Set(input.notes),
            discount: Set(input.discount),
        };
        order.insert(&txn).await.map_err(|e| {
            error!("Failed to create purchase order {}: {}", po_no, e);
            ServiceError::db_error(e)
        })?;

        insert_items(&txn, po_no, &input.items).await?;

        txn.commit().await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::PurchaseOrderCreated(po_no)).await;
        }

        info!("Purchase order {} created with {} items", po_no, input.items.len());
        Ok(po_no)
    }

    /// Replaces the order header and its entire item set. There is no
    /// per-item diff; the submitted list is the new truth.
    #[instrument(skip(self, input))]
    pub async fn update(&self, po_no: i32, input: PurchaseOrderInput) -> Result<(), ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let existing = PurchaseOrderEntity::find_by_id(po_no)
            .one(&txn)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {} not found", po_no)))?;

        let mut order: purchase_order::ActiveModel = existing.into();
        order.dealer_id = Set(input.dealer_id);
        order.date = Set(input.date);
        if let Some(new_status) = input.status {
            order.status = Set(new_status);
        }
        order.notes = Set(input.notes);
        order.discount = Set(input.discount);
        order.update(&txn).await.map_err(ServiceError::db_error)?;

        PurchaseOrderItemEntity::delete_many()
            .filter(purchase_order_item::Column::PoNo.eq(po_no))
            .exec(&txn)
            .await
            .map_err(ServiceError::db_error)?;

        insert_items(&txn, po_no, &input.items).await?;

        txn.commit().await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::PurchaseOrderUpdated(po_no)).await;
        }

        info!("Purchase order {} replaced with {} items", po_no, input.items.len());
        Ok(())
    }

    /// Deletes the order and its items. Inward and pending history keyed by
    /// this po_no is left untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, po_no: i32) -> Result<(), ServiceError> {
        let existing = PurchaseOrderEntity::find_by_id(po_no)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {} not found", po_no)))?;

        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        PurchaseOrderItemEntity::delete_many()
            .filter(purchase_order_item::Column::PoNo.eq(po_no))
            .exec(&txn)
            .await
            .map_err(ServiceError::db_error)?;

        let order: purchase_order::ActiveModel = existing.into();
        order.delete(&txn).await.map_err(ServiceError::db_error)?;

        txn.commit().await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::PurchaseOrderDeleted(po_no)).await;
        }

        info!("Purchase order {} deleted", po_no);
        Ok(())
    }

    /// Marks the order received, emitting a status-change event.
    #[instrument(skip(self))]
    pub async fn mark_received(&self, po_no: i32) -> Result<(), ServiceError> {
        let existing = PurchaseOrderEntity::find_by_id(po_no)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {} not found", po_no)))?;

        let old_status = existing.status.clone();
        let mut order: purchase_order::ActiveModel = existing.into();
        order.status = Set(status::RECEIVED.to_string());
        order.update(&*self.db).await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::PurchaseOrderStatusChanged {
                    po_no,
                    old_status,
                    new_status: status::RECEIVED.to_string(),
                })
                .await;
        }

        Ok(())
    }
}

async fn insert_items(
    txn: &sea_orm::DatabaseTransaction,
    po_no: i32,
    items: &[PoItemForm],
) -> Result<(), ServiceError> {
    for item in items {
        let model = purchase_order_item::ActiveModel {
            po_no: Set(po_no),
            material_id: Set(Some(item.material_id)),
            material_name: Set(item.material_name.clone()),
            spec: Set(item.spec.clone()),
            brand: Set(item.brand.clone()),
            dealer_name: Set(item.dealer_name.clone()),
            quantity: Set(item.quantity),
            price: Set(item.price),
            unit: Set(item.unit.clone()),
            ..Default::default()
        };
        model.insert(txn).await.map_err(ServiceError::db_error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i32, price: f64) -> purchase_order_item::Model {
        purchase_order_item::Model {
            id: 0,
            po_no: 1,
            material_id: None,
            material_name: None,
            spec: None,
            brand: None,
            dealer_name: None,
            quantity,
            price,
            unit: None,
        }
    }

    #[test]
    fn totals_identity_holds() {
        let items = vec![item(10, 5.0), item(3, 2.5)];
        let totals = PoTotals::compute(&items, 15.0, 0.10);
        assert_eq!(totals.subtotal, 57.5);
        assert!(
            (totals.grand_total
                - (totals.subtotal + totals.tax_amount - totals.discount_amount))
                .abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn ten_units_at_five_with_no_discount_totals_fifty_five() {
        let items = vec![item(10, 5.0)];
        let totals = PoTotals::compute(&items, 0.0, 0.10);
        assert_eq!(totals.subtotal, 50.0);
        assert_eq!(totals.tax_amount, 5.0);
        assert_eq!(totals.discount_amount, 0.0);
        assert_eq!(totals.grand_total, 55.0);
    }

    #[test]
    fn empty_order_totals_are_zero() {
        let totals = PoTotals::compute(&[], 10.0, 0.10);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.grand_total, 0.0);
    }

    #[test]
    fn discount_is_a_percentage_of_subtotal() {
        let items = vec![item(4, 25.0)];
        let totals = PoTotals::compute(&items, 50.0, 0.10);
        assert_eq!(totals.discount_amount, 50.0);
        assert_eq!(totals.grand_total, 100.0 + 10.0 - 50.0);
    }

    #[test]
    fn tax_amount_follows_the_configured_rate() {
        let items = vec![item(10, 5.0)];
        let totals = PoTotals::compute(&items, 0.0, 0.25);
        assert_eq!(totals.tax_amount, 12.5);
        assert_eq!(totals.grand_total, 62.5);
    }
}
