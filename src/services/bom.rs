use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    entities::{
        bom::{self, Entity as BomEntity},
        bom_material::{self, Entity as BomMaterialEntity},
        bom_supply_item::{self, Entity as BomSupplyItemEntity},
        bom_supply_transaction::{self, Entity as BomSupplyTransactionEntity},
    },
    errors::ServiceError,
    events::{Event, EventSender},
};

/// One required material line on a new BOM.
#[derive(Debug, Clone)]
pub struct BomMaterialInput {
    pub material_id: i32,
    pub quantity_required: f64,
}

/// Fields accepted when creating a BOM.
#[derive(Debug, Clone)]
pub struct NewBom {
    pub consignee: Option<String>,
    pub product_name: Option<String>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub materials: Vec<BomMaterialInput>,
}

/// One material quantity handed over in a supply event.
#[derive(Debug, Clone)]
pub struct SupplyItemInput {
    pub material_id: i32,
    pub quantity_provided: f64,
}

/// Fields accepted when recording a supply transaction.
#[derive(Debug, Clone)]
pub struct NewSupply {
    pub supply_date: NaiveDate,
    pub supply_type: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<SupplyItemInput>,
}

/// A BOM with its material lines and read-time progress.
#[derive(Debug, Clone, Serialize)]
pub struct BomDetail {
    pub bom: bom::Model,
    pub materials: Vec<bom_material::Model>,
    pub transactions: Vec<bom_supply_transaction::Model>,
    pub progress_percent: f64,
}

/// Provided/required ratio as a percentage. Never persisted; a BOM with no
/// required quantity reports zero progress.
pub fn progress_percent(materials: &[bom_material::Model]) -> f64 {
    let total_required: f64 = materials.iter().map(|m| m.quantity_required).sum();
    if total_required == 0.0 {
        return 0.0;
    }
    let total_provided: f64 = materials.iter().map(|m| m.quantity_provided).sum();
    total_provided / total_required * 100.0
}

/// Human-facing BOM reference assigned at creation. The trailing component
/// keeps identifiers created within the same second distinct.
fn bom_identifier(now: DateTime<Utc>) -> String {
    format!(
        "BOM-{}-{:04}",
        now.format("%Y%m%d-%H%M%S"),
        now.timestamp_subsec_micros() % 10_000
    )
}

#[derive(Clone)]
pub struct BomService {
    db: Arc<DatabaseConnection>,
    event_sender: Option<EventSender>,
}

impl BomService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Option<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<bom::Model>, ServiceError> {
        BomEntity::find()
            .order_by_desc(bom::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<BomDetail, ServiceError> {
        let bom = BomEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("BOM {} not found", id)))?;

        let materials = BomMaterialEntity::find()
            .filter(bom_material::Column::BomId.eq(id))
            .order_by_asc(bom_material::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;

        let transactions = BomSupplyTransactionEntity::find()
            .filter(bom_supply_transaction::Column::BomId.eq(id))
            .order_by_asc(bom_supply_transaction::Column::Id)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;

        let progress = progress_percent(&materials);
        Ok(BomDetail {
            bom,
            materials,
            transactions,
            progress_percent: progress,
        })
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewBom) -> Result<bom::Model, ServiceError> {
        if input.materials.is_empty() {
            return Err(ServiceError::ValidationError(
                "A BOM requires at least one material line".to_string(),
            ));
        }
        for line in &input.materials {
            if line.quantity_required <= 0.0 || !line.quantity_required.is_finite() {
                return Err(ServiceError::ValidationError(format!(
                    "Invalid required quantity for material {}",
                    line.material_id
                )));
            }
        }

        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let header = bom::ActiveModel {
            bom_identifier: Set(bom_identifier(Utc::now())),
            consignee: Set(input.consignee),
            product_name: Set(input.product_name),
            date: Set(input.date),
            status: Set(bom::status::IN_PROGRESS.to_string()),
            completion_date: Set(None),
            notes: Set(input.notes),
            ..Default::default()
        };
        let created = header.insert(&txn).await.map_err(|e| {
            error!("Failed to create BOM: {}", e);
            ServiceError::db_error(e)
        })?;

        for line in input.materials {
            let row = bom_material::ActiveModel {
                bom_id: Set(created.id),
                material_id: Set(line.material_id),
                quantity_required: Set(line.quantity_required),
                quantity_provided: Set(0.0),
                is_fully_provided: Set(false),
                ..Default::default()
            };
            row.insert(&txn).await.map_err(ServiceError::db_error)?;
        }

        txn.commit().await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::BomCreated(created.id)).await;
        }

        info!("BOM created: {} ({})", created.bom_identifier, created.id);
        Ok(created)
    }

    /// Records one supply event: each submitted line increments the provided
    /// quantity on its BOM material. The BOM completes when every line
    /// reaches its required quantity.
    #[instrument(skip(self, input))]
    pub async fn record_supply(&self, bom_id: i32, input: NewSupply) -> Result<i32, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        let header = BomEntity::find_by_id(bom_id)
            .one(&txn)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("BOM {} not found", bom_id)))?;

        let transaction = bom_supply_transaction::ActiveModel {
            bom_id: Set(bom_id),
            supply_date: Set(input.supply_date),
            supply_type: Set(input.supply_type),
            notes: Set(input.notes),
            ..Default::default()
        };
        let transaction = transaction
            .insert(&txn)
            .await
            .map_err(ServiceError::db_error)?;

        for item in input.items {
            if item.quantity_provided <= 0.0 || !item.quantity_provided.is_finite() {
                continue;
            }

            let line = BomMaterialEntity::find()
                .filter(bom_material::Column::BomId.eq(bom_id))
                .filter(bom_material::Column::MaterialId.eq(item.material_id))
                .one(&txn)
                .await
                .map_err(ServiceError::db_error)?
                .ok_or_else(|| {
                    ServiceError::ValidationError(format!(
                        "Material {} is not part of BOM {}",
                        item.material_id, bom_id
                    ))
                })?;

            let supply_item = bom_supply_item::ActiveModel {
                transaction_id: Set(transaction.id),
                bom_id: Set(bom_id),
                material_id: Set(item.material_id),
                quantity_provided: Set(item.quantity_provided),
                ..Default::default()
            };
            supply_item
                .insert(&txn)
                .await
                .map_err(ServiceError::db_error)?;

            let new_provided = line.quantity_provided + item.quantity_provided;
            let required = line.quantity_required;
            let mut row: bom_material::ActiveModel = line.into();
            row.quantity_provided = Set(new_provided);
            row.is_fully_provided = Set(new_provided >= required);
            row.update(&txn).await.map_err(ServiceError::db_error)?;
        }

        let outstanding = BomMaterialEntity::find()
            .filter(bom_material::Column::BomId.eq(bom_id))
            .filter(bom_material::Column::IsFullyProvided.eq(false))
            .one(&txn)
            .await
            .map_err(ServiceError::db_error)?;

        if outstanding.is_none() && header.status != bom::status::COMPLETED {
            let mut row: bom::ActiveModel = header.into();
            row.status = Set(bom::status::COMPLETED.to_string());
            row.completion_date = Set(Some(input.supply_date));
            row.update(&txn).await.map_err(ServiceError::db_error)?;
        }

        txn.commit().await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::BomSupplyRecorded {
                    bom_id,
                    transaction_id: transaction.id,
                })
                .await;
        }

        info!("Supply transaction {} recorded for BOM {}", transaction.id, bom_id);
        Ok(transaction.id)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = BomEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("BOM {} not found", id)))?;

        let txn = self.db.begin().await.map_err(ServiceError::db_error)?;

        BomSupplyItemEntity::delete_many()
            .filter(bom_supply_item::Column::BomId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::db_error)?;
        BomSupplyTransactionEntity::delete_many()
            .filter(bom_supply_transaction::Column::BomId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::db_error)?;
        BomMaterialEntity::delete_many()
            .filter(bom_material::Column::BomId.eq(id))
            .exec(&txn)
            .await
            .map_err(ServiceError::db_error)?;

        let header: bom::ActiveModel = existing.into();
        header.delete(&txn).await.map_err(ServiceError::db_error)?;

        txn.commit().await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::BomDeleted(id)).await;
        }

        info!("BOM {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn line(required: f64, provided: f64) -> bom_material::Model {
        bom_material::Model {
            id: 0,
            bom_id: 1,
            material_id: 1,
            quantity_required: required,
            quantity_provided: provided,
            is_fully_provided: provided >= required,
        }
    }

    #[test]
    fn progress_is_provided_over_required() {
        let materials = vec![line(10.0, 5.0), line(10.0, 10.0)];
        assert!((progress_percent(&materials) - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_with_nothing_required_is_zero() {
        assert_eq!(progress_percent(&[]), 0.0);
        assert_eq!(progress_percent(&[line(0.0, 0.0)]), 0.0);
    }

    #[test]
    fn identifier_embeds_the_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 45).unwrap();
        let id = bom_identifier(now);
        assert!(id.starts_with("BOM-20240315-103045-"));
        assert_eq!(id.len(), "BOM-20240315-103045-0000".len());
    }
}
