use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    entities::material::{self, Entity as MaterialEntity},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Fields accepted when creating or updating a catalog material.
#[derive(Debug, Clone, Default)]
pub struct MaterialInput {
    pub base_name: String,
    pub defined_name_with_spec: String,
    pub brand: Option<String>,
    pub hsn_code: Option<String>,
    pub dealer_id: Option<i32>,
    pub tax: Option<f64>,
    pub price: Option<f64>,
    pub current_stock: Option<f64>,
    pub units: Option<String>,
}

#[derive(Clone)]
pub struct MaterialService {
    db: Arc<DatabaseConnection>,
    event_sender: Option<EventSender>,
}

impl MaterialService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Option<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Lists materials, optionally filtered by a name search and dealer.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: Option<&str>,
        dealer_id: Option<i32>,
    ) -> Result<Vec<material::Model>, ServiceError> {
        let mut select = MaterialEntity::find();

        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", q);
            select = select.filter(
                Condition::any()
                    .add(material::Column::BaseName.like(&pattern))
                    .add(material::Column::DefinedNameWithSpec.like(&pattern)),
            );
        }

        if let Some(dealer) = dealer_id {
            select = select.filter(material::Column::DealerId.eq(dealer));
        }

        select
            .order_by_asc(material::Column::DefinedNameWithSpec)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<material::Model, ServiceError> {
        MaterialEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Material {} not found", id)))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: MaterialInput) -> Result<material::Model, ServiceError> {
        if input.base_name.trim().is_empty() || input.defined_name_with_spec.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Material names must not be empty".to_string(),
            ));
        }

        let model = material::ActiveModel {
            base_name: Set(Some(input.base_name)),
            defined_name_with_spec: Set(Some(input.defined_name_with_spec)),
            brand: Set(input.brand),
            hsn_code: Set(input.hsn_code),
            dealer_id: Set(input.dealer_id),
            tax: Set(input.tax),
            price: Set(input.price),
            current_stock: Set(input.current_stock),
            units: Set(input.units),
            ..Default::default()
        };

        let created = model.insert(&*self.db).await.map_err(|e| {
            error!("Failed to create material: {}", e);
            ServiceError::db_error(e)
        })?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::MaterialCreated(created.id)).await;
        }

        info!(
            "Material created: {} ({})",
            created.defined_name_with_spec.as_deref().unwrap_or(""),
            created.id
        );
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: MaterialInput,
    ) -> Result<material::Model, ServiceError> {
        let existing = self.get(id).await?;

        let mut model: material::ActiveModel = existing.into();
        model.base_name = Set(Some(input.base_name));
        model.defined_name_with_spec = Set(Some(input.defined_name_with_spec));
        model.brand = Set(input.brand);
        model.hsn_code = Set(input.hsn_code);
        model.dealer_id = Set(input.dealer_id);
        model.tax = Set(input.tax);
        model.price = Set(input.price);
        model.current_stock = Set(input.current_stock);
        model.units = Set(input.units);

        let updated = model.update(&*self.db).await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::MaterialUpdated(updated.id)).await;
        }

        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        let material_id = existing.id;

        MaterialEntity::delete_by_id(material_id)
            .exec(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::MaterialDeleted(material_id)).await;
        }

        info!("Material deleted: {}", material_id);
        Ok(())
    }
}
