use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    entities::dealer::{self, Entity as DealerEntity},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Fields accepted when creating or updating a dealer.
#[derive(Debug, Clone, Default)]
pub struct DealerInput {
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,
    pub telephone: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub gst_no: Option<String>,
    pub bank_name: Option<String>,
    pub account_no: Option<String>,
    pub ifsc_code: Option<String>,
}

#[derive(Clone)]
pub struct DealerService {
    db: Arc<DatabaseConnection>,
    event_sender: Option<EventSender>,
}

impl DealerService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Option<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<dealer::Model>, ServiceError> {
        DealerEntity::find()
            .order_by_asc(dealer::Column::Name)
            .all(&*self.db)
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<dealer::Model, ServiceError> {
        DealerEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Dealer {} not found", id)))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: DealerInput) -> Result<dealer::Model, ServiceError> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "Dealer name must not be empty".to_string(),
            ));
        }

        let model = dealer::ActiveModel {
            name: Set(input.name),
            address: Set(input.address),
            city: Set(input.city),
            state: Set(input.state),
            country: Set(input.country),
            pincode: Set(input.pincode),
            telephone: Set(input.telephone),
            mobile: Set(input.mobile),
            email: Set(input.email),
            gst_no: Set(input.gst_no),
            bank_name: Set(input.bank_name),
            account_no: Set(input.account_no),
            ifsc_code: Set(input.ifsc_code),
            ..Default::default()
        };

        let created = model.insert(&*self.db).await.map_err(|e| {
            error!("Failed to create dealer: {}", e);
            ServiceError::db_error(e)
        })?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::DealerCreated(created.id)).await;
        }

        info!("Dealer created: {} ({})", created.name, created.id);
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: DealerInput) -> Result<dealer::Model, ServiceError> {
        let existing = self.get(id).await?;

        let mut model: dealer::ActiveModel = existing.into();
        model.name = Set(input.name);
        model.address = Set(input.address);
        model.city = Set(input.city);
        model.state = Set(input.state);
        model.country = Set(input.country);
        model.pincode = Set(input.pincode);
        model.telephone = Set(input.telephone);
        model.mobile = Set(input.mobile);
        model.email = Set(input.email);
        model.gst_no = Set(input.gst_no);
        model.bank_name = Set(input.bank_name);
        model.account_no = Set(input.account_no);
        model.ifsc_code = Set(input.ifsc_code);

        let updated = model.update(&*self.db).await.map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::DealerUpdated(updated.id)).await;
        }

        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        let dealer_id = existing.id;

        DealerEntity::delete_by_id(dealer_id)
            .exec(&*self.db)
            .await
            .map_err(ServiceError::db_error)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::DealerDeleted(dealer_id)).await;
        }

        info!("Dealer deleted: {}", dealer_id);
        Ok(())
    }
}
