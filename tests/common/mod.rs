use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use stockroom_api::{
    config::AppConfig,
    events::{self, EventSender},
    forms::PoItemForm,
    handlers::AppServices,
    migrator::Migrator,
    services::{
        dealers::DealerInput, materials::MaterialInput, purchase_orders::PurchaseOrderInput,
    },
    AppState,
};
use tokio::sync::mpsc;

/// Test harness backed by an in-memory SQLite database with the full schema
/// migrated. A single pooled connection keeps the in-memory database alive
/// and shared.
pub struct TestApp {
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
        opt.max_connections(1).sqlx_logging(false);
        let db: DatabaseConnection = Database::connect(opt)
            .await
            .expect("connecting to in-memory sqlite");
        Migrator::up(&db, None).await.expect("running migrations");

        let db = Arc::new(db);
        let (tx, rx) = mpsc::channel(64);
        let event_sender = EventSender::new(tx);
        let event_task = tokio::spawn(events::process_events(rx));

        let services = AppServices::new(db.clone(), Some(event_sender.clone()), config.tax_rate);
        let state = AppState {
            db,
            config,
            event_sender,
            services,
        };

        Self {
            state,
            _event_task: event_task,
        }
    }

    pub fn services(&self) -> &AppServices {
        &self.state.services
    }

    /// Seeds one dealer and returns its id.
    pub async fn seed_dealer(&self, name: &str) -> i32 {
        self.services()
            .dealers
            .create(DealerInput {
                name: name.to_string(),
                ..Default::default()
            })
            .await
            .expect("creating dealer")
            .id
    }

    /// Seeds one catalog material and returns its id.
    pub async fn seed_material(&self, name: &str, dealer_id: i32) -> i32 {
        self.services()
            .materials
            .create(MaterialInput {
                base_name: name.to_string(),
                defined_name_with_spec: name.to_string(),
                dealer_id: Some(dealer_id),
                ..Default::default()
            })
            .await
            .expect("creating material")
            .id
    }

    /// Seeds a purchase order with the given lines and returns its number.
    pub async fn seed_purchase_order(
        &self,
        dealer_id: i32,
        items: Vec<PoItemForm>,
    ) -> i32 {
        self.services()
            .purchase_orders
            .create(PurchaseOrderInput {
                dealer_id: Some(dealer_id),
                date: test_date(),
                status: None,
                notes: None,
                discount: 0.0,
                items,
            })
            .await
            .expect("creating purchase order")
    }
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 9).expect("valid date")
}

pub fn po_item(material_id: i32, name: &str, quantity: i32, price: f64) -> PoItemForm {
    PoItemForm {
        material_id,
        material_name: Some(name.to_string()),
        spec: None,
        brand: None,
        dealer_name: None,
        quantity,
        price,
        unit: Some("pcs".to_string()),
    }
}
