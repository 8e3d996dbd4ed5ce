pub mod bom;
pub mod common;
pub mod dealers;
pub mod material_inward;
pub mod materials;
pub mod pending_materials;
pub mod purchase_orders;

use crate::events::EventSender;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub dealers: Arc<crate::services::dealers::DealerService>,
    pub materials: Arc<crate::services::materials::MaterialService>,
    pub purchase_orders: Arc<crate::services::purchase_orders::PurchaseOrderService>,
    pub material_inward: Arc<crate::services::material_inward::MaterialInwardService>,
    pub pending_materials: Arc<crate::services::pending_materials::PendingMaterialService>,
    pub bom: Arc<crate::services::bom::BomService>,
}

impl AppServices {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: Option<EventSender>,
        tax_rate: f64,
    ) -> Self {
        Self {
            dealers: Arc::new(crate::services::dealers::DealerService::new(
                db.clone(),
                event_sender.clone(),
            )),
            materials: Arc::new(crate::services::materials::MaterialService::new(
                db.clone(),
                event_sender.clone(),
            )),
            purchase_orders: Arc::new(
                crate::services::purchase_orders::PurchaseOrderService::new(
                    db.clone(),
                    event_sender.clone(),
                    tax_rate,
                ),
            ),
            material_inward: Arc::new(
                crate::services::material_inward::MaterialInwardService::new(
                    db.clone(),
                    event_sender.clone(),
                ),
            ),
            pending_materials: Arc::new(
                crate::services::pending_materials::PendingMaterialService::new(
                    db.clone(),
                    event_sender.clone(),
                ),
            ),
            bom: Arc::new(crate::services::bom::BomService::new(db, event_sender)),
        }
    }
}
