pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod forms;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod uploads;

use axum::{extract::State, response::Json, routing::get, Router};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// Liveness/readiness endpoint: reports the database ping alongside the
/// process status.
async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = match db::check_connection(&state.db).await {
        Ok(()) => "up",
        Err(_) => "down",
    };
    Json(json!({
        "status": "ok",
        "database": database,
        "environment": state.config.environment,
    }))
}

/// All application routes. The same routers serve the web form paths and
/// the `/api/v1` JSON mirror.
pub fn app_routes() -> Router<AppState> {
    let domain_routes = Router::new()
        .nest(
            "/purchase_orders",
            handlers::purchase_orders::purchase_order_routes(),
        )
        .nest(
            "/material_inward",
            handlers::material_inward::material_inward_routes(),
        )
        .nest(
            "/pending_materials",
            handlers::pending_materials::pending_material_routes(),
        )
        .nest("/dealers", handlers::dealers::dealer_routes())
        .nest("/materials", handlers::materials::material_routes())
        .nest("/bom", handlers::bom::bom_routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", domain_routes.clone())
        .merge(domain_routes)
}
