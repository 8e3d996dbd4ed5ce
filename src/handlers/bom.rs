use super::common::{created_response, map_service_error, no_content_response, success_response};
use crate::{
    errors::ApiError,
    handlers::AppState,
    services::bom::{BomMaterialInput, NewBom, NewSupply, SupplyItemInput},
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBomRequest {
    pub consignee: Option<String>,
    pub product_name: Option<String>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    #[validate(length(min = 1))]
    pub materials: Vec<BomMaterialRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct BomMaterialRequest {
    pub material_id: i32,
    #[validate(range(min = 0.000001))]
    pub quantity_required: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordSupplyRequest {
    pub supply_date: NaiveDate,
    pub supply_type: Option<String>,
    pub notes: Option<String>,
    #[validate(length(min = 1))]
    pub items: Vec<SupplyItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SupplyItemRequest {
    pub material_id: i32,
    #[validate(range(min = 0.0))]
    pub quantity_provided: f64,
}

/// List BOMs
#[utoipa::path(
    get,
    path = "/bom",
    responses(
        (status = 200, description = "BOM list")
    ),
    tag = "bom"
)]
pub async fn list_boms(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let boms = state.services.bom.list().await.map_err(map_service_error)?;
    Ok(success_response(boms))
}

/// Get a BOM with its materials and derived progress
#[utoipa::path(
    get,
    path = "/bom/{id}",
    params(("id" = i32, Path, description = "BOM ID")),
    responses(
        (status = 200, description = "BOM detail"),
        (status = 404, description = "BOM not found", body = crate::errors::ErrorResponse)
    ),
    tag = "bom"
)]
pub async fn get_bom(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state
        .services
        .bom
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(detail))
}

/// Create a BOM with its required materials
#[utoipa::path(
    post,
    path = "/bom",
    request_body = CreateBomRequest,
    responses(
        (status = 201, description = "BOM created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "bom"
)]
pub async fn create_bom(
    State(state): State<AppState>,
    Json(payload): Json<CreateBomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(format!("Validation failed: {}", e)))?;

    let input = NewBom {
        consignee: payload.consignee,
        product_name: payload.product_name,
        date: payload.date,
        notes: payload.notes,
        materials: payload
            .materials
            .into_iter()
            .map(|m| BomMaterialInput {
                material_id: m.material_id,
                quantity_required: m.quantity_required,
            })
            .collect(),
    };

    let bom = state
        .services
        .bom
        .create(input)
        .await
        .map_err(map_service_error)?;

    info!("BOM created: {}", bom.bom_identifier);
    Ok(created_response(bom))
}

/// Record a supply transaction against a BOM
#[utoipa::path(
    post,
    path = "/bom/{id}/supply",
    request_body = RecordSupplyRequest,
    params(("id" = i32, Path, description = "BOM ID")),
    responses(
        (status = 201, description = "Supply transaction recorded"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "BOM not found", body = crate::errors::ErrorResponse)
    ),
    tag = "bom"
)]
pub async fn record_supply(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<RecordSupplyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(format!("Validation failed: {}", e)))?;

    let input = NewSupply {
        supply_date: payload.supply_date,
        supply_type: payload.supply_type,
        notes: payload.notes,
        items: payload
            .items
            .into_iter()
            .map(|i| SupplyItemInput {
                material_id: i.material_id,
                quantity_provided: i.quantity_provided,
            })
            .collect(),
    };

    let transaction_id = state
        .services
        .bom
        .record_supply(id, input)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(serde_json::json!({
        "transaction_id": transaction_id,
    })))
}

/// Delete a BOM and its dependent rows
#[utoipa::path(
    delete,
    path = "/bom/{id}",
    params(("id" = i32, Path, description = "BOM ID")),
    responses(
        (status = 204, description = "BOM deleted"),
        (status = 404, description = "BOM not found", body = crate::errors::ErrorResponse)
    ),
    tag = "bom"
)]
pub async fn delete_bom(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .bom
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}

/// Creates the router for BOM endpoints
pub fn bom_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_boms).post(create_bom))
        .route("/:id", get(get_bom).delete(delete_bom))
        .route("/:id/supply", post(record_supply))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bom_request(materials: Vec<BomMaterialRequest>) -> CreateBomRequest {
        CreateBomRequest {
            consignee: None,
            product_name: Some("Gearbox".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            notes: None,
            materials,
        }
    }

    #[test]
    fn bom_without_materials_fails_validation() {
        assert!(bom_request(vec![]).validate().is_err());
        assert!(bom_request(vec![BomMaterialRequest {
            material_id: 1,
            quantity_required: 2.5,
        }])
        .validate()
        .is_ok());
    }

    #[test]
    fn supply_without_items_fails_validation() {
        let request = RecordSupplyRequest {
            supply_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            supply_type: None,
            notes: None,
            items: vec![],
        };
        assert!(request.validate().is_err());
    }
}
