use super::common::{map_service_error, redirect_to, success_response};
use crate::{
    errors::ApiError,
    forms::{parse_pending_registrations, parse_pending_updates, FormFields},
    handlers::AppState,
    services::pending_materials::PendingBatchHeader,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::Utc;
use tracing::info;

/// Unresolved pending rows with their purchase orders
#[utoipa::path(
    get,
    path = "/pending_materials",
    responses(
        (status = 200, description = "Unresolved pending rows")
    ),
    tag = "pending-materials"
)]
pub async fn list_pending_materials(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .pending_materials
        .list_unresolved()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(rows))
}

/// Registration form context: the inward's non-completed items
#[utoipa::path(
    get,
    path = "/pending_materials/add/{inward_id}",
    params(("inward_id" = i32, Path, description = "Inward ID")),
    responses(
        (status = 200, description = "Shortfall candidates"),
        (status = 404, description = "Inward not found", body = crate::errors::ErrorResponse)
    ),
    tag = "pending-materials"
)]
pub async fn add_pending_form(
    State(state): State<AppState>,
    Path(inward_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let candidates = state
        .services
        .pending_materials
        .shortfall_candidates(inward_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(candidates))
}

/// Register pending rows for an inward's shortfall lines
#[utoipa::path(
    post,
    path = "/pending_materials/add/{inward_id}",
    params(("inward_id" = i32, Path, description = "Inward ID")),
    responses(
        (status = 303, description = "Rows registered, redirect to pending list"),
        (status = 400, description = "Invalid form data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Inward not found", body = crate::errors::ErrorResponse)
    ),
    tag = "pending-materials"
)]
pub async fn add_pending(
    State(state): State<AppState>,
    Path(inward_id): Path<i32>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::parse(&body);
    let rows = parse_pending_registrations(&form).map_err(ApiError::from)?;

    let registered = state
        .services
        .pending_materials
        .register_from_inward(inward_id, rows)
        .await
        .map_err(map_service_error)?;

    info!(
        "Registered {} pending rows for inward {}",
        registered, inward_id
    );
    Ok(redirect_to("/pending_materials"))
}

/// Batch-resolution form context: the PO's open pending rows
#[utoipa::path(
    get,
    path = "/pending_materials/update/{po_no}",
    params(("po_no" = i32, Path, description = "Purchase order number")),
    responses(
        (status = 200, description = "Open pending rows for the PO")
    ),
    tag = "pending-materials"
)]
pub async fn update_pending_form(
    State(state): State<AppState>,
    Path(po_no): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .pending_materials
        .open_for_po(po_no)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(serde_json::json!({
        "po_no": po_no,
        "pending_materials": rows,
        "current_date": Utc::now().date_naive(),
    })))
}

/// Batch resolution for one PO: records a pending-resolution inward and
/// applies each submitted line
#[utoipa::path(
    post,
    path = "/pending_materials/update/{po_no}",
    params(("po_no" = i32, Path, description = "Purchase order number")),
    responses(
        (status = 303, description = "Resolutions recorded, redirect to pending list"),
        (status = 400, description = "Invalid form data", body = crate::errors::ErrorResponse),
        (status = 404, description = "PO or pending row not found", body = crate::errors::ErrorResponse)
    ),
    tag = "pending-materials"
)]
pub async fn update_pending(
    State(state): State<AppState>,
    Path(po_no): Path<i32>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::parse(&body);

    let header = PendingBatchHeader {
        date_of_inward: form
            .get_date("date_of_inward")
            .map_err(ApiError::from)?
            .unwrap_or_else(|| Utc::now().date_naive()),
        bill_no: form.get_string("bill_no"),
        bill_date: form.get_date("bill_date").map_err(ApiError::from)?,
        cost: form.get_f64_or("cost", 0.0).map_err(ApiError::from)?,
        payment_method: form.get_string("payment_method"),
    };
    let updates = parse_pending_updates(&form).map_err(ApiError::from)?;

    let inward_id = state
        .services
        .pending_materials
        .batch_update(po_no, header, updates)
        .await
        .map_err(map_service_error)?;

    info!(
        "Batch resolution recorded for PO {} as inward {}",
        po_no, inward_id
    );
    Ok(redirect_to("/pending_materials"))
}

/// Creates the router for pending material endpoints
pub fn pending_material_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pending_materials))
        .route("/add/:inward_id", get(add_pending_form).post(add_pending))
        .route(
            "/update/:po_no",
            get(update_pending_form).post(update_pending),
        )
}
