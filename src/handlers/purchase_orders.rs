use super::common::{map_service_error, redirect_to, success_response, PaginationParams};
use crate::{
    errors::ApiError,
    forms::{parse_po_items, FormFields},
    handlers::AppState,
    services::{
        documents,
        purchase_orders::PurchaseOrderInput,
    },
};
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PurchaseOrderListParams {
    /// Substring match over item material-name and dealer-name snapshots
    pub q: Option<String>,
    /// Filter by order status
    pub status: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PurchaseOrderListParams {
    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page.unwrap_or_else(|| PaginationParams::default().page),
            per_page: self
                .per_page
                .unwrap_or_else(|| PaginationParams::default().per_page),
        }
    }
}

fn purchase_order_input(form: &FormFields) -> Result<PurchaseOrderInput, ApiError> {
    let date = form
        .get_date("date")
        .map_err(ApiError::from)?
        .unwrap_or_else(|| Utc::now().date_naive());
    let items = parse_po_items(form).map_err(ApiError::from)?;

    Ok(PurchaseOrderInput {
        dealer_id: form.get_i32("dealer_id").map_err(ApiError::from)?,
        date,
        status: form.get_string("status"),
        notes: form.get_string("notes"),
        discount: form.get_f64_or("discount", 0.0).map_err(ApiError::from)?,
        items,
    })
}

/// List purchase orders with optional search and status filter
#[utoipa::path(
    get,
    path = "/purchase_orders",
    params(PurchaseOrderListParams),
    responses(
        (status = 200, description = "Purchase order list")
    ),
    tag = "purchase-orders"
)]
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    Query(params): Query<PurchaseOrderListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state
        .services
        .purchase_orders
        .list(
            params.q.as_deref(),
            params.status.as_deref(),
            params.pagination().per_page,
            params.pagination().offset(),
        )
        .await
        .map_err(map_service_error)?;
    Ok(success_response(orders))
}

/// Context for the order entry form: dealers, the next free PO number and
/// the current date
#[utoipa::path(
    get,
    path = "/purchase_orders/add",
    responses(
        (status = 200, description = "Order form context")
    ),
    tag = "purchase-orders"
)]
pub async fn add_purchase_order_form(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let dealers = state
        .services
        .dealers
        .list()
        .await
        .map_err(map_service_error)?;
    let next_po_no = state
        .services
        .purchase_orders
        .next_po_number()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "dealers": dealers,
        "next_po_no": next_po_no,
        "current_date": Utc::now().date_naive(),
    })))
}

/// Create a purchase order from an indexed form-array post
#[utoipa::path(
    post,
    path = "/purchase_orders/add",
    responses(
        (status = 303, description = "Order created, redirect to list"),
        (status = 400, description = "Invalid form data", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn add_purchase_order(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::parse(&body);
    let input = purchase_order_input(&form)?;

    let po_no = state
        .services
        .purchase_orders
        .create(input)
        .await
        .map_err(map_service_error)?;

    info!("Purchase order created via form: {}", po_no);
    Ok(redirect_to("/purchase_orders"))
}

/// Get one purchase order with items and derived totals
#[utoipa::path(
    get,
    path = "/purchase_orders/{po_no}",
    params(("po_no" = i32, Path, description = "Purchase order number")),
    responses(
        (status = 200, description = "Purchase order fetched"),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn get_purchase_order(
    State(state): State<AppState>,
    Path(po_no): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state
        .services
        .purchase_orders
        .get(po_no)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(detail))
}

/// Edit form context: the order plus the dealer list
#[utoipa::path(
    get,
    path = "/purchase_orders/edit/{po_no}",
    params(("po_no" = i32, Path, description = "Purchase order number")),
    responses(
        (status = 200, description = "Edit form context"),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn edit_purchase_order_form(
    State(state): State<AppState>,
    Path(po_no): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state
        .services
        .purchase_orders
        .get(po_no)
        .await
        .map_err(map_service_error)?;
    let dealers = state
        .services
        .dealers
        .list()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "purchase_order": detail,
        "dealers": dealers,
    })))
}

/// Replace an order's header and full item set
#[utoipa::path(
    post,
    path = "/purchase_orders/edit/{po_no}",
    params(("po_no" = i32, Path, description = "Purchase order number")),
    responses(
        (status = 303, description = "Order updated, redirect to list"),
        (status = 400, description = "Invalid form data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn edit_purchase_order(
    State(state): State<AppState>,
    Path(po_no): Path<i32>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::parse(&body);
    let input = purchase_order_input(&form)?;

    state
        .services
        .purchase_orders
        .update(po_no, input)
        .await
        .map_err(map_service_error)?;

    Ok(redirect_to("/purchase_orders"))
}

/// Delete an order and its items
#[utoipa::path(
    post,
    path = "/purchase_orders/delete/{po_no}",
    params(("po_no" = i32, Path, description = "Purchase order number")),
    responses(
        (status = 303, description = "Order deleted, redirect to list"),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn delete_purchase_order(
    State(state): State<AppState>,
    Path(po_no): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .purchase_orders
        .delete(po_no)
        .await
        .map_err(map_service_error)?;

    Ok(redirect_to("/purchase_orders"))
}

/// Manually mark an order received
#[utoipa::path(
    post,
    path = "/purchase_orders/received/{po_no}",
    params(("po_no" = i32, Path, description = "Purchase order number")),
    responses(
        (status = 303, description = "Order marked received, redirect to list"),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn mark_purchase_order_received(
    State(state): State<AppState>,
    Path(po_no): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .purchase_orders
        .mark_received(po_no)
        .await
        .map_err(map_service_error)?;

    Ok(redirect_to("/purchase_orders"))
}

/// Printable order document with amount-in-words
#[utoipa::path(
    get,
    path = "/purchase_orders/{po_no}/document",
    params(("po_no" = i32, Path, description = "Purchase order number")),
    responses(
        (status = 200, description = "Rendered order document", content_type = "text/html"),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn purchase_order_document(
    State(state): State<AppState>,
    Path(po_no): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state
        .services
        .purchase_orders
        .get(po_no)
        .await
        .map_err(map_service_error)?;
    Ok(Html(documents::render_order_document(&detail)))
}

/// Creates the router for purchase order endpoints
pub fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_purchase_orders))
        .route("/add", get(add_purchase_order_form).post(add_purchase_order))
        .route(
            "/edit/:po_no",
            get(edit_purchase_order_form).post(edit_purchase_order),
        )
        .route("/delete/:po_no", post(delete_purchase_order))
        .route("/received/:po_no", post(mark_purchase_order_received))
        .route("/:po_no", get(get_purchase_order))
        .route("/:po_no/document", get(purchase_order_document))
}
