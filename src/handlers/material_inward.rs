use super::common::{map_service_error, redirect_to, success_response};
use crate::{
    errors::ApiError,
    forms::{parse_inward_lines, FormFields},
    handlers::AppState,
    services::{
        material_inward::{MaterialInwardHeaderUpdate, NewMaterialInward},
        pending_materials::ResolveInput,
    },
    uploads,
};
use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use tracing::info;

/// List receiving events, newest first
#[utoipa::path(
    get,
    path = "/material_inward",
    responses(
        (status = 200, description = "Inward list")
    ),
    tag = "material-inward"
)]
pub async fn list_material_inward(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let inwards = state
        .services
        .material_inward
        .list()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(inwards))
}

/// PO lookup for the receive form
#[utoipa::path(
    get,
    path = "/material_inward/api/po/{po_no}",
    params(("po_no" = i32, Path, description = "Purchase order number")),
    responses(
        (status = 200, description = "PO summary", body = crate::services::material_inward::PoLookup),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "material-inward"
)]
pub async fn lookup_po(
    State(state): State<AppState>,
    Path(po_no): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let lookup = state
        .services
        .material_inward
        .lookup_po(po_no)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(lookup))
}

/// Receive form context
#[utoipa::path(
    get,
    path = "/material_inward/add",
    responses(
        (status = 200, description = "Receive form context")
    ),
    tag = "material-inward"
)]
pub async fn add_material_inward_form() -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(serde_json::json!({
        "current_date": Utc::now().date_naive(),
    })))
}

/// Record a receiving event against a purchase order
#[utoipa::path(
    post,
    path = "/material_inward/add",
    responses(
        (status = 303, description = "Inward recorded, redirect to list"),
        (status = 400, description = "Invalid form data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "material-inward"
)]
pub async fn add_material_inward(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::parse(&body);

    let input = NewMaterialInward {
        po_no: form.require_i32("po_no").map_err(ApiError::from)?,
        date_of_inward: form
            .get_date("date_of_inward")
            .map_err(ApiError::from)?
            .unwrap_or_else(|| Utc::now().date_naive()),
        bill_no: form.get_string("bill_no"),
        bill_date: form.get_date("bill_date").map_err(ApiError::from)?,
        cost: form.get_f64_or("cost", 0.0).map_err(ApiError::from)?,
        payment_method: form.get_string("payment_method"),
        lines: parse_inward_lines(&form).map_err(ApiError::from)?,
    };

    let inward_id = state
        .services
        .material_inward
        .create(input)
        .await
        .map_err(map_service_error)?;

    info!("Material inward recorded via form: {}", inward_id);
    Ok(redirect_to("/material_inward"))
}

/// Edit form context: one inward with its items
#[utoipa::path(
    get,
    path = "/material_inward/edit/{id}",
    params(("id" = i32, Path, description = "Inward ID")),
    responses(
        (status = 200, description = "Inward detail"),
        (status = 404, description = "Inward not found", body = crate::errors::ErrorResponse)
    ),
    tag = "material-inward"
)]
pub async fn edit_material_inward_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state
        .services
        .material_inward
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(detail))
}

/// Update an inward's header fields
#[utoipa::path(
    post,
    path = "/material_inward/edit/{id}",
    params(("id" = i32, Path, description = "Inward ID")),
    responses(
        (status = 303, description = "Inward updated, redirect to list"),
        (status = 404, description = "Inward not found", body = crate::errors::ErrorResponse)
    ),
    tag = "material-inward"
)]
pub async fn edit_material_inward(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::parse(&body);

    let update = MaterialInwardHeaderUpdate {
        date_of_inward: form.get_date("date_of_inward").map_err(ApiError::from)?,
        bill_no: form.get_string("bill_no"),
        bill_date: form.get_date("bill_date").map_err(ApiError::from)?,
        cost: form.get_f64("cost").map_err(ApiError::from)?,
        payment_method: form.get_string("payment_method"),
    };

    state
        .services
        .material_inward
        .update_header(id, update)
        .await
        .map_err(map_service_error)?;

    Ok(redirect_to("/material_inward"))
}

/// Delete an inward and its items
#[utoipa::path(
    post,
    path = "/material_inward/delete/{id}",
    params(("id" = i32, Path, description = "Inward ID")),
    responses(
        (status = 303, description = "Inward deleted, redirect to list"),
        (status = 404, description = "Inward not found", body = crate::errors::ErrorResponse)
    ),
    tag = "material-inward"
)]
pub async fn delete_material_inward(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .material_inward
        .delete(id)
        .await
        .map_err(map_service_error)?;

    Ok(redirect_to("/material_inward"))
}

/// Operational pending list (unresolved rows with PO context)
#[utoipa::path(
    get,
    path = "/material_inward/pending",
    responses(
        (status = 200, description = "Unresolved pending rows")
    ),
    tag = "material-inward"
)]
pub async fn list_pending(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .pending_materials
        .list_unresolved()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(rows))
}

/// Resolve one pending row from a multipart payload: resolve quantity, bill
/// details, notes and an optional proof document
#[utoipa::path(
    post,
    path = "/material_inward/pending/resolve/{id}",
    params(("id" = i32, Path, description = "Pending material ID")),
    responses(
        (status = 303, description = "Resolution recorded, redirect to pending list"),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Pending row not found", body = crate::errors::ErrorResponse)
    ),
    tag = "material-inward"
)]
pub async fn resolve_pending(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut resolve_quantity: i32 = 0;
    let mut bill_no: Option<String> = None;
    let mut bill_date: Option<NaiveDate> = None;
    let mut notes: Option<String> = None;
    let mut proof_document: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest {
            message: format!("Malformed multipart payload: {}", e),
        })?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resolve_quantity" => {
                let value = field.text().await.map_err(|e| ApiError::BadRequest {
                    message: format!("Reading resolve_quantity: {}", e),
                })?;
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    resolve_quantity = trimmed.parse().map_err(|_| {
                        ApiError::ValidationError(
                            "Field 'resolve_quantity' must be an integer".to_string(),
                        )
                    })?;
                }
            }
            "bill_no" => {
                let value = field.text().await.map_err(|e| ApiError::BadRequest {
                    message: format!("Reading bill_no: {}", e),
                })?;
                bill_no = Some(value.trim().to_string()).filter(|v| !v.is_empty());
            }
            "bill_date" => {
                let value = field.text().await.map_err(|e| ApiError::BadRequest {
                    message: format!("Reading bill_date: {}", e),
                })?;
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    bill_date =
                        Some(NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
                            ApiError::ValidationError(
                                "Field 'bill_date' must be a YYYY-MM-DD date".to_string(),
                            )
                        })?);
                }
            }
            "notes" => {
                let value = field.text().await.map_err(|e| ApiError::BadRequest {
                    message: format!("Reading notes: {}", e),
                })?;
                notes = Some(value.trim().to_string()).filter(|v| !v.is_empty());
            }
            "proof_document" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(|e| ApiError::BadRequest {
                    message: format!("Reading proof_document: {}", e),
                })?;
                if !filename.is_empty() && !data.is_empty() {
                    let stored =
                        uploads::store_proof_document(&state.config.upload_dir, &filename, &data)
                            .await
                            .map_err(map_service_error)?;
                    proof_document = Some(stored);
                }
            }
            _ => {}
        }
    }

    state
        .services
        .pending_materials
        .resolve(
            id,
            ResolveInput {
                resolve_quantity,
                bill_no,
                bill_date,
                notes,
                proof_document,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(redirect_to("/material_inward/pending"))
}

/// Creates the router for material inward endpoints
pub fn material_inward_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_material_inward))
        .route("/api/po/:po_no", get(lookup_po))
        .route(
            "/add",
            get(add_material_inward_form).post(add_material_inward),
        )
        .route(
            "/edit/:id",
            get(edit_material_inward_form).post(edit_material_inward),
        )
        .route("/delete/:id", post(delete_material_inward))
        .route("/pending", get(list_pending))
        .route("/pending/resolve/:id", post(resolve_pending))
}
