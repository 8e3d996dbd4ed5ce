use super::common::{map_service_error, redirect_to, success_response};
use crate::{
    errors::ApiError,
    forms::FormFields,
    handlers::AppState,
    services::materials::MaterialInput,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct MaterialSearchParams {
    /// Substring match over the base name and defined name
    pub q: Option<String>,
    /// Restrict to one dealer's materials
    pub dealer_id: Option<i32>,
}

fn material_input(form: &FormFields) -> Result<MaterialInput, ApiError> {
    let base_name = form
        .get_string("base_name")
        .ok_or_else(|| ApiError::ValidationError("Material base name is required".to_string()))?;
    let defined_name_with_spec = form
        .get_string("defined_name_with_spec")
        .unwrap_or_else(|| base_name.clone());
    Ok(MaterialInput {
        base_name,
        defined_name_with_spec,
        brand: form.get_string("brand"),
        hsn_code: form.get_string("hsn_code"),
        dealer_id: form.get_i32("dealer_id").map_err(ApiError::from)?,
        tax: form.get_f64("tax").map_err(ApiError::from)?,
        price: form.get_f64("price").map_err(ApiError::from)?,
        current_stock: form.get_f64("current_stock").map_err(ApiError::from)?,
        units: form.get_string("units"),
    })
}

/// List or search materials
#[utoipa::path(
    get,
    path = "/materials",
    params(MaterialSearchParams),
    responses(
        (status = 200, description = "Material list")
    ),
    tag = "materials"
)]
pub async fn list_materials(
    State(state): State<AppState>,
    Query(params): Query<MaterialSearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let materials = state
        .services
        .materials
        .list(params.q.as_deref(), params.dealer_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(materials))
}

/// Get one material
#[utoipa::path(
    get,
    path = "/materials/{id}",
    params(("id" = i32, Path, description = "Material ID")),
    responses(
        (status = 200, description = "Material fetched"),
        (status = 404, description = "Material not found", body = crate::errors::ErrorResponse)
    ),
    tag = "materials"
)]
pub async fn get_material(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let material = state
        .services
        .materials
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(material))
}

/// Create a material from a form post
#[utoipa::path(
    post,
    path = "/materials/add",
    responses(
        (status = 303, description = "Material created, redirect to list"),
        (status = 400, description = "Invalid form data", body = crate::errors::ErrorResponse)
    ),
    tag = "materials"
)]
pub async fn add_material(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::parse(&body);
    let input = material_input(&form)?;

    state
        .services
        .materials
        .create(input)
        .await
        .map_err(map_service_error)?;

    Ok(redirect_to("/materials"))
}

/// Update a material from a form post
#[utoipa::path(
    post,
    path = "/materials/edit/{id}",
    params(("id" = i32, Path, description = "Material ID")),
    responses(
        (status = 303, description = "Material updated, redirect to list"),
        (status = 404, description = "Material not found", body = crate::errors::ErrorResponse)
    ),
    tag = "materials"
)]
pub async fn edit_material(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::parse(&body);
    let input = material_input(&form)?;

    state
        .services
        .materials
        .update(id, input)
        .await
        .map_err(map_service_error)?;

    Ok(redirect_to("/materials"))
}

/// Delete a material
#[utoipa::path(
    post,
    path = "/materials/delete/{id}",
    params(("id" = i32, Path, description = "Material ID")),
    responses(
        (status = 303, description = "Material deleted, redirect to list"),
        (status = 404, description = "Material not found", body = crate::errors::ErrorResponse)
    ),
    tag = "materials"
)]
pub async fn delete_material(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .materials
        .delete(id)
        .await
        .map_err(map_service_error)?;

    Ok(redirect_to("/materials"))
}

/// Creates the router for material endpoints
pub fn material_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_materials))
        .route("/add", post(add_material))
        .route("/:id", get(get_material))
        .route("/edit/:id", post(edit_material))
        .route("/delete/:id", post(delete_material))
}
