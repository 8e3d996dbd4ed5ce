use super::common::{map_service_error, redirect_to, success_response};
use crate::{
    errors::ApiError,
    forms::FormFields,
    handlers::AppState,
    services::dealers::DealerInput,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tracing::info;

fn dealer_input(form: &FormFields) -> Result<DealerInput, ApiError> {
    let name = form
        .get_string("name")
        .ok_or_else(|| ApiError::ValidationError("Dealer name is required".to_string()))?;
    Ok(DealerInput {
        name,
        address: form.get_string("address"),
        city: form.get_string("city"),
        state: form.get_string("state"),
        country: form.get_string("country"),
        pincode: form.get_string("pincode"),
        telephone: form.get_string("telephone"),
        mobile: form.get_string("mobile"),
        email: form.get_string("email"),
        gst_no: form.get_string("gst_no"),
        bank_name: form.get_string("bank_name"),
        account_no: form.get_string("account_no"),
        ifsc_code: form.get_string("ifsc_code"),
    })
}

/// List all dealers
#[utoipa::path(
    get,
    path = "/dealers",
    responses(
        (status = 200, description = "Dealer list")
    ),
    tag = "dealers"
)]
pub async fn list_dealers(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let dealers = state
        .services
        .dealers
        .list()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(dealers))
}

/// Get one dealer
#[utoipa::path(
    get,
    path = "/dealers/{id}",
    params(("id" = i32, Path, description = "Dealer ID")),
    responses(
        (status = 200, description = "Dealer fetched"),
        (status = 404, description = "Dealer not found", body = crate::errors::ErrorResponse)
    ),
    tag = "dealers"
)]
pub async fn get_dealer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let dealer = state
        .services
        .dealers
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(dealer))
}

/// Create a dealer from a form post
#[utoipa::path(
    post,
    path = "/dealers/add",
    responses(
        (status = 303, description = "Dealer created, redirect to list"),
        (status = 400, description = "Invalid form data", body = crate::errors::ErrorResponse)
    ),
    tag = "dealers"
)]
pub async fn add_dealer(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::parse(&body);
    let input = dealer_input(&form)?;

    let dealer = state
        .services
        .dealers
        .create(input)
        .await
        .map_err(map_service_error)?;

    info!("Dealer created via form: {}", dealer.id);
    Ok(redirect_to("/dealers"))
}

/// Update a dealer from a form post
#[utoipa::path(
    post,
    path = "/dealers/edit/{id}",
    params(("id" = i32, Path, description = "Dealer ID")),
    responses(
        (status = 303, description = "Dealer updated, redirect to list"),
        (status = 404, description = "Dealer not found", body = crate::errors::ErrorResponse)
    ),
    tag = "dealers"
)]
pub async fn edit_dealer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let form = FormFields::parse(&body);
    let input = dealer_input(&form)?;

    state
        .services
        .dealers
        .update(id, input)
        .await
        .map_err(map_service_error)?;

    Ok(redirect_to("/dealers"))
}

/// Delete a dealer
#[utoipa::path(
    post,
    path = "/dealers/delete/{id}",
    params(("id" = i32, Path, description = "Dealer ID")),
    responses(
        (status = 303, description = "Dealer deleted, redirect to list"),
        (status = 404, description = "Dealer not found", body = crate::errors::ErrorResponse)
    ),
    tag = "dealers"
)]
pub async fn delete_dealer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .dealers
        .delete(id)
        .await
        .map_err(map_service_error)?;

    Ok(redirect_to("/dealers"))
}

/// Creates the router for dealer endpoints
pub fn dealer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_dealers))
        .route("/add", post(add_dealer))
        .route("/:id", get(get_dealer))
        .route("/edit/:id", post(edit_dealer))
        .route("/delete/:id", post(delete_dealer))
}
