// HTTP handlers for client and purchase endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, ErrorResponse};
use crate::models::{
    ClientId, ClientRecord, ClientResponse, CreateClientRequest, CreatePurchaseRequest,
    PurchaseResponse, STATUS_APPROVED,
};
use crate::AppState;

/// Handler for POST /client
/// Registers a client if they qualify for the requested card
#[utoipa::path(
    post,
    path = "/client",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client registered", body = ClientResponse),
        (status = 400, description = "Client rejected or invalid input", body = ErrorResponse)
    ),
    tag = "clients"
)]
pub async fn register_client(
    State(state): State<AppState>,
    payload: Result<Json<CreateClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ClientResponse>), ApiError> {
    let Json(payload) = payload?;
    tracing::debug!("Registering client '{}' for {} card", payload.name, payload.card_type);

    let record = state.client_service.register_client(payload).await?;

    Ok((StatusCode::CREATED, Json(ClientResponse::from(&record))))
}

/// Handler for GET /client/:id
/// Retrieves a registered client
#[utoipa::path(
    get,
    path = "/client/{id}",
    params(
        ("id" = u64, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Client found", body = ClientRecord),
        (status = 404, description = "Client not found", body = ErrorResponse)
    ),
    tag = "clients"
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<Json<ClientRecord>, ApiError> {
    let record = state.client_service.get_client(id).await?;
    Ok(Json(record))
}

/// Handler for POST /purchase
/// Evaluates a purchase and applies the best available benefit
#[utoipa::path(
    post,
    path = "/purchase",
    request_body = CreatePurchaseRequest,
    responses(
        (status = 200, description = "Purchase approved", body = PurchaseResponse),
        (status = 400, description = "Purchase rejected or invalid input", body = ErrorResponse),
        (status = 404, description = "Client not found", body = ErrorResponse)
    ),
    tag = "purchases"
)]
pub async fn register_purchase(
    State(state): State<AppState>,
    payload: Result<Json<CreatePurchaseRequest>, JsonRejection>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    let Json(payload) = payload?;
    tracing::debug!("Evaluating purchase for client {}", payload.client_id);

    let purchase = state.client_service.register_purchase(payload).await?;

    Ok(Json(PurchaseResponse {
        status: STATUS_APPROVED.to_string(),
        purchase,
    }))
}
