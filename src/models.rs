use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::rules::CardTier;

/// Identifier assigned to a registered client
pub type ClientId = u64;

/// Response status for accepted registrations
pub const STATUS_REGISTERED: &str = "Registered";
/// Response status for approved purchases
pub const STATUS_APPROVED: &str = "Approved";
/// Response status for every rejection
pub const STATUS_REJECTED: &str = "Rejected";

/// A registered client as held by the record store
///
/// Only clients that passed eligibility are ever stored; the tier never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    #[schema(example = 1)]
    pub client_id: ClientId,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "USA")]
    pub country: String,
    #[schema(example = 1200.0)]
    pub monthly_income: f64,
    #[schema(example = true)]
    pub vise_club: bool,
    pub card_type: CardTier,
}

/// Request body for POST /client
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "USA")]
    pub country: String,
    #[validate(custom = "crate::validation::validate_monthly_income")]
    #[schema(example = 1200.0, minimum = 0.0)]
    pub monthly_income: f64,
    #[schema(example = true)]
    pub vise_club: bool,
    #[serde(alias = "cardTier")]
    pub card_type: CardTier,
}

/// Response body for an accepted registration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    #[schema(example = 1)]
    pub client_id: ClientId,
    #[schema(example = "John Doe")]
    pub name: String,
    pub card_type: CardTier,
    #[schema(example = "Registered")]
    pub status: String,
    #[schema(example = "Client eligible for Platinum card")]
    pub message: String,
}

impl From<&ClientRecord> for ClientResponse {
    fn from(record: &ClientRecord) -> Self {
        Self {
            client_id: record.client_id,
            name: record.name.clone(),
            card_type: record.card_type,
            status: STATUS_REGISTERED.to_string(),
            message: format!("Client eligible for {} card", record.card_type),
        }
    }
}

/// Request body for POST /purchase
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    #[schema(example = 1)]
    pub client_id: ClientId,
    #[validate(custom = "crate::validation::validate_positive_amount")]
    #[schema(example = 250.0)]
    pub amount: f64,
    /// Recorded only; no conversion is performed
    #[schema(example = "USD")]
    pub currency: String,
    /// Parsed after the client lookup and the purchase gate
    #[schema(example = "2025-09-20T14:30:00Z")]
    pub purchase_date: String,
    #[schema(example = "France")]
    pub purchase_country: String,
}

/// Settled purchase
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseInfo {
    #[schema(example = 1)]
    pub client_id: ClientId,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 250.0)]
    pub original_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 75.0)]
    pub discount_applied: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 175.0)]
    pub final_amount: Decimal,
    /// Label of the applied rule, null when no discount applied
    #[schema(example = "Saturday - 30% discount")]
    pub benefit: Option<String>,
}

/// Response body for an approved purchase
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchaseResponse {
    #[schema(example = "Approved")]
    pub status: String,
    pub purchase: PurchaseInfo,
}

/// Liveness payload for GET /
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
    #[schema(example = "VISE API")]
    pub service: String,
}
