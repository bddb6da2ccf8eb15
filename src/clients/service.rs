use rust_decimal::Decimal;
use std::sync::Arc;
use validator::Validate;

use crate::clients::ClientStore;
use crate::error::ApiError;
use crate::metrics::EvaluationMetrics;
use crate::models::{
    ClientId, ClientRecord, CreateClientRequest, CreatePurchaseRequest, PurchaseInfo,
};
use crate::rules::{self, EligibilityApplication, EligibilityEvaluator, PurchaseFacts, RulesError};

/// Service for client registration and purchase settlement
#[derive(Clone)]
pub struct ClientService {
    store: Arc<dyn ClientStore>,
    metrics: EvaluationMetrics,
}

impl ClientService {
    /// Create a new ClientService over the given store
    pub fn new(store: Arc<dyn ClientStore>, metrics: EvaluationMetrics) -> Self {
        Self { store, metrics }
    }

    pub fn metrics(&self) -> &EvaluationMetrics {
        &self.metrics
    }

    /// Register a new client
    ///
    /// # Validation
    /// - Monthly income must be zero or greater
    /// - The client must satisfy the requested tier's requirements
    ///
    /// Only accepted clients receive an id and reach the store.
    pub async fn register_client(
        &self,
        request: CreateClientRequest,
    ) -> Result<ClientRecord, ApiError> {
        request.validate()?;

        let application = EligibilityApplication {
            name: &request.name,
            country: &request.country,
            monthly_income: request.monthly_income,
            vise_club: request.vise_club,
            card_tier: request.card_type,
        };

        if let Err(rejection) = EligibilityEvaluator::evaluate(&application) {
            self.metrics.record_registration_rejected();
            return Err(rejection.into());
        }

        let client_id = self.store.next_id().await;
        let record = ClientRecord {
            client_id,
            name: request.name,
            country: request.country,
            monthly_income: request.monthly_income,
            vise_club: request.vise_club,
            card_type: request.card_type,
        };
        self.store.put(client_id, record.clone()).await;
        self.metrics.record_registration_accepted();

        tracing::info!(
            "Registered client {} with {} card",
            client_id,
            record.card_type
        );
        Ok(record)
    }

    /// Fetch a registered client
    pub async fn get_client(&self, client_id: ClientId) -> Result<ClientRecord, ApiError> {
        self.store
            .get(client_id)
            .await
            .ok_or_else(|| ApiError::NotFound {
                resource: "Client".to_string(),
                id: client_id.to_string(),
            })
    }

    /// Evaluate and settle a purchase for a registered client
    ///
    /// Flow: validate the request, look up the client, apply the tier's
    /// purchase restrictions, then pick the best discount for the purchase day.
    pub async fn register_purchase(
        &self,
        request: CreatePurchaseRequest,
    ) -> Result<PurchaseInfo, ApiError> {
        request.validate()?;

        let client = self.get_client(request.client_id).await?;

        let amount = Decimal::try_from(request.amount).map_err(|e| {
            ApiError::InvalidInput(format!("Amount {} is not representable: {}", request.amount, e))
        })?;

        let _timer = self.metrics.start_purchase_evaluation();
        let facts = PurchaseFacts {
            card_tier: client.card_type,
            client_country: &client.country,
            purchase_country: &request.purchase_country,
            purchase_date: &request.purchase_date,
            amount,
        };

        let decision = match rules::evaluate_purchase(&facts) {
            Ok(decision) => decision,
            Err(error) => {
                if matches!(error, RulesError::PurchaseRejected(_)) {
                    self.metrics.record_purchase_rejected();
                }
                return Err(error.into());
            }
        };
        self.metrics
            .record_purchase_approved(decision.benefit.is_some());

        let purchase = PurchaseInfo {
            client_id: client.client_id,
            original_amount: amount,
            discount_applied: decision.discount_applied(),
            final_amount: decision.final_amount(amount),
            benefit: decision.benefit,
        };

        tracing::info!(
            "Approved purchase for client {}: {} {} -> {} ({:?})",
            purchase.client_id,
            purchase.original_amount,
            request.currency,
            purchase.final_amount,
            purchase.benefit
        );
        Ok(purchase)
    }
}
