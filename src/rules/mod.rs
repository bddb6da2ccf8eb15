// Card Rules Module
//
// Decision logic of the card service:
// - Eligibility: whether a client qualifies for the requested tier
// - Purchase gate: tier-specific geographic purchase restrictions
// - Benefits: best-of-several discount selection per purchase
// - Calendar: weekday classification of purchase timestamps
//
// Everything here is pure; persistence and HTTP live in `clients`.

pub mod benefits;
pub mod calendar;
pub mod eligibility;
pub mod error;
pub mod purchase_gate;
pub mod types;

pub use benefits::{BenefitCandidate, BenefitContext, BenefitDecision, BenefitSelector};
pub use calendar::{DayClassification, DayClassifier};
pub use eligibility::{EligibilityApplication, EligibilityEvaluator, TierRequirements};
pub use error::{RulesError, RulesResult};
pub use purchase_gate::PurchaseGate;
pub use types::CardTier;

use rust_decimal::Decimal;

/// Purchase facts needed to evaluate a purchase for a stored client
#[derive(Debug, Clone)]
pub struct PurchaseFacts<'a> {
    pub card_tier: CardTier,
    pub client_country: &'a str,
    pub purchase_country: &'a str,
    pub purchase_date: &'a str,
    pub amount: Decimal,
}

/// Run the purchase pipeline: geographic gate, day classification, benefit selection
///
/// # Errors
/// - `RulesError::PurchaseRejected` when the gate blocks the purchase country
/// - `RulesError::MalformedTimestamp` when the purchase date cannot be parsed
pub fn evaluate_purchase(facts: &PurchaseFacts<'_>) -> RulesResult<BenefitDecision> {
    PurchaseGate::check(facts.card_tier, facts.purchase_country)?;

    let day = DayClassifier::classify(facts.purchase_date)?;

    let decision = BenefitSelector::select(&BenefitContext {
        card_tier: facts.card_tier,
        client_country: facts.client_country,
        purchase_country: facts.purchase_country,
        amount: facts.amount,
        day,
    });

    tracing::debug!(
        "Purchase on {} for {} card: discount {} ({:?})",
        day.label(),
        facts.card_tier,
        decision.discount,
        decision.benefit
    );
    Ok(decision)
}
