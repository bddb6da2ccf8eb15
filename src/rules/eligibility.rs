// Eligibility Evaluator
//
// Decides whether a prospective client qualifies for the requested card tier.
// Requirements are table-driven per tier and checked in a fixed order:
// minimum income, then VISE CLUB membership, then country of residence.
// The first failing requirement determines the reported reason.

use crate::rules::{
    error::{RulesError, RulesResult},
    types::{is_restricted_country, CardTier, RESTRICTED_COUNTRIES_DISPLAY},
};

/// Attributes of a prospective client relevant to eligibility
#[derive(Debug, Clone)]
pub struct EligibilityApplication<'a> {
    pub name: &'a str,
    pub country: &'a str,
    pub monthly_income: f64,
    pub vise_club: bool,
    pub card_tier: CardTier,
}

/// Registration requirements of a single tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRequirements {
    /// Minimum monthly income in USD, inclusive
    pub min_monthly_income: Option<f64>,
    pub requires_vise_club: bool,
    pub restricts_residency: bool,
}

impl TierRequirements {
    /// Requirement table keyed by tier
    pub fn for_tier(tier: CardTier) -> Self {
        match tier {
            CardTier::Classic => Self {
                min_monthly_income: None,
                requires_vise_club: false,
                restricts_residency: false,
            },
            CardTier::Gold => Self {
                min_monthly_income: Some(500.0),
                requires_vise_club: false,
                restricts_residency: false,
            },
            CardTier::Platinum => Self {
                min_monthly_income: Some(1000.0),
                requires_vise_club: true,
                restricts_residency: false,
            },
            CardTier::Black | CardTier::White => Self {
                min_monthly_income: Some(2000.0),
                requires_vise_club: true,
                restricts_residency: true,
            },
        }
    }
}

/// Evaluates registration eligibility
pub struct EligibilityEvaluator;

impl EligibilityEvaluator {
    /// Evaluate an application against its tier's requirements
    ///
    /// # Returns
    /// `Ok(())` when the client qualifies, otherwise
    /// `RulesError::EligibilityRejected` with the first failing reason.
    pub fn evaluate(application: &EligibilityApplication<'_>) -> RulesResult<()> {
        let tier = application.card_tier;
        let requirements = TierRequirements::for_tier(tier);

        if let Some(min_income) = requirements.min_monthly_income {
            if application.monthly_income < min_income {
                return Err(RulesError::EligibilityRejected(format!(
                    "Client does not meet the minimum monthly income of {} USD for {}",
                    min_income, tier
                )));
            }
        }

        if requirements.requires_vise_club && !application.vise_club {
            return Err(RulesError::EligibilityRejected(format!(
                "Client does not have the VISE CLUB membership required for {}",
                tier
            )));
        }

        if requirements.restricts_residency && is_restricted_country(application.country) {
            return Err(RulesError::EligibilityRejected(format!(
                "Client with {} card cannot reside in {}",
                tier, RESTRICTED_COUNTRIES_DISPLAY
            )));
        }

        tracing::debug!(
            "Client '{}' eligible for {} card",
            application.name,
            tier
        );
        Ok(())
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn any_tier() -> impl Strategy<Value = CardTier> {
        prop::sample::select(CardTier::ALL.to_vec())
    }

    fn any_country() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["USA", "France", "China", "Vietnam", "India", "Iran", "Irán"])
    }

    /// Income below a tier's minimum is always rejected with the income reason
    #[test]
    fn prop_income_below_minimum_rejected() {
        proptest!(|(
            tier in any_tier(),
            income_cents in 0u32..200_000u32,
            club in any::<bool>(),
            country in any_country(),
        )| {
            let income = income_cents as f64 / 100.0;
            let app = EligibilityApplication {
                name: "Prop",
                country,
                monthly_income: income,
                vise_club: club,
                card_tier: tier,
            };
            if let Some(min) = TierRequirements::for_tier(tier).min_monthly_income {
                if income < min {
                    let result = EligibilityEvaluator::evaluate(&app);
                    let is_income_rejection = matches!(
                        &result,
                        Err(RulesError::EligibilityRejected(reason)) if reason.contains("minimum monthly income")
                    );
                    prop_assert!(is_income_rejection, "got {:?}", result);
                }
            }
        });
    }

    /// Club-requiring tiers reject non-members even when income qualifies
    #[test]
    fn prop_club_required_for_premium_tiers() {
        proptest!(|(
            tier in prop::sample::select(vec![CardTier::Platinum, CardTier::Black, CardTier::White]),
            income in 2000.0f64..1_000_000.0,
            country in any_country(),
        )| {
            let app = EligibilityApplication {
                name: "Prop",
                country,
                monthly_income: income,
                vise_club: false,
                card_tier: tier,
            };
            let result = EligibilityEvaluator::evaluate(&app);
            let is_club_rejection = matches!(
                &result,
                Err(RulesError::EligibilityRejected(reason)) if reason.contains("VISE CLUB")
            );
            prop_assert!(is_club_rejection, "got {:?}", result);
        });
    }
}
