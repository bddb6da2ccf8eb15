// Purchase Gate
//
// Rejects purchases originating in a restricted country for country-restricted
// tiers. Independent of the residency check applied at registration.

use crate::rules::{
    error::{RulesError, RulesResult},
    types::{is_restricted_country, CardTier},
};

pub struct PurchaseGate;

impl PurchaseGate {
    /// Check whether a client holding `tier` may purchase from `purchase_country`
    pub fn check(tier: CardTier, purchase_country: &str) -> RulesResult<()> {
        if tier.is_country_restricted() && is_restricted_country(purchase_country) {
            return Err(RulesError::PurchaseRejected(format!(
                "Client with {} card cannot make purchases from {}",
                tier, purchase_country
            )));
        }
        Ok(())
    }
}
