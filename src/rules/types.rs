// Domain type definitions for the card rules engine
// Provides the card tiers and the restricted-country set shared by every evaluator

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Card tier requested at registration
///
/// Closed set of five tiers. Tiers carry no intrinsic ranking; every policy
/// difference between them lives in the per-tier tables of the evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CardTier {
    Classic,
    Gold,
    Platinum,
    Black,
    White,
}

impl CardTier {
    /// All tiers, in declaration order
    #[cfg(test)]
    pub const ALL: [CardTier; 5] = [
        CardTier::Classic,
        CardTier::Gold,
        CardTier::Platinum,
        CardTier::Black,
        CardTier::White,
    ];

    /// Convert tier to its wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CardTier::Classic => "Classic",
            CardTier::Gold => "Gold",
            CardTier::Platinum => "Platinum",
            CardTier::Black => "Black",
            CardTier::White => "White",
        }
    }

    /// Whether the tier forbids residency in, and purchases from, restricted countries
    pub fn is_country_restricted(&self) -> bool {
        matches!(self, CardTier::Black | CardTier::White)
    }
}

impl fmt::Display for CardTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Countries where Black and White cardholders may neither reside nor purchase.
///
/// Membership is an exact string match; Iran is listed under both spellings.
pub const RESTRICTED_COUNTRIES: [&str; 5] = ["China", "Vietnam", "India", "Irán", "Iran"];

/// Human-readable list used in rejection messages
pub const RESTRICTED_COUNTRIES_DISPLAY: &str = "China, Vietnam, India or Iran";

/// Check whether a country is in the restricted set
pub fn is_restricted_country(country: &str) -> bool {
    RESTRICTED_COUNTRIES.contains(&country)
}
