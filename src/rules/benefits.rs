// Benefit Selector
//
// Evaluates every discount rule of the client's tier against a purchase and keeps
// the single largest discount. Rules are listed per tier in table order; on a tie
// the earlier rule wins.

use chrono::Weekday;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::rules::{calendar::DayClassification, types::CardTier};

const MON_TO_WED: &[Weekday] = &[Weekday::Mon, Weekday::Tue, Weekday::Wed];
const MON_TO_FRI: &[Weekday] = &[
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];
const SATURDAY: &[Weekday] = &[Weekday::Sat];
const WEEKEND: &[Weekday] = &[Weekday::Sat, Weekday::Sun];

/// Condition under which a benefit rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCondition {
    /// Purchase falls on one of `days` and its amount is strictly above `min_amount`
    OnDays {
        days: &'static [Weekday],
        min_amount: u32,
    },
    /// Purchase country differs from the client's country of residence
    Abroad,
}

/// A single discount rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenefitRule {
    pub condition: RuleCondition,
    /// Discount as a whole percentage of the purchase amount
    pub percent: u32,
}

impl BenefitRule {
    const fn on_days(days: &'static [Weekday], min_amount: u32, percent: u32) -> Self {
        Self {
            condition: RuleCondition::OnDays { days, min_amount },
            percent,
        }
    }

    const fn abroad(percent: u32) -> Self {
        Self {
            condition: RuleCondition::Abroad,
            percent,
        }
    }

    /// Discount as a fraction of the purchase amount
    ///
    /// Never above one, so applying it cannot grow past the amount itself.
    pub fn rate(&self) -> Decimal {
        Decimal::new(i64::from(self.percent), 2)
    }

    /// Label reported when this rule is the one applied
    pub fn label(&self, day: &DayClassification) -> String {
        match self.condition {
            RuleCondition::OnDays { .. } => format!("{} - {}% discount", day.label(), self.percent),
            RuleCondition::Abroad => format!("Abroad - {}% discount", self.percent),
        }
    }
}

const CLASSIC_RULES: &[BenefitRule] = &[];

const GOLD_RULES: &[BenefitRule] = &[BenefitRule::on_days(MON_TO_WED, 100, 15)];

const PLATINUM_RULES: &[BenefitRule] = &[
    BenefitRule::on_days(MON_TO_WED, 100, 20),
    BenefitRule::on_days(SATURDAY, 200, 30),
    BenefitRule::abroad(5),
];

const BLACK_RULES: &[BenefitRule] = &[
    BenefitRule::on_days(MON_TO_WED, 100, 25),
    BenefitRule::on_days(SATURDAY, 200, 35),
    BenefitRule::abroad(5),
];

const WHITE_RULES: &[BenefitRule] = &[
    BenefitRule::on_days(MON_TO_FRI, 100, 25),
    BenefitRule::on_days(WEEKEND, 200, 35),
    BenefitRule::abroad(5),
];

/// Benefit rule table keyed by tier
pub fn rules_for_tier(tier: CardTier) -> &'static [BenefitRule] {
    match tier {
        CardTier::Classic => CLASSIC_RULES,
        CardTier::Gold => GOLD_RULES,
        CardTier::Platinum => PLATINUM_RULES,
        CardTier::Black => BLACK_RULES,
        CardTier::White => WHITE_RULES,
    }
}

/// Whether a purchase counts as made abroad
///
/// Countries are compared trimmed and case-insensitively.
pub fn is_abroad(client_country: &str, purchase_country: &str) -> bool {
    purchase_country.trim().to_lowercase() != client_country.trim().to_lowercase()
}

/// Purchase facts the selector evaluates rules against
#[derive(Debug, Clone)]
pub struct BenefitContext<'a> {
    pub card_tier: CardTier,
    pub client_country: &'a str,
    pub purchase_country: &'a str,
    pub amount: Decimal,
    pub day: DayClassification,
}

/// A qualifying rule and the discount it would grant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenefitCandidate {
    pub discount: Decimal,
    pub label: String,
}

/// Selected benefit for a purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenefitDecision {
    /// Unrounded discount amount; zero when no rule applies
    pub discount: Decimal,
    pub benefit: Option<String>,
}

impl BenefitDecision {
    pub fn none() -> Self {
        Self {
            discount: Decimal::ZERO,
            benefit: None,
        }
    }

    /// Discount rounded to cents
    pub fn discount_applied(&self) -> Decimal {
        round_money(self.discount)
    }

    /// Amount charged after the discount, rounded to cents
    pub fn final_amount(&self, amount: Decimal) -> Decimal {
        round_money(amount - self.discount)
    }
}

/// Round a money amount to 2 decimal places, half away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub struct BenefitSelector;

impl BenefitSelector {
    /// Every candidate discount the purchase qualifies for, in table order
    pub fn candidates(ctx: &BenefitContext<'_>) -> Vec<BenefitCandidate> {
        rules_for_tier(ctx.card_tier)
            .iter()
            .filter(|rule| Self::rule_applies(rule, ctx))
            .map(|rule| BenefitCandidate {
                discount: ctx.amount * rule.rate(),
                label: rule.label(&ctx.day),
            })
            .collect()
    }

    /// Select the largest discount, or no benefit when nothing qualifies
    pub fn select(ctx: &BenefitContext<'_>) -> BenefitDecision {
        let mut best: Option<BenefitCandidate> = None;
        for candidate in Self::candidates(ctx) {
            let is_better = best
                .as_ref()
                .map_or(true, |current| candidate.discount > current.discount);
            if is_better {
                best = Some(candidate);
            }
        }

        match best {
            Some(candidate) => BenefitDecision {
                discount: candidate.discount,
                benefit: Some(candidate.label),
            },
            None => BenefitDecision::none(),
        }
    }

    fn rule_applies(rule: &BenefitRule, ctx: &BenefitContext<'_>) -> bool {
        match rule.condition {
            RuleCondition::OnDays { days, min_amount } => {
                days.contains(&ctx.day.weekday) && ctx.amount > Decimal::from(min_amount)
            }
            RuleCondition::Abroad => is_abroad(ctx.client_country, ctx.purchase_country),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ctx(
        tier: CardTier,
        amount: Decimal,
        weekday: Weekday,
        client_country: &'static str,
        purchase_country: &'static str,
    ) -> BenefitContext<'static> {
        BenefitContext {
            card_tier: tier,
            client_country,
            purchase_country,
            amount,
            day: DayClassification::new(weekday),
        }
    }

    fn decision(discount: Decimal, label: &str) -> BenefitDecision {
        BenefitDecision {
            discount,
            benefit: Some(label.to_string()),
        }
    }

    #[test]
    fn test_classic_never_discounts() {
        let c = ctx(CardTier::Classic, dec!(1000), Weekday::Mon, "USA", "France");
        assert_eq!(BenefitSelector::select(&c), BenefitDecision::none());
    }

    #[test]
    fn test_gold_early_week() {
        let c = ctx(CardTier::Gold, dec!(200), Weekday::Tue, "USA", "USA");
        assert_eq!(BenefitSelector::select(&c), decision(dec!(30), "Tuesday - 15% discount"));
    }

    #[test]
    fn test_gold_has_no_abroad_benefit() {
        let c = ctx(CardTier::Gold, dec!(200), Weekday::Thu, "USA", "France");
        assert_eq!(BenefitSelector::select(&c), BenefitDecision::none());
    }

    #[test]
    fn test_amount_threshold_is_strict() {
        let c = ctx(CardTier::Gold, dec!(100), Weekday::Mon, "USA", "USA");
        assert_eq!(BenefitSelector::select(&c), BenefitDecision::none());

        let c = ctx(CardTier::Platinum, dec!(200), Weekday::Sat, "USA", "USA");
        assert_eq!(BenefitSelector::select(&c), BenefitDecision::none());
    }

    #[test]
    fn test_small_amount_on_qualifying_weekday() {
        let c = ctx(CardTier::Black, dec!(50), Weekday::Wed, "France", "France");
        let result = BenefitSelector::select(&c);
        assert_eq!(result.discount_applied(), dec!(0));
        assert_eq!(result.benefit, None);
    }

    #[test]
    fn test_platinum_saturday_in_home_country() {
        let c = ctx(CardTier::Platinum, dec!(250), Weekday::Sat, "France", "France");
        let result = BenefitSelector::select(&c);
        assert_eq!(result, decision(dec!(75), "Saturday - 30% discount"));
        assert_eq!(result.final_amount(dec!(250)), dec!(175));
    }

    #[test]
    fn test_saturday_beats_abroad() {
        let c = ctx(CardTier::Platinum, dec!(300), Weekday::Sat, "USA", "France");
        assert_eq!(
            BenefitSelector::candidates(&c),
            vec![
                BenefitCandidate { discount: dec!(90), label: "Saturday - 30% discount".to_string() },
                BenefitCandidate { discount: dec!(15), label: "Abroad - 5% discount".to_string() },
            ]
        );
        assert_eq!(BenefitSelector::select(&c), decision(dec!(90), "Saturday - 30% discount"));
    }

    #[test]
    fn test_abroad_only() {
        let c = ctx(CardTier::Black, dec!(80), Weekday::Sun, "USA", "France");
        assert_eq!(BenefitSelector::select(&c), decision(dec!(4), "Abroad - 5% discount"));
    }

    #[test]
    fn test_black_rates() {
        let c = ctx(CardTier::Black, dec!(400), Weekday::Mon, "USA", "USA");
        assert_eq!(BenefitSelector::select(&c), decision(dec!(100), "Monday - 25% discount"));

        let c = ctx(CardTier::Black, dec!(400), Weekday::Sat, "USA", "USA");
        assert_eq!(BenefitSelector::select(&c), decision(dec!(140), "Saturday - 35% discount"));

        // Black has no Sunday or late-week benefit
        let c = ctx(CardTier::Black, dec!(400), Weekday::Sun, "USA", "USA");
        assert_eq!(BenefitSelector::select(&c), BenefitDecision::none());
        let c = ctx(CardTier::Black, dec!(400), Weekday::Thu, "USA", "USA");
        assert_eq!(BenefitSelector::select(&c), BenefitDecision::none());
    }

    #[test]
    fn test_white_covers_whole_week() {
        let c = ctx(CardTier::White, dec!(150), Weekday::Fri, "USA", "USA");
        assert_eq!(BenefitSelector::select(&c), decision(dec!(37.5), "Friday - 25% discount"));

        let c = ctx(CardTier::White, dec!(300), Weekday::Sun, "USA", "USA");
        assert_eq!(BenefitSelector::select(&c), decision(dec!(105), "Sunday - 35% discount"));

        // Weekend below the 200 threshold falls back to abroad
        let c = ctx(CardTier::White, dec!(150), Weekday::Sun, "USA", "Mexico");
        assert_eq!(BenefitSelector::select(&c), decision(dec!(7.5), "Abroad - 5% discount"));
    }

    #[test]
    fn test_largest_amounts_do_not_overflow() {
        let c = ctx(CardTier::White, Decimal::MAX, Weekday::Sat, "USA", "Mexico");
        let result = BenefitSelector::select(&c);
        assert_eq!(result.benefit.as_deref(), Some("Saturday - 35% discount"));
        assert!(result.discount < Decimal::MAX);
        assert!(result.final_amount(Decimal::MAX) > Decimal::ZERO);

        let amount = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        let c = ctx(CardTier::Black, amount, Weekday::Sat, "USA", "USA");
        assert_eq!(
            BenefitSelector::select(&c).discount_applied(),
            Decimal::from_i128_with_scale(35 * 10_i128.pow(26), 0)
        );
    }

    #[test]
    fn test_abroad_comparison_normalizes_case_and_whitespace() {
        assert!(!is_abroad("France", "  france "));
        assert!(!is_abroad("", ""));
        assert!(!is_abroad("  ", ""));
        assert!(is_abroad("France", "Spain"));
        assert!(is_abroad("", "Spain"));
    }

    #[test]
    fn test_rounding_half_up() {
        // 5% of 10.10 = 0.505 -> 0.51, final 9.595 -> 9.60
        let c = ctx(CardTier::Platinum, dec!(10.10), Weekday::Thu, "USA", "Peru");
        let result = BenefitSelector::select(&c);
        assert_eq!(result.discount, dec!(0.505));
        assert_eq!(result.discount_applied(), dec!(0.51));
        assert_eq!(result.final_amount(dec!(10.10)), dec!(9.60));
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
        assert_eq!(round_money(dec!(2.5)), dec!(2.50));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn any_tier() -> impl Strategy<Value = CardTier> {
        prop::sample::select(CardTier::ALL.to_vec())
    }

    fn any_weekday() -> impl Strategy<Value = Weekday> {
        prop::sample::select(vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ])
    }

    fn any_country() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["USA", "usa", "France", " France ", "China", ""])
    }

    /// Every candidate stays within its rule's percentage and is non-negative
    #[test]
    fn prop_candidates_bounded_by_rule_percent() {
        proptest!(|(
            tier in any_tier(),
            amount_cents in 1u32..=10_000_000u32,
            weekday in any_weekday(),
            client_country in any_country(),
            purchase_country in any_country(),
        )| {
            let amount = Decimal::from(amount_cents) / Decimal::ONE_HUNDRED;
            let c = BenefitContext {
                card_tier: tier,
                client_country,
                purchase_country,
                amount,
                day: DayClassification::new(weekday),
            };
            let max_percent = rules_for_tier(tier).iter().map(|r| r.percent).max().unwrap_or(0);
            for candidate in BenefitSelector::candidates(&c) {
                prop_assert!(candidate.discount > Decimal::ZERO);
                prop_assert!(candidate.discount <= amount * Decimal::from(max_percent) / Decimal::ONE_HUNDRED);
            }
            let decision = BenefitSelector::select(&c);
            prop_assert!(decision.discount >= Decimal::ZERO);
            prop_assert!(decision.discount_applied() <= amount);
            prop_assert!(decision.final_amount(amount) >= Decimal::ZERO);
        });
    }

    /// The selected discount is the maximum candidate
    #[test]
    fn prop_selects_maximum_candidate() {
        proptest!(|(
            tier in any_tier(),
            amount_cents in 1u32..=1_000_000u32,
            weekday in any_weekday(),
            client_country in any_country(),
            purchase_country in any_country(),
        )| {
            let c = BenefitContext {
                card_tier: tier,
                client_country,
                purchase_country,
                amount: Decimal::from(amount_cents) / Decimal::ONE_HUNDRED,
                day: DayClassification::new(weekday),
            };
            let best = BenefitSelector::candidates(&c)
                .into_iter()
                .map(|candidate| candidate.discount)
                .max()
                .unwrap_or(Decimal::ZERO);
            prop_assert_eq!(BenefitSelector::select(&c).discount, best);
        });
    }

    /// Selection is deterministic for identical inputs
    #[test]
    fn prop_selection_is_repeatable() {
        proptest!(|(
            tier in any_tier(),
            amount_cents in 1u32..=1_000_000u32,
            weekday in any_weekday(),
            purchase_country in any_country(),
        )| {
            let c = BenefitContext {
                card_tier: tier,
                client_country: "USA",
                purchase_country,
                amount: Decimal::from(amount_cents) / Decimal::ONE_HUNDRED,
                day: DayClassification::new(weekday),
            };
            prop_assert_eq!(BenefitSelector::select(&c), BenefitSelector::select(&c));
        });
    }
}
