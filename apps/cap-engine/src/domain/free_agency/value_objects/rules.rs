//! Free agency rules: who is restricted, what a qualifying offer pays
//! and what an offer sheet costs in compensation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::FreeAgencyConfig;
use crate::domain::ledger::Player;
use crate::domain::shared::{DomainError, Money};

/// Qualifying offer multiplier for prior cap hits up to a bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifyingOfferTier {
    /// Inclusive upper bound; `None` for the top tier.
    pub max_prior_cap_hit: Option<Money>,
    /// Multiplier on the prior cap hit.
    pub multiplier: Decimal,
}

/// Qualifying offer tiers, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifyingOfferSchedule {
    tiers: Vec<QualifyingOfferTier>,
}

impl QualifyingOfferSchedule {
    /// Schedule from ascending tiers ending in an open tier.
    ///
    /// # Errors
    ///
    /// Returns error if the tiers are empty, out of order, or the last
    /// tier is bounded.
    pub fn new(tiers: Vec<QualifyingOfferTier>) -> Result<Self, DomainError> {
        let bounds: Vec<Option<Money>> = tiers.iter().map(|t| t.max_prior_cap_hit).collect();
        check_tier_bounds("qualifying_offer_tiers", &bounds)?;
        Ok(Self { tiers })
    }

    /// Qualifying offer for a prior cap hit, rounded half-up to the dollar.
    #[must_use]
    pub fn amount_for(&self, prior_cap_hit: Money) -> Money {
        let multiplier = self
            .tiers
            .iter()
            .find(|t| t.max_prior_cap_hit.is_none_or(|max| prior_cap_hit <= max))
            .map_or(Decimal::ONE, |t| t.multiplier);
        (prior_cap_hit * multiplier).round_dollars()
    }
}

impl Default for QualifyingOfferSchedule {
    fn default() -> Self {
        Self {
            tiers: vec![
                QualifyingOfferTier {
                    max_prior_cap_hit: Some(Money::dollars(1_500_000)),
                    multiplier: dec!(1.20),
                },
                QualifyingOfferTier {
                    max_prior_cap_hit: Some(Money::dollars(4_238_000)),
                    multiplier: dec!(1.10),
                },
                QualifyingOfferTier {
                    max_prior_cap_hit: None,
                    multiplier: dec!(1.05),
                },
            ],
        }
    }
}

/// Compensation owed for offer sheets up to an AAV bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationTier {
    /// Inclusive upper bound; `None` for the top tier.
    pub max_aav: Option<Money>,
    /// Compensation label.
    pub compensation: String,
}

/// Offer-sheet compensation table, ascending. Labels only; no picks move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationTable {
    tiers: Vec<CompensationTier>,
}

impl CompensationTable {
    /// Table from ascending tiers ending in an open tier.
    ///
    /// # Errors
    ///
    /// Returns error if the tiers are empty, out of order, or the last
    /// tier is bounded.
    pub fn new(tiers: Vec<CompensationTier>) -> Result<Self, DomainError> {
        let bounds: Vec<Option<Money>> = tiers.iter().map(|t| t.max_aav).collect();
        check_tier_bounds("compensation_tiers", &bounds)?;
        Ok(Self { tiers })
    }

    /// Compensation label for an offer AAV.
    #[must_use]
    pub fn compensation_for(&self, aav: Money) -> &str {
        self.tiers
            .iter()
            .find(|t| t.max_aav.is_none_or(|max| aav <= max))
            .map_or("none", |t| t.compensation.as_str())
    }
}

impl Default for CompensationTable {
    fn default() -> Self {
        let tiers = [
            (Some(1_500_000), "none"),
            (Some(2_300_000), "3rd-round pick"),
            (Some(4_600_000), "2nd-round pick"),
            (Some(6_900_000), "1st- and 3rd-round picks"),
            (Some(9_200_000), "1st-, 2nd- and 3rd-round picks"),
            (Some(11_500_000), "two 1st-round picks, a 2nd and a 3rd"),
            (None, "four 1st-round picks"),
        ]
        .into_iter()
        .map(|(max, label)| CompensationTier {
            max_aav: max.map(Money::dollars),
            compensation: label.to_string(),
        })
        .collect();
        Self { tiers }
    }
}

fn check_tier_bounds(field: &str, bounds: &[Option<Money>]) -> Result<(), DomainError> {
    let Some((last, rest)) = bounds.split_last() else {
        return Err(DomainError::invalid(field, "needs at least one tier"));
    };
    if last.is_some() {
        return Err(DomainError::invalid(field, "last tier must be open-ended"));
    }
    let mut previous: Option<Money> = None;
    for bound in rest {
        let Some(bound) = *bound else {
            return Err(DomainError::invalid(field, "only the last tier may be open-ended"));
        };
        if previous.is_some_and(|p| bound <= p) {
            return Err(DomainError::invalid(field, "bounds must ascend"));
        }
        previous = Some(bound);
    }
    Ok(())
}

/// Everything the free agency engine needs to know about the league's
/// free agency rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeAgencyRules {
    /// Players younger than this are restricted.
    pub rfa_age_limit: u8,
    /// Players with fewer accrued seasons than this are restricted.
    pub rfa_accrued_seasons_limit: u8,
    /// Days a tendered qualifying offer stays open.
    pub qo_tender_window_days: u32,
    /// Days the rights team has to match an offer sheet.
    pub match_window_days: u32,
    /// Qualifying offer tiers.
    pub qualifying_offers: QualifyingOfferSchedule,
    /// Offer-sheet compensation.
    pub compensation: CompensationTable,
}

impl Default for FreeAgencyRules {
    fn default() -> Self {
        Self {
            rfa_age_limit: 27,
            rfa_accrued_seasons_limit: 7,
            qo_tender_window_days: 7,
            match_window_days: 7,
            qualifying_offers: QualifyingOfferSchedule::default(),
            compensation: CompensationTable::default(),
        }
    }
}

impl FreeAgencyRules {
    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if a money value is not representable or a tier
    /// table is malformed.
    pub fn from_config(config: &FreeAgencyConfig) -> Result<Self, DomainError> {
        let qo_tiers = config
            .qualifying_offer_tiers
            .iter()
            .map(|t| {
                Ok(QualifyingOfferTier {
                    max_prior_cap_hit: t
                        .max_prior_cap_hit
                        .map(|m| Money::try_from_f64("max_prior_cap_hit", m))
                        .transpose()?,
                    multiplier: Decimal::try_from(t.multiplier)
                        .map(|m| m.round_dp(6))
                        .map_err(|_| DomainError::invalid("multiplier", t.multiplier.to_string()))?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let comp_tiers = config
            .compensation_tiers
            .iter()
            .map(|t| {
                Ok(CompensationTier {
                    max_aav: t
                        .max_aav
                        .map(|m| Money::try_from_f64("max_aav", m))
                        .transpose()?,
                    compensation: t.compensation.clone(),
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(Self {
            rfa_age_limit: config.rfa_age_limit,
            rfa_accrued_seasons_limit: config.rfa_accrued_seasons_limit,
            qo_tender_window_days: config.qo_tender_window_days,
            match_window_days: config.offer_sheet_match_window_days,
            qualifying_offers: QualifyingOfferSchedule::new(qo_tiers)?,
            compensation: CompensationTable::new(comp_tiers)?,
        })
    }

    /// True when an expiring player would be restricted, given a rights team.
    #[must_use]
    pub const fn is_young(&self, player: &Player) -> bool {
        player.age < self.rfa_age_limit || player.accrued_seasons < self.rfa_accrued_seasons_limit
    }
}
