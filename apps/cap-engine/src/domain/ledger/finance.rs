//! League-wide financial rules for a season.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::LeagueRulesConfig;
use crate::domain::shared::{DomainError, Money, SeasonLabel};

/// Cap and roster rules in force for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonFinance {
    /// Season the rules apply to.
    pub season: SeasonLabel,
    /// Upper limit.
    pub cap_ceiling: Money,
    /// Lower limit, if the league enforces one.
    #[serde(default)]
    pub cap_floor: Option<Money>,
    /// Minimum active roster size.
    pub min_roster: u32,
    /// Maximum active roster size.
    pub max_roster: u32,
    /// Maximum standard player contracts per team.
    pub spc_limit: u32,
    /// Length of the season in days, used for proration.
    pub season_days: u32,
    /// Cap hit a buried contract may shed down to.
    pub buried_threshold: Money,
    /// Maximum retained-salary slices per team.
    pub max_retained_slices: u32,
    /// Maximum aggregate retained salary as a share of the ceiling.
    pub max_retained_share: Decimal,
    /// Maximum share of a single contract that may be retained.
    pub max_retention_pct: Decimal,
}

impl SeasonFinance {
    /// Standard rules for a season with the given ceiling.
    #[must_use]
    pub fn new(season: SeasonLabel, cap_ceiling: Money) -> Self {
        Self {
            season,
            cap_ceiling,
            cap_floor: None,
            min_roster: 20,
            max_roster: 23,
            spc_limit: 50,
            season_days: 186,
            buried_threshold: Money::dollars(1_150_000),
            max_retained_slices: 3,
            max_retained_share: dec!(0.15),
            max_retention_pct: dec!(0.5),
        }
    }

    /// Build the rules from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the resulting rules are inconsistent.
    pub fn from_config(config: &LeagueRulesConfig, season: SeasonLabel) -> Result<Self, DomainError> {
        let finance = Self {
            season,
            cap_ceiling: Money::try_from_f64("cap_ceiling", config.cap_ceiling)?,
            cap_floor: config
                .cap_floor
                .map(|floor| Money::try_from_f64("cap_floor", floor))
                .transpose()?,
            min_roster: config.min_roster,
            max_roster: config.max_roster,
            spc_limit: config.spc_limit,
            season_days: config.season_days,
            buried_threshold: Money::try_from_f64("buried_threshold", config.buried_threshold)?,
            max_retained_slices: config.max_retained_slices,
            max_retained_share: Decimal::try_from(config.max_retained_share)
                .map_err(|e| DomainError::invalid("max_retained_share", e.to_string()))?,
            max_retention_pct: Decimal::try_from(config.max_retention_pct)
                .map_err(|e| DomainError::invalid("max_retention_pct", e.to_string()))?,
        };
        finance.validate()?;
        Ok(finance)
    }

    /// Check the rules are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.season_days == 0 {
            return Err(DomainError::invalid("season_days", "must be positive"));
        }
        if !self.cap_ceiling.is_positive() {
            return Err(DomainError::invalid("cap_ceiling", "must be positive"));
        }
        if let Some(floor) = self.cap_floor {
            if floor > self.cap_ceiling {
                return Err(DomainError::invalid("cap_floor", "exceeds cap_ceiling"));
            }
        }
        if self.min_roster > self.max_roster {
            return Err(DomainError::invalid("min_roster", "exceeds max_roster"));
        }
        if self.max_retention_pct <= Decimal::ZERO || self.max_retention_pct > Decimal::ONE {
            return Err(DomainError::invalid("max_retention_pct", "must be in (0, 1]"));
        }
        Ok(())
    }

    /// Aggregate retained salary allowed per team.
    #[must_use]
    pub fn max_retained_amount(&self) -> Money {
        (self.cap_ceiling * self.max_retained_share).round()
    }
}
