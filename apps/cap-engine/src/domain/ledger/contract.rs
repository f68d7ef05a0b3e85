//! Standard player contracts.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{ContractId, DomainError, Money, PlayerId, SeasonLabel};

/// One season of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTerm {
    /// Season this term covers.
    pub season: SeasonLabel,
    /// Base salary.
    pub base_salary: Money,
    /// Signing bonus paid for the season.
    #[serde(default)]
    pub signing_bonus: Money,
    /// Performance bonus. Tracked, never part of the cap hit.
    #[serde(default)]
    pub performance_bonus: Money,
    /// Two-way deal (different minor-league salary).
    #[serde(default)]
    pub two_way: bool,
}

impl ContractTerm {
    /// One-way term with base salary only.
    #[must_use]
    pub const fn new(season: SeasonLabel, base_salary: Money) -> Self {
        Self {
            season,
            base_salary,
            signing_bonus: Money::ZERO,
            performance_bonus: Money::ZERO,
            two_way: false,
        }
    }

    /// Set the signing bonus.
    #[must_use]
    pub const fn with_signing_bonus(mut self, bonus: Money) -> Self {
        self.signing_bonus = bonus;
        self
    }

    /// Set the performance bonus.
    #[must_use]
    pub const fn with_performance_bonus(mut self, bonus: Money) -> Self {
        self.performance_bonus = bonus;
        self
    }

    /// Guaranteed cap hit: base salary plus signing bonus.
    #[must_use]
    pub fn cap_hit(&self) -> Money {
        self.base_salary + self.signing_bonus
    }
}

/// Negotiated clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContractClauses {
    /// Player cannot be traded without consent.
    pub no_trade: bool,
    /// Player cannot be moved (traded, waived or demoted) without consent.
    pub no_move: bool,
    /// Entry-level contract.
    pub entry_level: bool,
}

/// A standard player contract (SPC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Contract ID.
    pub id: ContractId,
    /// Signed player.
    pub player_id: PlayerId,
    /// First season, inclusive.
    pub start: SeasonLabel,
    /// Last season, inclusive.
    pub end: SeasonLabel,
    /// Per-season terms ordered by season.
    pub terms: Vec<ContractTerm>,
    /// Negotiated clauses.
    #[serde(default)]
    pub clauses: ContractClauses,
}

impl Contract {
    /// Build a contract from explicit terms.
    ///
    /// # Errors
    ///
    /// Returns error unless the terms are non-empty, cover consecutive
    /// seasons exactly once each, and carry no negative amounts.
    pub fn new(
        id: ContractId,
        player_id: PlayerId,
        terms: Vec<ContractTerm>,
        clauses: ContractClauses,
    ) -> Result<Self, DomainError> {
        let (Some(first), Some(last)) = (terms.first(), terms.last()) else {
            return Err(DomainError::invalid("terms", "contract needs at least one season"));
        };
        let (start, end) = (first.season, last.season);

        for (i, term) in terms.iter().enumerate() {
            let expected = start.offset(i as u16);
            if term.season != expected {
                return Err(DomainError::InvariantViolation {
                    aggregate: "Contract".to_string(),
                    invariant: "exactly one term per season in range".to_string(),
                    state: format!("term {i} is {} but expected {expected}", term.season),
                });
            }
            term.base_salary.validate_non_negative("base_salary")?;
            term.signing_bonus.validate_non_negative("signing_bonus")?;
            term.performance_bonus.validate_non_negative("performance_bonus")?;
        }

        Ok(Self {
            id,
            player_id,
            start,
            end,
            terms,
            clauses,
        })
    }

    /// Flat contract: `years` consecutive one-way seasons at `aav`.
    ///
    /// # Errors
    ///
    /// Returns error if `years` is zero or `aav` is negative.
    pub fn flat(
        id: ContractId,
        player_id: PlayerId,
        start: SeasonLabel,
        years: u16,
        aav: Money,
    ) -> Result<Self, DomainError> {
        if years == 0 {
            return Err(DomainError::invalid("years", "must be at least 1"));
        }
        aav.validate_non_negative("aav")?;

        let terms = (0..years)
            .map(|i| ContractTerm::new(start.offset(i), aav))
            .collect();
        Self::new(id, player_id, terms, ContractClauses::default())
    }

    /// Set clauses.
    #[must_use]
    pub const fn with_clauses(mut self, clauses: ContractClauses) -> Self {
        self.clauses = clauses;
        self
    }

    /// Term for a season, if the contract has one.
    #[must_use]
    pub fn term_for(&self, season: SeasonLabel) -> Option<&ContractTerm> {
        self.terms.iter().find(|t| t.season == season)
    }

    /// Cap hit for a season; zero when no term matches.
    #[must_use]
    pub fn cap_hit_for_season(&self, season: SeasonLabel) -> Money {
        self.term_for(season).map_or(Money::ZERO, ContractTerm::cap_hit)
    }

    /// True when `season` is within `[start, end]`.
    #[must_use]
    pub fn is_active_in(&self, season: SeasonLabel) -> bool {
        self.start <= season && season <= self.end
    }

    /// Terms from `season` onward.
    pub fn remaining_terms(&self, season: SeasonLabel) -> impl Iterator<Item = &ContractTerm> {
        self.terms.iter().filter(move |t| t.season >= season)
    }

    /// Number of seasons left, counting `season` itself.
    #[must_use]
    pub fn remaining_seasons(&self, season: SeasonLabel) -> u16 {
        self.remaining_terms(season).count() as u16
    }

    /// Average annual value across all terms.
    #[must_use]
    pub fn average_annual_value(&self) -> Money {
        if self.terms.is_empty() {
            return Money::ZERO;
        }
        let total: Money = self.terms.iter().map(ContractTerm::cap_hit).sum();
        (total / self.terms.len() as u32).round()
    }
}
