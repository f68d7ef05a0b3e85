//! Compliance Service
//!
//! Evaluates every league rule for a team and reports all violations
//! together. Nothing here short-circuits.

use tracing::debug;

use super::cap_calculator::CapCalculator;
use crate::domain::cap_accounting::value_objects::{CapUsage, ConstraintResult, ConstraintViolation};
use crate::domain::ledger::{LeagueState, TeamState};
use crate::domain::shared::{DomainError, TeamId};

/// Roster below the minimum.
pub const ROSTER_BELOW_MINIMUM: &str = "ROSTER_BELOW_MINIMUM";
/// Roster above the maximum.
pub const ROSTER_ABOVE_MAXIMUM: &str = "ROSTER_ABOVE_MAXIMUM";
/// Too many standard player contracts.
pub const SPC_LIMIT_EXCEEDED: &str = "SPC_LIMIT_EXCEEDED";
/// Too many retained-salary slices.
pub const RETAINED_SLICE_LIMIT_EXCEEDED: &str = "RETAINED_SLICE_LIMIT_EXCEEDED";
/// Aggregate retained salary above its share of the ceiling.
pub const RETAINED_SHARE_EXCEEDED: &str = "RETAINED_SHARE_EXCEEDED";
/// Usage above the prorated ceiling.
pub const CAP_CEILING_EXCEEDED: &str = "CAP_CEILING_EXCEEDED";
/// Usage below the prorated floor.
pub const CAP_FLOOR_NOT_MET: &str = "CAP_FLOOR_NOT_MET";

/// Checks teams against the league's rules.
#[derive(Debug, Clone, Copy)]
pub struct ComplianceService<'a> {
    calculator: CapCalculator<'a>,
}

impl<'a> ComplianceService<'a> {
    /// Service over the real ledger.
    #[must_use]
    pub const fn new(league: &'a LeagueState) -> Self {
        Self {
            calculator: CapCalculator::new(league),
        }
    }

    /// Check replacement team records instead of the league's.
    #[must_use]
    pub const fn with_overrides(mut self, teams: &'a [TeamState]) -> Self {
        self.calculator = self.calculator.with_overrides(teams);
        self
    }

    /// Calculator used for usage figures.
    #[must_use]
    pub const fn calculator(&self) -> &CapCalculator<'a> {
        &self.calculator
    }

    /// Check a team by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn check_team_id(&self, team_id: &TeamId) -> Result<ConstraintResult, DomainError> {
        Ok(self.check_team(self.calculator.team(team_id)?))
    }

    /// Check every rule for a team record.
    #[must_use]
    pub fn check_team(&self, team: &TeamState) -> ConstraintResult {
        let usage = self.calculator.usage(team);
        let mut result = ConstraintResult::success();

        result.merge(self.check_roster_size(team));
        result.merge(self.check_spc_limit(team));
        result.merge(self.check_retained(team));
        result.merge(self.check_ceiling(&usage));
        result.merge(self.check_floor(&usage));

        debug!(
            team_id = %team.id,
            passed = result.passed,
            violations = result.violations.len(),
            total_usage = %usage.total_usage,
            "Compliance checked"
        );
        result
    }

    /// Active roster within `[min_roster, max_roster]`.
    ///
    /// A short roster warns rather than blocks: signings are how a team
    /// climbs back to the minimum.
    #[must_use]
    pub fn check_roster_size(&self, team: &TeamState) -> ConstraintResult {
        let finance = &self.calculator.league().finance;
        let count = team.active_count();
        let mut result = ConstraintResult::success();

        if count > finance.max_roster {
            result.add_violation(
                ConstraintViolation::error(
                    ROSTER_ABOVE_MAXIMUM,
                    format!(
                        "{}: active roster size {count} exceeds maximum {}",
                        team.id, finance.max_roster
                    ),
                )
                .with_team(&team.id)
                .with_observed(count)
                .with_limit(finance.max_roster),
            );
        }
        if count < finance.min_roster {
            result.add_violation(
                ConstraintViolation::warning(
                    ROSTER_BELOW_MINIMUM,
                    format!(
                        "{}: active roster size {count} is below minimum {}",
                        team.id, finance.min_roster
                    ),
                )
                .with_team(&team.id)
                .with_observed(count)
                .with_limit(finance.min_roster),
            );
        }
        result
    }

    /// SPC count within the league limit.
    #[must_use]
    pub fn check_spc_limit(&self, team: &TeamState) -> ConstraintResult {
        let limit = self.calculator.league().finance.spc_limit;
        if team.spc_count <= limit {
            return ConstraintResult::success();
        }
        ConstraintResult::rejected(
            ConstraintViolation::error(
                SPC_LIMIT_EXCEEDED,
                format!(
                    "{}: {} standard player contracts exceeds limit {limit}",
                    team.id, team.spc_count
                ),
            )
            .with_team(&team.id)
            .with_observed(team.spc_count)
            .with_limit(limit),
        )
    }

    /// Retained-salary slice count and aggregate share.
    #[must_use]
    pub fn check_retained(&self, team: &TeamState) -> ConstraintResult {
        let finance = &self.calculator.league().finance;
        let mut result = ConstraintResult::success();

        let slices = team.active_slices().count();
        let max_slices = usize::try_from(finance.max_retained_slices).unwrap_or(usize::MAX);
        if slices > max_slices {
            result.add_violation(
                ConstraintViolation::error(
                    RETAINED_SLICE_LIMIT_EXCEEDED,
                    format!(
                        "{}: {slices} retained-salary slices exceeds limit {}",
                        team.id, finance.max_retained_slices
                    ),
                )
                .with_team(&team.id)
                .with_observed(slices)
                .with_limit(finance.max_retained_slices),
            );
        }

        let retained = team.retained_total();
        let max_retained = finance.max_retained_amount();
        if retained > max_retained {
            result.add_violation(
                ConstraintViolation::error(
                    RETAINED_SHARE_EXCEEDED,
                    format!(
                        "{}: retained salary {retained} exceeds {max_retained} allowed",
                        team.id
                    ),
                )
                .with_team(&team.id)
                .with_observed(retained)
                .with_limit(max_retained),
            );
        }
        result
    }

    /// Usage at or under the prorated ceiling.
    #[must_use]
    pub fn check_ceiling(&self, usage: &CapUsage) -> ConstraintResult {
        if !usage.is_over_ceiling() {
            return ConstraintResult::success();
        }
        ConstraintResult::rejected(
            ConstraintViolation::error(
                CAP_CEILING_EXCEEDED,
                format!(
                    "{}: cap usage {} exceeds prorated ceiling {}",
                    usage.team_id, usage.total_usage, usage.prorated_ceiling
                ),
            )
            .with_team(&usage.team_id)
            .with_observed(usage.total_usage)
            .with_limit(usage.prorated_ceiling),
        )
    }

    /// Usage at or above the prorated floor. Never blocking.
    #[must_use]
    pub fn check_floor(&self, usage: &CapUsage) -> ConstraintResult {
        let Some(floor) = self.calculator.prorated_floor() else {
            return ConstraintResult::success();
        };
        if usage.total_usage >= floor {
            return ConstraintResult::success();
        }
        ConstraintResult::from_violations(vec![
            ConstraintViolation::warning(
                CAP_FLOOR_NOT_MET,
                format!(
                    "{}: cap usage {} is below prorated floor {floor}",
                    usage.team_id, usage.total_usage
                ),
            )
            .with_team(&usage.team_id)
            .with_observed(usage.total_usage)
            .with_limit(floor),
        ])
    }
}

/// Check a team against the league's rules.
///
/// # Errors
///
/// Returns `NotFound` if the team does not exist.
pub fn check_team(league: &LeagueState, team_id: &TeamId) -> Result<ConstraintResult, DomainError> {
    ComplianceService::new(league).check_team_id(team_id)
}
