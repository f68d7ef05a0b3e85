//! Cap usage calculation.
//!
//! Usage is prorated to the league's current day:
//! 1. Active and short-term IR contracts.
//! 2. Long-term IR contracts, which also form the relief pool.
//! 3. Buried contracts, above the buried threshold only.
//! 4. Salary retained on players traded away.
//!
//! LTIR relief is then `min(pool, max(0, base - prorated ceiling))`.
//!
//! A player's charge is reduced by whatever other teams retain on him.
//! Dangling ids (a rostered player with no contract) charge nothing.

use super::proration::prorate;
use crate::domain::cap_accounting::value_objects::CapUsage;
use crate::domain::ledger::{LeagueState, TeamState};
use crate::domain::shared::{DomainError, Money, PlayerId, TeamId};

/// Computes cap usage against the league ledger.
///
/// Overrides replace the league's record of a team, so trade previews
/// can be measured on scratch copies.
#[derive(Debug, Clone, Copy)]
pub struct CapCalculator<'a> {
    league: &'a LeagueState,
    overrides: &'a [TeamState],
}

impl<'a> CapCalculator<'a> {
    /// Calculator over the real ledger.
    #[must_use]
    pub const fn new(league: &'a LeagueState) -> Self {
        Self {
            league,
            overrides: &[],
        }
    }

    /// Measure against replacement team records.
    #[must_use]
    pub const fn with_overrides(mut self, teams: &'a [TeamState]) -> Self {
        self.overrides = teams;
        self
    }

    /// The league being measured.
    #[must_use]
    pub const fn league(&self) -> &'a LeagueState {
        self.league
    }

    /// Team record in effect, override first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn team(&self, team_id: &TeamId) -> Result<&'a TeamState, DomainError> {
        match self.overrides.iter().find(|t| &t.id == team_id) {
            Some(team) => Ok(team),
            None => self.league.team(team_id),
        }
    }

    fn teams(&self) -> impl Iterator<Item = &'a TeamState> + 'a {
        let overrides = self.overrides;
        let league = self.league;
        league
            .teams
            .values()
            .filter(move |t| !overrides.iter().any(|o| o.id == t.id))
            .chain(overrides.iter())
    }

    /// Usage for a team id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn usage_for(&self, team_id: &TeamId) -> Result<CapUsage, DomainError> {
        Ok(self.usage(self.team(team_id)?))
    }

    /// Prorated cap usage for a team record.
    #[must_use]
    pub fn usage(&self, team: &TeamState) -> CapUsage {
        let finance = &self.league.finance;
        let day = self.league.day_index();
        let days = finance.season_days;

        let charge = |player_id: &PlayerId| prorate(self.player_charge(&team.id, player_id), days, day);

        let roster_charge: Money = team
            .active
            .iter()
            .chain(team.short_term_ir.iter())
            .map(charge)
            .sum();
        let ltir_pool: Money = team.long_term_ir.iter().map(charge).sum();
        let buried_charge: Money = team
            .buried
            .iter()
            .map(|p| {
                let excess = (self.player_charge(&team.id, p) - finance.buried_threshold).non_negative();
                prorate(excess, days, day)
            })
            .sum();
        let retained_charge: Money = team
            .active_slices()
            .map(|s| prorate(s.cap_hit, days, day))
            .sum();

        let base_usage = roster_charge + ltir_pool + buried_charge + retained_charge;
        let prorated_ceiling = prorate(finance.cap_ceiling, days, day);
        let ltir_relief = ltir_pool.min((base_usage - prorated_ceiling).non_negative());

        CapUsage {
            team_id: team.id.clone(),
            season: finance.season,
            day_index: day,
            roster_charge,
            ltir_pool,
            buried_charge,
            retained_charge,
            base_usage,
            ltir_relief,
            total_usage: base_usage - ltir_relief,
            prorated_ceiling,
        }
    }

    /// Prorated cap floor, if the league has one.
    #[must_use]
    pub fn prorated_floor(&self) -> Option<Money> {
        let finance = &self.league.finance;
        finance
            .cap_floor
            .map(|floor| prorate(floor, finance.season_days, self.league.day_index()))
    }

    /// Full-season cap hit a team carries for a player it holds.
    #[must_use]
    pub fn player_charge(&self, holder: &TeamId, player_id: &PlayerId) -> Money {
        let Some(contract) = self.league.contract_of(player_id) else {
            return Money::ZERO;
        };
        let cap_hit = contract.cap_hit_for_season(self.league.finance.season);
        (cap_hit - self.retained_elsewhere(holder, player_id)).non_negative()
    }

    /// Full-season salary other teams retain on a player.
    #[must_use]
    pub fn retained_elsewhere(&self, holder: &TeamId, player_id: &PlayerId) -> Money {
        self.teams()
            .filter(|t| &t.id != holder)
            .flat_map(TeamState::active_slices)
            .filter(|s| &s.player_id == player_id)
            .map(|s| s.cap_hit)
            .sum()
    }
}
