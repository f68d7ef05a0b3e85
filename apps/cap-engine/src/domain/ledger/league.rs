//! League aggregate root.
//!
//! Every other component reads and mutates the ledger through this type.
//! The day index only moves forward, and only through the free-agency
//! engine's day step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Contract, ContractStatus, Player, RightsStatus, RosterBucket, SeasonFinance, TeamState};
use crate::domain::shared::{ContractId, DomainError, PlayerId, TeamId};

/// The whole league's payroll ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueState {
    /// Rules for the current season.
    pub finance: SeasonFinance,
    /// Teams by id.
    #[serde(default)]
    pub teams: BTreeMap<TeamId, TeamState>,
    /// Players by id.
    #[serde(default)]
    pub players: BTreeMap<PlayerId, Player>,
    /// Contracts by id.
    #[serde(default)]
    pub contracts: BTreeMap<ContractId, Contract>,
    /// Zero-based day of the season.
    #[serde(default)]
    day_index: u32,
}

impl LeagueState {
    /// Empty league on day zero.
    #[must_use]
    pub const fn new(finance: SeasonFinance) -> Self {
        Self {
            finance,
            teams: BTreeMap::new(),
            players: BTreeMap::new(),
            contracts: BTreeMap::new(),
            day_index: 0,
        }
    }

    /// Current day of the season.
    #[must_use]
    pub const fn day_index(&self) -> u32 {
        self.day_index
    }

    /// Move to the next day and return it. Deadlines are not settled
    /// here; use `FreeAgencyEngine::advance_day` during the offseason.
    pub const fn advance_day(&mut self) -> u32 {
        self.day_index += 1;
        self.day_index
    }

    /// Register a team.
    pub fn add_team(&mut self, team: TeamState) {
        self.teams.insert(team.id.clone(), team);
    }

    /// Register a player.
    pub fn add_player(&mut self, player: Player) {
        self.players.insert(player.id.clone(), player);
    }

    /// Look up a team.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn team(&self, team_id: &TeamId) -> Result<&TeamState, DomainError> {
        self.teams
            .get(team_id)
            .ok_or_else(|| DomainError::not_found("Team", team_id))
    }

    /// Look up a team mutably.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn team_mut(&mut self, team_id: &TeamId) -> Result<&mut TeamState, DomainError> {
        self.teams
            .get_mut(team_id)
            .ok_or_else(|| DomainError::not_found("Team", team_id))
    }

    /// Look up a player.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the player does not exist.
    pub fn player(&self, player_id: &PlayerId) -> Result<&Player, DomainError> {
        self.players
            .get(player_id)
            .ok_or_else(|| DomainError::not_found("Player", player_id))
    }

    /// Look up a player mutably.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the player does not exist.
    pub fn player_mut(&mut self, player_id: &PlayerId) -> Result<&mut Player, DomainError> {
        self.players
            .get_mut(player_id)
            .ok_or_else(|| DomainError::not_found("Player", player_id))
    }

    /// Look up a contract.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the contract does not exist.
    pub fn contract(&self, contract_id: &ContractId) -> Result<&Contract, DomainError> {
        self.contracts
            .get(contract_id)
            .ok_or_else(|| DomainError::not_found("Contract", contract_id))
    }

    /// The player's current contract. Dangling links resolve to `None`.
    #[must_use]
    pub fn contract_of(&self, player_id: &PlayerId) -> Option<&Contract> {
        let contract_id = self.players.get(player_id)?.contract_id()?;
        self.contracts.get(contract_id)
    }

    /// Team whose roster holds the player.
    #[must_use]
    pub fn team_of(&self, player_id: &PlayerId) -> Option<&TeamId> {
        self.teams
            .values()
            .find(|t| t.holds(player_id))
            .map(|t| &t.id)
    }

    /// Attach a contract: link it to its player, put the player on the
    /// team's active roster, count the SPC and hand the team his rights.
    ///
    /// Performs no compliance check; see `SigningGate`.
    ///
    /// # Errors
    ///
    /// Returns error if the team or player is unknown, the player is
    /// already signed, or another team carries the player.
    pub fn sign_contract(&mut self, team_id: &TeamId, contract: Contract) -> Result<(), DomainError> {
        self.team(team_id)?;
        let player = self.player(&contract.player_id)?;
        if let Some(existing) = player.contract_id() {
            return Err(DomainError::InvariantViolation {
                aggregate: "Player".to_string(),
                invariant: "at most one contract".to_string(),
                state: format!("{} already signed to {existing}", player.id),
            });
        }
        if let Some(holder) = self.team_of(&contract.player_id) {
            if holder != team_id {
                return Err(DomainError::InvariantViolation {
                    aggregate: "TeamState".to_string(),
                    invariant: "player rostered by one team".to_string(),
                    state: format!("{} is rostered by {holder}", contract.player_id),
                });
            }
        }

        let player_id = contract.player_id.clone();
        let contract_id = contract.id.clone();

        let player = self.player_mut(&player_id)?;
        player.contract = ContractStatus::Signed(contract_id.clone());
        player.rights = RightsStatus::RightsHeld(team_id.clone());

        let team = self.team_mut(team_id)?;
        team.insert(player_id, RosterBucket::Active);
        team.spc_count += 1;

        self.contracts.insert(contract_id, contract);
        Ok(())
    }

    /// Detach a contract: drop it, clear the player's link and take him
    /// off whichever roster carries him. Rights are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the contract does not exist.
    pub fn release_contract(&mut self, contract_id: &ContractId) -> Result<Contract, DomainError> {
        let contract = self
            .contracts
            .remove(contract_id)
            .ok_or_else(|| DomainError::not_found("Contract", contract_id))?;

        if let Some(player) = self.players.get_mut(&contract.player_id) {
            player.contract = ContractStatus::Unsigned;
        }
        for team in self.teams.values_mut() {
            if team.remove_player(&contract.player_id).is_some() {
                team.spc_count = team.spc_count.saturating_sub(1);
            }
        }
        Ok(contract)
    }

    /// Move a player between a team's buckets.
    ///
    /// # Errors
    ///
    /// Returns error if the team is unknown or does not carry the player.
    pub fn move_to_bucket(
        &mut self,
        team_id: &TeamId,
        player_id: &PlayerId,
        bucket: RosterBucket,
    ) -> Result<(), DomainError> {
        let team = self.team_mut(team_id)?;
        if !team.holds(player_id) {
            return Err(DomainError::not_found(format!("Player on {team_id}"), player_id));
        }
        team.insert(player_id.clone(), bucket);
        Ok(())
    }

    /// Demote a player off the roster while he stays under contract.
    ///
    /// # Errors
    ///
    /// Returns error if the team is unknown or does not carry the player.
    pub fn bury(&mut self, team_id: &TeamId, player_id: &PlayerId) -> Result<(), DomainError> {
        let team = self.team_mut(team_id)?;
        if !team.holds(player_id) {
            return Err(DomainError::not_found(format!("Player on {team_id}"), player_id));
        }
        team.bury(player_id.clone());
        Ok(())
    }

    /// Start a new season: install its rules, reset the day index and
    /// count down retained-salary slices.
    ///
    /// # Errors
    ///
    /// Returns error if the new rules are invalid or do not move forward.
    pub fn roll_over_season(&mut self, finance: SeasonFinance) -> Result<(), DomainError> {
        finance.validate()?;
        if finance.season <= self.finance.season {
            return Err(DomainError::invalid(
                "season",
                format!("{} does not follow {}", finance.season, self.finance.season),
            ));
        }
        let elapsed = self.finance.season.seasons_through(finance.season) - 1;

        for team in self.teams.values_mut() {
            for slice in &mut team.retained {
                slice.seasons_remaining = slice.seasons_remaining.saturating_sub(elapsed);
            }
            team.retained.retain(|s| s.is_active());
        }
        self.finance = finance;
        self.day_index = 0;
        Ok(())
    }

    /// Swap in a replacement team record wholesale.
    pub(crate) fn replace_team(&mut self, team: TeamState) {
        self.teams.insert(team.id.clone(), team);
    }

    /// Undo a `sign_contract`: restore the team and player records and
    /// drop the contract.
    pub(crate) fn restore_signing(&mut self, team: TeamState, player: Player, contract_id: &ContractId) {
        self.contracts.remove(contract_id);
        self.add_player(player);
        self.replace_team(team);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::{Position, RetainedSlice};
    use crate::domain::shared::{Money, SeasonLabel};
    use rust_decimal_macros::dec;

    fn league() -> LeagueState {
        let mut league = LeagueState::new(SeasonFinance::new(
            SeasonLabel::starting(2025),
            Money::dollars(88_000_000),
        ));
        league.add_team(TeamState::new("BOS", "Boston"));
        league.add_team(TeamState::new("TOR", "Toronto"));
        league.add_player(Player::new("p1", "Skater One", Position::Center, 25));
        league
    }

    fn contract(id: &str, player: &str) -> Contract {
        Contract::flat(
            ContractId::new(id),
            PlayerId::new(player),
            SeasonLabel::starting(2025),
            2,
            Money::dollars(1_000_000),
        )
        .unwrap()
    }

    #[test]
    fn sign_contract_links_everything() {
        let mut league = league();
        let bos = TeamId::new("BOS");
        league.sign_contract(&bos, contract("c1", "p1")).unwrap();

        let player = league.player(&PlayerId::new("p1")).unwrap();
        assert_eq!(player.contract_id(), Some(&ContractId::new("c1")));
        assert_eq!(player.rights_team(), Some(&bos));
        assert_eq!(league.team(&bos).unwrap().spc_count, 1);
        assert_eq!(league.team_of(&PlayerId::new("p1")), Some(&bos));
        assert!(league.contract_of(&PlayerId::new("p1")).is_some());
    }

    #[test]
    fn sign_contract_rejects_second_contract() {
        let mut league = league();
        let bos = TeamId::new("BOS");
        league.sign_contract(&bos, contract("c1", "p1")).unwrap();
        assert!(league.sign_contract(&bos, contract("c2", "p1")).is_err());
    }

    #[test]
    fn sign_contract_rejects_player_on_other_roster() {
        let mut league = league();
        league
            .team_mut(&TeamId::new("TOR"))
            .unwrap()
            .insert(PlayerId::new("p1"), RosterBucket::NonRoster);
        let result = league.sign_contract(&TeamId::new("BOS"), contract("c1", "p1"));
        assert!(matches!(result, Err(DomainError::InvariantViolation { .. })));
    }

    #[test]
    fn sign_contract_unknown_team_is_not_found() {
        let mut league = league();
        let result = league.sign_contract(&TeamId::new("XXX"), contract("c1", "p1"));
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn release_contract_unlinks_and_unrosters() {
        let mut league = league();
        let bos = TeamId::new("BOS");
        league.sign_contract(&bos, contract("c1", "p1")).unwrap();
        league.release_contract(&ContractId::new("c1")).unwrap();

        assert!(!league.player(&PlayerId::new("p1")).unwrap().is_signed());
        assert_eq!(league.team(&bos).unwrap().spc_count, 0);
        assert!(league.team_of(&PlayerId::new("p1")).is_none());
        assert!(league.release_contract(&ContractId::new("c1")).is_err());
    }

    #[test]
    fn move_to_bucket_requires_player_on_team() {
        let mut league = league();
        let bos = TeamId::new("BOS");
        let p1 = PlayerId::new("p1");
        assert!(league.move_to_bucket(&bos, &p1, RosterBucket::LongTermIr).is_err());

        league.sign_contract(&bos, contract("c1", "p1")).unwrap();
        league.move_to_bucket(&bos, &p1, RosterBucket::LongTermIr).unwrap();
        assert_eq!(
            league.team(&bos).unwrap().bucket_of(&p1),
            Some(RosterBucket::LongTermIr)
        );
    }

    #[test]
    fn roll_over_season_counts_down_slices_and_resets_day() {
        let mut league = league();
        let bos = TeamId::new("BOS");
        league.advance_day();
        {
            let team = league.team_mut(&bos).unwrap();
            for (player, seasons) in [("a", 1), ("b", 2)] {
                team.retained.push(RetainedSlice {
                    player_id: PlayerId::new(player),
                    percent: dec!(0.5),
                    cap_hit: Money::dollars(1_000_000),
                    seasons_remaining: seasons,
                });
            }
        }

        let next = SeasonFinance::new(SeasonLabel::starting(2026), Money::dollars(92_000_000));
        league.roll_over_season(next).unwrap();

        let team = league.team(&bos).unwrap();
        assert_eq!(team.retained.len(), 1);
        assert_eq!(team.retained[0].seasons_remaining, 1);
        assert_eq!(league.day_index(), 0);
        assert_eq!(league.finance.season, SeasonLabel::starting(2026));
    }

    #[test]
    fn roll_over_season_must_move_forward() {
        let mut league = league();
        let same = league.finance.clone();
        assert!(league.roll_over_season(same).is_err());
    }

    #[test]
    fn day_index_survives_serde() {
        let mut league = league();
        league.advance_day();
        league.advance_day();
        let json = serde_json::to_string(&league).unwrap();
        let parsed: LeagueState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.day_index(), 2);
        assert_eq!(parsed, league);
    }
}
