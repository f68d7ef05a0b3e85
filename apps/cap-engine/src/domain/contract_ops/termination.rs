//! Contract termination.

use tracing::info;

use crate::domain::ledger::{Contract, LeagueState, RightsStatus};
use crate::domain::shared::{ContractId, DomainError};

/// Detach a contract and free the player outright: no contract link,
/// no roster spot, no rights holder and no remaining cap obligation.
///
/// # Errors
///
/// Returns `NotFound` if the contract does not exist.
pub fn terminate(league: &mut LeagueState, contract_id: &ContractId) -> Result<Contract, DomainError> {
    let contract = league.release_contract(contract_id)?;
    if let Ok(player) = league.player_mut(&contract.player_id) {
        player.rights = RightsStatus::NoRights;
    }
    info!(
        contract_id = %contract.id,
        player_id = %contract.player_id,
        "Contract terminated"
    );
    Ok(contract)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cap_accounting::CapCalculator;
    use crate::domain::ledger::{Player, Position, SeasonFinance, TeamState};
    use crate::domain::shared::{Money, PlayerId, SeasonLabel, TeamId};

    #[test]
    fn termination_leaves_no_obligation() {
        let season = SeasonLabel::starting(2025);
        let mut league = LeagueState::new(SeasonFinance::new(season, Money::dollars(88_000_000)));
        league.add_team(TeamState::new("BOS", "Boston"));
        league.add_player(Player::new("p1", "Skater", Position::Center, 22));
        let contract =
            Contract::flat(ContractId::new("c1"), PlayerId::new("p1"), season, 3, Money::dollars(2_000_000)).unwrap();
        league.sign_contract(&TeamId::new("BOS"), contract).unwrap();

        let removed = terminate(&mut league, &ContractId::new("c1")).unwrap();
        assert_eq!(removed.id, ContractId::new("c1"));

        let usage = CapCalculator::new(&league).usage_for(&TeamId::new("BOS")).unwrap();
        assert_eq!(usage.total_usage, Money::ZERO);
        assert_eq!(
            league.player(&PlayerId::new("p1")).unwrap().rights,
            RightsStatus::NoRights
        );
    }

    #[test]
    fn terminating_twice_is_not_found() {
        let mut league = LeagueState::new(SeasonFinance::new(
            SeasonLabel::starting(2025),
            Money::dollars(88_000_000),
        ));
        let result = terminate(&mut league, &ContractId::new("missing"));
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
