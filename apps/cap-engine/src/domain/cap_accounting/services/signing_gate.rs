//! Attach a contract to the real ledger behind a compliance check.
//!
//! The contract is attached, the team re-checked, and the attachment
//! rolled back if any blocking violation appears.

use tracing::{info, warn};

use super::compliance_service::ComplianceService;
use crate::domain::cap_accounting::value_objects::ConstraintResult;
use crate::domain::ledger::{Contract, LeagueState};
use crate::domain::shared::{DomainError, TeamId};

/// Validation gate for direct signings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SigningGate;

impl SigningGate {
    /// Attach `contract` to `team_id`, keeping it only if the team stays
    /// compliant. On failure the ledger is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns error if the team or player is unknown or the player is
    /// already under contract. Rule violations come back in the result.
    pub fn attach(
        league: &mut LeagueState,
        team_id: &TeamId,
        contract: Contract,
    ) -> Result<ConstraintResult, DomainError> {
        let team_before = league.team(team_id)?.clone();
        let player_before = league.player(&contract.player_id)?.clone();
        let contract_id = contract.id.clone();
        let aav = contract.average_annual_value();

        league.sign_contract(team_id, contract)?;

        let result = ComplianceService::new(league).check_team_id(team_id)?;
        if result.passed {
            info!(
                team_id = %team_id,
                player_id = %player_before.id,
                contract_id = %contract_id,
                aav = %aav,
                "Contract attached"
            );
        } else {
            league.restore_signing(team_before, player_before, &contract_id);
            warn!(
                team_id = %team_id,
                contract_id = %contract_id,
                violations = ?result.messages(),
                "Contract attach rolled back"
            );
        }
        Ok(result)
    }
}
