//! Outcome of validating a trade on scratch copies.

use serde::{Deserialize, Serialize};

use super::TradeProposal;
use crate::domain::cap_accounting::ConstraintResult;
use crate::domain::ledger::TeamState;
use crate::domain::shared::{PlayerId, SeasonLabel, TeamId};

/// A validated trade, ready to commit if it passed.
///
/// Holds the team records, season and day the validation started from so
/// a commit can detect that the ledger moved underneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeValidation {
    /// The proposal validated.
    pub proposal: TradeProposal,
    /// Compliance of both post-trade teams, violations tagged by team.
    pub result: ConstraintResult,
    /// Team records before the trade.
    pub base: [TeamState; 2],
    /// Team records after the trade.
    pub proposed: [TeamState; 2],
    /// Each traded player with the team receiving him.
    pub moves: Vec<(PlayerId, TeamId)>,
    /// Season the ledger was in.
    pub season: SeasonLabel,
    /// Day of the season the ledger was on.
    pub day_index: u32,
}

impl TradeValidation {
    /// True when neither team breaks a blocking rule.
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.result.passed
    }

    /// Blocking violation messages from both teams.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.result.messages()
    }
}
