//! Trade errors.

use std::fmt;

use crate::domain::shared::DomainError;

/// Hard failures while validating or committing a trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeError {
    /// Both sides name the same team.
    SameTeam {
        /// Team id.
        team_id: String,
    },

    /// A piece cannot be applied as described.
    InvalidPiece {
        /// Team giving the piece.
        team_id: String,
        /// Why the piece is invalid.
        reason: String,
    },

    /// Commit attempted on a validation that failed.
    ValidationFailed {
        /// Blocking violation messages.
        violations: Vec<String>,
    },

    /// The ledger changed under a team between validation and commit.
    StaleSnapshot {
        /// Team id.
        team_id: String,
    },

    /// Ledger lookup failed.
    Domain(DomainError),
}

impl fmt::Display for TradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameTeam { team_id } => {
                write!(f, "Trade needs two distinct teams, got {team_id} twice")
            }
            Self::InvalidPiece { team_id, reason } => {
                write!(f, "Invalid trade piece from {team_id}: {reason}")
            }
            Self::ValidationFailed { violations } => {
                write!(f, "Cannot commit a failed trade: {}", violations.join("; "))
            }
            Self::StaleSnapshot { team_id } => {
                write!(f, "Team {team_id} changed since the trade was validated")
            }
            Self::Domain(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for TradeError {}

impl From<DomainError> for TradeError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}
