//! Free agency errors.

use std::fmt;

use crate::domain::shared::DomainError;

/// Hard failures from free agency operations. Rule violations on a
/// signing are not errors; they come back in the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreeAgencyError {
    /// Player is not in the pool the operation needs.
    NotInPool {
        /// Player ID.
        player_id: String,
        /// Pool name.
        pool: &'static str,
    },

    /// No pending qualifying offer for the player from that team.
    QualifyingOfferNotFound {
        /// Player ID.
        player_id: String,
    },

    /// Qualifying offer has not been tendered.
    QualifyingOfferNotTendered {
        /// Player ID.
        player_id: String,
    },

    /// Offer sheet from the team that already holds the rights.
    OfferFromRightsTeam {
        /// Player ID.
        player_id: String,
        /// Team ID.
        team_id: String,
    },

    /// Player already has an offer sheet pending.
    OfferSheetPending {
        /// Player ID.
        player_id: String,
    },

    /// No pending offer sheet for the player.
    OfferSheetNotFound {
        /// Player ID.
        player_id: String,
    },

    /// Ledger lookup or contract construction failed.
    Domain(DomainError),
}

impl fmt::Display for FreeAgencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInPool { player_id, pool } => {
                write!(f, "Player {player_id} is not in the {pool} pool")
            }
            Self::QualifyingOfferNotFound { player_id } => {
                write!(f, "No pending qualifying offer for {player_id}")
            }
            Self::QualifyingOfferNotTendered { player_id } => {
                write!(f, "Qualifying offer for {player_id} has not been tendered")
            }
            Self::OfferFromRightsTeam { player_id, team_id } => {
                write!(f, "{team_id} hold the rights to {player_id} and cannot file an offer sheet")
            }
            Self::OfferSheetPending { player_id } => {
                write!(f, "Player {player_id} already has an offer sheet pending")
            }
            Self::OfferSheetNotFound { player_id } => {
                write!(f, "No pending offer sheet for {player_id}")
            }
            Self::Domain(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for FreeAgencyError {}

impl From<DomainError> for FreeAgencyError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}
