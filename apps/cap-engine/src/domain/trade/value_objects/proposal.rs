//! Trade proposal types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{PlayerId, TeamId};

/// One asset a side gives up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradePiece {
    /// A player moves to the other side's active roster.
    Player {
        /// Player traded.
        player_id: PlayerId,
    },
    /// A draft pick, carried as an opaque description.
    Pick {
        /// Pick description, e.g. "2026 2nd round".
        description: String,
    },
    /// The giving side keeps part of a traded player's cap hit.
    RetainSalary {
        /// Player the salary belongs to; must be traded by the same side.
        player_id: PlayerId,
        /// Share retained, in (0, max retention].
        percent: Decimal,
    },
}

/// What one team gives up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSide {
    /// Giving team.
    pub team_id: TeamId,
    /// Assets given.
    #[serde(default)]
    pub gives: Vec<TradePiece>,
}

impl TradeSide {
    /// Side with no pieces yet.
    #[must_use]
    pub fn new(team_id: impl Into<TeamId>) -> Self {
        Self {
            team_id: team_id.into(),
            gives: Vec::new(),
        }
    }

    /// Add a player.
    #[must_use]
    pub fn player(mut self, player_id: impl Into<PlayerId>) -> Self {
        self.gives.push(TradePiece::Player {
            player_id: player_id.into(),
        });
        self
    }

    /// Add a pick.
    #[must_use]
    pub fn pick(mut self, description: impl Into<String>) -> Self {
        self.gives.push(TradePiece::Pick {
            description: description.into(),
        });
        self
    }

    /// Retain part of a traded player's salary.
    #[must_use]
    pub fn retain(mut self, player_id: impl Into<PlayerId>, percent: Decimal) -> Self {
        self.gives.push(TradePiece::RetainSalary {
            player_id: player_id.into(),
            percent,
        });
        self
    }

    /// Players this side sends away.
    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.gives.iter().filter_map(|piece| match piece {
            TradePiece::Player { player_id } => Some(player_id),
            _ => None,
        })
    }
}

/// A two-team trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeProposal {
    /// First team's side.
    pub first: TradeSide,
    /// Second team's side.
    pub second: TradeSide,
}

impl TradeProposal {
    /// Pair two sides.
    #[must_use]
    pub const fn new(first: TradeSide, second: TradeSide) -> Self {
        Self { first, second }
    }

    /// Both sides, each paired with the team receiving its pieces.
    #[must_use]
    pub fn sides(&self) -> [(&TradeSide, &TeamId); 2] {
        [
            (&self.first, &self.second.team_id),
            (&self.second, &self.first.team_id),
        ]
    }
}
