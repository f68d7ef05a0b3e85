//! Player records and their contract/rights status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{ContractId, PlayerId, TeamId};

/// Playing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    /// Center.
    Center,
    /// Left wing.
    LeftWing,
    /// Right wing.
    RightWing,
    /// Defenseman.
    Defense,
    /// Goaltender.
    Goalie,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Center => "C",
            Self::LeftWing => "LW",
            Self::RightWing => "RW",
            Self::Defense => "D",
            Self::Goalie => "G",
        };
        write!(f, "{code}")
    }
}

/// Whether a player is currently under contract.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "contract_id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    /// Signed to the referenced contract.
    Signed(ContractId),
    /// No contract.
    #[default]
    Unsigned,
}

/// Which team, if any, holds a player's negotiating rights.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "team_id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RightsStatus {
    /// Rights held by the team.
    RightsHeld(TeamId),
    /// Nobody holds the rights.
    #[default]
    NoRights,
}

/// A player in the league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player ID.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Position.
    pub position: Position,
    /// Age in years.
    pub age: u8,
    /// Professional seasons accrued.
    #[serde(default)]
    pub accrued_seasons: u8,
    /// Contract link.
    #[serde(default)]
    pub contract: ContractStatus,
    /// Rights-holding team.
    #[serde(default)]
    pub rights: RightsStatus,
}

impl Player {
    /// Create an unsigned player with no rights holder.
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, position: Position, age: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            age,
            accrued_seasons: 0,
            contract: ContractStatus::Unsigned,
            rights: RightsStatus::NoRights,
        }
    }

    /// Set accrued seasons.
    #[must_use]
    pub const fn with_accrued_seasons(mut self, seasons: u8) -> Self {
        self.accrued_seasons = seasons;
        self
    }

    /// Set the rights holder.
    #[must_use]
    pub fn with_rights(mut self, team_id: impl Into<TeamId>) -> Self {
        self.rights = RightsStatus::RightsHeld(team_id.into());
        self
    }

    /// Linked contract id, if signed.
    #[must_use]
    pub const fn contract_id(&self) -> Option<&ContractId> {
        match &self.contract {
            ContractStatus::Signed(id) => Some(id),
            ContractStatus::Unsigned => None,
        }
    }

    /// Rights-holding team, if any.
    #[must_use]
    pub const fn rights_team(&self) -> Option<&TeamId> {
        match &self.rights {
            RightsStatus::RightsHeld(team) => Some(team),
            RightsStatus::NoRights => None,
        }
    }

    /// True when the player is signed.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self.contract, ContractStatus::Signed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_is_unsigned_without_rights() {
        let player = Player::new("p1", "Skater One", Position::Center, 22);
        assert!(!player.is_signed());
        assert!(player.contract_id().is_none());
        assert!(player.rights_team().is_none());
    }

    #[test]
    fn rights_builder_sets_team() {
        let player = Player::new("p1", "Skater One", Position::Defense, 24).with_rights("BOS");
        assert_eq!(player.rights_team(), Some(&TeamId::new("BOS")));
    }

    #[test]
    fn position_display_codes() {
        assert_eq!(Position::LeftWing.to_string(), "LW");
        assert_eq!(Position::Goalie.to_string(), "G");
    }

    #[test]
    fn status_variants_serialize_tagged() {
        let player = Player::new("p1", "Skater One", Position::Center, 22).with_rights("TOR");
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["contract"]["status"], "UNSIGNED");
        assert_eq!(json["rights"]["status"], "RIGHTS_HELD");
        assert_eq!(json["rights"]["team_id"], "TOR");
    }
}
