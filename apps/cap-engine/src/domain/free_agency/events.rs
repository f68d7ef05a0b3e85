//! Free agency events.
//!
//! Every market transition produces one, including the silent ones: a
//! lapsed qualifying offer and an offer sheet nobody answered.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{ContractId, Money, PlayerId, TeamId};

/// All free agency events. `day` is the league day the event happened on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FreeAgencyEvent {
    /// Expiring player entered the restricted pool with a qualifying offer.
    BecameRestricted {
        /// Player.
        player_id: PlayerId,
        /// Rights team.
        rights_team: TeamId,
        /// Qualifying offer amount.
        qualifying_offer: Money,
        /// Day.
        day: u32,
    },
    /// Expiring player entered the unrestricted pool.
    BecameUnrestricted {
        /// Player.
        player_id: PlayerId,
        /// Day.
        day: u32,
    },
    /// Rights team confirmed a qualifying offer.
    QualifyingOfferTendered {
        /// Player.
        player_id: PlayerId,
        /// Rights team.
        team_id: TeamId,
        /// Offer amount.
        amount: Money,
        /// Last day the offer stands.
        expires_day: u32,
        /// Day.
        day: u32,
    },
    /// Player signed his qualifying offer.
    QualifyingOfferAccepted {
        /// Player.
        player_id: PlayerId,
        /// Rights team.
        team_id: TeamId,
        /// New contract.
        contract_id: ContractId,
        /// Offer amount.
        amount: Money,
        /// Day.
        day: u32,
    },
    /// Qualifying offer expired; the player is now unrestricted.
    QualifyingOfferLapsed {
        /// Player.
        player_id: PlayerId,
        /// Team that lost his rights.
        team_id: TeamId,
        /// Day.
        day: u32,
    },
    /// Unrestricted free agent signed.
    UfaSigned {
        /// Player.
        player_id: PlayerId,
        /// Signing team.
        team_id: TeamId,
        /// New contract.
        contract_id: ContractId,
        /// Contract length.
        years: u16,
        /// Annual value.
        aav: Money,
        /// Day.
        day: u32,
    },
    /// Offer sheet filed on a restricted free agent.
    OfferSheetFiled {
        /// Player.
        player_id: PlayerId,
        /// Team making the offer.
        offering_team: TeamId,
        /// Team that may match.
        rights_team: TeamId,
        /// Contract length.
        years: u16,
        /// Annual value.
        aav: Money,
        /// Last day to match.
        match_deadline: u32,
        /// Compensation if declined.
        compensation: String,
        /// Day.
        day: u32,
    },
    /// Rights team matched; the player stays.
    OfferSheetMatched {
        /// Player.
        player_id: PlayerId,
        /// Rights team.
        team_id: TeamId,
        /// New contract.
        contract_id: ContractId,
        /// Day.
        day: u32,
    },
    /// Rights team declined, or let the deadline pass; the player moves.
    OfferSheetDeclined {
        /// Player.
        player_id: PlayerId,
        /// Team the player joins.
        offering_team: TeamId,
        /// Team that lost him.
        rights_team: TeamId,
        /// New contract.
        contract_id: ContractId,
        /// Compensation owed to the rights team.
        compensation: String,
        /// True when the deadline passed without an answer.
        automatic: bool,
        /// Day.
        day: u32,
    },
    /// An unanswered sheet could not be honoured and was discarded.
    OfferSheetVoided {
        /// Player.
        player_id: PlayerId,
        /// Team whose offer failed.
        offering_team: TeamId,
        /// Violations that blocked the signing.
        reasons: Vec<String>,
        /// Day.
        day: u32,
    },
}

impl FreeAgencyEvent {
    /// Player the event is about.
    #[must_use]
    pub const fn player_id(&self) -> &PlayerId {
        match self {
            Self::BecameRestricted { player_id, .. }
            | Self::BecameUnrestricted { player_id, .. }
            | Self::QualifyingOfferTendered { player_id, .. }
            | Self::QualifyingOfferAccepted { player_id, .. }
            | Self::QualifyingOfferLapsed { player_id, .. }
            | Self::UfaSigned { player_id, .. }
            | Self::OfferSheetFiled { player_id, .. }
            | Self::OfferSheetMatched { player_id, .. }
            | Self::OfferSheetDeclined { player_id, .. }
            | Self::OfferSheetVoided { player_id, .. } => player_id,
        }
    }

    /// League day of the event.
    #[must_use]
    pub const fn day(&self) -> u32 {
        match self {
            Self::BecameRestricted { day, .. }
            | Self::BecameUnrestricted { day, .. }
            | Self::QualifyingOfferTendered { day, .. }
            | Self::QualifyingOfferAccepted { day, .. }
            | Self::QualifyingOfferLapsed { day, .. }
            | Self::UfaSigned { day, .. }
            | Self::OfferSheetFiled { day, .. }
            | Self::OfferSheetMatched { day, .. }
            | Self::OfferSheetDeclined { day, .. }
            | Self::OfferSheetVoided { day, .. } => *day,
        }
    }

    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::BecameRestricted { .. } => "BECAME_RESTRICTED",
            Self::BecameUnrestricted { .. } => "BECAME_UNRESTRICTED",
            Self::QualifyingOfferTendered { .. } => "QUALIFYING_OFFER_TENDERED",
            Self::QualifyingOfferAccepted { .. } => "QUALIFYING_OFFER_ACCEPTED",
            Self::QualifyingOfferLapsed { .. } => "QUALIFYING_OFFER_LAPSED",
            Self::UfaSigned { .. } => "UFA_SIGNED",
            Self::OfferSheetFiled { .. } => "OFFER_SHEET_FILED",
            Self::OfferSheetMatched { .. } => "OFFER_SHEET_MATCHED",
            Self::OfferSheetDeclined { .. } => "OFFER_SHEET_DECLINED",
            Self::OfferSheetVoided { .. } => "OFFER_SHEET_VOIDED",
        }
    }

    /// One-line news headline.
    #[must_use]
    pub fn headline(&self) -> String {
        match self {
            Self::BecameRestricted {
                player_id,
                rights_team,
                qualifying_offer,
                ..
            } => format!("{player_id} is a restricted free agent; {rights_team} hold his rights at {qualifying_offer}"),
            Self::BecameUnrestricted { player_id, .. } => {
                format!("{player_id} is an unrestricted free agent")
            }
            Self::QualifyingOfferTendered {
                player_id,
                team_id,
                amount,
                expires_day,
                ..
            } => format!("{team_id} tender {player_id} a qualifying offer of {amount}, open through day {expires_day}"),
            Self::QualifyingOfferAccepted {
                player_id,
                team_id,
                amount,
                ..
            } => format!("{player_id} accepts {team_id}'s qualifying offer of {amount}"),
            Self::QualifyingOfferLapsed {
                player_id, team_id, ..
            } => format!("{team_id}'s qualifying offer to {player_id} lapses; he is unrestricted"),
            Self::UfaSigned {
                player_id,
                team_id,
                years,
                aav,
                ..
            } => format!("{team_id} sign {player_id} to {years} years at {aav} per season"),
            Self::OfferSheetFiled {
                player_id,
                offering_team,
                rights_team,
                years,
                aav,
                match_deadline,
                ..
            } => format!(
                "{offering_team} file a {years}-year, {aav} offer sheet on {player_id}; {rights_team} have until day {match_deadline} to match"
            ),
            Self::OfferSheetMatched {
                player_id, team_id, ..
            } => format!("{team_id} match the offer sheet and keep {player_id}"),
            Self::OfferSheetDeclined {
                player_id,
                offering_team,
                rights_team,
                compensation,
                automatic,
                ..
            } => {
                let how = if *automatic { "let the match window close" } else { "decline to match" };
                format!("{rights_team} {how}; {player_id} joins {offering_team} ({rights_team} receive {compensation})")
            }
            Self::OfferSheetVoided {
                player_id,
                offering_team,
                ..
            } => format!("{offering_team}'s offer sheet on {player_id} is void"),
        }
    }
}
