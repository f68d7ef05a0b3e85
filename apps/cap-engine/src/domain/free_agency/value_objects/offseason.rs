//! Per-offseason free agency records.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Money, PlayerId, SeasonLabel, TeamId};

/// A rights team's one-year offer to its restricted free agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifyingOffer {
    /// Restricted free agent.
    pub player_id: PlayerId,
    /// Team holding his rights.
    pub rights_team: TeamId,
    /// Cap hit of the contract that just expired.
    pub prior_cap_hit: Money,
    /// Offer amount.
    pub amount: Money,
    /// Last day the offer stands.
    pub expires_day: u32,
    /// True once the rights team has confirmed the offer.
    pub tendered: bool,
}

impl QualifyingOffer {
    /// True once `day` is beyond the expiry.
    #[must_use]
    pub const fn is_expired(&self, day: u32) -> bool {
        day > self.expires_day
    }
}

/// Another team's offer to a restricted free agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferSheet {
    /// Restricted free agent.
    pub player_id: PlayerId,
    /// Team making the offer.
    pub offering_team: TeamId,
    /// Team that may match.
    pub rights_team: TeamId,
    /// Contract length.
    pub years: u16,
    /// Flat annual value.
    pub aav: Money,
    /// Day the sheet was filed.
    pub filed_day: u32,
    /// Last day the rights team may match.
    pub match_deadline: u32,
    /// Compensation owed to the rights team if it declines.
    pub compensation: String,
}

impl OfferSheet {
    /// True once `day` is beyond the match deadline.
    #[must_use]
    pub const fn is_past_deadline(&self, day: u32) -> bool {
        day > self.match_deadline
    }
}

/// Free agency market state for an offseason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeAgencyState {
    /// Season whose expiring contracts fed the pools.
    pub offseason: Option<SeasonLabel>,
    /// Pending qualifying offers by player.
    #[serde(default)]
    pub qualifying_offers: BTreeMap<PlayerId, QualifyingOffer>,
    /// Pending offer sheets by player.
    #[serde(default)]
    pub offer_sheets: BTreeMap<PlayerId, OfferSheet>,
    /// Unrestricted free agents.
    #[serde(default)]
    pub ufa_pool: BTreeSet<PlayerId>,
    /// Restricted free agents.
    #[serde(default)]
    pub rfa_pool: BTreeSet<PlayerId>,
}

impl FreeAgencyState {
    /// True when nothing is waiting on a deadline.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.qualifying_offers.is_empty() && self.offer_sheets.is_empty()
    }

    /// Take a restricted free agent off the market entirely.
    pub(crate) fn settle_rfa(&mut self, player_id: &PlayerId) {
        self.rfa_pool.remove(player_id);
        self.qualifying_offers.remove(player_id);
        self.offer_sheets.remove(player_id);
    }

    /// Move a restricted free agent to the unrestricted pool.
    pub(crate) fn release_rfa(&mut self, player_id: &PlayerId) {
        self.settle_rfa(player_id);
        self.ufa_pool.insert(player_id.clone());
    }
}
