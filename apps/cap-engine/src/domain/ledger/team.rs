//! Team roster and payroll state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{ContractId, Money, PlayerId, SeasonLabel, TeamId};

/// The four disjoint places a team can carry a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RosterBucket {
    /// Active NHL roster.
    Active,
    /// Short-term injured reserve.
    ShortTermIr,
    /// Long-term injured reserve.
    LongTermIr,
    /// Reserve list, minors, juniors.
    NonRoster,
}

impl RosterBucket {
    /// Every bucket, in display order.
    pub const ALL: [Self; 4] = [
        Self::Active,
        Self::ShortTermIr,
        Self::LongTermIr,
        Self::NonRoster,
    ];
}

impl fmt::Display for RosterBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::ShortTermIr => write!(f, "SHORT_TERM_IR"),
            Self::LongTermIr => write!(f, "LONG_TERM_IR"),
            Self::NonRoster => write!(f, "NON_ROSTER"),
        }
    }
}

/// Salary a team keeps carrying after trading a player away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetainedSlice {
    /// Player the salary belongs to.
    pub player_id: PlayerId,
    /// Retained share, in (0, 0.5].
    pub percent: Decimal,
    /// Retained cap hit per season.
    pub cap_hit: Money,
    /// Seasons left, counting the current one.
    pub seasons_remaining: u16,
}

impl RetainedSlice {
    /// True while the slice still charges the retaining team.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.seasons_remaining > 0
    }
}

/// One season's payment of a buyout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyoutInstallment {
    /// Season the payment falls in.
    pub season: SeasonLabel,
    /// Amount owed.
    pub amount: Money,
}

/// Record of a bought-out contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyoutSchedule {
    /// Player whose contract was bought out.
    pub player_id: PlayerId,
    /// Terminated contract.
    pub contract_id: ContractId,
    /// Remaining salary before the buyout discount.
    pub remaining_salary: Money,
    /// Total owed after the discount.
    pub total_obligation: Money,
    /// Payments, one per season.
    pub installments: Vec<BuyoutInstallment>,
}

/// A franchise's roster and payroll state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamState {
    /// Team ID.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Active roster.
    #[serde(default)]
    pub active: Vec<PlayerId>,
    /// Short-term injured reserve.
    #[serde(default)]
    pub short_term_ir: Vec<PlayerId>,
    /// Long-term injured reserve.
    #[serde(default)]
    pub long_term_ir: Vec<PlayerId>,
    /// Non-roster players.
    #[serde(default)]
    pub non_roster: Vec<PlayerId>,
    /// Salary retained on traded players.
    #[serde(default)]
    pub retained: Vec<RetainedSlice>,
    /// Players demoted while under contract.
    #[serde(default)]
    pub buried: Vec<PlayerId>,
    /// Buyouts on record.
    #[serde(default)]
    pub buyouts: Vec<BuyoutSchedule>,
    /// Standard player contracts held.
    #[serde(default)]
    pub spc_count: u32,
}

impl TeamState {
    /// Create an empty team.
    #[must_use]
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: Vec::new(),
            short_term_ir: Vec::new(),
            long_term_ir: Vec::new(),
            non_roster: Vec::new(),
            retained: Vec::new(),
            buried: Vec::new(),
            buyouts: Vec::new(),
            spc_count: 0,
        }
    }

    /// Players in a bucket.
    #[must_use]
    pub fn bucket(&self, bucket: RosterBucket) -> &[PlayerId] {
        match bucket {
            RosterBucket::Active => &self.active,
            RosterBucket::ShortTermIr => &self.short_term_ir,
            RosterBucket::LongTermIr => &self.long_term_ir,
            RosterBucket::NonRoster => &self.non_roster,
        }
    }

    fn bucket_mut(&mut self, bucket: RosterBucket) -> &mut Vec<PlayerId> {
        match bucket {
            RosterBucket::Active => &mut self.active,
            RosterBucket::ShortTermIr => &mut self.short_term_ir,
            RosterBucket::LongTermIr => &mut self.long_term_ir,
            RosterBucket::NonRoster => &mut self.non_roster,
        }
    }

    /// Bucket currently holding the player.
    #[must_use]
    pub fn bucket_of(&self, player_id: &PlayerId) -> Option<RosterBucket> {
        RosterBucket::ALL
            .into_iter()
            .find(|b| self.bucket(*b).contains(player_id))
    }

    /// True when any bucket holds the player.
    #[must_use]
    pub fn holds(&self, player_id: &PlayerId) -> bool {
        self.bucket_of(player_id).is_some()
    }

    /// Remove a player from whichever bucket holds them, and from the
    /// buried list. Returns the bucket they were in.
    pub fn remove_player(&mut self, player_id: &PlayerId) -> Option<RosterBucket> {
        let bucket = self.bucket_of(player_id)?;
        self.bucket_mut(bucket).retain(|p| p != player_id);
        self.buried.retain(|p| p != player_id);
        Some(bucket)
    }

    /// Place a player in a bucket, moving them out of any other.
    pub fn insert(&mut self, player_id: PlayerId, bucket: RosterBucket) {
        self.remove_player(&player_id);
        self.bucket_mut(bucket).push(player_id);
    }

    /// Demote a player to the non-roster bucket and mark them buried.
    pub fn bury(&mut self, player_id: PlayerId) {
        self.insert(player_id.clone(), RosterBucket::NonRoster);
        self.buried.push(player_id);
    }

    /// Active roster size.
    #[must_use]
    pub fn active_count(&self) -> u32 {
        u32::try_from(self.active.len()).unwrap_or(u32::MAX)
    }

    /// Slices still charging this team.
    pub fn active_slices(&self) -> impl Iterator<Item = &RetainedSlice> {
        self.retained.iter().filter(|s| s.is_active())
    }

    /// Full-season cap hit retained across active slices.
    #[must_use]
    pub fn retained_total(&self) -> Money {
        self.active_slices().map(|s| s.cap_hit).sum()
    }
}
