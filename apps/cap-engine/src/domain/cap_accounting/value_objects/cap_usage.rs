//! Cap usage breakdown for one team on one day.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Money, SeasonLabel, TeamId};

/// Prorated cap consumption, component by component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapUsage {
    /// Team measured.
    pub team_id: TeamId,
    /// Season measured.
    pub season: SeasonLabel,
    /// Day index the figures are prorated to.
    pub day_index: u32,
    /// Active roster and short-term IR.
    pub roster_charge: Money,
    /// Long-term IR players; also the relief pool.
    pub ltir_pool: Money,
    /// Buried contracts above the threshold.
    pub buried_charge: Money,
    /// Salary retained on departed players.
    pub retained_charge: Money,
    /// Sum of every charge before relief.
    pub base_usage: Money,
    /// LTIR relief granted.
    pub ltir_relief: Money,
    /// Usage after relief.
    pub total_usage: Money,
    /// Ceiling prorated to the same day.
    pub prorated_ceiling: Money,
}

impl CapUsage {
    /// Room left under the prorated ceiling; negative when over.
    #[must_use]
    pub fn cap_space(&self) -> Money {
        self.prorated_ceiling - self.total_usage
    }

    /// True when usage exceeds the prorated ceiling.
    #[must_use]
    pub fn is_over_ceiling(&self) -> bool {
        self.total_usage > self.prorated_ceiling
    }
}
