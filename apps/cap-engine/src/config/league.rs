//! League cap and roster rules.

use serde::{Deserialize, Serialize};

/// League rules for a season. Money values are whole dollars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueRulesConfig {
    /// Upper cap limit.
    #[serde(default = "default_cap_ceiling")]
    pub cap_ceiling: f64,
    /// Lower cap limit; omit for no floor.
    #[serde(default = "default_cap_floor")]
    pub cap_floor: Option<f64>,
    /// Minimum active roster size.
    #[serde(default = "default_min_roster")]
    pub min_roster: u32,
    /// Maximum active roster size.
    #[serde(default = "default_max_roster")]
    pub max_roster: u32,
    /// Maximum standard player contracts per team.
    #[serde(default = "default_spc_limit")]
    pub spc_limit: u32,
    /// Season length in days.
    #[serde(default = "default_season_days")]
    pub season_days: u32,
    /// Cap hit a buried contract sheds down to.
    #[serde(default = "default_buried_threshold")]
    pub buried_threshold: f64,
    /// Maximum retained-salary slices per team.
    #[serde(default = "default_max_retained_slices")]
    pub max_retained_slices: u32,
    /// Maximum aggregate retained salary as a share of the ceiling.
    #[serde(default = "default_max_retained_share")]
    pub max_retained_share: f64,
    /// Maximum share of one contract a team may retain.
    #[serde(default = "default_max_retention_pct")]
    pub max_retention_pct: f64,
}

impl Default for LeagueRulesConfig {
    fn default() -> Self {
        Self {
            cap_ceiling: default_cap_ceiling(),
            cap_floor: default_cap_floor(),
            min_roster: default_min_roster(),
            max_roster: default_max_roster(),
            spc_limit: default_spc_limit(),
            season_days: default_season_days(),
            buried_threshold: default_buried_threshold(),
            max_retained_slices: default_max_retained_slices(),
            max_retained_share: default_max_retained_share(),
            max_retention_pct: default_max_retention_pct(),
        }
    }
}

const fn default_cap_ceiling() -> f64 {
    88_000_000.0
}

#[allow(clippy::unnecessary_wraps)]
const fn default_cap_floor() -> Option<f64> {
    Some(65_000_000.0)
}

const fn default_min_roster() -> u32 {
    20
}

const fn default_max_roster() -> u32 {
    23
}

const fn default_spc_limit() -> u32 {
    50
}

const fn default_season_days() -> u32 {
    186
}

const fn default_buried_threshold() -> f64 {
    1_150_000.0
}

const fn default_max_retained_slices() -> u32 {
    3
}

const fn default_max_retained_share() -> f64 {
    0.15
}

const fn default_max_retention_pct() -> f64 {
    0.5
}
