//! Free agency configuration: eligibility, qualifying offers and
//! offer-sheet compensation.

use serde::{Deserialize, Serialize};

/// Free agency configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreeAgencyConfig {
    /// Players younger than this are restricted.
    #[serde(default = "default_rfa_age_limit")]
    pub rfa_age_limit: u8,
    /// Players with fewer accrued seasons than this are restricted.
    #[serde(default = "default_rfa_accrued_seasons_limit")]
    pub rfa_accrued_seasons_limit: u8,
    /// Days a tendered qualifying offer stays open.
    #[serde(default = "default_window_days")]
    pub qo_tender_window_days: u32,
    /// Days the rights team has to match an offer sheet.
    #[serde(default = "default_window_days")]
    pub offer_sheet_match_window_days: u32,
    /// Qualifying offer multipliers by prior cap hit, ascending.
    #[serde(default = "default_qualifying_offer_tiers")]
    pub qualifying_offer_tiers: Vec<QualifyingOfferTierConfig>,
    /// Offer-sheet compensation by AAV, ascending.
    #[serde(default = "default_compensation_tiers")]
    pub compensation_tiers: Vec<CompensationTierConfig>,
}

impl Default for FreeAgencyConfig {
    fn default() -> Self {
        Self {
            rfa_age_limit: default_rfa_age_limit(),
            rfa_accrued_seasons_limit: default_rfa_accrued_seasons_limit(),
            qo_tender_window_days: default_window_days(),
            offer_sheet_match_window_days: default_window_days(),
            qualifying_offer_tiers: default_qualifying_offer_tiers(),
            compensation_tiers: default_compensation_tiers(),
        }
    }
}

/// One qualifying offer tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualifyingOfferTierConfig {
    /// Inclusive upper bound on prior cap hit; omit for the top tier.
    #[serde(default)]
    pub max_prior_cap_hit: Option<f64>,
    /// Multiplier applied to the prior cap hit.
    pub multiplier: f64,
}

/// One compensation tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompensationTierConfig {
    /// Inclusive upper bound on offer AAV; omit for the top tier.
    #[serde(default)]
    pub max_aav: Option<f64>,
    /// Compensation owed to the rights team.
    pub compensation: String,
}

const fn default_rfa_age_limit() -> u8 {
    27
}

const fn default_rfa_accrued_seasons_limit() -> u8 {
    7
}

const fn default_window_days() -> u32 {
    7
}

fn default_qualifying_offer_tiers() -> Vec<QualifyingOfferTierConfig> {
    [(Some(1_500_000.0), 1.20), (Some(4_238_000.0), 1.10), (None, 1.05)]
        .into_iter()
        .map(|(max_prior_cap_hit, multiplier)| QualifyingOfferTierConfig {
            max_prior_cap_hit,
            multiplier,
        })
        .collect()
}

fn default_compensation_tiers() -> Vec<CompensationTierConfig> {
    [
        (Some(1_500_000.0), "none"),
        (Some(2_300_000.0), "3rd-round pick"),
        (Some(4_600_000.0), "2nd-round pick"),
        (Some(6_900_000.0), "1st- and 3rd-round picks"),
        (Some(9_200_000.0), "1st-, 2nd- and 3rd-round picks"),
        (Some(11_500_000.0), "two 1st-round picks, a 2nd and a 3rd"),
        (None, "four 1st-round picks"),
    ]
    .into_iter()
    .map(|(max_aav, compensation)| CompensationTierConfig {
        max_aav,
        compensation: compensation.to_string(),
    })
    .collect()
}
