//! Buyout formula configuration.

use serde::{Deserialize, Serialize};

/// Buyout formula: `numerator / denominator` of remaining salary, paid
/// over `spread_multiplier` times the remaining seasons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyoutConfig {
    /// Numerator of the obligation fraction.
    #[serde(default = "default_obligation_numerator")]
    pub obligation_numerator: u32,
    /// Denominator of the obligation fraction.
    #[serde(default = "default_obligation_denominator")]
    pub obligation_denominator: u32,
    /// Spread multiplier on remaining seasons.
    #[serde(default = "default_spread_multiplier")]
    pub spread_multiplier: u16,
}

impl Default for BuyoutConfig {
    fn default() -> Self {
        Self {
            obligation_numerator: default_obligation_numerator(),
            obligation_denominator: default_obligation_denominator(),
            spread_multiplier: default_spread_multiplier(),
        }
    }
}

const fn default_obligation_numerator() -> u32 {
    2
}

const fn default_obligation_denominator() -> u32 {
    3
}

const fn default_spread_multiplier() -> u16 {
    2
}
