//! Configuration module for the cap engine.
//!
//! Loads league rules, free agency tables, the buyout formula and
//! logging settings from YAML, with environment variable interpolation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cap_engine::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("league/config.yaml"))?;
//!
//! println!("cap ceiling: {}", config.league.cap_ceiling);
//! ```

mod buyout;
mod free_agency;
mod league;
mod observability;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use buyout::BuyoutConfig;
pub use free_agency::{CompensationTierConfig, FreeAgencyConfig, QualifyingOfferTierConfig};
pub use league::LeagueRulesConfig;
pub use observability::{LoggingConfig, ObservabilityConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Cap and roster rules.
    #[serde(default)]
    pub league: LeagueRulesConfig,
    /// Free agency rules.
    #[serde(default)]
    pub free_agency: FreeAgencyConfig,
    /// Buyout formula.
    #[serde(default)]
    pub buyout: BuyoutConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_league(&config.league)?;
    validate_free_agency(&config.free_agency)?;

    let buyout = &config.buyout;
    if buyout.obligation_denominator == 0 {
        return Err(invalid("buyout.obligation_denominator must be positive"));
    }
    if buyout.obligation_numerator > buyout.obligation_denominator {
        return Err(invalid("buyout.obligation_numerator must not exceed the denominator"));
    }
    if buyout.spread_multiplier == 0 {
        return Err(invalid("buyout.spread_multiplier must be positive"));
    }

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(invalid(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}

fn validate_league(league: &LeagueRulesConfig) -> Result<(), ConfigError> {
    if league.cap_ceiling <= 0.0 {
        return Err(invalid("league.cap_ceiling must be positive"));
    }
    if let Some(floor) = league.cap_floor {
        if floor < 0.0 || floor > league.cap_ceiling {
            return Err(invalid("league.cap_floor must be between 0 and cap_ceiling"));
        }
    }
    if league.min_roster > league.max_roster {
        return Err(invalid("league.min_roster must not exceed max_roster"));
    }
    if league.season_days == 0 {
        return Err(invalid("league.season_days must be positive"));
    }
    if league.buried_threshold < 0.0 {
        return Err(invalid("league.buried_threshold must not be negative"));
    }
    if !(0.0..=1.0).contains(&league.max_retained_share) {
        return Err(invalid("league.max_retained_share must be between 0.0 and 1.0"));
    }
    if league.max_retention_pct <= 0.0 || league.max_retention_pct > 1.0 {
        return Err(invalid("league.max_retention_pct must be in (0.0, 1.0]"));
    }
    Ok(())
}

fn validate_free_agency(fa: &FreeAgencyConfig) -> Result<(), ConfigError> {
    let qo_bounds: Vec<Option<f64>> = fa
        .qualifying_offer_tiers
        .iter()
        .map(|t| t.max_prior_cap_hit)
        .collect();
    validate_tier_bounds("free_agency.qualifying_offer_tiers", &qo_bounds)?;
    if fa.qualifying_offer_tiers.iter().any(|t| t.multiplier <= 0.0) {
        return Err(invalid("free_agency.qualifying_offer_tiers multipliers must be positive"));
    }

    let comp_bounds: Vec<Option<f64>> = fa.compensation_tiers.iter().map(|t| t.max_aav).collect();
    validate_tier_bounds("free_agency.compensation_tiers", &comp_bounds)?;

    if fa.qo_tender_window_days == 0 || fa.offer_sheet_match_window_days == 0 {
        return Err(invalid("free_agency windows must be at least one day"));
    }
    Ok(())
}

/// Tiers ascend strictly and end with an open-ended tier.
fn validate_tier_bounds(name: &str, bounds: &[Option<f64>]) -> Result<(), ConfigError> {
    let Some((last, rest)) = bounds.split_last() else {
        return Err(invalid(format!("{name} must not be empty")));
    };
    if last.is_some() {
        return Err(invalid(format!("{name} must end with an open-ended tier")));
    }
    let mut previous = f64::NEG_INFINITY;
    for bound in rest {
        let Some(bound) = *bound else {
            return Err(invalid(format!("{name} may only leave the last tier open")));
        };
        if bound <= previous {
            return Err(invalid(format!("{name} bounds must ascend")));
        }
        previous = bound;
    }
    Ok(())
}
