// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Cap Engine - Rust Core Library
//!
//! Roster and payroll legality for a franchise simulation: how much of the
//! salary cap each team uses on a given day, whether a roster is legal,
//! whether a trade may go through, and how the offseason free agent
//! market resolves.
//!
//! # Architecture (DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Business rules with no I/O
//!   - `ledger`: Players, contracts, rosters and the league aggregate
//!   - `cap_accounting`: Proration, LTIR relief, compliance, signing gate
//!   - `contract_ops`: Buyouts and terminations
//!   - `trade`: Clone-validate-commit trades
//!   - `free_agency`: Pools, qualifying offers, offer sheets, day step
//!
//! - **Application**: Orchestration
//!   - `ports`: `NewsPublisherPort` for market events
//!   - `services`: `LeagueOffice` facade over the ledger
//!   - `dto`: Cap reports
//!
//! Everything runs synchronously against one owned `LeagueState`. Rule
//! violations come back as `ConstraintResult` values; only malformed
//! requests are errors.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Facade and port definitions.
pub mod application;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading.
pub mod config;

/// Engine error types.
pub mod error;

/// Logging setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::{CapReportDto, LeagueOffice, NewsPublisherPort};
pub use domain::cap_accounting::{CapUsage, ConstraintResult, ConstraintViolation};
pub use domain::free_agency::{FreeAgencyEngine, FreeAgencyEvent};
pub use domain::ledger::{Contract, LeagueState, Player, TeamState};
pub use domain::shared::{ContractId, Money, PlayerId, SeasonLabel, TeamId};
pub use domain::trade::{TradeEngine, TradeProposal, TradeSide};
pub use error::{EngineError, ErrorCode};
