//! Domain Layer
//!
//! Business rules of the salary cap with no I/O. Each bounded context owns
//! its value objects, services and error type.
//!
//! # Bounded Contexts
//!
//! - [`ledger`]: Players, contracts, team rosters and the league state
//! - [`cap_accounting`]: Prorated cap usage, LTIR relief and compliance
//! - [`contract_ops`]: Buyouts and terminations
//! - [`trade`]: Two-team trade validation and commit
//! - [`free_agency`]: RFA/UFA pools, qualifying offers and offer sheets

pub mod cap_accounting;
pub mod contract_ops;
pub mod free_agency;
pub mod ledger;
pub mod shared;
pub mod trade;
