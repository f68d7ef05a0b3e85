//! Ledger Bounded Context
//!
//! Pure data for the payroll ledger: players, contracts, team rosters,
//! season rules and the league aggregate that owns them all.

mod contract;
mod finance;
mod league;
mod player;
mod team;

pub use contract::{Contract, ContractClauses, ContractTerm};
pub use finance::SeasonFinance;
pub use league::LeagueState;
pub use player::{ContractStatus, Player, Position, RightsStatus};
pub use team::{BuyoutInstallment, BuyoutSchedule, RetainedSlice, RosterBucket, TeamState};
