//! Contract Operations Bounded Context
//!
//! Buyouts and terminations. Both remove the contract from the ledger;
//! a buyout also leaves a payment schedule on the team.

pub mod buyout;
pub mod termination;

pub use buyout::{BuyoutTerms, buy_out, compute_buyout};
pub use termination::terminate;
