//! Trade Bounded Context
//!
//! Two-team trades of players, picks and retained salary, validated on
//! scratch copies and committed as a separate step.

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::TradeError;
pub use services::TradeEngine;
pub use value_objects::{TradePiece, TradeProposal, TradeSide, TradeValidation};
