//! Trade value objects.

mod proposal;
mod trade_validation;

pub use proposal::{TradePiece, TradeProposal, TradeSide};
pub use trade_validation::TradeValidation;
