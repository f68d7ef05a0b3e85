//! Trade services.

pub mod trade_engine;

pub use trade_engine::TradeEngine;
