//! Free agency services.

pub mod free_agency_engine;

pub use free_agency_engine::{FreeAgencyEngine, FreeAgencyOutcome};
