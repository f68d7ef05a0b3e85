//! Free Agency Bounded Context
//!
//! Turns expiring contracts into new ones through a regulated market.
//!
//! # Key Concepts
//!
//! - **Pools**: restricted (rights team may match) and unrestricted
//! - **Qualifying offer**: tiered one-season offer that keeps a player restricted
//! - **Offer sheet**: rival offer the rights team may match within a window
//! - **Day step**: deadlines are day numbers settled by `advance_day`

pub mod errors;
pub mod events;
pub mod services;
pub mod value_objects;

pub use errors::FreeAgencyError;
pub use events::FreeAgencyEvent;
pub use services::{FreeAgencyEngine, FreeAgencyOutcome};
pub use value_objects::{
    CompensationTable, CompensationTier, FreeAgencyRules, FreeAgencyState, OfferSheet,
    QualifyingOffer, QualifyingOfferSchedule, QualifyingOfferTier,
};
