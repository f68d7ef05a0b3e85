//! Free agency value objects.

mod offseason;
mod rules;

pub use offseason::{FreeAgencyState, OfferSheet, QualifyingOffer};
pub use rules::{
    CompensationTable, CompensationTier, FreeAgencyRules, QualifyingOfferSchedule,
    QualifyingOfferTier,
};
