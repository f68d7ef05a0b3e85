//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod identifiers;
mod money;
mod season;

pub use identifiers::{ContractId, PlayerId, TeamId};
pub use money::Money;
pub use season::SeasonLabel;
