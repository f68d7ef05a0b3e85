//! Cap accounting services.

pub mod cap_calculator;
pub mod compliance_service;
pub mod proration;
pub mod signing_gate;

pub use cap_calculator::CapCalculator;
pub use compliance_service::{ComplianceService, check_team};
pub use proration::prorate;
pub use signing_gate::SigningGate;
