//! Cap Accounting Bounded Context
//!
//! Prorated cap usage, LTIR relief and league-rule compliance for a
//! team, plus the gate every direct signing passes through.

pub mod services;
pub mod value_objects;

pub use services::{CapCalculator, ComplianceService, SigningGate, check_team, prorate};
pub use value_objects::{CapUsage, ConstraintResult, ConstraintViolation, ViolationSeverity};
