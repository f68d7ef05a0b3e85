//! Cap accounting value objects.

mod cap_usage;
mod constraint_result;

pub use cap_usage::CapUsage;
pub use constraint_result::{ConstraintResult, ConstraintViolation, ViolationSeverity};
