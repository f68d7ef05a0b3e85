//! Constraint validation result types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::TeamId;

/// Constraint violation severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationSeverity {
    /// Warning - can proceed with caution.
    Warning,
    /// Error - must reject the operation.
    Error,
    /// Critical - ledger is inconsistent and needs attention.
    Critical,
}

impl fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    /// Violation code (e.g., "CAP_CEILING_EXCEEDED").
    pub code: String,
    /// Violation severity.
    pub severity: ViolationSeverity,
    /// Human-readable message.
    pub message: String,
    /// Offending team, if the violation belongs to one.
    pub team_id: Option<TeamId>,
    /// Observed value that violated the constraint.
    pub observed: Option<String>,
    /// Configured limit.
    pub limit: Option<String>,
}

impl ConstraintViolation {
    /// Create a new constraint violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        severity: ViolationSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            team_id: None,
            observed: None,
            limit: None,
        }
    }

    /// Create an error-level violation.
    #[must_use]
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, ViolationSeverity::Error, message)
    }

    /// Create a warning-level violation.
    #[must_use]
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, ViolationSeverity::Warning, message)
    }

    /// Tag with the offending team.
    #[must_use]
    pub fn with_team(mut self, team_id: &TeamId) -> Self {
        self.team_id = Some(team_id.clone());
        self
    }

    /// Add observed value.
    #[must_use]
    pub fn with_observed(mut self, value: impl fmt::Display) -> Self {
        self.observed = Some(value.to_string());
        self
    }

    /// Add limit value.
    #[must_use]
    pub fn with_limit(mut self, value: impl fmt::Display) -> Self {
        self.limit = Some(value.to_string());
        self
    }

    /// True for errors and critical violations.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(
            self.severity,
            ViolationSeverity::Error | ViolationSeverity::Critical
        )
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)?;
        if let Some(team) = &self.team_id {
            write!(f, " (team: {team})")?;
        }
        Ok(())
    }
}

/// Result from constraint check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintResult {
    /// Whether all constraints passed (no errors or critical).
    pub passed: bool,
    /// List of violations.
    pub violations: Vec<ConstraintViolation>,
}

impl ConstraintResult {
    /// Create a successful result with no violations.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            passed: true,
            violations: Vec::new(),
        }
    }

    /// Create a failed result with violations.
    #[must_use]
    pub const fn failure(violations: Vec<ConstraintViolation>) -> Self {
        Self {
            passed: false,
            violations,
        }
    }

    /// Failed result with a single violation.
    #[must_use]
    pub fn rejected(violation: ConstraintViolation) -> Self {
        Self::failure(vec![violation])
    }

    /// Create a result from violations, automatically determining pass/fail.
    #[must_use]
    pub fn from_violations(violations: Vec<ConstraintViolation>) -> Self {
        let has_blocking = violations.iter().any(ConstraintViolation::is_blocking);
        Self {
            passed: !has_blocking,
            violations,
        }
    }

    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Warning)
    }

    /// Returns true if any violation carries `code`.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.violations.iter().any(|v| v.code == code)
    }

    /// Violations tagged with a team.
    pub fn for_team<'a>(
        &'a self,
        team_id: &'a TeamId,
    ) -> impl Iterator<Item = &'a ConstraintViolation> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.team_id.as_ref() == Some(team_id))
    }

    /// Blocking violations only.
    #[must_use]
    pub fn errors(&self) -> Vec<&ConstraintViolation> {
        self.violations.iter().filter(|v| v.is_blocking()).collect()
    }

    /// Flat list of human-readable messages for blocking violations.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors().iter().map(|v| v.message.clone()).collect()
    }

    /// Add a violation to this result.
    pub fn add_violation(&mut self, violation: ConstraintViolation) {
        if violation.is_blocking() {
            self.passed = false;
        }
        self.violations.push(violation);
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: Self) {
        if !other.passed {
            self.passed = false;
        }
        self.violations.extend(other.violations);
    }
}

impl Default for ConstraintResult {
    fn default() -> Self {
        Self::success()
    }
}
