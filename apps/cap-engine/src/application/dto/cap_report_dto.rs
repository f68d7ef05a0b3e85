//! Cap report DTOs

use serde::{Deserialize, Serialize};

use crate::domain::cap_accounting::{CapUsage, ConstraintResult, ConstraintViolation};
use crate::domain::ledger::{BuyoutSchedule, TeamState};
use crate::domain::shared::Money;

/// DTO for a rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationDto {
    /// Violation code.
    pub code: String,
    /// Violation severity.
    pub severity: String,
    /// Violation message.
    pub message: String,
    /// Team ID (if applicable).
    pub team_id: Option<String>,
    /// Observed value (if applicable).
    pub observed: Option<String>,
    /// Limit value (if applicable).
    pub limit: Option<String>,
}

impl From<ConstraintViolation> for ViolationDto {
    fn from(v: ConstraintViolation) -> Self {
        Self {
            code: v.code,
            severity: v.severity.to_string(),
            message: v.message,
            team_id: v.team_id.map(|t| t.to_string()),
            observed: v.observed,
            limit: v.limit,
        }
    }
}

/// DTO for a compliance result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceDto {
    /// Whether every blocking rule passed.
    pub passed: bool,
    /// Violations, warnings included.
    pub violations: Vec<ViolationDto>,
}

impl From<ConstraintResult> for ComplianceDto {
    fn from(result: ConstraintResult) -> Self {
        Self {
            passed: result.passed,
            violations: result
                .violations
                .into_iter()
                .map(ViolationDto::from)
                .collect(),
        }
    }
}

/// A team's cap position on the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapReportDto {
    /// Team ID.
    pub team_id: String,
    /// Team name.
    pub team_name: String,
    /// Season label.
    pub season: String,
    /// Zero-based day of the season.
    pub day_index: u32,
    /// Active roster size.
    pub active_count: u32,
    /// Standard player contracts held.
    pub spc_count: u32,
    /// Usage breakdown.
    pub usage: CapUsage,
    /// Space under the prorated ceiling; negative when over.
    pub cap_space: Money,
    /// Buyouts on record, for display.
    pub buyouts: Vec<BuyoutSchedule>,
    /// Compliance on the current day.
    pub compliance: ComplianceDto,
}

impl CapReportDto {
    /// Build a report from a team record, its usage and its compliance.
    #[must_use]
    pub fn new(team: &TeamState, usage: CapUsage, compliance: ConstraintResult) -> Self {
        Self {
            team_id: team.id.to_string(),
            team_name: team.name.clone(),
            season: usage.season.to_string(),
            day_index: usage.day_index,
            active_count: team.active_count(),
            spc_count: team.spc_count,
            cap_space: usage.cap_space(),
            usage,
            buyouts: team.buyouts.clone(),
            compliance: compliance.into(),
        }
    }

    /// One-line summary for terminal output.
    #[must_use]
    pub fn summary(&self) -> String {
        let status = if self.compliance.passed { "OK" } else { "VIOLATION" };
        format!(
            "{} {} day {}: usage {} / ceiling {} (space {}, LTIR relief {}) roster {} SPC {} [{status}]",
            self.team_id,
            self.season,
            self.day_index,
            self.usage.total_usage,
            self.usage.prorated_ceiling,
            self.cap_space,
            self.usage.ltir_relief,
            self.active_count,
            self.spc_count,
        )
    }
}
