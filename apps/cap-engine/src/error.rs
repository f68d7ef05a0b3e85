//! Hard-failure errors for the cap engine.
//!
//! Business-rule violations (roster size, cap ceiling, retention limits)
//! are never errors; they come back as a `ConstraintResult`. An
//! `EngineError` means the request itself could not be applied.
//!
//! | Code | Usage |
//! |------|-------|
//! | `NOT_FOUND` | Team, player, contract or offseason record does not exist |
//! | `INVALID_INPUT` | Malformed request (zero years, negative AAV, wrong pool) |
//! | `STALE_SNAPSHOT` | Trade commit against rosters that changed since preview |
//! | `INTERNAL` | Ledger inconsistency |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::free_agency::FreeAgencyError;
use crate::domain::shared::DomainError;
use crate::domain::trade::TradeError;

/// Error codes for the cap engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced record does not exist.
    NotFound,
    /// Request is structurally invalid.
    InvalidInput,
    /// Trade snapshot no longer matches the ledger.
    StaleSnapshot,
    /// Ledger is inconsistent.
    Internal,
}

impl ErrorCode {
    /// Machine-readable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::InvalidInput => "INVALID_INPUT",
            Self::StaleSnapshot => "STALE_SNAPSHOT",
            Self::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A hard failure with context.
#[derive(Debug, Error)]
pub struct EngineError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl EngineError {
    /// Create a new engine error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.push((key.into(), value.to_string()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Record not found.
    #[must_use]
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::new(ErrorCode::NotFound, format!("{entity} {id} not found"))
            .with_context("entity", entity)
            .with_context("id", id)
    }

    /// Malformed request.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Trade snapshot out of date.
    #[must_use]
    pub fn stale_snapshot(team_id: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::StaleSnapshot,
            format!("Team {team_id} changed since the trade was validated"),
        )
        .with_context("team_id", team_id)
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::NotFound { entity_type, id } => {
                Self::new(ErrorCode::NotFound, err.to_string())
                    .with_context("entity", entity_type)
                    .with_context("id", id)
            }
            DomainError::InvalidValue { field, .. } => {
                Self::new(ErrorCode::InvalidInput, err.to_string()).with_context("field", field)
            }
            DomainError::InvariantViolation { aggregate, .. } => {
                Self::new(ErrorCode::InvalidInput, err.to_string())
                    .with_context("aggregate", aggregate)
            }
        }
    }
}

impl From<TradeError> for EngineError {
    fn from(err: TradeError) -> Self {
        match err {
            TradeError::Domain(inner) => inner.into(),
            TradeError::StaleSnapshot { team_id } => Self::stale_snapshot(team_id),
            TradeError::SameTeam { ref team_id } | TradeError::InvalidPiece { ref team_id, .. } => {
                let team_id = team_id.clone();
                Self::invalid_input(err.to_string()).with_context("team_id", team_id)
            }
            TradeError::ValidationFailed { .. } => Self::invalid_input(err.to_string()),
        }
    }
}

impl From<FreeAgencyError> for EngineError {
    fn from(err: FreeAgencyError) -> Self {
        match err {
            FreeAgencyError::Domain(inner) => inner.into(),
            FreeAgencyError::QualifyingOfferNotFound { ref player_id }
            | FreeAgencyError::OfferSheetNotFound { ref player_id } => {
                let player_id = player_id.clone();
                Self::new(ErrorCode::NotFound, err.to_string()).with_context("player_id", player_id)
            }
            _ => Self::invalid_input(err.to_string()),
        }
    }
}
