//! Season label value object ("2025-26").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::DomainError;

/// A hockey season label such as `2025-26`.
///
/// Stored as the starting calendar year so ordering and stepping are
/// arithmetic; serialized in its display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeasonLabel {
    start_year: u16,
}

impl SeasonLabel {
    /// Create a season from its starting year.
    #[must_use]
    pub const fn starting(start_year: u16) -> Self {
        Self { start_year }
    }

    /// Parse a label of the form `YYYY-YY`.
    ///
    /// # Errors
    ///
    /// Returns error if the label is malformed or the two halves are not
    /// consecutive years.
    pub fn parse(label: &str) -> Result<Self, DomainError> {
        let invalid = |message: &str| DomainError::invalid("season", format!("{label}: {message}"));

        let (start, end) = label
            .split_once('-')
            .ok_or_else(|| invalid("expected YYYY-YY"))?;
        if start.len() != 4 || end.len() != 2 {
            return Err(invalid("expected YYYY-YY"));
        }
        let start_year: u16 = start.parse().map_err(|_| invalid("bad start year"))?;
        let end_suffix: u16 = end.parse().map_err(|_| invalid("bad end year"))?;
        if (start_year + 1) % 100 != end_suffix {
            return Err(invalid("years are not consecutive"));
        }
        Ok(Self { start_year })
    }

    /// Starting calendar year.
    #[must_use]
    pub const fn start_year(&self) -> u16 {
        self.start_year
    }

    /// The following season ("2025-26" -> "2026-27").
    #[must_use]
    pub const fn next(&self) -> Self {
        self.offset(1)
    }

    /// The season `n` years after this one.
    #[must_use]
    pub const fn offset(&self, n: u16) -> Self {
        Self {
            start_year: self.start_year + n,
        }
    }

    /// Number of seasons from `self` through `end`, inclusive. Zero when
    /// `end` precedes `self`.
    #[must_use]
    pub const fn seasons_through(&self, end: Self) -> u16 {
        if end.start_year < self.start_year {
            0
        } else {
            end.start_year - self.start_year + 1
        }
    }
}

impl fmt::Display for SeasonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.start_year, (self.start_year + 1) % 100)
    }
}

impl FromStr for SeasonLabel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SeasonLabel {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SeasonLabel> for String {
    fn from(value: SeasonLabel) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2025-26", 2025 ; "ordinary")]
    #[test_case("1999-00", 1999 ; "century rollover")]
    fn parses_valid_labels(label: &str, year: u16) {
        let season = SeasonLabel::parse(label).unwrap();
        assert_eq!(season.start_year(), year);
        assert_eq!(season.to_string(), label);
    }

    #[test_case("2025-27" ; "non consecutive")]
    #[test_case("2025" ; "missing suffix")]
    #[test_case("25-26" ; "short start")]
    #[test_case("abcd-ef" ; "not numeric")]
    fn rejects_invalid_labels(label: &str) {
        assert!(SeasonLabel::parse(label).is_err());
    }

    #[test]
    fn next_increments_both_halves() {
        let season = SeasonLabel::parse("2025-26").unwrap();
        assert_eq!(season.next().to_string(), "2026-27");
        assert_eq!(SeasonLabel::starting(2099).next().to_string(), "2100-01");
    }

    #[test]
    fn seasons_through_is_inclusive() {
        let start = SeasonLabel::starting(2025);
        assert_eq!(start.seasons_through(SeasonLabel::starting(2027)), 3);
        assert_eq!(start.seasons_through(start), 1);
        assert_eq!(start.seasons_through(SeasonLabel::starting(2024)), 0);
    }

    #[test]
    fn ordering_follows_years() {
        assert!(SeasonLabel::starting(2024) < SeasonLabel::starting(2025));
    }

    #[test]
    fn serde_uses_display_form() {
        let season = SeasonLabel::starting(2025);
        let json = serde_json::to_string(&season).unwrap();
        assert_eq!(json, "\"2025-26\"");
        let parsed: SeasonLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, season);
        assert!(serde_json::from_str::<SeasonLabel>("\"2025-30\"").is_err());
    }
}
