//! Day-based proration of full-season amounts.

use crate::domain::shared::Money;

/// Portion of a full-season amount charged through `day_index`.
///
/// Charges whole dollars per elapsed day, `floor(amount / season_days)`,
/// and the full amount once every day of the season has elapsed.
#[must_use]
pub fn prorate(amount: Money, season_days: u32, day_index: u32) -> Money {
    let days_elapsed = day_index.saturating_add(1);
    if season_days == 0 || days_elapsed >= season_days {
        return amount;
    }
    (amount / season_days).floor_dollars() * days_elapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 5_000 ; "first day")]
    #[test_case(9, 50_000 ; "tenth day")]
    #[test_case(184, 925_000 ; "second to last day")]
    #[test_case(185, 930_000 ; "last day charges in full")]
    #[test_case(400, 930_000 ; "past season end")]
    fn prorates_by_days_elapsed(day_index: u32, expected: i64) {
        assert_eq!(
            prorate(Money::dollars(930_000), 186, day_index),
            Money::dollars(expected)
        );
    }

    #[test]
    fn daily_rate_is_floored_to_whole_dollars() {
        // 1_000_000 / 186 = 5376.34...
        assert_eq!(prorate(Money::dollars(1_000_000), 186, 0), Money::dollars(5_376));
        assert_eq!(prorate(Money::dollars(1_000_000), 186, 1), Money::dollars(10_752));
        assert_eq!(
            prorate(Money::dollars(1_000_000), 186, 185),
            Money::dollars(1_000_000)
        );
    }

    #[test]
    fn zero_length_season_charges_in_full() {
        assert_eq!(prorate(Money::dollars(700), 0, 0), Money::dollars(700));
    }
}
