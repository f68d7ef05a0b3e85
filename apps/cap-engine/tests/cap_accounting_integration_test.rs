//! Cap Accounting Integration Tests
//!
//! Proration and LTIR relief over whole rosters, the ceiling as a hard
//! wall for signings, and snapshot persistence.

#![allow(clippy::unwrap_used)]

mod common;

use cap_engine::domain::cap_accounting::services::compliance_service::{
    CAP_CEILING_EXCEEDED, ROSTER_ABOVE_MAXIMUM,
};
use cap_engine::domain::cap_accounting::{CapCalculator, prorate};
use cap_engine::domain::free_agency::FreeAgencyEngine;
use cap_engine::domain::ledger::{Contract, LeagueState, RosterBucket};
use cap_engine::domain::shared::{ContractId, Money, PlayerId, SeasonLabel};
use common::{SEASON, advance_to, fill_roster, league, pid, sign, tid};
use proptest::prelude::*;

const LAST_SEASON: SeasonLabel = SeasonLabel::starting(2024);

// =============================================================================
// Scenario: signing into a team sitting exactly on the ceiling
// =============================================================================

/// 23 players whose daily charge adds up to exactly the daily ceiling.
fn capped_out_league() -> (LeagueState, FreeAgencyEngine) {
    let per_player = 186 * 20_000;
    let mut league = league(23 * per_player);
    fill_roster(&mut league, "BOS", 23, per_player);

    // free agent whose deal ran out last season
    sign(&mut league, "NYR", "vet", 31, 12, LAST_SEASON, 1, 2_000_000);
    let mut engine = FreeAgencyEngine::default();
    engine
        .build_pools_for_offseason(&mut league, LAST_SEASON)
        .unwrap();
    (league, engine)
}

#[test]
fn capped_out_team_sits_on_prorated_ceiling_every_day() {
    let (mut league, mut engine) = capped_out_league();
    for day in [0, 45, 185] {
        advance_to(&mut engine, &mut league, day);
        let usage = CapCalculator::new(&league).usage_for(&tid("BOS")).unwrap();
        assert_eq!(usage.total_usage, usage.prorated_ceiling, "day {day}");
        assert_eq!(usage.cap_space(), Money::ZERO);
    }
}

#[test]
fn signing_realistic_ufa_into_capped_team_fails() {
    let (mut league, mut engine) = capped_out_league();
    advance_to(&mut engine, &mut league, 60);
    let before = league.clone();

    let outcome = engine
        .sign_ufa(&mut league, &tid("BOS"), &pid("vet"), 2, Money::dollars(1_750_000))
        .unwrap();

    assert!(!outcome.passed());
    assert!(outcome.result.has_code(CAP_CEILING_EXCEEDED));
    assert!(outcome.result.has_code(ROSTER_ABOVE_MAXIMUM));
    assert!(engine.state().ufa_pool.contains(&pid("vet")));
    assert_eq!(league, before);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Runs on the last day, where proration charges the full AAV. On any
    /// earlier day the daily charge is floored, so an AAV below
    /// `season_days` prorates to $0 and only the roster maximum blocks the
    /// signing.
    #[test]
    fn any_positive_aav_breaks_ceiling_at_season_end(aav in 1i64..20_000_000, years in 1u16..6) {
        let (mut league, mut engine) = capped_out_league();
        advance_to(&mut engine, &mut league, 185);
        let before = league.clone();

        let outcome = engine
            .sign_ufa(&mut league, &tid("BOS"), &pid("vet"), years, Money::dollars(aav))
            .unwrap();

        prop_assert!(!outcome.passed());
        prop_assert!(outcome.result.has_code(CAP_CEILING_EXCEEDED));
        prop_assert!(engine.state().ufa_pool.contains(&pid("vet")));
        prop_assert_eq!(league, before);
    }
}

// =============================================================================
// Contract windows and proration
// =============================================================================

proptest! {
    #[test]
    fn cap_hit_is_zero_outside_contract(
        start in 2000u16..2060,
        years in 1u16..9,
        aav in 0i64..15_000_000,
        before in 1u16..10,
        after in 1u16..10,
    ) {
        let start = SeasonLabel::starting(start);
        let contract =
            Contract::flat(ContractId::new("c"), PlayerId::new("p"), start, years, Money::dollars(aav)).unwrap();

        let earlier = SeasonLabel::starting(start.start_year() - before);
        let later = contract.end.offset(after);
        prop_assert_eq!(contract.cap_hit_for_season(earlier), Money::ZERO);
        prop_assert_eq!(contract.cap_hit_for_season(later), Money::ZERO);
        prop_assert_eq!(contract.cap_hit_for_season(start), Money::dollars(aav));
    }

    #[test]
    fn proration_is_monotone_and_complete(amount in 0i64..20_000_000, days in 1u32..400, day in 0u32..400) {
        let amount = Money::dollars(amount);
        prop_assert!(prorate(amount, days, day) <= prorate(amount, days, day + 1));
        prop_assert!(prorate(amount, days, day) <= amount);
        prop_assert_eq!(prorate(amount, days, days - 1), amount);
    }
}

// =============================================================================
// LTIR relief
// =============================================================================

fn roster_league(hits: &[(i64, bool)], ceiling: i64, day: u32) -> LeagueState {
    let mut league = league(ceiling);
    for (i, (hit, injured)) in hits.iter().enumerate() {
        let player = format!("p{i}");
        sign(&mut league, "BOS", &player, 27, 5, SEASON, 2, *hit);
        if *injured {
            league
                .move_to_bucket(&tid("BOS"), &PlayerId::new(player), RosterBucket::LongTermIr)
                .unwrap();
        }
    }
    for _ in 0..day {
        league.advance_day();
    }
    league
}

proptest! {
    #[test]
    fn ltir_relief_is_bounded(
        hits in prop::collection::vec((0i64..12_000_000, any::<bool>()), 0..30),
        ceiling in 1_000_000i64..100_000_000,
        day in 0u32..186,
    ) {
        let league = roster_league(&hits, ceiling, day);
        let usage = CapCalculator::new(&league).usage_for(&tid("BOS")).unwrap();

        let overage = (usage.base_usage - usage.prorated_ceiling).non_negative();
        prop_assert!(usage.ltir_relief <= usage.ltir_pool);
        prop_assert!(usage.ltir_relief <= overage);
        prop_assert_eq!(usage.ltir_relief, usage.ltir_pool.min(overage));
        prop_assert_eq!(usage.total_usage, usage.base_usage - usage.ltir_relief);
    }

    #[test]
    fn no_ltir_means_no_relief(
        hits in prop::collection::vec(0i64..12_000_000, 0..30),
        ceiling in 1_000_000i64..100_000_000,
        day in 0u32..186,
    ) {
        let healthy: Vec<(i64, bool)> = hits.into_iter().map(|h| (h, false)).collect();
        let league = roster_league(&healthy, ceiling, day);
        let usage = CapCalculator::new(&league).usage_for(&tid("BOS")).unwrap();
        prop_assert_eq!(usage.ltir_relief, Money::ZERO);
        prop_assert_eq!(usage.ltir_pool, Money::ZERO);
    }
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn snapshot_round_trip_keeps_proration_inputs() {
    let mut league = roster_league(&[(3_000_000, false), (5_000_000, true)], 6_000_000, 40);
    league.bury(&tid("BOS"), &PlayerId::new("p0")).unwrap();

    let json = serde_json::to_string(&league).unwrap();
    let restored: LeagueState = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, league);
    assert_eq!(restored.day_index(), 40);
    assert_eq!(
        CapCalculator::new(&restored).usage_for(&tid("BOS")).unwrap(),
        CapCalculator::new(&league).usage_for(&tid("BOS")).unwrap()
    );
}
