//! Trade Engine
//!
//! Clone-validate-commit:
//! 1. Copy the two participating team records.
//! 2. Apply every piece to the copies.
//! 3. Check both copies for compliance, with the cap calculator reading
//!    the copies in place of the real records.
//! 4. Hand back a `TradeValidation`; the ledger is untouched.
//!
//! A trade may not take a team below the roster minimum. Outside trades
//! a short roster is only a warning.
//!
//! `commit` is the only step that writes, and refuses a validation that
//! failed or that the current ledger would no longer produce.

use tracing::{debug, info};

use crate::domain::cap_accounting::services::compliance_service::ROSTER_BELOW_MINIMUM;
use crate::domain::cap_accounting::{
    ComplianceService, ConstraintResult, ConstraintViolation, ViolationSeverity,
};
use crate::domain::ledger::{LeagueState, RetainedSlice, RightsStatus, RosterBucket, TeamState};
use crate::domain::shared::{PlayerId, TeamId};
use crate::domain::trade::errors::TradeError;
use crate::domain::trade::value_objects::{TradePiece, TradeProposal, TradeSide, TradeValidation};

/// Player carries a no-trade or no-move clause.
pub const TRADE_CLAUSE_WAIVER_REQUIRED: &str = "TRADE_CLAUSE_WAIVER_REQUIRED";

/// Validates and commits two-team trades.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeEngine;

impl TradeEngine {
    /// Validate a proposal against scratch copies of both teams.
    ///
    /// Repeatable: the ledger is only read, so validating twice gives the
    /// same answer.
    ///
    /// # Errors
    ///
    /// Returns error if a team or player is unknown, both sides are the
    /// same team, or a piece cannot be applied (player not on the giving
    /// roster, retention outside the allowed range or on a player
    /// without a current contract).
    pub fn validate(league: &LeagueState, proposal: &TradeProposal) -> Result<TradeValidation, TradeError> {
        let first_id = &proposal.first.team_id;
        let second_id = &proposal.second.team_id;
        if first_id == second_id {
            return Err(TradeError::SameTeam {
                team_id: first_id.to_string(),
            });
        }

        let base = [league.team(first_id)?.clone(), league.team(second_id)?.clone()];
        let mut proposed = base.clone();
        let mut moves = Vec::new();
        let mut result = ConstraintResult::success();

        for (giver, (side, receiver_id)) in proposal.sides().into_iter().enumerate() {
            let receiver = 1 - giver;
            for player_id in side.players() {
                Self::move_player(league, &base[giver], &mut proposed, (giver, receiver), player_id)?;
                if let Some(warning) = Self::clause_warning(league, &side.team_id, player_id) {
                    result.add_violation(warning);
                }
                moves.push((player_id.clone(), receiver_id.clone()));
            }
            for piece in &side.gives {
                if let TradePiece::RetainSalary { player_id, percent } = piece {
                    let slice = Self::retained_slice(league, side, player_id, *percent)?;
                    proposed[giver].retained.push(slice);
                }
            }
        }

        let compliance = ComplianceService::new(league).with_overrides(&proposed);
        for (before, after) in base.iter().zip(&proposed) {
            let mut checked = compliance.check_team(after);
            if after.active_count() < before.active_count() {
                checked = Self::block_shrinking_below_minimum(checked);
            }
            result.merge(checked);
        }

        debug!(
            first = %first_id,
            second = %second_id,
            passed = result.passed,
            violations = result.violations.len(),
            "Trade validated"
        );

        Ok(TradeValidation {
            proposal: proposal.clone(),
            result,
            base,
            proposed,
            moves,
            season: league.finance.season,
            day_index: league.day_index(),
        })
    }

    /// Apply a passed validation to the ledger.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` if the validation did not pass and
    /// `StaleSnapshot` if either team, the season, the day or anything
    /// else the validation read changed since it was taken.
    pub fn commit(league: &mut LeagueState, validation: TradeValidation) -> Result<(), TradeError> {
        if !validation.ok() {
            return Err(TradeError::ValidationFailed {
                violations: validation.errors(),
            });
        }
        for base in &validation.base {
            if *league.team(&base.id)? != *base {
                return Err(TradeError::StaleSnapshot {
                    team_id: base.id.to_string(),
                });
            }
        }
        let stale = || TradeError::StaleSnapshot {
            team_id: validation.base[0].id.to_string(),
        };
        if validation.season != league.finance.season || validation.day_index != league.day_index() {
            return Err(stale());
        }
        // contracts and league rules are read too; the current ledger must
        // reproduce the same answer
        match Self::validate(league, &validation.proposal) {
            Ok(fresh) if fresh == validation => {}
            Ok(fresh) => {
                let team_id = Self::changed_team(&validation, &fresh)
                    .map_or_else(|| validation.base[0].id.to_string(), ToString::to_string);
                debug!(team = %team_id, "Trade validation went stale");
                return Err(TradeError::StaleSnapshot { team_id });
            }
            Err(_) => return Err(stale()),
        }

        let [first, second] = validation.proposed;
        info!(
            first = %first.id,
            second = %second.id,
            players = validation.moves.len(),
            "Trade committed"
        );
        league.replace_team(first);
        league.replace_team(second);
        for (player_id, team_id) in validation.moves {
            if let Ok(player) = league.player_mut(&player_id) {
                player.rights = RightsStatus::RightsHeld(team_id);
            }
        }
        Ok(())
    }

    /// Escalate a below-minimum warning to a blocking error.
    fn block_shrinking_below_minimum(checked: ConstraintResult) -> ConstraintResult {
        let violations = checked
            .violations
            .into_iter()
            .map(|mut v| {
                if v.code == ROSTER_BELOW_MINIMUM {
                    v.severity = ViolationSeverity::Error;
                }
                v
            })
            .collect();
        ConstraintResult::from_violations(violations)
    }

    /// First team whose post-trade record or violations differ.
    fn changed_team<'a>(old: &'a TradeValidation, fresh: &TradeValidation) -> Option<&'a TeamId> {
        old.proposed
            .iter()
            .zip(&fresh.proposed)
            .find(|(before, after)| {
                *before != *after
                    || !old.result.for_team(&before.id).eq(fresh.result.for_team(&after.id))
            })
            .map(|(before, _)| &before.id)
    }

    fn move_player(
        league: &LeagueState,
        giver_base: &TeamState,
        proposed: &mut [TeamState; 2],
        (giver, receiver): (usize, usize),
        player_id: &PlayerId,
    ) -> Result<(), TradeError> {
        let player = league.player(player_id)?;
        if !giver_base.holds(player_id) {
            return Err(TradeError::InvalidPiece {
                team_id: giver_base.id.to_string(),
                reason: format!("{player_id} is not on its roster"),
            });
        }
        if proposed[giver].remove_player(player_id).is_none() {
            return Err(TradeError::InvalidPiece {
                team_id: giver_base.id.to_string(),
                reason: format!("{player_id} is listed more than once"),
            });
        }
        proposed[receiver].insert(player_id.clone(), RosterBucket::Active);
        if player.is_signed() {
            proposed[giver].spc_count = proposed[giver].spc_count.saturating_sub(1);
            proposed[receiver].spc_count += 1;
        }
        Ok(())
    }

    fn clause_warning(
        league: &LeagueState,
        team_id: &TeamId,
        player_id: &PlayerId,
    ) -> Option<ConstraintViolation> {
        let contract = league.contract_of(player_id)?;
        if !(contract.clauses.no_trade || contract.clauses.no_move) {
            return None;
        }
        Some(
            ConstraintViolation::warning(
                TRADE_CLAUSE_WAIVER_REQUIRED,
                format!("{team_id}: {player_id} must waive a trade clause"),
            )
            .with_team(team_id),
        )
    }

    fn retained_slice(
        league: &LeagueState,
        side: &TradeSide,
        player_id: &PlayerId,
        percent: rust_decimal::Decimal,
    ) -> Result<RetainedSlice, TradeError> {
        let finance = &league.finance;
        let invalid = |reason: String| TradeError::InvalidPiece {
            team_id: side.team_id.to_string(),
            reason,
        };

        if percent <= rust_decimal::Decimal::ZERO || percent > finance.max_retention_pct {
            return Err(invalid(format!(
                "retention {percent} on {player_id} must be above 0 and at most {}",
                finance.max_retention_pct
            )));
        }
        if !side.players().any(|p| p == player_id) {
            return Err(invalid(format!("retains salary on {player_id} without trading him")));
        }
        let contract = league
            .contract_of(player_id)
            .filter(|c| c.is_active_in(finance.season))
            .ok_or_else(|| invalid(format!("{player_id} has no contract for {}", finance.season)))?;

        Ok(RetainedSlice {
            player_id: player_id.clone(),
            percent,
            cap_hit: (contract.cap_hit_for_season(finance.season) * percent).round(),
            seasons_remaining: contract.remaining_seasons(finance.season),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cap_accounting::CapCalculator;
    use crate::domain::cap_accounting::services::compliance_service::{
        CAP_CEILING_EXCEEDED, ROSTER_ABOVE_MAXIMUM, ROSTER_BELOW_MINIMUM,
    };
    use crate::domain::ledger::{Contract, ContractClauses, Player, Position, SeasonFinance};
    use crate::domain::shared::{ContractId, Money, SeasonLabel};
    use rust_decimal_macros::dec;
    use test_case::test_case;

    const SEASON: SeasonLabel = SeasonLabel::starting(2025);

    fn sign(league: &mut LeagueState, team: &str, player: &str, aav: i64) {
        league.add_player(Player::new(player, player, Position::LeftWing, 27));
        let contract = Contract::flat(
            ContractId::new(format!("c-{player}")),
            PlayerId::new(player),
            SEASON,
            2,
            Money::dollars(aav),
        )
        .unwrap();
        league.sign_contract(&TeamId::new(team), contract).unwrap();
    }

    fn league() -> LeagueState {
        let mut finance = SeasonFinance::new(SEASON, Money::dollars(10_000_000));
        finance.season_days = 100;
        finance.min_roster = 0;
        let mut league = LeagueState::new(finance);
        league.add_team(TeamState::new("BOS", "Boston"));
        league.add_team(TeamState::new("TOR", "Toronto"));
        sign(&mut league, "BOS", "b1", 4_000_000);
        sign(&mut league, "BOS", "b2", 1_000_000);
        sign(&mut league, "TOR", "t1", 2_000_000);
        league
    }

    fn proposal(first: TradeSide, second: TradeSide) -> TradeProposal {
        TradeProposal::new(first, second)
    }

    #[test]
    fn simple_swap_passes_and_commits() {
        let mut league = league();
        let trade = proposal(
            TradeSide::new("BOS").player("b1"),
            TradeSide::new("TOR").player("t1").pick("2026 2nd round"),
        );

        let validation = TradeEngine::validate(&league, &trade).unwrap();
        assert!(validation.ok(), "{:?}", validation.errors());
        assert!(league.team(&TeamId::new("BOS")).unwrap().holds(&PlayerId::new("b1")));

        TradeEngine::commit(&mut league, validation).unwrap();
        let bos = league.team(&TeamId::new("BOS")).unwrap();
        let tor = league.team(&TeamId::new("TOR")).unwrap();
        assert!(bos.active.contains(&PlayerId::new("t1")));
        assert!(tor.active.contains(&PlayerId::new("b1")));
        assert_eq!(bos.spc_count, 2);
        assert_eq!(tor.spc_count, 1);
        assert_eq!(
            league.player(&PlayerId::new("b1")).unwrap().rights_team(),
            Some(&TeamId::new("TOR"))
        );
    }

    #[test]
    fn retention_moves_cap_to_giving_team() {
        let mut league = league();
        let trade = proposal(
            TradeSide::new("BOS").player("b1").retain("b1", dec!(0.5)),
            TradeSide::new("TOR"),
        );

        let validation = TradeEngine::validate(&league, &trade).unwrap();
        assert!(validation.ok());
        let slice = &validation.proposed[0].retained[0];
        assert_eq!(slice.cap_hit, Money::dollars(2_000_000));
        assert_eq!(slice.seasons_remaining, 2);

        TradeEngine::commit(&mut league, validation).unwrap();
        let calc = CapCalculator::new(&league);
        let tor = calc.usage_for(&TeamId::new("TOR")).unwrap();
        let bos = calc.usage_for(&TeamId::new("BOS")).unwrap();
        // day 0 of 100: one hundredth of each full-season charge
        assert_eq!(tor.roster_charge, Money::dollars(40_000));
        assert_eq!(bos.retained_charge, Money::dollars(20_000));
    }

    #[test_case(dec!(0.51) ; "above half")]
    #[test_case(dec!(0) ; "zero")]
    #[test_case(dec!(-0.1) ; "negative")]
    fn retention_out_of_range_is_rejected(percent: rust_decimal::Decimal) {
        let league = league();
        let trade = proposal(
            TradeSide::new("BOS").player("b1").retain("b1", percent),
            TradeSide::new("TOR"),
        );
        let Err(err) = TradeEngine::validate(&league, &trade) else {
            panic!("Expected invalid retention");
        };
        assert!(matches!(err, TradeError::InvalidPiece { .. }));
    }

    #[test]
    fn retention_requires_player_in_same_side() {
        let league = league();
        let trade = proposal(
            TradeSide::new("BOS").retain("b1", dec!(0.25)),
            TradeSide::new("TOR"),
        );
        assert!(matches!(
            TradeEngine::validate(&league, &trade),
            Err(TradeError::InvalidPiece { .. })
        ));
    }

    #[test]
    fn player_must_be_on_giving_roster() {
        let league = league();
        let trade = proposal(TradeSide::new("BOS").player("t1"), TradeSide::new("TOR"));
        assert!(matches!(
            TradeEngine::validate(&league, &trade),
            Err(TradeError::InvalidPiece { .. })
        ));
    }

    #[test]
    fn same_team_is_rejected() {
        let league = league();
        let trade = proposal(TradeSide::new("BOS"), TradeSide::new("BOS"));
        assert!(matches!(
            TradeEngine::validate(&league, &trade),
            Err(TradeError::SameTeam { .. })
        ));
    }

    #[test]
    fn failures_are_tagged_by_team_and_leave_ledger_alone() {
        let mut league = league();
        for i in 0..23 {
            sign(&mut league, "TOR", &format!("x{i}"), 400_000);
        }
        let before = league.clone();
        let trade = proposal(TradeSide::new("BOS").player("b1"), TradeSide::new("TOR"));

        let validation = TradeEngine::validate(&league, &trade).unwrap();
        assert!(!validation.ok());
        let tor = TeamId::new("TOR");
        assert!(validation.result.for_team(&tor).any(|v| v.code == ROSTER_ABOVE_MAXIMUM));
        assert!(validation.result.for_team(&tor).any(|v| v.code == CAP_CEILING_EXCEEDED));
        assert!(validation.errors().iter().any(|m| m.contains("active roster size 25")));
        assert_eq!(league, before);

        let Err(err) = TradeEngine::commit(&mut league, validation) else {
            panic!("Expected failed validation to be refused");
        };
        assert!(matches!(err, TradeError::ValidationFailed { .. }));
        assert_eq!(league, before);
    }

    #[test]
    fn stale_validation_is_refused() {
        let mut league = league();
        let trade = proposal(TradeSide::new("BOS").player("b2"), TradeSide::new("TOR"));
        let validation = TradeEngine::validate(&league, &trade).unwrap();

        sign(&mut league, "TOR", "late", 500_000);
        let before = league.clone();

        let Err(err) = TradeEngine::commit(&mut league, validation) else {
            panic!("Expected stale snapshot");
        };
        assert!(matches!(err, TradeError::StaleSnapshot { .. }));
        assert_eq!(league, before);
    }

    #[test]
    fn validation_from_an_earlier_day_is_refused() {
        let mut league = league();
        let trade = proposal(TradeSide::new("BOS").player("b2"), TradeSide::new("TOR"));
        let validation = TradeEngine::validate(&league, &trade).unwrap();
        assert!(validation.ok());

        league.advance_day();
        let before = league.clone();

        let Err(err) = TradeEngine::commit(&mut league, validation) else {
            panic!("Expected stale snapshot");
        };
        assert!(matches!(err, TradeError::StaleSnapshot { .. }));
        assert_eq!(league, before);
    }

    #[test]
    fn rollover_to_lower_ceiling_makes_validation_stale() {
        let mut league = league();
        let trade = proposal(TradeSide::new("BOS").player("b2"), TradeSide::new("TOR").player("t1"));
        let validation = TradeEngine::validate(&league, &trade).unwrap();
        assert!(validation.ok(), "{:?}", validation.errors());

        // BOS would carry 6M against 5.5M
        let mut next = SeasonFinance::new(SeasonLabel::starting(2026), Money::dollars(5_500_000));
        next.season_days = 100;
        next.min_roster = 0;
        league.roll_over_season(next).unwrap();
        let before = league.clone();

        assert!(!TradeEngine::validate(&league, &trade).unwrap().ok());
        let Err(err) = TradeEngine::commit(&mut league, validation) else {
            panic!("Expected stale snapshot");
        };
        assert!(matches!(err, TradeError::StaleSnapshot { .. }));
        assert_eq!(league, before);
    }

    #[test]
    fn contract_change_makes_validation_stale() {
        let mut league = league();
        let trade = proposal(TradeSide::new("BOS").player("b2"), TradeSide::new("TOR"));
        let validation = TradeEngine::validate(&league, &trade).unwrap();

        league.contracts.get_mut(&ContractId::new("c-b2")).unwrap().clauses = ContractClauses {
            no_trade: true,
            ..ContractClauses::default()
        };

        let Err(err) = TradeEngine::commit(&mut league, validation) else {
            panic!("Expected stale snapshot");
        };
        assert_eq!(
            err,
            TradeError::StaleSnapshot {
                team_id: "BOS".to_string()
            }
        );
    }

    #[test]
    fn shrinking_below_minimum_blocks_only_the_shrinking_team() {
        let mut league = league();
        league.finance.min_roster = 3;
        let trade = proposal(TradeSide::new("BOS").player("b2"), TradeSide::new("TOR"));

        let validation = TradeEngine::validate(&league, &trade).unwrap();
        assert!(!validation.ok());
        let bos = TeamId::new("BOS");
        let tor = TeamId::new("TOR");
        assert!(validation
            .result
            .for_team(&bos)
            .any(|v| v.code == ROSTER_BELOW_MINIMUM && v.is_blocking()));
        // TOR is still short but climbing
        assert!(validation
            .result
            .for_team(&tor)
            .all(|v| v.code != ROSTER_BELOW_MINIMUM || !v.is_blocking()));
        assert_eq!(validation.errors().len(), 1);
    }

    #[test]
    fn no_trade_clause_warns_without_blocking() {
        let mut league = league();
        let contract_id = ContractId::new("c-b2");
        let contract = league.contracts.get_mut(&contract_id).unwrap();
        contract.clauses = ContractClauses {
            no_trade: true,
            ..ContractClauses::default()
        };
        let trade = proposal(TradeSide::new("BOS").player("b2"), TradeSide::new("TOR"));

        let validation = TradeEngine::validate(&league, &trade).unwrap();
        assert!(validation.ok());
        assert!(validation.result.has_code(TRADE_CLAUSE_WAIVER_REQUIRED));
    }

    #[test]
    fn validating_twice_is_identical() {
        let league = league();
        let trade = proposal(
            TradeSide::new("BOS").player("b1").retain("b1", dec!(0.3)),
            TradeSide::new("TOR").player("t1"),
        );
        let first = TradeEngine::validate(&league, &trade).unwrap();
        let second = TradeEngine::validate(&league, &trade).unwrap();
        assert_eq!(first, second);
    }
}
