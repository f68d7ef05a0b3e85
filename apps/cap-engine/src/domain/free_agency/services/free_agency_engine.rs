//! Free Agency Engine
//!
//! A day-stepped market. Expiring contracts feed the restricted and
//! unrestricted pools; qualifying offers and offer sheets carry deadlines
//! as day numbers, settled by `advance_day`:
//! - an expired qualifying offer lapses and its player becomes
//!   unrestricted, unless an offer sheet on him is pending;
//! - an offer sheet past its match deadline resolves as declined and the
//!   player signs with the offering team.
//!
//! Every signing goes through the `SigningGate`, so a signing that breaks
//! a league rule leaves both the ledger and the market untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::cap_accounting::{ConstraintResult, SigningGate};
use crate::domain::free_agency::errors::FreeAgencyError;
use crate::domain::free_agency::events::FreeAgencyEvent;
use crate::domain::free_agency::value_objects::{
    FreeAgencyRules, FreeAgencyState, OfferSheet, QualifyingOffer,
};
use crate::domain::ledger::{Contract, LeagueState, RightsStatus};
use crate::domain::shared::{ContractId, DomainError, Money, PlayerId, SeasonLabel, TeamId};

/// What a free agency operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeAgencyOutcome {
    /// Compliance of any signing involved; success when none was.
    pub result: ConstraintResult,
    /// Market transitions, in order.
    pub events: Vec<FreeAgencyEvent>,
}

impl FreeAgencyOutcome {
    fn applied(events: Vec<FreeAgencyEvent>) -> Self {
        Self {
            result: ConstraintResult::success(),
            events,
        }
    }

    const fn rejected(result: ConstraintResult) -> Self {
        Self {
            result,
            events: Vec::new(),
        }
    }

    /// True when the operation was applied.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.result.passed
    }

    /// Blocking violation messages.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.result.messages()
    }
}

/// Runs the free agency market.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeAgencyEngine {
    rules: FreeAgencyRules,
    #[serde(default)]
    state: FreeAgencyState,
}

impl FreeAgencyEngine {
    /// Engine with an empty market.
    #[must_use]
    pub fn new(rules: FreeAgencyRules) -> Self {
        Self {
            rules,
            state: FreeAgencyState::default(),
        }
    }

    /// Rules in force.
    #[must_use]
    pub const fn rules(&self) -> &FreeAgencyRules {
        &self.rules
    }

    /// Current market state.
    #[must_use]
    pub const fn state(&self) -> &FreeAgencyState {
        &self.state
    }

    /// Retire every contract ending with `season` and route its player to
    /// a pool: restricted if a team holds his rights and he is young by
    /// age or service, unrestricted otherwise. Every restricted player
    /// gets a pending, untendered qualifying offer.
    ///
    /// # Errors
    ///
    /// Returns error only if the ledger is inconsistent.
    pub fn build_pools_for_offseason(
        &mut self,
        league: &mut LeagueState,
        season: SeasonLabel,
    ) -> Result<FreeAgencyOutcome, FreeAgencyError> {
        let day = league.day_index();
        let mut expiring = Vec::new();
        for contract in league.contracts.values().filter(|c| c.end == season) {
            let Ok(player) = league.player(&contract.player_id) else {
                warn!(contract_id = %contract.id, player_id = %contract.player_id, "Expiring contract has no player");
                continue;
            };
            let rights_team = player
                .rights_team()
                .filter(|_| self.rules.is_young(player))
                .cloned();
            expiring.push((
                contract.id.clone(),
                player.id.clone(),
                contract.cap_hit_for_season(season),
                rights_team,
            ));
        }

        let mut events = Vec::with_capacity(expiring.len());
        for (contract_id, player_id, prior_cap_hit, rights_team) in expiring {
            league.release_contract(&contract_id)?;

            if let Some(rights_team) = rights_team {
                let amount = self.rules.qualifying_offers.amount_for(prior_cap_hit);
                self.state.ufa_pool.remove(&player_id);
                self.state.rfa_pool.insert(player_id.clone());
                self.state.qualifying_offers.insert(
                    player_id.clone(),
                    QualifyingOffer {
                        player_id: player_id.clone(),
                        rights_team: rights_team.clone(),
                        prior_cap_hit,
                        amount,
                        expires_day: day,
                        tendered: false,
                    },
                );
                events.push(FreeAgencyEvent::BecameRestricted {
                    player_id,
                    rights_team,
                    qualifying_offer: amount,
                    day,
                });
            } else {
                if let Ok(player) = league.player_mut(&player_id) {
                    player.rights = RightsStatus::NoRights;
                }
                self.state.rfa_pool.remove(&player_id);
                self.state.ufa_pool.insert(player_id.clone());
                events.push(FreeAgencyEvent::BecameUnrestricted { player_id, day });
            }
        }

        self.state.offseason = Some(season);
        info!(
            season = %season,
            rfa = self.state.rfa_pool.len(),
            ufa = self.state.ufa_pool.len(),
            "Free agent pools built"
        );
        Ok(FreeAgencyOutcome::applied(events))
    }

    /// Confirm qualifying offers, keeping them open for the tender window.
    /// `None` tenders every pending offer the team holds.
    ///
    /// # Errors
    ///
    /// Returns error if the team is unknown or a named player has no
    /// pending qualifying offer from it. Nothing is tendered then.
    pub fn tender_qualifying_offers(
        &mut self,
        league: &LeagueState,
        team_id: &TeamId,
        player_ids: Option<&[PlayerId]>,
    ) -> Result<FreeAgencyOutcome, FreeAgencyError> {
        league.team(team_id)?;
        let targets: BTreeSet<PlayerId> = match player_ids {
            Some(ids) => {
                for id in ids {
                    let held = self
                        .state
                        .qualifying_offers
                        .get(id)
                        .is_some_and(|qo| &qo.rights_team == team_id);
                    if !held {
                        return Err(FreeAgencyError::QualifyingOfferNotFound {
                            player_id: id.to_string(),
                        });
                    }
                }
                ids.iter().cloned().collect()
            }
            None => self
                .state
                .qualifying_offers
                .values()
                .filter(|qo| &qo.rights_team == team_id)
                .map(|qo| qo.player_id.clone())
                .collect(),
        };

        let day = league.day_index();
        let expires_day = day.saturating_add(self.rules.qo_tender_window_days);
        let mut events = Vec::with_capacity(targets.len());
        for player_id in targets {
            if let Some(qo) = self.state.qualifying_offers.get_mut(&player_id) {
                qo.expires_day = expires_day;
                qo.tendered = true;
                events.push(FreeAgencyEvent::QualifyingOfferTendered {
                    player_id,
                    team_id: team_id.clone(),
                    amount: qo.amount,
                    expires_day,
                    day,
                });
            }
        }
        info!(team_id = %team_id, tendered = events.len(), expires_day, "Qualifying offers tendered");
        Ok(FreeAgencyOutcome::applied(events))
    }

    /// The player signs his tendered qualifying offer: one season at the
    /// offer amount with the rights team.
    ///
    /// # Errors
    ///
    /// Returns error if there is no tendered offer or an offer sheet on
    /// the player is pending.
    pub fn accept_qualifying_offer(
        &mut self,
        league: &mut LeagueState,
        player_id: &PlayerId,
    ) -> Result<FreeAgencyOutcome, FreeAgencyError> {
        let qo = self
            .state
            .qualifying_offers
            .get(player_id)
            .cloned()
            .ok_or_else(|| FreeAgencyError::QualifyingOfferNotFound {
                player_id: player_id.to_string(),
            })?;
        if !qo.tendered {
            return Err(FreeAgencyError::QualifyingOfferNotTendered {
                player_id: player_id.to_string(),
            });
        }
        if self.state.offer_sheets.contains_key(player_id) {
            return Err(FreeAgencyError::OfferSheetPending {
                player_id: player_id.to_string(),
            });
        }

        let contract = new_contract(league, player_id, 1, qo.amount)?;
        let contract_id = contract.id.clone();
        let result = SigningGate::attach(league, &qo.rights_team, contract)?;
        if !result.passed {
            return Ok(FreeAgencyOutcome::rejected(result));
        }

        self.state.settle_rfa(player_id);
        let event = FreeAgencyEvent::QualifyingOfferAccepted {
            player_id: player_id.clone(),
            team_id: qo.rights_team,
            contract_id,
            amount: qo.amount,
            day: league.day_index(),
        };
        info!(player_id = %player_id, "Qualifying offer accepted");
        Ok(FreeAgencyOutcome {
            result,
            events: vec![event],
        })
    }

    /// Sign an unrestricted free agent to a flat contract. On a rule
    /// violation nothing changes and the player stays in the pool.
    ///
    /// # Errors
    ///
    /// Returns error if the player is not an unrestricted free agent, the
    /// team is unknown, or the terms are malformed.
    pub fn sign_ufa(
        &mut self,
        league: &mut LeagueState,
        team_id: &TeamId,
        player_id: &PlayerId,
        years: u16,
        aav: Money,
    ) -> Result<FreeAgencyOutcome, FreeAgencyError> {
        if !self.state.ufa_pool.contains(player_id) {
            return Err(FreeAgencyError::NotInPool {
                player_id: player_id.to_string(),
                pool: "UFA",
            });
        }

        let contract = new_contract(league, player_id, years, aav)?;
        let contract_id = contract.id.clone();
        let result = SigningGate::attach(league, team_id, contract)?;
        if !result.passed {
            return Ok(FreeAgencyOutcome::rejected(result));
        }

        self.state.ufa_pool.remove(player_id);
        info!(team_id = %team_id, player_id = %player_id, years, aav = %aav, "UFA signed");
        Ok(FreeAgencyOutcome {
            result,
            events: vec![FreeAgencyEvent::UfaSigned {
                player_id: player_id.clone(),
                team_id: team_id.clone(),
                contract_id,
                years,
                aav,
                day: league.day_index(),
            }],
        })
    }

    /// Record another team's offer to a restricted free agent. The rights
    /// team has the match window to answer.
    ///
    /// # Errors
    ///
    /// Returns error if the team is unknown, the player is not a restricted
    /// free agent, the offer comes from his rights team, a sheet is
    /// already pending, or the terms are malformed.
    pub fn file_offer_sheet(
        &mut self,
        league: &LeagueState,
        offering_team: &TeamId,
        player_id: &PlayerId,
        years: u16,
        aav: Money,
    ) -> Result<FreeAgencyOutcome, FreeAgencyError> {
        league.team(offering_team)?;
        let not_rfa = || FreeAgencyError::NotInPool {
            player_id: player_id.to_string(),
            pool: "RFA",
        };
        if !self.state.rfa_pool.contains(player_id) {
            return Err(not_rfa());
        }
        if self.state.offer_sheets.contains_key(player_id) {
            return Err(FreeAgencyError::OfferSheetPending {
                player_id: player_id.to_string(),
            });
        }
        let rights_team = match self.state.qualifying_offers.get(player_id) {
            Some(qo) => qo.rights_team.clone(),
            None => league.player(player_id)?.rights_team().cloned().ok_or_else(not_rfa)?,
        };
        if &rights_team == offering_team {
            return Err(FreeAgencyError::OfferFromRightsTeam {
                player_id: player_id.to_string(),
                team_id: offering_team.to_string(),
            });
        }
        validate_terms(years, aav)?;

        let day = league.day_index();
        let sheet = OfferSheet {
            player_id: player_id.clone(),
            offering_team: offering_team.clone(),
            rights_team,
            years,
            aav,
            filed_day: day,
            match_deadline: day.saturating_add(self.rules.match_window_days),
            compensation: self.rules.compensation.compensation_for(aav).to_string(),
        };
        let event = FreeAgencyEvent::OfferSheetFiled {
            player_id: player_id.clone(),
            offering_team: sheet.offering_team.clone(),
            rights_team: sheet.rights_team.clone(),
            years,
            aav,
            match_deadline: sheet.match_deadline,
            compensation: sheet.compensation.clone(),
            day,
        };
        info!(
            player_id = %player_id,
            offering_team = %offering_team,
            match_deadline = sheet.match_deadline,
            "Offer sheet filed"
        );
        self.state.offer_sheets.insert(player_id.clone(), sheet);
        Ok(FreeAgencyOutcome::applied(vec![event]))
    }

    /// Answer an offer sheet. Matching signs the player to the rights team
    /// on the offer's terms; declining signs him to the offering team. If
    /// the signing breaks a rule the sheet stays pending.
    ///
    /// # Errors
    ///
    /// Returns error if no sheet is pending for the player.
    pub fn resolve_offer_sheet(
        &mut self,
        league: &mut LeagueState,
        player_id: &PlayerId,
        matched: bool,
    ) -> Result<FreeAgencyOutcome, FreeAgencyError> {
        let sheet = self
            .state
            .offer_sheets
            .get(player_id)
            .cloned()
            .ok_or_else(|| FreeAgencyError::OfferSheetNotFound {
                player_id: player_id.to_string(),
            })?;
        self.execute_sheet(league, &sheet, matched, false)
    }

    /// Move to the next day and settle every deadline that has passed.
    pub fn advance_day(&mut self, league: &mut LeagueState) -> Vec<FreeAgencyEvent> {
        let day = league.advance_day();
        let mut events = Vec::new();

        let lapsed: Vec<QualifyingOffer> = self
            .state
            .qualifying_offers
            .values()
            .filter(|qo| qo.is_expired(day) && !self.state.offer_sheets.contains_key(&qo.player_id))
            .cloned()
            .collect();
        for qo in lapsed {
            self.state.release_rfa(&qo.player_id);
            if let Ok(player) = league.player_mut(&qo.player_id) {
                player.rights = RightsStatus::NoRights;
            }
            info!(player_id = %qo.player_id, team_id = %qo.rights_team, day, "Qualifying offer lapsed");
            events.push(FreeAgencyEvent::QualifyingOfferLapsed {
                player_id: qo.player_id,
                team_id: qo.rights_team,
                day,
            });
        }

        let overdue: Vec<OfferSheet> = self
            .state
            .offer_sheets
            .values()
            .filter(|sheet| sheet.is_past_deadline(day))
            .cloned()
            .collect();
        for sheet in overdue {
            let reasons = match self.execute_sheet(league, &sheet, false, true) {
                Ok(outcome) if outcome.passed() => {
                    events.extend(outcome.events);
                    continue;
                }
                Ok(outcome) => outcome.errors(),
                Err(err) => vec![err.to_string()],
            };
            self.state.offer_sheets.remove(&sheet.player_id);
            warn!(
                player_id = %sheet.player_id,
                offering_team = %sheet.offering_team,
                reasons = ?reasons,
                "Unanswered offer sheet voided"
            );
            events.push(FreeAgencyEvent::OfferSheetVoided {
                player_id: sheet.player_id,
                offering_team: sheet.offering_team,
                reasons,
                day,
            });
        }

        debug!(day, events = events.len(), "Day advanced");
        events
    }

    fn execute_sheet(
        &mut self,
        league: &mut LeagueState,
        sheet: &OfferSheet,
        matched: bool,
        automatic: bool,
    ) -> Result<FreeAgencyOutcome, FreeAgencyError> {
        let team_id = if matched {
            &sheet.rights_team
        } else {
            &sheet.offering_team
        };
        let contract = new_contract(league, &sheet.player_id, sheet.years, sheet.aav)?;
        let contract_id = contract.id.clone();
        let result = SigningGate::attach(league, team_id, contract)?;
        if !result.passed {
            return Ok(FreeAgencyOutcome::rejected(result));
        }

        self.state.settle_rfa(&sheet.player_id);
        let day = league.day_index();
        let event = if matched {
            FreeAgencyEvent::OfferSheetMatched {
                player_id: sheet.player_id.clone(),
                team_id: team_id.clone(),
                contract_id,
                day,
            }
        } else {
            FreeAgencyEvent::OfferSheetDeclined {
                player_id: sheet.player_id.clone(),
                offering_team: sheet.offering_team.clone(),
                rights_team: sheet.rights_team.clone(),
                contract_id,
                compensation: sheet.compensation.clone(),
                automatic,
                day,
            }
        };
        info!(
            player_id = %sheet.player_id,
            team_id = %team_id,
            matched,
            automatic,
            "Offer sheet resolved"
        );
        Ok(FreeAgencyOutcome {
            result,
            events: vec![event],
        })
    }
}

/// Flat contract starting with the league's current season.
fn new_contract(
    league: &LeagueState,
    player_id: &PlayerId,
    years: u16,
    aav: Money,
) -> Result<Contract, DomainError> {
    Contract::flat(
        ContractId::generate(),
        player_id.clone(),
        league.finance.season,
        years,
        aav,
    )
}

fn validate_terms(years: u16, aav: Money) -> Result<(), DomainError> {
    if years == 0 {
        return Err(DomainError::invalid("years", "must be at least 1"));
    }
    aav.validate_non_negative("aav")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cap_accounting::services::compliance_service::CAP_CEILING_EXCEEDED;
    use crate::domain::ledger::{Player, Position, SeasonFinance, TeamState};

    const SEASON: SeasonLabel = SeasonLabel::starting(2025);

    fn league() -> LeagueState {
        let mut league = LeagueState::new(SeasonFinance::new(SEASON, Money::dollars(88_000_000)));
        league.add_team(TeamState::new("BOS", "Boston"));
        league.add_team(TeamState::new("TOR", "Toronto"));
        league
    }

    fn expiring(league: &mut LeagueState, team: &str, player: &str, age: u8, accrued: u8, cap_hit: i64) {
        league.add_player(Player::new(player, player, Position::Center, age).with_accrued_seasons(accrued));
        let contract = Contract::flat(
            ContractId::new(format!("c-{player}")),
            PlayerId::new(player),
            SEASON,
            1,
            Money::dollars(cap_hit),
        )
        .unwrap();
        league.sign_contract(&TeamId::new(team), contract).unwrap();
    }

    fn market() -> (LeagueState, FreeAgencyEngine) {
        let mut league = league();
        expiring(&mut league, "BOS", "young", 23, 3, 1_500_000);
        expiring(&mut league, "BOS", "vet", 31, 10, 5_000_000);
        let mut engine = FreeAgencyEngine::default();
        engine.build_pools_for_offseason(&mut league, SEASON).unwrap();
        (league, engine)
    }

    fn pid(id: &str) -> PlayerId {
        PlayerId::new(id)
    }

    fn tid(id: &str) -> TeamId {
        TeamId::new(id)
    }

    #[test]
    fn build_pools_routes_by_age_and_rights() {
        let (league, engine) = market();
        let state = engine.state();

        assert!(state.rfa_pool.contains(&pid("young")));
        assert!(state.ufa_pool.contains(&pid("vet")));
        assert_eq!(state.offseason, Some(SEASON));

        let qo = &state.qualifying_offers[&pid("young")];
        assert_eq!(qo.amount, Money::dollars(1_800_000));
        assert_eq!(qo.rights_team, tid("BOS"));
        assert!(!qo.tendered);

        assert!(league.contracts.is_empty());
        assert!(!league.team(&tid("BOS")).unwrap().holds(&pid("young")));
        assert_eq!(league.player(&pid("vet")).unwrap().rights, RightsStatus::NoRights);
        assert_eq!(league.player(&pid("young")).unwrap().rights_team(), Some(&tid("BOS")));
    }

    #[test]
    fn untendered_offer_lapses_next_day() {
        let (mut league, mut engine) = market();
        let events = engine.advance_day(&mut league);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "QUALIFYING_OFFER_LAPSED");
        assert!(engine.state().ufa_pool.contains(&pid("young")));
        assert!(!engine.state().rfa_pool.contains(&pid("young")));
        assert_eq!(league.player(&pid("young")).unwrap().rights, RightsStatus::NoRights);
    }

    #[test]
    fn tendered_offer_survives_window_then_lapses() {
        let (mut league, mut engine) = market();
        engine.tender_qualifying_offers(&league, &tid("BOS"), None).unwrap();
        assert_eq!(engine.state().qualifying_offers[&pid("young")].expires_day, 7);

        for _ in 0..7 {
            assert!(engine.advance_day(&mut league).is_empty());
        }
        let events = engine.advance_day(&mut league);
        assert_eq!(events.len(), 1);
        assert!(engine.state().ufa_pool.contains(&pid("young")));
    }

    #[test]
    fn tender_rejects_player_without_offer_from_team() {
        let (league, mut engine) = market();
        let result = engine.tender_qualifying_offers(&league, &tid("TOR"), Some(&[pid("young")]));
        assert!(matches!(result, Err(FreeAgencyError::QualifyingOfferNotFound { .. })));
        assert!(!engine.state().qualifying_offers[&pid("young")].tendered);
    }

    #[test]
    fn accepted_offer_signs_one_season_with_rights_team() {
        let (mut league, mut engine) = market();
        assert!(matches!(
            engine.accept_qualifying_offer(&mut league, &pid("young")),
            Err(FreeAgencyError::QualifyingOfferNotTendered { .. })
        ));

        engine.tender_qualifying_offers(&league, &tid("BOS"), Some(&[pid("young")])).unwrap();
        let outcome = engine.accept_qualifying_offer(&mut league, &pid("young")).unwrap();
        assert!(outcome.passed());

        let contract = league.contract_of(&pid("young")).unwrap();
        assert_eq!(contract.terms.len(), 1);
        assert_eq!(contract.cap_hit_for_season(SEASON), Money::dollars(1_800_000));
        assert_eq!(league.team_of(&pid("young")), Some(&tid("BOS")));
        assert!(engine.state().is_quiet());
        assert!(engine.state().rfa_pool.is_empty());
    }

    #[test]
    fn sign_ufa_requires_pool_membership() {
        let (mut league, mut engine) = market();
        let result = engine.sign_ufa(&mut league, &tid("TOR"), &pid("young"), 2, Money::dollars(1));
        assert!(matches!(result, Err(FreeAgencyError::NotInPool { pool: "UFA", .. })));
    }

    #[test]
    fn sign_ufa_builds_consecutive_flat_terms() {
        let (mut league, mut engine) = market();
        let outcome = engine
            .sign_ufa(&mut league, &tid("TOR"), &pid("vet"), 3, Money::dollars(4_000_000))
            .unwrap();
        assert!(outcome.passed());

        let contract = league.contract_of(&pid("vet")).unwrap();
        let seasons: Vec<String> = contract.terms.iter().map(|t| t.season.to_string()).collect();
        assert_eq!(seasons, ["2025-26", "2026-27", "2027-28"]);
        assert!(contract.terms.iter().all(|t| t.cap_hit() == Money::dollars(4_000_000)));
        assert!(!engine.state().ufa_pool.contains(&pid("vet")));
    }

    #[test]
    fn sign_ufa_over_cap_rolls_back() {
        let (mut league, mut engine) = market();
        let before = league.clone();
        let outcome = engine
            .sign_ufa(&mut league, &tid("TOR"), &pid("vet"), 1, Money::dollars(100_000_000))
            .unwrap();

        assert!(!outcome.passed());
        assert!(outcome.result.has_code(CAP_CEILING_EXCEEDED));
        assert!(outcome.events.is_empty());
        assert_eq!(league, before);
        assert!(engine.state().ufa_pool.contains(&pid("vet")));
    }

    #[test]
    fn sign_ufa_rejects_zero_years() {
        let (mut league, mut engine) = market();
        let result = engine.sign_ufa(&mut league, &tid("TOR"), &pid("vet"), 0, Money::dollars(1_000_000));
        assert!(matches!(result, Err(FreeAgencyError::Domain(DomainError::InvalidValue { .. }))));
    }

    #[test]
    fn offer_sheet_checks() {
        let (league, mut engine) = market();
        assert!(matches!(
            engine.file_offer_sheet(&league, &tid("TOR"), &pid("vet"), 2, Money::dollars(2_000_000)),
            Err(FreeAgencyError::NotInPool { pool: "RFA", .. })
        ));
        assert!(matches!(
            engine.file_offer_sheet(&league, &tid("BOS"), &pid("young"), 2, Money::dollars(2_000_000)),
            Err(FreeAgencyError::OfferFromRightsTeam { .. })
        ));

        let outcome = engine
            .file_offer_sheet(&league, &tid("TOR"), &pid("young"), 2, Money::dollars(2_000_000))
            .unwrap();
        assert_eq!(outcome.events[0].event_type(), "OFFER_SHEET_FILED");
        let sheet = &engine.state().offer_sheets[&pid("young")];
        assert_eq!(sheet.match_deadline, 7);
        assert_eq!(sheet.compensation, "3rd-round pick");

        assert!(matches!(
            engine.file_offer_sheet(&league, &tid("TOR"), &pid("young"), 2, Money::dollars(2_000_000)),
            Err(FreeAgencyError::OfferSheetPending { .. })
        ));
    }

    #[test]
    fn matched_sheet_keeps_player_on_offer_terms() {
        let (mut league, mut engine) = market();
        engine
            .file_offer_sheet(&league, &tid("TOR"), &pid("young"), 4, Money::dollars(3_000_000))
            .unwrap();

        let outcome = engine.resolve_offer_sheet(&mut league, &pid("young"), true).unwrap();
        assert!(outcome.passed());
        assert_eq!(league.team_of(&pid("young")), Some(&tid("BOS")));
        let contract = league.contract_of(&pid("young")).unwrap();
        assert_eq!(contract.terms.len(), 4);
        assert_eq!(contract.average_annual_value(), Money::dollars(3_000_000));
        assert!(engine.state().rfa_pool.is_empty());
        assert!(engine.state().is_quiet());
    }

    #[test]
    fn declined_sheet_moves_player() {
        let (mut league, mut engine) = market();
        engine
            .file_offer_sheet(&league, &tid("TOR"), &pid("young"), 2, Money::dollars(2_000_000))
            .unwrap();

        let outcome = engine.resolve_offer_sheet(&mut league, &pid("young"), false).unwrap();
        assert!(matches!(
            &outcome.events[0],
            FreeAgencyEvent::OfferSheetDeclined { automatic: false, .. }
        ));
        assert_eq!(league.team_of(&pid("young")), Some(&tid("TOR")));
        assert_eq!(league.player(&pid("young")).unwrap().rights_team(), Some(&tid("TOR")));
    }

    #[test]
    fn resolving_missing_sheet_is_error() {
        let (mut league, mut engine) = market();
        assert!(matches!(
            engine.resolve_offer_sheet(&mut league, &pid("young"), true),
            Err(FreeAgencyError::OfferSheetNotFound { .. })
        ));
    }

    #[test]
    fn pending_sheet_holds_off_qualifying_offer_lapse() {
        let (mut league, mut engine) = market();
        engine
            .file_offer_sheet(&league, &tid("TOR"), &pid("young"), 2, Money::dollars(2_000_000))
            .unwrap();

        for _ in 0..7 {
            assert!(engine.advance_day(&mut league).is_empty());
        }
        let events = engine.advance_day(&mut league);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            FreeAgencyEvent::OfferSheetDeclined { automatic: true, .. }
        ));
        assert_eq!(league.team_of(&pid("young")), Some(&tid("TOR")));
    }

    #[test]
    fn unanswered_sheet_that_breaks_cap_is_voided() {
        let (mut league, mut engine) = market();
        engine
            .file_offer_sheet(&league, &tid("TOR"), &pid("young"), 2, Money::dollars(90_000_000))
            .unwrap();
        for _ in 0..7 {
            engine.advance_day(&mut league);
        }

        let events = engine.advance_day(&mut league);
        let FreeAgencyEvent::OfferSheetVoided { reasons, .. } = &events[0] else {
            panic!("Expected voided sheet, got {events:?}");
        };
        assert!(reasons.iter().any(|r| r.contains("prorated ceiling")));
        assert!(engine.state().offer_sheets.is_empty());
        assert!(league.team_of(&pid("young")).is_none());

        // the qualifying offer expired long ago and lapses on the next day
        let events = engine.advance_day(&mut league);
        assert_eq!(events[0].event_type(), "QUALIFYING_OFFER_LAPSED");
    }

    #[test]
    fn quiet_day_only_moves_the_clock() {
        let mut league = league();
        let mut engine = FreeAgencyEngine::default();
        let before_engine = engine.clone();

        let events = engine.advance_day(&mut league);
        assert!(events.is_empty());
        assert_eq!(league.day_index(), 1);
        assert_eq!(engine, before_engine);
    }
}
