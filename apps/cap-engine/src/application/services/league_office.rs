//! League Office
//!
//! The front desk for the cap engine. Owns the league ledger and the free
//! agency market, runs every operation through the domain services, maps
//! their failures into `EngineError` and publishes market events as news.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::dto::CapReportDto;
use crate::application::ports::NewsPublisherPort;
use crate::config::Config;
use crate::domain::cap_accounting::{
    CapCalculator, CapUsage, ComplianceService, ConstraintResult, SigningGate,
};
use crate::domain::contract_ops::{BuyoutTerms, buy_out, terminate};
use crate::domain::free_agency::{
    FreeAgencyEngine, FreeAgencyEvent, FreeAgencyOutcome, FreeAgencyRules, FreeAgencyState,
};
use crate::domain::ledger::{BuyoutSchedule, Contract, LeagueState, RosterBucket, SeasonFinance};
use crate::domain::shared::{ContractId, Money, PlayerId, SeasonLabel, TeamId};
use crate::domain::trade::{TradeEngine, TradeProposal, TradeValidation};
use crate::error::EngineError;

/// Owns the ledger and routes every operation against it.
pub struct LeagueOffice<P>
where
    P: NewsPublisherPort,
{
    league: LeagueState,
    free_agency: FreeAgencyEngine,
    buyout_terms: BuyoutTerms,
    news: Arc<P>,
}

impl<P> LeagueOffice<P>
where
    P: NewsPublisherPort,
{
    /// Create a league office.
    pub fn new(
        league: LeagueState,
        rules: FreeAgencyRules,
        buyout_terms: BuyoutTerms,
        news: Arc<P>,
    ) -> Self {
        Self {
            league,
            free_agency: FreeAgencyEngine::new(rules),
            buyout_terms,
            news,
        }
    }

    /// Create a league office with configured rules. The league keeps its
    /// season; the configured league rules replace its finance record.
    ///
    /// # Errors
    ///
    /// Returns error if the configured rules are invalid.
    pub fn from_config(
        config: &Config,
        mut league: LeagueState,
        news: Arc<P>,
    ) -> Result<Self, EngineError> {
        league.finance = SeasonFinance::from_config(&config.league, league.finance.season)?;
        let rules = FreeAgencyRules::from_config(&config.free_agency)?;
        let buyout_terms = BuyoutTerms::from_config(&config.buyout)?;
        Ok(Self::new(league, rules, buyout_terms, news))
    }

    /// The ledger.
    pub const fn league(&self) -> &LeagueState {
        &self.league
    }

    /// Give up the ledger.
    pub fn into_league(self) -> LeagueState {
        self.league
    }

    /// The free agency market.
    pub const fn free_agency(&self) -> &FreeAgencyState {
        self.free_agency.state()
    }

    // ---------------------------------------------------------------
    // Cap accounting
    // ---------------------------------------------------------------

    /// Prorated usage for a team.
    ///
    /// # Errors
    ///
    /// Returns `NOT_FOUND` if the team does not exist.
    pub fn cap_usage(&self, team_id: &TeamId) -> Result<CapUsage, EngineError> {
        Ok(CapCalculator::new(&self.league).usage_for(team_id)?)
    }

    /// Space under the prorated ceiling; negative when over.
    ///
    /// # Errors
    ///
    /// Returns `NOT_FOUND` if the team does not exist.
    pub fn cap_space(&self, team_id: &TeamId) -> Result<Money, EngineError> {
        Ok(self.cap_usage(team_id)?.cap_space())
    }

    /// Full compliance check for a team.
    ///
    /// # Errors
    ///
    /// Returns `NOT_FOUND` if the team does not exist.
    pub fn check_team(&self, team_id: &TeamId) -> Result<ConstraintResult, EngineError> {
        Ok(ComplianceService::new(&self.league).check_team_id(team_id)?)
    }

    /// Cap report for a team.
    ///
    /// # Errors
    ///
    /// Returns `NOT_FOUND` if the team does not exist.
    pub fn cap_report(&self, team_id: &TeamId) -> Result<CapReportDto, EngineError> {
        let compliance = ComplianceService::new(&self.league);
        let team = self.league.team(team_id)?;
        let usage = compliance.calculator().usage(team);
        Ok(CapReportDto::new(team, usage, compliance.check_team(team)))
    }

    /// Cap reports for every team, ordered by team id.
    pub fn cap_reports(&self) -> Vec<CapReportDto> {
        let compliance = ComplianceService::new(&self.league);
        self.league
            .teams
            .values()
            .map(|team| {
                let usage = compliance.calculator().usage(team);
                CapReportDto::new(team, usage, compliance.check_team(team))
            })
            .collect()
    }

    // ---------------------------------------------------------------
    // Roster and contracts
    // ---------------------------------------------------------------

    /// Attach a contract to a team, such as a drafted player's entry-level
    /// deal. Rolled back if the team falls out of compliance.
    ///
    /// # Errors
    ///
    /// Returns error if the team or player is unknown or the player is
    /// already signed.
    #[instrument(skip(self, contract), fields(contract_id = %contract.id))]
    pub fn sign_contract(
        &mut self,
        team_id: &TeamId,
        contract: Contract,
    ) -> Result<ConstraintResult, EngineError> {
        Ok(SigningGate::attach(&mut self.league, team_id, contract)?)
    }

    /// Move a player between roster buckets.
    ///
    /// # Errors
    ///
    /// Returns error if the team does not carry the player.
    pub fn move_to_bucket(
        &mut self,
        team_id: &TeamId,
        player_id: &PlayerId,
        bucket: RosterBucket,
    ) -> Result<(), EngineError> {
        self.league.move_to_bucket(team_id, player_id, bucket)?;
        info!(team_id = %team_id, player_id = %player_id, bucket = %bucket, "Roster move");
        Ok(())
    }

    /// Demote a player under contract to the buried list.
    ///
    /// # Errors
    ///
    /// Returns error if the team does not carry the player.
    pub fn bury(&mut self, team_id: &TeamId, player_id: &PlayerId) -> Result<(), EngineError> {
        self.league.bury(team_id, player_id)?;
        info!(team_id = %team_id, player_id = %player_id, "Contract buried");
        Ok(())
    }

    /// Buy out a contract.
    ///
    /// # Errors
    ///
    /// Returns error if the contract does not exist or has no seasons left.
    pub fn buy_out(&mut self, contract_id: &ContractId) -> Result<BuyoutSchedule, EngineError> {
        Ok(buy_out(&mut self.league, contract_id, &self.buyout_terms)?)
    }

    /// Terminate a contract outright.
    ///
    /// # Errors
    ///
    /// Returns `NOT_FOUND` if the contract does not exist.
    pub fn terminate(&mut self, contract_id: &ContractId) -> Result<Contract, EngineError> {
        Ok(terminate(&mut self.league, contract_id)?)
    }

    /// Start a new season with its finance record.
    ///
    /// # Errors
    ///
    /// Returns error if the finance record is invalid.
    pub fn roll_over_season(&mut self, finance: SeasonFinance) -> Result<(), EngineError> {
        Ok(self.league.roll_over_season(finance)?)
    }

    // ---------------------------------------------------------------
    // Trades
    // ---------------------------------------------------------------

    /// Preview a trade. The ledger is not touched.
    ///
    /// # Errors
    ///
    /// Returns error if the proposal is structurally invalid.
    pub fn validate_trade(&self, proposal: &TradeProposal) -> Result<TradeValidation, EngineError> {
        Ok(TradeEngine::validate(&self.league, proposal)?)
    }

    /// Apply a previewed trade.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` if the preview failed and `STALE_SNAPSHOT`
    /// if either team changed since it was taken.
    pub fn commit_trade(&mut self, validation: TradeValidation) -> Result<(), EngineError> {
        Ok(TradeEngine::commit(&mut self.league, validation)?)
    }

    // ---------------------------------------------------------------
    // Free agency
    // ---------------------------------------------------------------

    /// Open the offseason for contracts ending with `season`.
    ///
    /// # Errors
    ///
    /// Returns error only if the ledger is inconsistent.
    pub fn build_pools_for_offseason(
        &mut self,
        season: SeasonLabel,
    ) -> Result<FreeAgencyOutcome, EngineError> {
        let outcome = self
            .free_agency
            .build_pools_for_offseason(&mut self.league, season)?;
        self.publish(&outcome.events);
        Ok(outcome)
    }

    /// Tender pending qualifying offers; `None` tenders all of the team's.
    ///
    /// # Errors
    ///
    /// Returns error if the team is unknown or holds no offer for a named
    /// player.
    pub fn tender_qualifying_offers(
        &mut self,
        team_id: &TeamId,
        player_ids: Option<&[PlayerId]>,
    ) -> Result<FreeAgencyOutcome, EngineError> {
        let outcome = self
            .free_agency
            .tender_qualifying_offers(&self.league, team_id, player_ids)?;
        self.publish(&outcome.events);
        Ok(outcome)
    }

    /// Player accepts his tendered qualifying offer.
    ///
    /// # Errors
    ///
    /// Returns error if no tendered offer exists or an offer sheet is pending.
    pub fn accept_qualifying_offer(
        &mut self,
        player_id: &PlayerId,
    ) -> Result<FreeAgencyOutcome, EngineError> {
        let outcome = self
            .free_agency
            .accept_qualifying_offer(&mut self.league, player_id)?;
        self.publish(&outcome.events);
        Ok(outcome)
    }

    /// Sign an unrestricted free agent.
    ///
    /// # Errors
    ///
    /// Returns error if the player is not in the UFA pool or the terms are
    /// malformed.
    pub fn sign_ufa(
        &mut self,
        team_id: &TeamId,
        player_id: &PlayerId,
        years: u16,
        aav: Money,
    ) -> Result<FreeAgencyOutcome, EngineError> {
        let outcome = self
            .free_agency
            .sign_ufa(&mut self.league, team_id, player_id, years, aav)?;
        self.publish(&outcome.events);
        Ok(outcome)
    }

    /// File an offer sheet on a restricted free agent.
    ///
    /// # Errors
    ///
    /// Returns error if the player is not an RFA with a distinct rights
    /// team, a sheet is already pending, or the terms are malformed.
    pub fn file_offer_sheet(
        &mut self,
        offering_team: &TeamId,
        player_id: &PlayerId,
        years: u16,
        aav: Money,
    ) -> Result<FreeAgencyOutcome, EngineError> {
        let outcome = self
            .free_agency
            .file_offer_sheet(&self.league, offering_team, player_id, years, aav)?;
        self.publish(&outcome.events);
        Ok(outcome)
    }

    /// Match or decline a pending offer sheet.
    ///
    /// # Errors
    ///
    /// Returns `NOT_FOUND` if no sheet is pending for the player.
    pub fn resolve_offer_sheet(
        &mut self,
        player_id: &PlayerId,
        matched: bool,
    ) -> Result<FreeAgencyOutcome, EngineError> {
        let outcome = self
            .free_agency
            .resolve_offer_sheet(&mut self.league, player_id, matched)?;
        self.publish(&outcome.events);
        Ok(outcome)
    }

    /// Advance one day and settle expired deadlines.
    pub fn advance_day(&mut self) -> Vec<FreeAgencyEvent> {
        let events = self.free_agency.advance_day(&mut self.league);
        self.publish(&events);
        events
    }

    fn publish(&self, events: &[FreeAgencyEvent]) {
        if events.is_empty() {
            return;
        }
        if let Err(e) = self.news.publish_events(events) {
            warn!(error = %e, count = events.len(), "Failed to publish news");
        }
    }
}
