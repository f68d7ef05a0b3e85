//! Contract buyouts.
//!
//! The team pays a fraction of the remaining salary, spread over a
//! multiple of the remaining seasons. Both constants are league
//! configuration.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::termination::terminate;
use crate::config::BuyoutConfig;
use crate::domain::ledger::{
    BuyoutInstallment, BuyoutSchedule, Contract, ContractTerm, LeagueState,
};
use crate::domain::shared::{ContractId, DomainError, Money, SeasonLabel};

/// Buyout formula constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyoutTerms {
    /// Numerator of the share of remaining salary owed.
    pub obligation_numerator: u32,
    /// Denominator of the share of remaining salary owed.
    pub obligation_denominator: u32,
    /// Payments are spread over this many times the remaining seasons.
    pub spread_multiplier: u16,
}

impl Default for BuyoutTerms {
    fn default() -> Self {
        Self {
            obligation_numerator: 2,
            obligation_denominator: 3,
            spread_multiplier: 2,
        }
    }
}

impl BuyoutTerms {
    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the denominator or multiplier is zero, or the
    /// fraction exceeds one.
    pub fn from_config(config: &BuyoutConfig) -> Result<Self, DomainError> {
        let terms = Self {
            obligation_numerator: config.obligation_numerator,
            obligation_denominator: config.obligation_denominator,
            spread_multiplier: config.spread_multiplier,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Check the constants are usable.
    ///
    /// # Errors
    ///
    /// Returns error if the denominator or multiplier is zero, or the
    /// fraction exceeds one.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.obligation_denominator == 0 {
            return Err(DomainError::invalid("obligation_denominator", "must be positive"));
        }
        if self.obligation_numerator > self.obligation_denominator {
            return Err(DomainError::invalid("obligation_numerator", "fraction must not exceed 1"));
        }
        if self.spread_multiplier == 0 {
            return Err(DomainError::invalid("spread_multiplier", "must be positive"));
        }
        Ok(())
    }
}

/// Buyout schedule for a contract bought out during `season`.
///
/// Installments are equal to the cent; the last absorbs rounding.
///
/// # Errors
///
/// Returns error if the contract has no seasons left or the terms are
/// invalid.
pub fn compute_buyout(
    contract: &Contract,
    season: SeasonLabel,
    terms: &BuyoutTerms,
) -> Result<BuyoutSchedule, DomainError> {
    terms.validate()?;
    let remaining_seasons = contract.remaining_seasons(season);
    if remaining_seasons == 0 {
        return Err(DomainError::invalid(
            "contract",
            format!("{} has no seasons left after {season}", contract.id),
        ));
    }

    let remaining_salary: Money = contract.remaining_terms(season).map(ContractTerm::cap_hit).sum();
    let total_obligation =
        (remaining_salary * terms.obligation_numerator / terms.obligation_denominator).round();

    let count = remaining_seasons.saturating_mul(terms.spread_multiplier);
    let each = (total_obligation / u32::from(count)).round();
    let installments = (0..count)
        .map(|i| {
            let amount = if i + 1 == count {
                total_obligation - each * u32::from(count - 1)
            } else {
                each
            };
            BuyoutInstallment {
                season: season.offset(i),
                amount,
            }
        })
        .collect();

    Ok(BuyoutSchedule {
        player_id: contract.player_id.clone(),
        contract_id: contract.id.clone(),
        remaining_salary,
        total_obligation,
        installments,
    })
}

/// Buy out a contract: record the schedule on the team carrying the
/// player and terminate the contract.
///
/// # Errors
///
/// Returns error if the contract does not exist, no team carries the
/// player, or the contract has no seasons left.
pub fn buy_out(
    league: &mut LeagueState,
    contract_id: &ContractId,
    terms: &BuyoutTerms,
) -> Result<BuyoutSchedule, DomainError> {
    let contract = league.contract(contract_id)?;
    let team_id = league
        .team_of(&contract.player_id)
        .cloned()
        .ok_or_else(|| DomainError::not_found("Team carrying player", &contract.player_id))?;
    let schedule = compute_buyout(contract, league.finance.season, terms)?;

    terminate(league, contract_id)?;
    league.team_mut(&team_id)?.buyouts.push(schedule.clone());

    info!(
        team_id = %team_id,
        player_id = %schedule.player_id,
        contract_id = %contract_id,
        total_obligation = %schedule.total_obligation,
        installments = schedule.installments.len(),
        "Contract bought out"
    );
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::{ContractClauses, Player, Position, RightsStatus, SeasonFinance, TeamState};
    use crate::domain::shared::{PlayerId, TeamId};

    const SEASON: SeasonLabel = SeasonLabel::starting(2025);

    fn contract(years: u16, aav: i64) -> Contract {
        Contract::flat(ContractId::new("c1"), PlayerId::new("p1"), SEASON, years, Money::dollars(aav)).unwrap()
    }

    #[test]
    fn two_thirds_over_twice_the_term() {
        let schedule = compute_buyout(&contract(3, 3_000_000), SEASON, &BuyoutTerms::default()).unwrap();

        assert_eq!(schedule.remaining_salary, Money::dollars(9_000_000));
        assert_eq!(schedule.total_obligation, Money::dollars(6_000_000));
        assert_eq!(schedule.installments.len(), 6);
        assert!(schedule.installments.iter().all(|i| i.amount == Money::dollars(1_000_000)));
        assert_eq!(schedule.installments[0].season, SEASON);
        assert_eq!(schedule.installments[5].season, SeasonLabel::starting(2030));
    }

    #[test]
    fn counts_only_remaining_seasons() {
        let schedule = compute_buyout(
            &contract(3, 3_000_000),
            SeasonLabel::starting(2026),
            &BuyoutTerms::default(),
        )
        .unwrap();
        assert_eq!(schedule.remaining_salary, Money::dollars(6_000_000));
        assert_eq!(schedule.installments.len(), 4);
    }

    #[test]
    fn last_installment_absorbs_rounding() {
        let schedule = compute_buyout(&contract(1, 1_000_000), SEASON, &BuyoutTerms::default()).unwrap();

        assert_eq!(schedule.total_obligation, Money::from_cents(66_666_667));
        assert_eq!(schedule.installments[0].amount, Money::from_cents(33_333_334));
        assert_eq!(schedule.installments[1].amount, Money::from_cents(33_333_333));
        let paid: Money = schedule.installments.iter().map(|i| i.amount).sum();
        assert_eq!(paid, schedule.total_obligation);
    }

    #[test]
    fn signing_bonus_counts_toward_remaining_salary() {
        let terms = vec![
            ContractTerm::new(SEASON, Money::dollars(1_000_000)).with_signing_bonus(Money::dollars(500_000)),
        ];
        let contract = Contract::new(ContractId::new("c1"), PlayerId::new("p1"), terms, ContractClauses::default())
            .unwrap();
        let schedule = compute_buyout(&contract, SEASON, &BuyoutTerms::default()).unwrap();
        assert_eq!(schedule.total_obligation, Money::dollars(1_000_000));
    }

    #[test]
    fn expired_contract_cannot_be_bought_out() {
        let result = compute_buyout(&contract(1, 1_000_000), SeasonLabel::starting(2026), &BuyoutTerms::default());
        assert!(result.is_err());
    }

    #[test]
    fn zero_multiplier_is_rejected() {
        let terms = BuyoutTerms {
            spread_multiplier: 0,
            ..BuyoutTerms::default()
        };
        assert!(terms.validate().is_err());
    }

    #[test]
    fn buy_out_records_schedule_and_terminates() {
        let mut league = LeagueState::new(SeasonFinance::new(SEASON, Money::dollars(88_000_000)));
        league.add_team(TeamState::new("BOS", "Boston"));
        league.add_player(Player::new("p1", "Skater", Position::RightWing, 31));
        league.sign_contract(&TeamId::new("BOS"), contract(2, 1_500_000)).unwrap();

        let schedule = buy_out(&mut league, &ContractId::new("c1"), &BuyoutTerms::default()).unwrap();

        let team = league.team(&TeamId::new("BOS")).unwrap();
        assert_eq!(team.buyouts, vec![schedule]);
        assert!(!team.holds(&PlayerId::new("p1")));
        assert_eq!(team.spc_count, 0);
        let player = league.player(&PlayerId::new("p1")).unwrap();
        assert!(!player.is_signed());
        assert_eq!(player.rights, RightsStatus::NoRights);
        assert!(league.contracts.is_empty());
    }
}
