//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::too_many_arguments)]

use cap_engine::domain::free_agency::FreeAgencyEngine;
use cap_engine::domain::ledger::{Contract, LeagueState, Player, Position, SeasonFinance, TeamState};
use cap_engine::domain::shared::{ContractId, Money, PlayerId, SeasonLabel, TeamId};

/// Season the fixtures play in.
pub const SEASON: SeasonLabel = SeasonLabel::starting(2025);

/// League with Boston, Toronto and New York on day zero.
pub fn league(ceiling: i64) -> LeagueState {
    let mut league = LeagueState::new(SeasonFinance::new(SEASON, Money::dollars(ceiling)));
    for (id, name) in [("BOS", "Boston"), ("TOR", "Toronto"), ("NYR", "New York")] {
        league.add_team(TeamState::new(id, name));
    }
    league
}

/// Add a player and sign him to a flat contract.
pub fn sign(
    league: &mut LeagueState,
    team: &str,
    player: &str,
    age: u8,
    accrued: u8,
    start: SeasonLabel,
    years: u16,
    aav: i64,
) {
    league.add_player(Player::new(player, player, Position::Center, age).with_accrued_seasons(accrued));
    let contract = Contract::flat(
        ContractId::new(format!("c-{player}")),
        PlayerId::new(player),
        start,
        years,
        Money::dollars(aav),
    )
    .unwrap();
    league.sign_contract(&TeamId::new(team), contract).unwrap();
}

/// Sign `count` veterans to a team on three-year deals at `aav`.
pub fn fill_roster(league: &mut LeagueState, team: &str, count: usize, aav: i64) -> Vec<PlayerId> {
    (0..count)
        .map(|i| {
            let player = format!("{}-{i:02}", team.to_lowercase());
            sign(league, team, &player, 28, 8, SEASON, 3, aav);
            PlayerId::new(player)
        })
        .collect()
}

/// Step the market until the league reaches `day`.
pub fn advance_to(engine: &mut FreeAgencyEngine, league: &mut LeagueState, day: u32) {
    while league.day_index() < day {
        engine.advance_day(league);
    }
}

pub fn tid(id: &str) -> TeamId {
    TeamId::new(id)
}

pub fn pid(id: &str) -> PlayerId {
    PlayerId::new(id)
}
