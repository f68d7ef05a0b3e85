//! Application Services

mod league_office;

pub use league_office::LeagueOffice;
