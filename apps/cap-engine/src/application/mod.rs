//! Application Layer
//!
//! Orchestrates the domain for callers:
//!
//! - **Ports**: Interfaces to external systems (news outlet)
//! - **Services**: The `LeagueOffice` facade
//! - **DTOs**: Report shapes for callers

pub mod dto;
pub mod ports;
pub mod services;

pub use dto::*;
pub use ports::*;
pub use services::*;
