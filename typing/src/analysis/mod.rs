//! Team aggregation and ranking

mod ranking;
mod team;

pub use ranking::{RankedTeam, TeamScore, enumerate_teams, evaluate, pareto_front, rank_teams};
pub use team::{DEFAULT_AVERAGE_DAMAGE_IMMUNITY, DEFAULT_WEAKNESS_PRODUCT_IMMUNITY, Team};
