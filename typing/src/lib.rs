//! Type-relationship engine for creature battles.
//!
//! This crate holds the category catalog, the static interaction table and
//! everything derived from them: defensive multiplier vectors, coverage
//! queries and team-level metrics.
//!
//! # Overview
//!
//! `coverdex-typing` is the pure core; adapters feed it compound types:
//!
//! ```text
//! coverdex-dataset (CSV)   coverdex-client (HTTP)   coverdex-team (team files)
//!          │                       │                          │
//!          └───────────────────────┼──────────────────────────┘
//!                                  ▼
//!                  coverdex-typing (engine) ← THIS CRATE
//!                                  │
//!                                  ▼
//!                           coverdex-cli
//! ```
//!
//! # Main Types
//!
//! - [`Category`] - The 18 elemental categories plus the neutral `Levitate` marker
//! - [`CompoundType`] - A creature's set of categories
//! - [`Multipliers`] - Damage multiplier taken from every attacking category
//! - [`Team`] - A set of compound types evaluated together
//! - [`TeamScore`] - Lexicographic ranking key for teams
//!
//! # Example Usage
//!
//! ```
//! use coverdex_typing::{Category, CompoundType, Team, query};
//!
//! let ferrothorn: CompoundType = "grass/steel".parse().unwrap();
//! assert_eq!(query::weaknesses(ferrothorn), vec![Category::Fire, Category::Fighting]);
//!
//! let team = Team::new([
//!     CompoundType::single(Category::Water),
//!     CompoundType::single(Category::Grass),
//! ])
//! .unwrap();
//! assert_eq!(team.missing_resistance_coverage(), 3);
//! ```

use thiserror::Error;

pub mod analysis;
pub mod query;
pub mod types;

pub use analysis::{RankedTeam, Team, TeamScore};
pub use types::{Category, CompoundType, Effectiveness, Multipliers};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("No interaction row for attacking category {0}")]
    UnknownInteraction(Category),

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}
