//! Query helpers for type matchups and coverage
//!
//! This module provides utilities for analyzing how compound types match up
//! against each other, from a single defender's weaknesses to an attacker's
//! coverage over a whole candidate pool.

mod coverage;

pub use coverage::{
    // Defender-centric queries
    immunities,
    is_immune_to,
    is_weak_to_any,
    resistances,
    resists_all,
    weaknesses,
};
pub use coverage::{attack_coverage, filter_effective, resisted_by};
pub use coverage::{checks, complement_score, counters};
