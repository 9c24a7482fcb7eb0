//! Defensive multiplier vectors for compound types
//!
//! A defender's vector is derived by multiplying, for each attacking
//! category, the table multipliers against every member category. The
//! result is a pure function of the defender, so it is memoized for the
//! life of the process.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use super::category::{Category, ELEMENTAL_COUNT};
use super::compound::CompoundType;
use super::interaction;

/// Standard effectiveness predicates over a multiplier value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effectiveness {
    /// Exactly 0x
    NoEffect,
    /// Exactly 0.25x
    Quarter,
    /// Exactly 0.5x
    Half,
    /// Exactly 1x
    Normal,
    /// Exactly 2x
    Double,
    /// Exactly 4x
    Quadruple,
    /// Anything above 1x
    MoreEffective,
    /// Anything below 1x, immunities included
    LessEffective,
}

impl Effectiveness {
    pub fn matches(self, multiplier: f32) -> bool {
        match self {
            Effectiveness::NoEffect => multiplier == 0.0,
            Effectiveness::Quarter => multiplier == 0.25,
            Effectiveness::Half => multiplier == 0.5,
            Effectiveness::Normal => multiplier == 1.0,
            Effectiveness::Double => multiplier == 2.0,
            Effectiveness::Quadruple => multiplier == 4.0,
            Effectiveness::MoreEffective => multiplier > 1.0,
            Effectiveness::LessEffective => multiplier < 1.0,
        }
    }
}

/// Multiplier taken from every elemental attacking category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    values: [f32; ELEMENTAL_COUNT],
}

impl Multipliers {
    /// All attackers at 1x
    pub fn neutral() -> Self {
        Self {
            values: [1.0; ELEMENTAL_COUNT],
        }
    }

    /// Multiplier from one attacking category (the marker always deals 1x)
    pub fn get(&self, attacker: Category) -> f32 {
        self.values
            .get(attacker.order_key())
            .copied()
            .unwrap_or(1.0)
    }

    /// `(attacker, multiplier)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f32)> + '_ {
        Category::elemental()
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Attacking categories whose multiplier satisfies the predicate
    pub fn filter(&self, effectiveness: Effectiveness) -> Vec<Category> {
        self.iter()
            .filter(|(_, m)| effectiveness.matches(*m))
            .map(|(c, _)| c)
            .collect()
    }

    pub fn count(&self, effectiveness: Effectiveness) -> usize {
        self.iter().filter(|(_, m)| effectiveness.matches(*m)).count()
    }
}

/// Compute a defender's vector without touching the cache
pub fn derive_defense(defender: CompoundType) -> Multipliers {
    let mut multipliers = Multipliers::neutral();
    for (slot, attacker) in multipliers.values.iter_mut().zip(Category::elemental()) {
        // Row coverage of every elemental attacker is asserted by test_table_is_complete
        let row = interaction::lookup(*attacker);
        debug_assert!(row.is_ok(), "no interaction row for {attacker}");
        if let Ok(row) = row {
            for member in defender.iter() {
                *slot *= row.multiplier(member);
            }
        }
    }
    multipliers
}

fn cache() -> &'static RwLock<HashMap<CompoundType, Multipliers>> {
    static CACHE: OnceLock<RwLock<HashMap<CompoundType, Multipliers>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Memoized defensive vector of a compound type
pub fn defense_vector(defender: CompoundType) -> Multipliers {
    if let Ok(cached) = cache().read()
        && let Some(multipliers) = cached.get(&defender)
    {
        return *multipliers;
    }

    let multipliers = derive_defense(defender);
    if let Ok(mut cached) = cache().write() {
        cached.insert(defender, multipliers);
    }
    multipliers
}

impl CompoundType {
    /// Defensive multipliers of this compound type
    pub fn defense(&self) -> Multipliers {
        defense_vector(*self)
    }
}
