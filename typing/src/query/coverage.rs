//! Type matchup and coverage helpers

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Category, CompoundType, Effectiveness};

/// Check if defender is weak (>1x effectiveness) to any of the attacking categories
pub fn is_weak_to_any(defender: CompoundType, attacking: &[Category]) -> bool {
    let defense = defender.defense();
    attacking.iter().any(|t| defense.get(*t) > 1.0)
}

/// Check if defender resists (<1x effectiveness) all of the attacking categories
pub fn resists_all(defender: CompoundType, attacking: &[Category]) -> bool {
    if attacking.is_empty() {
        return false;
    }
    let defense = defender.defense();
    attacking.iter().all(|t| defense.get(*t) < 1.0)
}

/// Check if defender is immune (0x effectiveness) to a category
pub fn is_immune_to(defender: CompoundType, attacking: Category) -> bool {
    defender.defense().get(attacking) == 0.0
}

/// Get all categories that are super effective against the defender
pub fn weaknesses(defender: CompoundType) -> Vec<Category> {
    defender.defense().filter(Effectiveness::MoreEffective)
}

/// Get all categories that the defender resists (0 < effectiveness < 1)
pub fn resistances(defender: CompoundType) -> Vec<Category> {
    defender
        .defense()
        .iter()
        .filter(|(_, m)| *m > 0.0 && *m < 1.0)
        .map(|(c, _)| c)
        .collect()
}

/// Get all categories that the defender is immune to
pub fn immunities(defender: CompoundType) -> Vec<Category> {
    defender.defense().filter(Effectiveness::NoEffect)
}

fn best_angle(attacker: CompoundType, candidate: CompoundType, pick: fn(f32, f32) -> f32) -> f32 {
    let defense = candidate.defense();
    attacker
        .iter()
        .map(|a| defense.get(a))
        .reduce(pick)
        .unwrap_or(1.0)
}

/// How hard `attacker` hits each candidate with its best category
pub fn attack_coverage(
    attacker: CompoundType,
    candidates: impl IntoIterator<Item = CompoundType>,
) -> BTreeMap<CompoundType, f32> {
    candidates
        .into_iter()
        .map(|c| (c, best_angle(attacker, c, f32::max)))
        .collect()
}

/// How well each candidate holds up against `attacker`'s weakest angle
pub fn resisted_by(
    attacker: CompoundType,
    candidates: impl IntoIterator<Item = CompoundType>,
) -> BTreeMap<CompoundType, f32> {
    candidates
        .into_iter()
        .map(|c| (c, best_angle(attacker, c, f32::min)))
        .collect()
}

/// Keys of a multiplier mapping whose value satisfies the predicate
pub fn filter_effective<K: Ord>(
    mapping: impl IntoIterator<Item = (K, f32)>,
    effectiveness: Effectiveness,
) -> BTreeSet<K> {
    mapping
        .into_iter()
        .filter(|(_, m)| effectiveness.matches(*m))
        .map(|(k, _)| k)
        .collect()
}

/// How well `partner` covers the weaknesses of `member`
///
/// Each category `member` is weak to scores 1 if `partner` takes it
/// neutrally and 2 if `partner` resists or is immune to it.
pub fn complement_score(partner: CompoundType, member: CompoundType) -> i32 {
    let partner_def = partner.defense();
    member
        .defense()
        .filter(Effectiveness::MoreEffective)
        .into_iter()
        .map(|t| match partner_def.get(t) {
            m if m < 1.0 => 2,
            m if m == 1.0 => 1,
            _ => 0,
        })
        .sum()
}

/// Checker resists every category of target and hits it super effectively
pub fn counters(checker: CompoundType, target: CompoundType) -> bool {
    let checker_def = checker.defense();
    let target_def = target.defense();
    target.elemental().all(|t| checker_def.get(t) < 1.0)
        && checker.elemental().any(|t| target_def.get(t) > 1.0)
}

/// Checker can switch into target and threaten it
///
/// Either it resists every category of target and hits at least neutrally,
/// or it is weak to none of them and hits super effectively.
pub fn checks(checker: CompoundType, target: CompoundType) -> bool {
    let checker_def = checker.defense();
    let target_def = target.defense();
    (target.elemental().all(|t| checker_def.get(t) < 1.0)
        && checker.elemental().any(|t| target_def.get(t) >= 1.0))
        || (target.elemental().all(|t| checker_def.get(t) <= 1.0)
            && checker.elemental().any(|t| target_def.get(t) > 1.0))
}
