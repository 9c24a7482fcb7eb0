//! Plain-text rendering of engine results

use std::collections::BTreeMap;

use coverdex_typing::analysis::{
    DEFAULT_AVERAGE_DAMAGE_IMMUNITY, DEFAULT_WEAKNESS_PRODUCT_IMMUNITY, RankedTeam, TeamScore,
};
use coverdex_typing::query::{attack_coverage, filter_effective};
use coverdex_typing::{Category, CompoundType, Effectiveness, Team};

const DEFENSE_GROUPS: [(Effectiveness, &str); 5] = [
    (Effectiveness::Quadruple, "4x"),
    (Effectiveness::Double, "2x"),
    (Effectiveness::Half, "0.5x"),
    (Effectiveness::Quarter, "0.25x"),
    (Effectiveness::NoEffect, "0x"),
];

fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn counts(map: &BTreeMap<Category, usize>) -> String {
    join(map.iter().map(|(category, count)| format!("{category} {count}")))
}

/// Multiplier groups taken by a defender
pub fn defense(defender: CompoundType) -> String {
    let vector = defender.defense();
    let mut out = format!("{defender}\n");
    for (effectiveness, label) in DEFENSE_GROUPS {
        let group = vector.filter(effectiveness);
        if !group.is_empty() {
            out.push_str(&format!("  {label:>5}: {}\n", join(group)));
        }
    }
    out
}

/// How an attacker fares against every compound type in `universe`
pub fn coverage(attacker: CompoundType, universe: &[CompoundType]) -> String {
    let rated = attack_coverage(attacker, universe.iter().copied());
    let super_effective = filter_effective(rated.clone(), Effectiveness::MoreEffective);
    let neutral = filter_effective(rated.clone(), Effectiveness::Normal);
    let resisted = filter_effective(rated.clone(), Effectiveness::LessEffective);
    let immune = filter_effective(rated, Effectiveness::NoEffect);

    let mut out = format!("{attacker} vs {} compound types\n", universe.len());
    out.push_str(&format!("  super effective: {}\n", super_effective.len()));
    out.push_str(&format!("  neutral: {}\n", neutral.len()));
    out.push_str(&format!("  resisted: {}\n", resisted.len()));
    if !resisted.is_empty() {
        out.push_str(&format!("  walls: {}\n", join(&resisted)));
    }
    if !immune.is_empty() {
        out.push_str(&format!("  immune: {}\n", join(&immune)));
    }
    out
}

/// Team metrics and ranking key, with matchups counted against `pool`
pub fn team(team: &Team, score: &TeamScore, pool: &[CompoundType]) -> String {
    let uncovered = team.uncovered_weaknesses();
    let uncovered = if uncovered.is_empty() {
        "0".to_string()
    } else {
        format!("{} ({})", uncovered.len(), join(&uncovered))
    };

    let mut out = format!("Team {team}\n");
    out.push_str(&format!("  weaknesses: {}\n", counts(&team.weakness_counts())));
    out.push_str(&format!("  resistances: {}\n", counts(&team.resistance_counts())));
    out.push_str(&format!(
        "  average damage: {:.2}\n",
        team.average_damage(DEFAULT_AVERAGE_DAMAGE_IMMUNITY)
    ));
    out.push_str(&format!(
        "  weakness product: {}\n",
        team.weakness_product(DEFAULT_WEAKNESS_PRODUCT_IMMUNITY)
    ));
    out.push_str(&format!("  resistance balance: {:.2}\n", team.resistance_balance()));
    out.push_str(&format!("  uncovered weaknesses: {uncovered}\n"));
    out.push_str(&format!("  offensive coverage: {}\n", score.offensive_coverage));
    out.push_str(&format!(
        "  counters: {} of {}\n",
        team.counter_count(pool),
        pool.len()
    ));
    out.push_str(&format!("  checks: {} of {}\n", team.checks_count(pool), pool.len()));

    let matrix = team.complement_matrix();
    if !matrix.is_empty() {
        out.push_str("  complements:\n");
        for (partner, row) in &matrix {
            for (member, value) in row {
                out.push_str(&format!("    {partner} covers {member}: {value}\n"));
            }
        }
    }
    out
}

/// One line per ranked team
pub fn ranking(ranked: &[RankedTeam]) -> String {
    ranked
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            format!(
                "{:>4}. {}  missing={} product={} coverage={}\n",
                position + 1,
                entry.team,
                entry.score.missing_resistance_coverage,
                entry.score.weakness_product,
                entry.score.offensive_coverage
            )
        })
        .collect()
}
