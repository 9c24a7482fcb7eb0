//! Team scoring and ranking
//!
//! Teams are ordered by a lexicographic key: fewest uncovered weaknesses
//! first, then the smallest weakness product, then the widest offensive
//! coverage. Scoring is independent per team and runs on the rayon pool.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use itertools::Itertools;
use rayon::prelude::*;

use super::team::{DEFAULT_WEAKNESS_PRODUCT_IMMUNITY, Team};
use crate::TypeError;
use crate::types::CompoundType;

/// Ranking key of a team; smaller is better
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamScore {
    pub missing_resistance_coverage: usize,
    pub weakness_product: f32,
    pub offensive_coverage: i32,
}

impl TeamScore {
    /// True if `self` beats `other` on every component
    pub fn strictly_dominates(&self, other: &TeamScore) -> bool {
        self.missing_resistance_coverage < other.missing_resistance_coverage
            && self.weakness_product < other.weakness_product
            && self.offensive_coverage > other.offensive_coverage
    }
}

impl Ord for TeamScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.missing_resistance_coverage
            .cmp(&other.missing_resistance_coverage)
            .then_with(|| self.weakness_product.total_cmp(&other.weakness_product))
            // Higher coverage ranks first
            .then_with(|| other.offensive_coverage.cmp(&self.offensive_coverage))
    }
}

impl PartialOrd for TeamScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TeamScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TeamScore {}

/// Score a team against a universe of candidate defenders
pub fn evaluate(team: &Team, universe: &[CompoundType]) -> TeamScore {
    TeamScore {
        missing_resistance_coverage: team.missing_resistance_coverage(),
        weakness_product: team.weakness_product(DEFAULT_WEAKNESS_PRODUCT_IMMUNITY),
        offensive_coverage: team.offensive_coverage(universe),
    }
}

/// Every team of `size` distinct members drawn from `pool`
///
/// The pool is deduplicated first. A size larger than the pool yields
/// nothing.
pub fn enumerate_teams(
    pool: impl IntoIterator<Item = CompoundType>,
    size: usize,
) -> Result<impl Iterator<Item = Team>, TypeError> {
    if size == 0 {
        return Err(TypeError::InvalidArgument("team size must be at least 1"));
    }
    let pool: Vec<CompoundType> = pool.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
    Ok(pool
        .into_iter()
        .combinations(size)
        .filter_map(|members| Team::new(members).ok()))
}

/// A team paired with its score
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedTeam {
    pub team: Team,
    pub score: TeamScore,
}

/// Score every team in parallel and sort best first
///
/// Ties on the score fall back to team order, so the result is
/// deterministic regardless of scheduling.
pub fn rank_teams(
    teams: impl IntoIterator<Item = Team>,
    universe: &[CompoundType],
) -> Vec<RankedTeam> {
    let teams: Vec<Team> = teams.into_iter().collect();
    let mut ranked: Vec<RankedTeam> = teams
        .into_par_iter()
        .map(|team| {
            let score = evaluate(&team, universe);
            RankedTeam { team, score }
        })
        .collect();
    ranked.par_sort_unstable_by(|a, b| a.score.cmp(&b.score).then_with(|| a.team.cmp(&b.team)));
    ranked
}

/// Drop teams that another team beats on every component
///
/// Input order is preserved.
pub fn pareto_front(ranked: &[RankedTeam]) -> Vec<RankedTeam> {
    ranked
        .iter()
        .filter(|candidate| {
            !ranked
                .iter()
                .any(|other| other.score.strictly_dominates(&candidate.score))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category::{self, *};

    fn mono(categories: &[Category]) -> Team {
        Team::new(categories.iter().map(|c| CompoundType::single(*c))).unwrap()
    }

    fn score(missing: usize, product: f32, coverage: i32) -> TeamScore {
        TeamScore {
            missing_resistance_coverage: missing,
            weakness_product: product,
            offensive_coverage: coverage,
        }
    }

    #[test]
    fn test_score_ordering() {
        assert!(score(0, 64.0, -10) < score(1, 1.0, 50));
        assert!(score(1, 2.0, 0) < score(1, 4.0, 50));
        assert!(score(1, 2.0, 10) < score(1, 2.0, 5));
        assert_eq!(score(2, 8.0, 3), score(2, 8.0, 3));
    }

    #[test]
    fn test_evaluate() {
        let universe = CompoundType::combinations(1);
        let result = evaluate(&mono(&[Water, Grass]), &universe);
        assert_eq!(result.missing_resistance_coverage, 3);
        assert_eq!(result.weakness_product, 8.0);
        assert_eq!(result.offensive_coverage, -4);
    }

    #[test]
    fn test_enumerate_teams_in_pool_order() {
        let teams: Vec<Team> = enumerate_teams(CompoundType::combinations(1), 2)
            .unwrap()
            .take(3)
            .collect();
        assert_eq!(
            teams,
            vec![
                mono(&[Normal, Fire]),
                mono(&[Normal, Water]),
                mono(&[Normal, Electric])
            ]
        );
    }

    #[test]
    fn test_enumerate_teams_whole_pool() {
        let pool = [CompoundType::single(Water), CompoundType::single(Grass)];
        let teams: Vec<Team> = enumerate_teams(pool, 2).unwrap().collect();
        assert_eq!(teams, vec![mono(&[Water, Grass])]);
        assert_eq!(enumerate_teams(pool, 3).unwrap().count(), 0);
    }

    #[test]
    fn test_enumerate_teams() {
        let pool = CompoundType::combinations(1);
        assert_eq!(enumerate_teams(pool.clone(), 2).unwrap().count(), 153);
        assert_eq!(enumerate_teams(pool.clone(), 19).unwrap().count(), 0);
        assert!(matches!(
            enumerate_teams(pool, 0).map(|teams| teams.count()),
            Err(TypeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_enumerate_teams_deduplicates_pool() {
        let water = CompoundType::single(Water);
        let fire = CompoundType::single(Fire);
        let teams: Vec<Team> = enumerate_teams([water, fire, water], 2).unwrap().collect();
        assert_eq!(teams, vec![mono(&[Fire, Water])]);
    }

    #[test]
    fn test_rank_teams_is_sorted_and_deterministic() {
        let universe = CompoundType::combinations(1);
        let teams: Vec<Team> = enumerate_teams(universe.clone(), 2).unwrap().collect();
        let ranked = rank_teams(teams.clone(), &universe);
        assert_eq!(ranked.len(), 153);
        assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
        assert_eq!(ranked, rank_teams(teams.into_iter().rev(), &universe));
    }

    #[test]
    fn test_pareto_front_keeps_ties_and_drops_dominated() {
        let a = RankedTeam {
            team: mono(&[Water]),
            score: score(0, 2.0, 5),
        };
        let b = RankedTeam {
            team: mono(&[Fire]),
            score: score(0, 2.0, 5),
        };
        let c = RankedTeam {
            team: mono(&[Grass]),
            score: score(1, 4.0, 3),
        };
        let d = RankedTeam {
            team: mono(&[Ice]),
            score: score(1, 1.0, 0),
        };
        let front = pareto_front(&[a.clone(), b.clone(), c, d.clone()]);
        assert_eq!(front, vec![a, b, d]);
    }
}
