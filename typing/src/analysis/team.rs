//! Team-level aggregation of defensive and offensive matchups

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::TypeError;
use crate::query::{attack_coverage, checks, complement_score, counters};
use crate::types::{Category, CompoundType, Multipliers};

/// Immunity stand-in used by [`Team::average_damage`] by default
pub const DEFAULT_AVERAGE_DAMAGE_IMMUNITY: f32 = 0.0;

/// Immunity stand-in used by [`Team::weakness_product`] by default.
///
/// Treats an immunity as a strong resistance rather than a guarantee, so a
/// single immune member does not erase a shared weakness.
pub const DEFAULT_WEAKNESS_PRODUCT_IMMUNITY: f32 = 0.25;

/// A non-empty set of distinct compound types evaluated together
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<CompoundType>", into = "Vec<CompoundType>")
)]
pub struct Team {
    members: BTreeSet<CompoundType>,
}

impl Team {
    /// Build a team; duplicate members collapse
    pub fn new(members: impl IntoIterator<Item = CompoundType>) -> Result<Self, TypeError> {
        let members: BTreeSet<CompoundType> = members.into_iter().collect();
        if members.is_empty() {
            return Err(TypeError::InvalidArgument("team needs at least one member"));
        }
        Ok(Self { members })
    }

    /// Members in canonical order
    pub fn members(&self) -> impl Iterator<Item = CompoundType> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, member: CompoundType) -> bool {
        self.members.contains(&member)
    }

    fn defenses(&self) -> Vec<Multipliers> {
        self.members.iter().map(|m| m.defense()).collect()
    }

    fn count_members(&self, pick: impl Fn(f32) -> bool) -> BTreeMap<Category, usize> {
        let defenses = self.defenses();
        Category::elemental()
            .iter()
            .map(|t| (*t, defenses.iter().filter(|d| pick(d.get(*t))).count()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Number of members weak (>1x) to each attacking category
    ///
    /// Categories nobody is weak to are left out.
    pub fn weakness_counts(&self) -> BTreeMap<Category, usize> {
        self.count_members(|m| m > 1.0)
    }

    /// Number of members resisting (<1x, immunities included) each attacking category
    pub fn resistance_counts(&self) -> BTreeMap<Category, usize> {
        self.count_members(|m| m < 1.0)
    }

    /// Total multiplier taken per member, summed over every attacking category
    ///
    /// Immunities count as `immunity_multiplier`. The result is divided by
    /// the member count only, not by the number of categories.
    pub fn average_damage(&self, immunity_multiplier: f32) -> f32 {
        let total: f32 = self
            .defenses()
            .iter()
            .flat_map(|d| d.iter())
            .map(|(_, m)| if m == 0.0 { immunity_multiplier } else { m })
            .sum();
        total / self.members.len() as f32
    }

    /// Product of the per-category team products that exceed 1x
    ///
    /// For each attacking category the members' multipliers are multiplied
    /// together (immunities replaced by `immunity_multiplier`); only products
    /// above 1 contribute to the result.
    pub fn weakness_product(&self, immunity_multiplier: f32) -> f32 {
        let defenses = self.defenses();
        Category::elemental()
            .iter()
            .map(|t| {
                defenses
                    .iter()
                    .map(|d| match d.get(*t) {
                        0.0 => immunity_multiplier,
                        m => m,
                    })
                    .product::<f32>()
            })
            .filter(|product| *product > 1.0)
            .product()
    }

    /// Weakness categories not matched by at least as many resisting members
    pub fn uncovered_weaknesses(&self) -> Vec<Category> {
        let resistances = self.resistance_counts();
        self.weakness_counts()
            .into_iter()
            .filter(|(t, weak)| resistances.get(t).is_none_or(|resist| resist < weak))
            .map(|(t, _)| t)
            .collect()
    }

    pub fn missing_resistance_coverage(&self) -> usize {
        self.uncovered_weaknesses().len()
    }

    /// Net number of universe entries the members threaten
    ///
    /// Each member adds the candidates it hits super effectively and
    /// subtracts the ones that resist its best angle.
    pub fn offensive_coverage(&self, universe: &[CompoundType]) -> i32 {
        self.members
            .iter()
            .map(|member| {
                let coverage = attack_coverage(*member, universe.iter().copied());
                let threatened = coverage.values().filter(|m| **m > 1.0).count() as i32;
                let walled = coverage.values().filter(|m| **m < 1.0).count() as i32;
                threatened - walled
            })
            .sum()
    }

    /// Signed balance of resisting against weak members, summed per category
    ///
    /// A surplus of weak members costs one per member; a surplus of
    /// resisting members earns `1 - 1 / (surplus + 1)`, so extra resists
    /// give diminishing returns.
    pub fn resistance_balance(&self) -> f32 {
        let defenses = self.defenses();
        Category::elemental()
            .iter()
            .map(|t| {
                let weak = defenses.iter().filter(|d| d.get(*t) > 1.0).count() as f32;
                let resist = defenses.iter().filter(|d| d.get(*t) < 1.0).count() as f32;
                match resist - weak {
                    diff if diff <= 0.0 => diff,
                    diff => 1.0 - 1.0 / (diff + 1.0),
                }
            })
            .sum()
    }

    /// Number of pool entries some member counters
    pub fn counter_count(&self, pool: &[CompoundType]) -> usize {
        pool.iter()
            .filter(|target| self.members.iter().any(|m| counters(*m, **target)))
            .count()
    }

    /// Number of pool entries some member checks
    pub fn checks_count(&self, pool: &[CompoundType]) -> usize {
        pool.iter()
            .filter(|target| self.members.iter().any(|m| checks(*m, **target)))
            .count()
    }

    /// Pairwise complement scores between distinct members
    ///
    /// `matrix[a][b]` is how well `a` covers the weaknesses of `b`. A
    /// single-member team has an empty matrix.
    pub fn complement_matrix(&self) -> BTreeMap<CompoundType, BTreeMap<CompoundType, i32>> {
        let mut matrix: BTreeMap<CompoundType, BTreeMap<CompoundType, i32>> = BTreeMap::new();
        for pair in self.members.iter().combinations(2) {
            let (a, b) = (*pair[0], *pair[1]);
            matrix.entry(a).or_default().insert(b, complement_score(a, b));
            matrix.entry(b).or_default().insert(a, complement_score(b, a));
        }
        matrix
    }
}

impl TryFrom<Vec<CompoundType>> for Team {
    type Error = TypeError;

    fn try_from(members: Vec<CompoundType>) -> Result<Self, Self::Error> {
        Team::new(members)
    }
}

impl From<Team> for Vec<CompoundType> {
    fn from(team: Team) -> Self {
        team.members.into_iter().collect()
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let members: Vec<String> = self.members.iter().map(|m| m.to_string()).collect();
        write!(f, "[{}]", members.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Category::*;

    fn mono(categories: &[Category]) -> Team {
        Team::new(categories.iter().map(|c| CompoundType::single(*c))).unwrap()
    }

    #[test]
    fn test_empty_team_is_rejected() {
        assert!(matches!(
            Team::new(Vec::new()),
            Err(TypeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_duplicates_collapse() {
        let water = CompoundType::single(Water);
        let team = Team::new([water, water, CompoundType::single(Grass)]).unwrap();
        assert_eq!(team.len(), 2);
        assert_eq!(team, mono(&[Grass, Water]));
    }

    #[test]
    fn test_water_grass_counts() {
        let team = mono(&[Water, Grass]);
        assert_eq!(
            team.weakness_counts(),
            BTreeMap::from([
                (Fire, 1),
                (Electric, 1),
                (Grass, 1),
                (Ice, 1),
                (Poison, 1),
                (Flying, 1),
                (Bug, 1),
            ])
        );
        assert_eq!(
            team.resistance_counts(),
            BTreeMap::from([
                (Fire, 1),
                (Water, 2),
                (Electric, 1),
                (Grass, 1),
                (Ice, 1),
                (Ground, 1),
                (Steel, 1),
            ])
        );
    }

    #[test]
    fn test_counts_iterate_in_declaration_order() {
        let team = mono(&[Water, Grass]);
        let keys: Vec<Category> = team.weakness_counts().into_keys().collect();
        assert_eq!(keys, vec![Fire, Electric, Grass, Ice, Poison, Flying, Bug]);
    }

    #[test]
    fn test_best_mono_pair_resistances() {
        let mut best = 0;
        let mut best_teams = BTreeSet::new();
        for pair in CompoundType::combinations(2) {
            let team = Team::new(pair.iter().map(CompoundType::single)).unwrap();
            let count = team.resistance_counts().len();
            if count > best {
                best = count;
                best_teams.clear();
            }
            if count == best {
                best_teams.insert(team);
            }
        }
        assert_eq!(best, 14);
        assert_eq!(
            best_teams,
            BTreeSet::from([mono(&[Grass, Steel]), mono(&[Dragon, Steel])])
        );
    }

    #[test]
    fn test_average_damage() {
        let team = mono(&[Water, Grass]);
        assert_eq!(team.average_damage(DEFAULT_AVERAGE_DAMAGE_IMMUNITY), 19.5);

        // Normal takes 0x from Ghost
        let normal = mono(&[Normal]);
        assert_eq!(normal.average_damage(0.0), 18.0);
        assert_eq!(normal.average_damage(1.0), 19.0);
    }

    #[test]
    fn test_weakness_product() {
        // Poison, Flying and Bug stay uncovered at 2x each
        let team = mono(&[Water, Grass]);
        assert_eq!(team.weakness_product(DEFAULT_WEAKNESS_PRODUCT_IMMUNITY), 8.0);

        // Fire hits both members for 2x, so it contributes 4x
        let grass_ice = mono(&[Grass, Ice]);
        assert_eq!(grass_ice.weakness_counts()[&Fire], 2);
        assert_eq!(grass_ice.weakness_product(DEFAULT_WEAKNESS_PRODUCT_IMMUNITY), 256.0);
    }

    #[test]
    fn test_weakness_product_immunity_substitution() {
        // Ground is immune to Electric; Water is 2x weak to it
        let team = mono(&[Water, Ground]);
        // 2 * 0.25 = 0.5, so Electric drops out; only Grass (4x) remains
        assert_eq!(team.weakness_product(0.25), 4.0);
        let with_quarter = team.weakness_product(0.25);
        let with_full = team.weakness_product(1.0);
        assert_eq!(with_full / with_quarter, 2.0);
    }

    #[test]
    fn test_no_weakness_product_is_identity() {
        // A lone Normal is only weak to Fighting
        assert_eq!(mono(&[Normal]).weakness_product(0.25), 2.0);
    }

    #[test]
    fn test_missing_resistance_coverage() {
        let team = mono(&[Water, Grass]);
        assert_eq!(team.uncovered_weaknesses(), vec![Poison, Flying, Bug]);
        assert_eq!(team.missing_resistance_coverage(), 3);
    }

    #[test]
    fn test_offensive_coverage() {
        let universe = CompoundType::combinations(1);
        // Water: +3 -3, Grass: +3 -7
        assert_eq!(mono(&[Water, Grass]).offensive_coverage(&universe), -4);
        assert_eq!(mono(&[Water]).offensive_coverage(&universe), 0);
        assert_eq!(mono(&[Water]).offensive_coverage(&[]), 0);
    }

    #[test]
    fn test_offensive_coverage_with_marker_member() {
        let universe = CompoundType::combinations(1);
        let electric = CompoundType::single(Electric);
        let electric_levitate = CompoundType::new([Electric, Levitate]).unwrap();

        // Electric alone: +2 (Water, Flying) -4 (Electric, Grass, Ground, Dragon)
        assert_eq!(Team::new([electric]).unwrap().offensive_coverage(&universe), -2);
        // The marker is a neutral angle, so nothing resists this member
        let levitating = Team::new([electric_levitate]).unwrap();
        assert_eq!(levitating.offensive_coverage(&universe), 2);

        let team = Team::new([CompoundType::single(Water), electric_levitate]).unwrap();
        assert_eq!(team.offensive_coverage(&universe), 2);
    }

    #[test]
    fn test_resistance_balance() {
        // Water +2, Ground and Steel +1 each; Poison, Flying and Bug -1 each
        let balance = mono(&[Water, Grass]).resistance_balance();
        assert!((balance - (-4.0 / 3.0)).abs() < 1e-5);

        // Lone Normal: weak to Fighting, immune to Ghost
        assert_eq!(mono(&[Normal]).resistance_balance(), -0.5);
    }

    #[test]
    fn test_counter_and_checks_count() {
        let pool = CompoundType::combinations(1);
        let team = mono(&[Water, Grass]);
        // Water counters Fire; Grass counters Water and Ground
        assert_eq!(team.counter_count(&pool), 3);
        // Plus Electric, Ice, Rock and Steel
        assert_eq!(team.checks_count(&pool), 7);
        assert_eq!(team.counter_count(&[]), 0);
        assert!(team.checks_count(&pool) >= team.counter_count(&pool));
    }

    #[test]
    fn test_complement_matrix() {
        let water = CompoundType::single(Water);
        let grass = CompoundType::single(Grass);
        let matrix = mono(&[Water, Grass]).complement_matrix();
        // Water resists Fire and Ice, takes Poison, Flying and Bug neutrally
        assert_eq!(matrix[&water][&grass], 7);
        // Grass resists Electric and Grass
        assert_eq!(matrix[&grass][&water], 4);
        assert!(!matrix[&water].contains_key(&water));

        assert!(mono(&[Water]).complement_matrix().is_empty());
    }

    #[test]
    fn test_display() {
        let team = Team::new([
            CompoundType::new([Ice, Grass]).unwrap(),
            CompoundType::single(Water),
        ])
        .unwrap();
        assert_eq!(team.to_string(), "[Water, Grass/Ice]");
    }
}
