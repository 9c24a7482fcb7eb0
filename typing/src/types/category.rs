//! Type catalog: the fixed set of categories and their canonical order

use std::str::FromStr;

use crate::TypeError;

/// Number of elemental categories (the attacking domain)
pub const ELEMENTAL_COUNT: usize = 18;

/// A single elemental category, or the neutral ability marker
///
/// Declaration order is the canonical order used for iteration, sorting and
/// display of anything keyed by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Category {
    Normal = 0,
    Fire = 1,
    Water = 2,
    Electric = 3,
    Grass = 4,
    Ice = 5,
    Fighting = 6,
    Poison = 7,
    Ground = 8,
    Flying = 9,
    Psychic = 10,
    Bug = 11,
    Rock = 12,
    Ghost = 13,
    Dragon = 14,
    Dark = 15,
    Steel = 16,
    Fairy = 17,
    /// Trait marker for creatures with the Levitate ability.
    ///
    /// Carries no multipliers of its own, as attacker or defender.
    Levitate = 18,
}

impl Category {
    /// The full catalog, in declaration order
    pub const ALL: [Category; 19] = [
        Category::Normal,
        Category::Fire,
        Category::Water,
        Category::Electric,
        Category::Grass,
        Category::Ice,
        Category::Fighting,
        Category::Poison,
        Category::Ground,
        Category::Flying,
        Category::Psychic,
        Category::Bug,
        Category::Rock,
        Category::Ghost,
        Category::Dragon,
        Category::Dark,
        Category::Steel,
        Category::Fairy,
        Category::Levitate,
    ];

    /// The 18 elemental categories
    pub const ELEMENTAL: [Category; ELEMENTAL_COUNT] = [
        Category::Normal,
        Category::Fire,
        Category::Water,
        Category::Electric,
        Category::Grass,
        Category::Ice,
        Category::Fighting,
        Category::Poison,
        Category::Ground,
        Category::Flying,
        Category::Psychic,
        Category::Bug,
        Category::Rock,
        Category::Ghost,
        Category::Dragon,
        Category::Dark,
        Category::Steel,
        Category::Fairy,
    ];

    /// Get the whole catalog as a slice
    pub fn all() -> &'static [Category] {
        &Self::ALL
    }

    /// Get the elemental categories as a slice
    pub fn elemental() -> &'static [Category] {
        &Self::ELEMENTAL
    }

    /// Position in declaration order
    pub fn order_key(self) -> usize {
        self as usize
    }

    /// True for the marker that has no interactions
    pub fn is_neutral_marker(self) -> bool {
        self == Category::Levitate
    }

    /// Parse a category name (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Some(Category::Normal),
            "fire" => Some(Category::Fire),
            "water" => Some(Category::Water),
            "electric" => Some(Category::Electric),
            "grass" => Some(Category::Grass),
            "ice" => Some(Category::Ice),
            "fighting" => Some(Category::Fighting),
            "poison" => Some(Category::Poison),
            "ground" => Some(Category::Ground),
            "flying" => Some(Category::Flying),
            "psychic" => Some(Category::Psychic),
            "bug" => Some(Category::Bug),
            "rock" => Some(Category::Rock),
            "ghost" => Some(Category::Ghost),
            "dragon" => Some(Category::Dragon),
            "dark" => Some(Category::Dark),
            "steel" => Some(Category::Steel),
            "fairy" => Some(Category::Fairy),
            "levitate" => Some(Category::Levitate),
            _ => None,
        }
    }

    /// Convert to canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Normal => "Normal",
            Category::Fire => "Fire",
            Category::Water => "Water",
            Category::Electric => "Electric",
            Category::Grass => "Grass",
            Category::Ice => "Ice",
            Category::Fighting => "Fighting",
            Category::Poison => "Poison",
            Category::Ground => "Ground",
            Category::Flying => "Flying",
            Category::Psychic => "Psychic",
            Category::Bug => "Bug",
            Category::Rock => "Rock",
            Category::Ghost => "Ghost",
            Category::Dragon => "Dragon",
            Category::Dark => "Dark",
            Category::Steel => "Steel",
            Category::Fairy => "Fairy",
            Category::Levitate => "Levitate",
        }
    }
}

impl FromStr for Category {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_name(s).ok_or_else(|| TypeError::UnknownCategory(s.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
