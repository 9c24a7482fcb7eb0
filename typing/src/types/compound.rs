//! Compound types: a creature's full set of categories

use std::str::FromStr;

use super::category::{Category, ELEMENTAL_COUNT};
use crate::TypeError;

/// A non-empty set of categories
///
/// Stored as a bitmask over declaration order, so member order never
/// matters and duplicates collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Category>", into = "Vec<Category>")
)]
pub struct CompoundType(u32);

impl CompoundType {
    /// Build from an explicit list of categories
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Result<Self, TypeError> {
        let mask = categories
            .into_iter()
            .fold(0u32, |mask, c| mask | Self::bit(c));
        if mask == 0 {
            return Err(TypeError::InvalidArgument(
                "compound type needs at least one category",
            ));
        }
        Ok(Self(mask))
    }

    /// A compound type with a single category
    pub fn single(category: Category) -> Self {
        Self(Self::bit(category))
    }

    /// Parse every name and build the set
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, TypeError> {
        let categories = names
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<Category>, _>>()?;
        Self::new(categories)
    }

    fn bit(category: Category) -> u32 {
        1 << category.order_key()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0 & Self::bit(category) != 0
    }

    /// Number of distinct categories
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Categories in declaration order
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::all().iter().copied().filter(|c| self.contains(*c))
    }

    /// Members that take part in interactions (everything but the marker)
    pub fn elemental(&self) -> impl Iterator<Item = Category> + '_ {
        self.iter().filter(|c| !c.is_neutral_marker())
    }

    /// This type with one more category
    pub fn with(self, category: Category) -> Self {
        Self(self.0 | Self::bit(category))
    }

    pub fn union(self, other: CompoundType) -> Self {
        Self(self.0 | other.0)
    }

    /// Every k-subset of the elemental categories
    ///
    /// Returns an empty list for `k == 0` or `k > 18`.
    pub fn combinations(k: usize) -> Vec<CompoundType> {
        if k == 0 || k > ELEMENTAL_COUNT {
            return Vec::new();
        }
        (1u32..(1 << ELEMENTAL_COUNT))
            .filter(|mask| mask.count_ones() as usize == k)
            .map(CompoundType)
            .collect()
    }

    /// Union of all subsets of size 1 through `max_k`
    pub fn combinations_up_to(max_k: usize) -> Vec<CompoundType> {
        (1..=max_k).flat_map(CompoundType::combinations).collect()
    }
}

impl From<Category> for CompoundType {
    fn from(category: Category) -> Self {
        CompoundType::single(category)
    }
}

impl TryFrom<Vec<Category>> for CompoundType {
    type Error = TypeError;

    fn try_from(categories: Vec<Category>) -> Result<Self, Self::Error> {
        CompoundType::new(categories)
    }
}

impl From<CompoundType> for Vec<Category> {
    fn from(compound: CompoundType) -> Self {
        compound.iter().collect()
    }
}

/// Parses `grass/ice` style notation
impl FromStr for CompoundType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompoundType::from_names(s.split('/').filter(|part| !part.trim().is_empty()))
    }
}

impl std::fmt::Display for CompoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(|c| c.as_str()).collect();
        write!(f, "{}", names.join("/"))
    }
}
