//! Showdown team-file parsing.
//!
//! A team export is a sequence of blocks separated by blank lines. The first
//! token of a block's first line is the species; an `Ability: ` line names
//! the ability. Everything else (items, EVs, moves) is ignored.
//!
//! ```text
//! Rotom @ Leftovers
//! Ability: Levitate
//! - Shock Wave
//!
//! Ariados (M) @ Quick Claw
//! Ability: Swarm
//! ```

use std::path::Path;

use coverdex_typing::{Category, CompoundType};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("No categories found for species: {species}")]
    NoCategoriesFound { species: String },

    #[error("Team file contains no members")]
    EmptyTeam,

    #[error("Failed to read team file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lookup failed for species {species}: {message}")]
    Lookup { species: String, message: String },
}

/// One team member as written in the export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub species: String,
    pub ability: Option<String>,
}

impl TeamEntry {
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            ability: None,
        }
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    /// Category granted by the ability, if the ability names one
    pub fn ability_category(&self) -> Option<Category> {
        self.ability
            .as_deref()
            .and_then(|a| Category::from_name(&a.replace(' ', "")))
    }

    /// Combine the species' categories with the ability's category
    pub fn compound_type(
        &self,
        species_categories: impl IntoIterator<Item = Category>,
    ) -> Result<CompoundType, ParseError> {
        let categories = species_categories
            .into_iter()
            .chain(self.ability_category());
        CompoundType::new(categories).map_err(|_| ParseError::NoCategoriesFound {
            species: self.species.clone(),
        })
    }
}

/// Parse the text of a team export
pub fn parse_team(text: &str) -> Result<Vec<TeamEntry>, ParseError> {
    let mut entries: Vec<TeamEntry> = Vec::new();
    let mut in_block = false;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            in_block = false;
            continue;
        }

        if !in_block {
            in_block = true;
            if let Some(species) = line.split_whitespace().next() {
                entries.push(TeamEntry::new(species));
            }
            continue;
        }

        if let Some(ability) = line.strip_prefix("Ability: ")
            && let Some(entry) = entries.last_mut()
        {
            entry.ability = Some(ability.trim().to_string());
        }
    }

    if entries.is_empty() {
        return Err(ParseError::EmptyTeam);
    }
    debug!("Parsed {} team entries", entries.len());
    Ok(entries)
}

/// Read and parse a team export from disk
pub fn parse_team_file(path: impl AsRef<Path>) -> Result<Vec<TeamEntry>, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_team(&text)
}

/// Resolve every entry through a species lookup
///
/// `lookup` returns the species' own categories, or `None` if the species
/// is unknown.
pub fn resolve_entries<F>(entries: &[TeamEntry], mut lookup: F) -> Result<Vec<CompoundType>, ParseError>
where
    F: FnMut(&str) -> Option<Vec<Category>>,
{
    entries
        .iter()
        .map(|entry| {
            let categories = lookup(&entry.species).ok_or_else(|| ParseError::Lookup {
                species: entry.species.clone(),
                message: "unknown species".to_string(),
            })?;
            entry.compound_type(categories)
        })
        .collect()
}
