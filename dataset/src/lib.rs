//! Creature typings from a PokeAPI CSV export.
//!
//! Expected files in the data directory (headers on, extra columns ignored):
//!
//! | File                    | Columns read               |
//! |-------------------------|----------------------------|
//! | `types.csv`             | `id`, `identifier`         |
//! | `abilities.csv`         | `id`, `identifier`         |
//! | `pokemon_types.csv`     | `pokemon_id`, `type_id`    |
//! | `pokemon_abilities.csv` | `pokemon_id`, `ability_id` |
//! | `pokemon.csv`           | `id`, `identifier` (optional) |
//!
//! An ability whose identifier is a category name (`levitate`) becomes an
//! extra category of every creature that can have it.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use coverdex_typing::{Category, CompoundType};
use thiserror::Error;
use tracing::{debug, info};

/// Type identifiers present in the export that are not real categories
const PSEUDO_TYPES: [&str; 2] = ["unknown", "shadow"];

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{file} line {line}: expected integer, found {value:?}")]
    InvalidInteger {
        file: &'static str,
        line: u64,
        value: String,
    },

    #[error("{file} line {line}: missing column {column}")]
    MissingColumn {
        file: &'static str,
        line: u64,
        column: usize,
    },

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Unknown type id: {0}")]
    UnknownTypeId(u32),
}

/// Creature typings keyed by creature id
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    creatures: BTreeMap<u32, BTreeSet<Category>>,
    names: HashMap<String, u32>,
}

impl Dataset {
    /// Load every table from `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();

        let mut types: HashMap<u32, Category> = HashMap::new();
        for (id, identifier) in read_table(dir, "types.csv")? {
            match Category::from_name(&identifier) {
                Some(category) => {
                    types.insert(id, category);
                }
                None if PSEUDO_TYPES.contains(&identifier.as_str()) => {
                    debug!(identifier = %identifier, "Skipping pseudo type");
                }
                None => return Err(DatasetError::UnknownType(identifier)),
            }
        }

        let abilities: HashMap<u32, String> =
            read_table(dir, "abilities.csv")?.into_iter().collect();

        let mut creatures: BTreeMap<u32, BTreeSet<Category>> = BTreeMap::new();
        for (creature_id, type_id) in read_id_pairs(dir, "pokemon_types.csv")? {
            let category = types
                .get(&type_id)
                .ok_or(DatasetError::UnknownTypeId(type_id))?;
            creatures.entry(creature_id).or_default().insert(*category);
        }

        for (creature_id, ability_id) in read_id_pairs(dir, "pokemon_abilities.csv")? {
            if let Some(category) = abilities
                .get(&ability_id)
                .and_then(|identifier| Category::from_name(identifier))
            {
                creatures.entry(creature_id).or_default().insert(category);
            }
        }

        let names_path = dir.join("pokemon.csv");
        let names = if names_path.exists() {
            read_table(dir, "pokemon.csv")?
                .into_iter()
                .map(|(id, identifier)| (identifier.to_lowercase(), id))
                .collect()
        } else {
            HashMap::new()
        };

        info!(
            creatures = creatures.len(),
            types = types.len(),
            named = names.len(),
            "Loaded dataset from {}",
            dir.display()
        );
        Ok(Self { creatures, names })
    }

    /// Number of creatures with at least one category
    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Every distinct compound type among the creatures
    pub fn compound_types(&self) -> BTreeSet<CompoundType> {
        self.creatures
            .values()
            .filter_map(|categories| CompoundType::new(categories.iter().copied()).ok())
            .collect()
    }

    /// Categories of a creature by identifier (`rotom-wash`), case-insensitive
    ///
    /// Requires `pokemon.csv`.
    pub fn species_categories(&self, name: &str) -> Option<Vec<Category>> {
        let id = self.names.get(&name.trim().to_lowercase())?;
        self.creatures
            .get(id)
            .map(|categories| categories.iter().copied().collect())
    }

    pub fn species(&self, name: &str) -> Option<CompoundType> {
        CompoundType::new(self.species_categories(name)?).ok()
    }
}

fn open(dir: &Path, file: &'static str) -> Result<csv::Reader<std::fs::File>, DatasetError> {
    let path = dir.join(file);
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(&path)
        .map_err(|source| DatasetError::Csv { path, source })
}

/// First two columns of every row, the first parsed as an id
fn read_table(dir: &Path, file: &'static str) -> Result<Vec<(u32, String)>, DatasetError> {
    let mut reader = open(dir, file)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| DatasetError::Csv {
            path: dir.join(file),
            source,
        })?;
        let line = record.position().map_or(0, |p| p.line());
        let id = parse_id(&record, 0, file, line)?;
        let value = column(&record, 1, file, line)?.trim().to_string();
        rows.push((id, value));
    }
    debug!(file, rows = rows.len(), "Read table");
    Ok(rows)
}

/// First two columns of every row, both parsed as ids
fn read_id_pairs(dir: &Path, file: &'static str) -> Result<Vec<(u32, u32)>, DatasetError> {
    let mut reader = open(dir, file)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| DatasetError::Csv {
            path: dir.join(file),
            source,
        })?;
        let line = record.position().map_or(0, |p| p.line());
        rows.push((
            parse_id(&record, 0, file, line)?,
            parse_id(&record, 1, file, line)?,
        ));
    }
    debug!(file, rows = rows.len(), "Read table");
    Ok(rows)
}

fn column<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    file: &'static str,
    line: u64,
) -> Result<&'r str, DatasetError> {
    record.get(index).ok_or(DatasetError::MissingColumn {
        file,
        line,
        column: index,
    })
}

fn parse_id(
    record: &csv::StringRecord,
    index: usize,
    file: &'static str,
    line: u64,
) -> Result<u32, DatasetError> {
    let value = column(record, index, file, line)?.trim();
    value.parse().map_err(|_| DatasetError::InvalidInteger {
        file,
        line,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use Category::*;

    const TYPES: &str = "id,identifier,generation_id,damage_class_id
1,normal,1,2
2,fighting,1,2
3,flying,1,2
4,poison,1,2
5,ground,1,2
6,rock,1,2
7,bug,1,2
8,ghost,1,2
9,steel,1,2
10,fire,1,3
11,water,1,3
12,grass,1,3
13,electric,1,3
10001,unknown,2,
10002,shadow,3,
";

    const ABILITIES: &str = "id,identifier,generation_id,is_main_series
26,levitate,3,1
68,swarm,3,1
";

    const POKEMON_TYPES: &str = "pokemon_id,type_id,slot
227,9,1
227,3,2
479,13,1
479,8,2
168,7,1
168,4,2
10009,13,1
10009,11,2
";

    const POKEMON_ABILITIES: &str = "pokemon_id,ability_id,is_hidden,slot
227,51,0,1
479,26,0,1
168,68,0,1
10009,26,0,1
";

    const POKEMON: &str = "id,identifier,species_id,height,weight
227,skarmory,227,17,505
479,rotom,479,3,3
168,ariados,168,11,335
10009,rotom-wash,479,3,3
";

    struct Fixture {
        dir: PathBuf,
    }

    impl Fixture {
        fn new(tag: &str, files: &[(&str, &str)]) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "coverdex-dataset-{}-{}",
                std::process::id(),
                tag
            ));
            std::fs::create_dir_all(&dir).unwrap();
            for (name, contents) in files {
                std::fs::write(dir.join(name), contents).unwrap();
            }
            Self { dir }
        }

        fn standard(tag: &str) -> Self {
            Self::new(
                tag,
                &[
                    ("types.csv", TYPES),
                    ("abilities.csv", ABILITIES),
                    ("pokemon_types.csv", POKEMON_TYPES),
                    ("pokemon_abilities.csv", POKEMON_ABILITIES),
                    ("pokemon.csv", POKEMON),
                ],
            )
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    #[test]
    fn test_load() {
        let fixture = Fixture::standard("load");
        let dataset = Dataset::load(&fixture.dir).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(
            dataset.compound_types(),
            BTreeSet::from([
                CompoundType::new([Steel, Flying]).unwrap(),
                CompoundType::new([Electric, Ghost, Levitate]).unwrap(),
                CompoundType::new([Bug, Poison]).unwrap(),
                CompoundType::new([Electric, Water, Levitate]).unwrap(),
            ])
        );
    }

    #[test]
    fn test_species_lookup() {
        let fixture = Fixture::standard("species");
        let dataset = Dataset::load(&fixture.dir).unwrap();
        assert_eq!(
            dataset.species("Rotom-Wash"),
            Some(CompoundType::new([Electric, Water, Levitate]).unwrap())
        );
        assert_eq!(dataset.species_categories("skarmory"), Some(vec![Flying, Steel]));
        assert_eq!(dataset.species("agumon"), None);
    }

    #[test]
    fn test_names_are_optional() {
        let fixture = Fixture::new(
            "nonames",
            &[
                ("types.csv", TYPES),
                ("abilities.csv", ABILITIES),
                ("pokemon_types.csv", POKEMON_TYPES),
                ("pokemon_abilities.csv", POKEMON_ABILITIES),
            ],
        );
        let dataset = Dataset::load(&fixture.dir).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.species("skarmory"), None);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let fixture = Fixture::new(
            "badtype",
            &[
                ("types.csv", "id,identifier\n1,normal\n19,stellar\n"),
                ("abilities.csv", ABILITIES),
                ("pokemon_types.csv", POKEMON_TYPES),
                ("pokemon_abilities.csv", POKEMON_ABILITIES),
            ],
        );
        let err = Dataset::load(&fixture.dir).unwrap_err();
        assert!(matches!(err, DatasetError::UnknownType(name) if name == "stellar"));
    }

    #[test]
    fn test_unknown_type_id_is_rejected() {
        let fixture = Fixture::new(
            "badid",
            &[
                ("types.csv", "id,identifier\n1,normal\n"),
                ("abilities.csv", ABILITIES),
                ("pokemon_types.csv", "pokemon_id,type_id\n1,2\n"),
                ("pokemon_abilities.csv", POKEMON_ABILITIES),
            ],
        );
        let err = Dataset::load(&fixture.dir).unwrap_err();
        assert!(matches!(err, DatasetError::UnknownTypeId(2)));
    }

    #[test]
    fn test_invalid_integer() {
        let fixture = Fixture::new(
            "badint",
            &[
                ("types.csv", TYPES),
                ("abilities.csv", ABILITIES),
                ("pokemon_types.csv", "pokemon_id,type_id\n1,x\n"),
                ("pokemon_abilities.csv", POKEMON_ABILITIES),
            ],
        );
        let err = Dataset::load(&fixture.dir).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidInteger { file: "pokemon_types.csv", line: 2, .. }
        ));
    }

    #[test]
    fn test_missing_file() {
        let fixture = Fixture::new("missing", &[("types.csv", TYPES)]);
        let err = Dataset::load(&fixture.dir).unwrap_err();
        assert!(matches!(err, DatasetError::Csv { path, .. } if path.ends_with("abilities.csv")));
    }
}
