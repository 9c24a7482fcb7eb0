use anyhow::{Context, Result, anyhow};
use coverdex_typing::{Category, CompoundType};

/// Decode the categories of a PokeAPI `pokemon` resource
///
/// Only `types[].type.name` is read. An unknown category name is an error
/// rather than being skipped.
pub fn decode_species_types(body: &str) -> Result<CompoundType> {
    let json: serde_json::Value =
        serde_json::from_str(body).context("Failed to parse species response")?;

    let types = json
        .get("types")
        .and_then(|v| v.as_array())
        .context("Species response missing types")?;

    let categories = types
        .iter()
        .map(|slot| {
            let name = slot
                .get("type")
                .and_then(|t| t.get("name"))
                .and_then(|n| n.as_str())
                .context("Type slot missing name")?;
            Category::from_name(name).ok_or_else(|| anyhow!("Unknown category: {}", name))
        })
        .collect::<Result<Vec<_>>>()?;

    CompoundType::new(categories).context("Species has no categories")
}
