mod species;
mod usage;

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use coverdex_team::TeamEntry;
use coverdex_typing::CompoundType;

pub use species::decode_species_types;
pub use usage::{decode_usage, most_used};

const SPECIES_URL: &str = "https://pokeapi.co/api/v2/pokemon/";
const STATS_URL: &str = "https://pkmn.github.io/smogon/data/stats/";

/// Endpoints and request settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL; the lowercased species name is appended
    pub species_url: String,
    /// Base URL; `{format}.json` is appended
    pub stats_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            species_url: SPECIES_URL.to_string(),
            stats_url: STATS_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for species data and usage statistics
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?
            .error_for_status()
            .with_context(|| format!("Request to {} failed", url))?;
        response.text().await.context("Failed to read response body")
    }

    /// Look up the categories of a species
    pub async fn species_types(&self, name: &str) -> Result<CompoundType> {
        let url = format!("{}{}", self.config.species_url, name.to_lowercase());
        let body = self.get_text(&url).await?;
        decode_species_types(&body).with_context(|| format!("Species {}", name))
    }

    /// Resolve team entries, adding each ability's category
    pub async fn resolve_team(&self, entries: &[TeamEntry]) -> Result<Vec<CompoundType>> {
        let mut resolved = Vec::with_capacity(entries.len());
        for entry in entries {
            let species = self.species_types(&entry.species).await?;
            let compound = entry.compound_type(species.iter())?;
            tracing::info!(species = %entry.species, typing = %compound, "Resolved team member");
            resolved.push(compound);
        }
        Ok(resolved)
    }

    /// Usage counts per species for a format such as `gen9ou`
    pub async fn usage_stats(&self, format: &str) -> Result<BTreeMap<String, u64>> {
        let url = format!("{}{}.json", self.config.stats_url, format);
        let body = self.get_text(&url).await?;
        let usage = decode_usage(&body)?;
        tracing::info!(format, species = usage.len(), "Fetched usage stats");
        Ok(usage)
    }
}
