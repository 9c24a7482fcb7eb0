use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StatsFile {
    pokemon: BTreeMap<String, UsageEntry>,
}

#[derive(Debug, Deserialize)]
struct UsageEntry {
    count: u64,
}

/// Decode a Smogon stats file into species usage counts
pub fn decode_usage(body: &str) -> Result<BTreeMap<String, u64>> {
    let stats: StatsFile = serde_json::from_str(body).context("Failed to parse usage stats")?;
    Ok(stats
        .pokemon
        .into_iter()
        .map(|(name, entry)| (name, entry.count))
        .collect())
}

/// Species sorted by usage, most used first
pub fn most_used(usage: &BTreeMap<String, u64>) -> Vec<(&str, u64)> {
    let mut sorted: Vec<(&str, u64)> = usage.iter().map(|(n, c)| (n.as_str(), *c)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "battles": 1200,
        "pokemon": {
            "Great Tusk": {"lead": 0.1, "usage": {"raw": 0.3}, "count": 480, "abilities": {}},
            "Kingambit": {"count": 510},
            "Gholdengo": {"count": 480}
        }
    }"#;

    #[test]
    fn test_decode_usage() {
        let usage = decode_usage(BODY).unwrap();
        assert_eq!(usage.len(), 3);
        assert_eq!(usage["Great Tusk"], 480);
        assert_eq!(usage["Kingambit"], 510);
    }

    #[test]
    fn test_most_used_breaks_ties_by_name() {
        let usage = decode_usage(BODY).unwrap();
        assert_eq!(
            most_used(&usage),
            vec![("Kingambit", 510), ("Gholdengo", 480), ("Great Tusk", 480)]
        );
    }

    #[test]
    fn test_decode_usage_rejects_missing_section() {
        assert!(decode_usage(r#"{"battles": 3}"#).is_err());
    }
}
