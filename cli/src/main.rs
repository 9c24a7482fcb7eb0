//! coverdex: type coverage and team analysis from the command line

mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coverdex_client::{Client, ClientConfig, most_used};
use coverdex_dataset::Dataset;
use coverdex_team::{TeamEntry, parse_team_file, resolve_entries};
use coverdex_typing::analysis::{enumerate_teams, evaluate, pareto_front, rank_teams};
use coverdex_typing::{CompoundType, Team};
use tracing_subscriber::EnvFilter;

/// Type coverage and team analysis for creature battles
#[derive(Parser, Debug)]
#[command(name = "coverdex", version)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the multipliers a compound type takes, e.g. `grass/ice`
    Defense {
        #[arg(value_name = "TYPE")]
        typing: CompoundType,
    },

    /// Summarize how a compound type hits every enumerated compound type
    Coverage {
        #[arg(value_name = "TYPE")]
        typing: CompoundType,

        /// Largest compound size in the enumerated universe
        #[arg(long, default_value_t = 2)]
        depth: usize,
    },

    /// Analyze a Showdown team export
    Team {
        file: PathBuf,

        /// Resolve species from a CSV export instead of over HTTP
        #[arg(long)]
        dataset: Option<PathBuf>,
    },

    /// Enumerate and rank teams
    Rank {
        /// Members per team
        #[arg(long, default_value_t = 2)]
        size: usize,

        /// Largest compound size when enumerating the candidate pool
        #[arg(long, default_value_t = 1)]
        depth: usize,

        /// Draw candidates from the compound types in a CSV export
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Number of teams to print
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Only keep teams not beaten on every ranking component
        #[arg(long)]
        pareto: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show species usage counts for a format such as `gen9ou`
    Usage {
        format: String,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Candidate pool: every creature in the dataset, or every enumerated compound type
fn candidate_pool(dataset: Option<&Path>, depth: usize) -> Result<Vec<CompoundType>> {
    match dataset {
        Some(dir) => {
            let dataset = Dataset::load(dir)
                .with_context(|| format!("Failed to load dataset from {}", dir.display()))?;
            Ok(dataset.compound_types().into_iter().collect())
        }
        None => Ok(CompoundType::combinations_up_to(depth)),
    }
}

async fn resolve(entries: &[TeamEntry], dataset: Option<&Path>) -> Result<Vec<CompoundType>> {
    match dataset {
        Some(dir) => {
            let dataset = Dataset::load(dir)
                .with_context(|| format!("Failed to load dataset from {}", dir.display()))?;
            Ok(resolve_entries(entries, |species| {
                dataset.species_categories(species)
            })?)
        }
        None => {
            let client = Client::new(ClientConfig::default())?;
            client.resolve_team(entries).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Defense { typing } => {
            print!("{}", report::defense(typing));
        }
        Command::Coverage { typing, depth } => {
            let universe = CompoundType::combinations_up_to(depth);
            print!("{}", report::coverage(typing, &universe));
        }
        Command::Team { file, dataset } => {
            let entries = parse_team_file(&file)
                .with_context(|| format!("Failed to parse team file {}", file.display()))?;
            let members = resolve(&entries, dataset.as_deref()).await?;
            let team = Team::new(members)?;
            let universe = candidate_pool(dataset.as_deref(), 2)?;
            let score = evaluate(&team, &universe);
            print!("{}", report::team(&team, &score, &universe));
        }
        Command::Rank {
            size,
            depth,
            dataset,
            limit,
            pareto,
            json,
        } => {
            let pool = candidate_pool(dataset.as_deref(), depth)?;
            tracing::info!(candidates = pool.len(), size, "Ranking teams");
            let teams = enumerate_teams(pool.iter().copied(), size)?;
            let mut ranked = rank_teams(teams, &pool);
            if pareto {
                ranked = pareto_front(&ranked);
            }
            ranked.truncate(limit);
            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                print!("{}", report::ranking(&ranked));
            }
        }
        Command::Usage { format, limit } => {
            let client = Client::new(ClientConfig::default())?;
            let usage = client.usage_stats(&format).await?;
            for (species, count) in most_used(&usage).into_iter().take(limit) {
                println!("{count:>8}  {species}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use coverdex_typing::Category;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defense() {
        let cli = Cli::try_parse_from(["coverdex", "defense", "grass/ICE"]).unwrap();
        match cli.command {
            Command::Defense { typing } => {
                assert_eq!(typing, CompoundType::new([Category::Grass, Category::Ice]).unwrap())
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["coverdex", "defense", "sound"]).is_err());
    }

    #[test]
    fn test_parse_rank_defaults() {
        let cli = Cli::try_parse_from(["coverdex", "rank", "--pareto", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Rank {
                size,
                depth,
                dataset,
                limit,
                pareto,
                json,
            } => {
                assert_eq!((size, depth, limit), (2, 1, 10));
                assert!(dataset.is_none());
                assert!(pareto);
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_candidate_pool_without_dataset() {
        assert_eq!(candidate_pool(None, 2).unwrap().len(), 171);
    }
}
