pub mod cli;
pub mod toml_config;

pub use toml_config::{ApiConfig, AppConfig, ExportConfig, FeaturesConfig, QueryConfig};

#[cfg(feature = "cli")]
use crate::domain::model::EntityType;
#[cfg(feature = "cli")]
use crate::services::infobox::DEFAULT_RELATED_LIMIT;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "kg-explorer")]
#[command(about = "Search, browse and query the health knowledge graph")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[arg(long, global = true, help = "Use in-memory fixtures instead of the API")]
    pub mock: bool,

    #[arg(long, global = true, help = "Directory for CSV and SVG exports")]
    pub output_dir: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search entities by label
    Search {
        query: String,
        #[arg(long = "type")]
        entity_type: Option<EntityType>,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "10")]
        page_size: u32,
    },
    /// Autocomplete; without a query, reads successive inputs from stdin
    Suggest { query: Option<String> },
    /// Show the info panel of an entity
    Entity {
        id: String,
        #[arg(long, help = "Treat the argument as a label instead of an id")]
        by_label: bool,
        #[arg(long, help = "Health metrics year (defaults to the most recent)")]
        year: Option<i32>,
    },
    /// List entities related to an entity
    Related {
        id: String,
        #[arg(long, default_value_t = DEFAULT_RELATED_LIMIT)]
        limit: usize,
    },
    /// Country markers; optionally write an SVG world map
    Map {
        #[arg(long)]
        svg: Option<String>,
        #[arg(long, help = "Search for the country with this ISO3 code")]
        country: Option<String>,
    },
    /// Execute a SPARQL query
    Query {
        sparql: Option<String>,
        #[arg(long, help = "Read the query from a file")]
        file: Option<PathBuf>,
        #[arg(long, default_value = "1")]
        page: usize,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, help = "Export all rows to CSV in the output directory")]
        export: bool,
    },
    /// Check SPARQL syntax on the backend
    Validate { sparql: String },
    /// List sample queries
    Samples,
    /// Show executed queries
    History,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then the TOML file, then `KG_*` variables, then flags.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        config.apply_env_overrides()?;
        self.apply_flags(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_flags(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_ms {
            config.api.timeout_ms = timeout;
        }
        if self.mock {
            config.api.use_mock = true;
        }
        if let Some(dir) = &self.output_dir {
            config.export.output_dir = dir.clone();
        }
    }
}
