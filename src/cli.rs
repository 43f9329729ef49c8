use crate::catalog::Catalog;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::render::OutputFormat;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "site-search")]
#[command(about = "Search the site catalog as a visitor would", long_about = None)]
pub struct Cli {
    /// Run one search and exit. Without it, each stdin line is an input event;
    /// lines arriving within the settle delay collapse into a single search.
    pub query: Option<String>,
    /// Catalog file with `[[document]]` tables (default: the built-in site catalog)
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,
    /// Search settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Override the settle delay from the config file
    #[arg(long)]
    pub debounce_ms: Option<u64>,
    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Config file values with command-line overrides applied.
    pub fn search_config(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path)
                .with_context(|| format!("invalid config {}", path.display()))?,
            None => SearchConfig::default(),
        };
        if let Some(ms) = self.debounce_ms {
            config.debounce_ms = ms;
        }
        Ok(config)
    }

    /// The catalog to serve. Any validation failure is fatal.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("refusing to start with catalog {}", path.display())),
            None => Catalog::builtin().context("built-in catalog is invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use std::time::Duration;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["site-search"]);
        check!(cli.query.is_none());
        check!(cli.format == OutputFormat::Text);
        let_assert!(Ok(config) = cli.search_config());
        check!(config.settle_delay() == Duration::from_millis(300));
        let_assert!(Ok(catalog) = cli.load_catalog());
        check!(catalog.len() == 14);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::parse_from(["site-search", "--format", "json", "--debounce-ms", "50", "pdpa"]);
        check!(cli.query.as_deref() == Some("pdpa"));
        check!(cli.format == OutputFormat::Json);
        let_assert!(Ok(config) = cli.search_config());
        check!(config.debounce_ms == 50);
    }

    #[test]
    fn test_missing_catalog_file_is_error() {
        let cli = Cli::parse_from(["site-search", "--catalog", "/nonexistent/catalog.toml"]);
        check!(cli.load_catalog().is_err());
    }
}
